//! Catalog Router
//!
//! One router covering categories, genres, titles, reviews, and
//! comments. Reads are public; the `attach_identity` layer decodes a
//! bearer token when one is present and handlers authorize per action.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get},
};
use std::sync::Arc;

use auth::TokenIssuer;
use auth::middleware::{AuthMiddlewareState, attach_identity};

use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState, CatalogStore};

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, tokens: Arc<TokenIssuer>) -> Router {
    catalog_router_generic(
        CatalogAppState {
            repo: Arc::new(repo),
        },
        tokens,
    )
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<C: CatalogStore>(
    state: CatalogAppState<C>,
    tokens: Arc<TokenIssuer>,
) -> Router {
    let mw_state = AuthMiddlewareState { tokens };

    Router::new()
        .route(
            "/categories",
            get(handlers::categories_list::<C>).post(handlers::categories_create::<C>),
        )
        .route("/categories/{slug}", delete(handlers::category_delete::<C>))
        .route(
            "/genres",
            get(handlers::genres_list::<C>).post(handlers::genres_create::<C>),
        )
        .route("/genres/{slug}", delete(handlers::genre_delete::<C>))
        .route(
            "/titles",
            get(handlers::titles_list::<C>).post(handlers::titles_create::<C>),
        )
        .route(
            "/titles/{title_id}",
            get(handlers::title_get::<C>)
                .patch(handlers::title_update::<C>)
                .delete(handlers::title_delete::<C>),
        )
        .route(
            "/titles/{title_id}/reviews",
            get(handlers::reviews_list::<C>).post(handlers::reviews_create::<C>),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}",
            get(handlers::review_get::<C>)
                .patch(handlers::review_update::<C>)
                .delete(handlers::review_delete::<C>),
        )
        .route(
            "/reviews/{review_id}/comments",
            get(handlers::comments_list::<C>).post(handlers::comments_create::<C>),
        )
        .route(
            "/reviews/{review_id}/comments/{comment_id}",
            get(handlers::comment_get::<C>)
                .patch(handlers::comment_update::<C>)
                .delete(handlers::comment_delete::<C>),
        )
        .route_layer(from_fn_with_state(mw_state, attach_identity))
        .with_state(state)
}
