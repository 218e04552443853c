//! Auth Routers
//!
//! `/auth` carries the public sign-up and token-exchange routes.
//! `/users` carries self-service and administration; every route there
//! requires a bearer token, with per-action authorization inside the
//! handlers.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::infra::mail::TracingMailer;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the `/auth` router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(AuthAppState::new(repo, TracingMailer, config))
}

/// Create the `/users` router with PostgreSQL repository
pub fn users_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    users_router_generic(AuthAppState::new(repo, TracingMailer, config))
}

/// Create a generic `/auth` router for any repository implementation
pub fn auth_router_generic<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M>))
        .route("/token", post(handlers::issue_token::<R, M>))
        .with_state(state)
}

/// Create a generic `/users` router for any repository implementation
pub fn users_router_generic<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let mw_state = AuthMiddlewareState {
        tokens: state.tokens.clone(),
    };

    Router::new()
        .route(
            "/me",
            get(handlers::me_get::<R, M>).patch(handlers::me_update::<R, M>),
        )
        .route(
            "/",
            get(handlers::users_list::<R, M>).post(handlers::users_create::<R, M>),
        )
        .route(
            "/{username}",
            get(handlers::user_get::<R, M>)
                .patch(handlers::user_update::<R, M>)
                .delete(handlers::user_delete::<R, M>),
        )
        .route_layer(from_fn_with_state(mw_state, require_auth))
        .with_state(state)
}
