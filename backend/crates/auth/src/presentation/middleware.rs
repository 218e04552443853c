//! Auth Middleware
//!
//! Bearer-token verification for protected routes. Verification is
//! stateless: signature plus expiry, no store lookup per request.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::token::TokenIssuer;
use crate::domain::authorization::Caller;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::AuthError;

/// Verified identity attached to the request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller::authenticated(self.user_id, self.role)
    }
}

/// Build a [`Caller`] from an optionally present identity.
pub fn caller_of(current: Option<&CurrentUser>) -> Caller {
    current.map(CurrentUser::caller).unwrap_or(Caller::Anonymous)
}

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<TokenIssuer>,
}

fn verify_bearer(state: &AuthMiddlewareState, req: &Request<Body>) -> Result<CurrentUser, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthorized)?;

    let claims = state.tokens.verify(token)?;
    let role = claims.role().ok_or(AuthError::Unauthorized)?;

    Ok(CurrentUser {
        user_id: UserId::from_uuid(claims.sub),
        username: claims.username,
        role,
    })
}

/// Middleware that requires a valid bearer token.
///
/// On success the verified [`CurrentUser`] is inserted into the request
/// extensions for handlers downstream.
pub async fn require_auth(
    axum::extract::State(state): axum::extract::State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    match verify_bearer(&state, &req) {
        Ok(current) => {
            req.extensions_mut().insert(current);
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Middleware that attaches an identity when a valid bearer token is
/// present but lets anonymous requests through.
///
/// Used on resource routes where reads are public and the per-action
/// authorization check decides the rest.
pub async fn attach_identity(
    axum::extract::State(state): axum::extract::State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Ok(current) = verify_bearer(&state, &req) {
        req.extensions_mut().insert(current);
    }
    next.run(req).await
}
