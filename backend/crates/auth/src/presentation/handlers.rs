//! HTTP Handlers

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use kernel::page::Page;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{
    CreateUserInput, IssueTokenInput, IssueTokenUseCase, ManageUsersUseCase, MeUpdateInput,
    MeUseCase, SignUpInput, SignUpUseCase, UpdateUserInput,
};
use crate::domain::authorization::{Action, Verb, authorize};
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CreateUserRequest, MeUpdateRequest, SignUpRequest, SignUpResponse, TokenRequest,
    TokenResponse, UpdateUserRequest, UserListQuery, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R, M> AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    /// Build the state, deriving the token issuer from the config secret.
    pub fn new(repo: R, mailer: M, config: AuthConfig) -> Self {
        let tokens = Arc::new(TokenIssuer::new(&config.token_secret, config.token_ttl));
        Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
            tokens,
        }
    }
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            mailer: Arc::clone(&self.mailer),
            config: Arc::clone(&self.config),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.mailer.clone());

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
        })
        .await?;

    Ok(Json(SignUpResponse {
        username: output.username,
        email: output.email,
    }))
}

// ============================================================================
// Token Exchange
// ============================================================================

/// POST /auth/token
pub async fn issue_token<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<TokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = IssueTokenUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(IssueTokenInput {
            username: req.username,
            confirmation_code: req.confirmation_code,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// Self Profile
// ============================================================================

/// GET /users/me
pub async fn me_get<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::SelfProfile, None)?;

    let user = MeUseCase::new(state.repo.clone())
        .get(&current.user_id)
        .await?;

    Ok(Json(user.into()))
}

/// PATCH /users/me
pub async fn me_update<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<MeUpdateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::SelfProfile, None)?;

    let user = MeUseCase::new(state.repo.clone())
        .update(
            &current.user_id,
            MeUpdateInput {
                username: req.username,
                email: req.email,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

// ============================================================================
// User Administration
// ============================================================================

/// GET /users
pub async fn users_list<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<UserListQuery>,
) -> AuthResult<Json<Page<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::AdminUsers(Verb::List), None)?;

    let page = ManageUsersUseCase::new(state.repo.clone())
        .list(query.search.as_deref(), &query.page_params())
        .await?;

    Ok(Json(page.map(UserResponse::from)))
}

/// POST /users
pub async fn users_create<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::AdminUsers(Verb::Create), None)?;

    let user = ManageUsersUseCase::new(state.repo.clone())
        .create(CreateUserInput {
            username: req.username,
            email: req.email,
            role: req.role,
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/{username}
pub async fn user_get<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Path(username): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::AdminUsers(Verb::Retrieve), None)?;

    let user = ManageUsersUseCase::new(state.repo.clone())
        .get(&username)
        .await?;

    Ok(Json(user.into()))
}

/// PATCH /users/{username}
pub async fn user_update<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::AdminUsers(Verb::Update), None)?;

    let user = ManageUsersUseCase::new(state.repo.clone())
        .update(
            &username,
            UpdateUserInput {
                username: req.username,
                email: req.email,
                role: req.role,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{username}
pub async fn user_delete<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Extension(current): Extension<CurrentUser>,
    Path(username): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    authorize(&current.caller(), Action::AdminUsers(Verb::Destroy), None)?;

    ManageUsersUseCase::new(state.repo.clone())
        .delete(&username)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
