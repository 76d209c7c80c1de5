//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::to_header_value;

use crate::application::flow::AuthFlow;
use crate::application::token::SessionToken;
use crate::application::{SignInInput, SignUpInput, UpdateProfileInput};
use crate::domain::entity::identity::Caller;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::presentation::extract::RequireSession;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository,
{
    pub flow: Arc<AuthFlow<R>>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            flow: self.flow.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state
        .flow
        .register(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /register
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    session: RequireSession,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let output = state
        .flow
        .update_profile(
            &session.caller(),
            UpdateProfileInput {
                name: req.name,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    let cookie = session_cookie(&state, &output.token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let output = state
        .flow
        .login(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie(&state, &output.token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

/// POST /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, caller: Caller) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
{
    let token = state.flow.logout(&caller);
    let cookie = session_cookie(&state, &token);

    ([(header::SET_COOKIE, cookie)], Json(true))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = state.flow.profile(&caller).await?;
    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn session_cookie<R>(state: &AuthAppState<R>, token: &SessionToken) -> axum::http::HeaderValue
where
    R: UserRepository,
{
    let cookie_config = &state.flow.config().cookie;
    let cookie = if token.is_cleared() {
        cookie_config.build_clear_cookie()
    } else {
        cookie_config.build_set_cookie(token.as_str())
    };
    to_header_value(&cookie)
}
