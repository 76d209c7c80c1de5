//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::flow::AuthFlow;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(flow: Arc<AuthFlow<PgUserRepository>>) -> Router {
    auth_router_generic(flow)
}

/// Create a generic Auth router for any repository implementation
///
/// Routes read the caller from request extensions; wrap the final router
/// with [`crate::presentation::middleware::with_session`].
pub fn auth_router_generic<R>(flow: Arc<AuthFlow<R>>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState { flow };

    Router::new()
        .route(
            "/register",
            post(handlers::register::<R>).put(handlers::update_profile::<R>),
        )
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/profile", get(handlers::profile::<R>))
        .with_state(state)
}
