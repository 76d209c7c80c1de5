//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, credential store trait
//! - `application/` - Use cases, tokens, sessions, ownership checks
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, session middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HMAC-signed session tokens in an HttpOnly cookie
//! - Profile read and update (with token reissue)
//! - Ownership guard shared with resource crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, outdated hashes upgraded on login
//! - Unknown email and wrong password are indistinguishable to clients
//! - Invalid or missing tokens resolve to an anonymous caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{
    Action, AuthConfig, AuthFlow, Authorization, Denial, Owned, OwnershipGuard, SessionContext,
    TokenService,
};
pub use domain::{Caller, Identity, UserRepository};
pub use error::{AuthError, AuthResult, LoginFailure};
pub use infra::{MemoryUserRepository, PgUserRepository};
pub use presentation::extract::RequireSession;
pub use presentation::middleware::with_session;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
pub use kernel::id::UserId;

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
