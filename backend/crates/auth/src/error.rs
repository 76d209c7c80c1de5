//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Why a login was refused
///
/// Only ever logged; clients see the same response for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoginFailure {
    #[display("unknown email")]
    UnknownEmail,
    #[display("bad password")]
    BadPassword,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another account already uses this email
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials(LoginFailure),

    /// No valid session on the request
    #[error("Not signed in")]
    Unauthenticated,

    /// Token identity no longer maps to a stored user
    #[error("User not found")]
    UserNotFound,

    /// Malformed name or email
    #[error("{0}")]
    InvalidInput(String),

    /// Password rejected by policy
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials(_) | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials(_) | AuthError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            AuthError::Unauthenticated => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials(reason) => {
                tracing::warn!(reason = %reason, "Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                AuthError::InvalidInput(err.message().to_string())
            }
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
