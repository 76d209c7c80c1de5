//! Lodging Error Types
//!
//! Lodging-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::{Action, Denial};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::IdParseError;
use thiserror::Error;

/// Lodging-specific result type alias
pub type LodgingResult<T> = Result<T, LodgingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    #[display("place")]
    Place,
    #[display("booking")]
    Booking,
}

/// Lodging-specific error variants
#[derive(Debug, Error)]
pub enum LodgingError {
    /// No valid session on the request
    #[error("Not signed in")]
    Unauthenticated,

    /// Caller does not own the resource
    #[error("Only the owner may {action} this {resource}")]
    Forbidden { action: Action, resource: Resource },

    /// Resource does not exist
    #[error("No such {0}")]
    NotFound(Resource),

    /// Field validation failed
    #[error("{0}")]
    InvalidInput(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LodgingError {
    /// Translate an ownership decision into an error
    pub fn denied(denial: Denial, action: Action, resource: Resource) -> Self {
        match denial {
            Denial::Unauthenticated => LodgingError::Unauthenticated,
            Denial::Forbidden => LodgingError::Forbidden { action, resource },
            Denial::NotFound => LodgingError::NotFound(resource),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        LodgingError::InvalidInput(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LodgingError::Unauthenticated => StatusCode::UNAUTHORIZED,
            LodgingError::Forbidden { .. } => StatusCode::FORBIDDEN,
            LodgingError::NotFound(_) => StatusCode::NOT_FOUND,
            LodgingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LodgingError::Database(_) | LodgingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LodgingError::Unauthenticated => ErrorKind::Unauthorized,
            LodgingError::Forbidden { .. } => ErrorKind::Forbidden,
            LodgingError::NotFound(_) => ErrorKind::NotFound,
            LodgingError::InvalidInput(_) => ErrorKind::BadRequest,
            LodgingError::Database(_) | LodgingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            LodgingError::Database(_) | LodgingError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            LodgingError::Unauthenticated => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LodgingError::Database(e) => {
                tracing::error!(error = %e, "Lodging database error");
            }
            LodgingError::Internal(msg) => {
                tracing::error!(message = %msg, "Lodging internal error");
            }
            LodgingError::Forbidden { action, resource } => {
                tracing::warn!(action = %action, resource = %resource, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Lodging error");
            }
        }
    }
}

impl IntoResponse for LodgingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<IdParseError> for LodgingError {
    fn from(_: IdParseError) -> Self {
        LodgingError::InvalidInput("Invalid identifier".to_string())
    }
}
