//! Caller extractors
//!
//! Read the [`Caller`] placed in request extensions by the session
//! middleware. Without the middleware every request is anonymous.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::entity::identity::{Caller, Identity};
use crate::error::AuthError;

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// Authenticated caller, or a 401 before any body extractor runs
///
/// Place it ahead of `Json<_>` so anonymous requests are rejected without
/// the payload being parsed.
#[derive(Debug, Clone)]
pub struct RequireSession(pub Identity);

impl RequireSession {
    pub fn caller(&self) -> Caller {
        Caller::Authenticated(self.0.clone())
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Caller>() {
            Some(Caller::Authenticated(identity)) => Ok(Self(identity.clone())),
            _ => Err(AuthError::Unauthenticated),
        }
    }
}
