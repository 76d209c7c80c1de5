//! Session Context
//!
//! Resolves the caller of a request from its session cookie.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::extract_cookie;

use crate::application::token::TokenService;
use crate::domain::entity::identity::Caller;

#[derive(Debug, Clone)]
pub struct SessionContext {
    tokens: Arc<TokenService>,
    cookie_name: String,
}

impl SessionContext {
    pub fn new(tokens: Arc<TokenService>, cookie_name: impl Into<String>) -> Self {
        Self {
            tokens,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Never fails: anything short of a valid token is `Anonymous`
    pub fn resolve(&self, headers: &HeaderMap) -> Caller {
        let Some(token) = extract_cookie(headers, &self.cookie_name) else {
            return Caller::Anonymous;
        };
        if token.is_empty() {
            return Caller::Anonymous;
        }

        match self.tokens.verify(&token) {
            Ok(claims) => Caller::Authenticated(claims.into_identity()),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                Caller::Anonymous
            }
        }
    }
}
