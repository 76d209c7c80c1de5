//! Sign Out Use Case
//!
//! Tokens are stateless, so signing out only hands the client an empty
//! token to overwrite its copy with. Always succeeds.

use crate::application::token::SessionToken;
use crate::domain::entity::identity::Caller;

#[derive(Default)]
pub struct SignOutUseCase;

impl SignOutUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, caller: &Caller) -> SessionToken {
        match caller.identity() {
            Some(identity) => tracing::info!(user_id = %identity.id, "User signed out"),
            None => tracing::debug!("Sign out without a session"),
        }

        SessionToken::cleared()
    }
}
