//! Request Identity
//!
//! The authenticated principal recovered from a session token, and the
//! per-request [`Caller`] that is either that principal or anonymous.

use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Authenticated principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
}

impl Identity {
    pub fn new(id: UserId, email: Email) -> Self {
        Self { id, email }
    }
}

/// Who is making the current request
///
/// Missing, tampered and expired tokens all resolve to `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    Authenticated(Identity),
    #[default]
    Anonymous,
}

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Caller::Authenticated(identity) => Some(identity),
            Caller::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }

    /// The identity, or `Unauthenticated`
    pub fn require(&self) -> AuthResult<&Identity> {
        self.identity().ok_or(AuthError::Unauthenticated)
    }
}

impl From<Identity> for Caller {
    fn from(identity: Identity) -> Self {
        Caller::Authenticated(identity)
    }
}
