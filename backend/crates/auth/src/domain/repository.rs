//! Repository Traits
//!
//! Credential store interface. Implementations live in the infra layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store
///
/// Email uniqueness is enforced here, not by callers: `create` and `save`
/// fail with `AuthError::EmailTaken` when another account holds the email,
/// even under concurrent registration.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Persist changes to an existing user
    async fn save(&self, user: &User) -> AuthResult<()>;
}
