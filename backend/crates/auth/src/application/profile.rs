//! Profile Use Case
//!
//! Returns the stored record for the caller's token identity.

use std::sync::Arc;

use crate::domain::entity::{identity::Caller, user::User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, caller: &Caller) -> AuthResult<User> {
        let identity = caller.require()?;

        self.user_repo
            .find_by_id(&identity.id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
