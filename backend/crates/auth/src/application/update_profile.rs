//! Update Profile Use Case
//!
//! Changes the caller's name, email and optionally password, then issues a
//! fresh token carrying the new email.

use std::sync::Arc;

use crate::application::password::PasswordService;
use crate::application::token::{SessionToken, TokenClaims, TokenService};
use crate::domain::entity::{identity::Caller, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub struct UpdateProfileInput {
    pub name: String,
    pub email: String,
    /// `None` or empty keeps the current password
    pub password: Option<String>,
}

pub struct UpdateProfileOutput {
    pub user: User,
    pub token: SessionToken,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            passwords,
            tokens,
        }
    }

    pub async fn execute(
        &self,
        caller: &Caller,
        input: UpdateProfileInput,
    ) -> AuthResult<UpdateProfileOutput> {
        let identity = caller.require()?;

        let name = UserName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let new_password = input
            .password
            .filter(|password| !password.is_empty())
            .map(|password| self.passwords.admit(password))
            .transpose()?;

        let mut user = self
            .user_repo
            .find_by_id(&identity.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if email != user.email {
            let holder = self.user_repo.find_by_email(&email).await?;
            if holder.is_some_and(|other| other.user_id != user.user_id) {
                return Err(AuthError::EmailTaken);
            }
        }

        user.update_profile(name, email);
        if let Some(raw_password) = new_password {
            let password_hash = self.passwords.hash(raw_password).await?;
            user.set_password(password_hash);
        }

        self.user_repo.save(&user).await?;

        let token = self
            .tokens
            .issue(&TokenClaims::new(user.user_id, user.email.as_str()))?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(UpdateProfileOutput { user, token })
    }
}
