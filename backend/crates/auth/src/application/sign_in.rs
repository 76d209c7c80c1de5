//! Sign In Use Case
//!
//! Checks credentials and issues a session token.

use std::sync::Arc;

use crate::application::password::{PasswordService, Verification};
use crate::application::token::{SessionToken, TokenClaims, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult, LoginFailure};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub user: User,
    pub token: SessionToken,
}

pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl<U> SignInUseCase<U>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let raw_password = RawPassword::for_login(input.password);

        // A malformed email cannot belong to any account
        let user = match Email::new(&input.email) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(mut user) = user else {
            self.passwords.verify_decoy(raw_password).await?;
            return Err(AuthError::InvalidCredentials(LoginFailure::UnknownEmail));
        };

        match self.passwords.verify(raw_password, &user.password_hash).await? {
            Verification::Mismatch => {
                return Err(AuthError::InvalidCredentials(LoginFailure::BadPassword));
            }
            Verification::Match { upgraded: None } => {}
            Verification::Match {
                upgraded: Some(password_hash),
            } => {
                user.set_password(password_hash);
                self.user_repo.save(&user).await?;
                tracing::info!(user_id = %user.user_id, "Password hash upgraded");
            }
        }

        let token = self
            .tokens
            .issue(&TokenClaims::new(user.user_id, user.email.as_str()))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { user, token })
    }
}
