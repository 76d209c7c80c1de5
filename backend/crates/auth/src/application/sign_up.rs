//! Sign Up Use Case
//!
//! Registers a new account. No session is issued; the client logs in
//! afterwards.

use std::sync::Arc;

use crate::application::password::PasswordService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, passwords: PasswordService) -> Self {
        Self {
            user_repo,
            passwords,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let raw_password = self.passwords.admit(input.password)?;

        // Fast path only; the store enforces uniqueness on insert
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.passwords.hash(raw_password).await?;
        let user = User::new(name, email, password_hash);

        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user)
    }
}
