//! Auth Flow
//!
//! One entry point per account operation, wired from a credential store
//! and an [`AuthConfig`]. Handlers and tests go through this rather than
//! assembling use cases themselves.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::password::PasswordService;
use crate::application::profile::ProfileUseCase;
use crate::application::session::SessionContext;
use crate::application::sign_in::{SignInInput, SignInOutput, SignInUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::token::{SessionToken, TokenService};
use crate::application::update_profile::{
    UpdateProfileInput, UpdateProfileOutput, UpdateProfileUseCase,
};
use crate::domain::entity::{identity::Caller, user::User};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub struct AuthFlow<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> AuthFlow<U>
where
    U: UserRepository,
{
    /// Fails on a missing session secret or invalid work factor
    pub fn new(user_repo: Arc<U>, config: AuthConfig) -> AuthResult<Self> {
        let tokens = TokenService::new(&config.session_secret, config.token_ttl)?;
        let passwords = PasswordService::from_config(&config)?;

        Ok(Self {
            user_repo,
            passwords,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext::new(self.tokens.clone(), self.config.cookie.name.clone())
    }

    pub async fn register(&self, input: SignUpInput) -> AuthResult<User> {
        SignUpUseCase::new(self.user_repo.clone(), self.passwords.clone())
            .execute(input)
            .await
    }

    pub async fn login(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        SignInUseCase::new(
            self.user_repo.clone(),
            self.passwords.clone(),
            self.tokens.clone(),
        )
        .execute(input)
        .await
    }

    pub fn logout(&self, caller: &Caller) -> SessionToken {
        SignOutUseCase::new().execute(caller)
    }

    pub async fn profile(&self, caller: &Caller) -> AuthResult<User> {
        ProfileUseCase::new(self.user_repo.clone())
            .execute(caller)
            .await
    }

    pub async fn update_profile(
        &self,
        caller: &Caller,
        input: UpdateProfileInput,
    ) -> AuthResult<UpdateProfileOutput> {
        UpdateProfileUseCase::new(
            self.user_repo.clone(),
            self.passwords.clone(),
            self.tokens.clone(),
        )
        .execute(caller, input)
        .await
    }
}
