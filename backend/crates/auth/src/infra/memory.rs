//! In-memory credential store
//!
//! For tests and local runs without a database. The email check and the
//! write happen under one lock, so concurrent registrations with the same
//! email cannot both succeed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn email_held_by_other(users: &HashMap<UserId, User>, email: &Email, user_id: &UserId) -> bool {
    users
        .values()
        .any(|user| &user.email == email && &user.user_id != user_id)
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if email_held_by_other(&users, &user.email, &user.user_id) {
            return Err(AuthError::EmailTaken);
        }
        if users.contains_key(&user.user_id) {
            return Err(AuthError::Internal(format!(
                "User {} already exists",
                user.user_id
            )));
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if email_held_by_other(&users, &user.email, &user.user_id) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }
}
