use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Token, User};

/// Storage for user identities.
///
/// Implementations must reject a second user with the same email atomically
/// with [`UserError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Exact, case-sensitive match.
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// Storage for bearer tokens, at most one per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the user's existing token, or stores one with `candidate_key`.
    ///
    /// Concurrent calls for the same user must all observe the same token.
    async fn get_or_create(&self, user_id: Uuid, candidate_key: String) -> UserResult<Token>;

    async fn get_by_key(&self, key: &str) -> UserResult<Option<Token>>;

    /// Returns `false` when the user had no token.
    async fn delete_for_user(&self, user_id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory implementation of TokenRepository, keyed by owning user.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, Token>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn get_or_create(&self, user_id: Uuid, candidate_key: String) -> UserResult<Token> {
        let mut tokens = self.tokens.write().await;

        if let Some(existing) = tokens.get(&user_id) {
            return Ok(existing.clone());
        }
        if tokens.values().any(|t| t.key == candidate_key) {
            return Err(UserError::Internal("Token key collision".to_string()));
        }

        let token = Token::new(user_id, candidate_key);
        tokens.insert(user_id, token.clone());
        tracing::info!(user_id = %user_id, "Issued token");
        Ok(token)
    }

    async fn get_by_key(&self, key: &str) -> UserResult<Option<Token>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.key == key).cloned())
    }

    async fn delete_for_user(&self, user_id: Uuid) -> UserResult<bool> {
        let removed = self.tokens.write().await.remove(&user_id).is_some();
        if removed {
            tracing::info!(user_id = %user_id, "Revoked token");
        }
        Ok(removed)
    }
}
