use std::sync::Arc;

use argon2::Argon2;
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;
use tokio::task;

use super::password::{hash_password, verify_password};
use crate::models::user::User;

pub const DEMO_EMAIL: &str = "demo@codegenie.dev";
pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_PASSWORD: &str = "Demo2024!";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    AlreadyExists,
    #[error("failed to hash password: {0}")]
    Hashing(String),
    #[error("password task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// Account storage keyed by email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<(), StoreError>;

    /// Returns the user only when `password` matches the stored hash.
    async fn verify(&self, email: &str, password: &str) -> Result<Option<User>, StoreError>;
}

/// Process-lifetime store. Accounts are lost on restart.
#[derive(Clone)]
pub struct InMemoryCredentialStore {
    users: Arc<DashMap<String, User>>,
    hasher: Argon2<'static>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_hasher(Argon2::default())
    }

    pub fn with_hasher(hasher: Argon2<'static>) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            hasher,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::with_hasher(super::password::test_hasher())
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(&self, email: &str, name: &str, password: &str) -> Result<(), StoreError> {
        // Skip the hashing work for emails that are obviously taken.
        if self.users.contains_key(email) {
            return Err(StoreError::AlreadyExists);
        }

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let password_hash = task::spawn_blocking(move || hash_password(&hasher, &password))
            .await?
            .map_err(StoreError::Hashing)?;

        match self.users.entry(email.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(User {
                    email: email.to_owned(),
                    name: name.to_owned(),
                    password_hash,
                });
                Ok(())
            }
        }
    }

    async fn verify(&self, email: &str, password: &str) -> Result<Option<User>, StoreError> {
        let Some(user) = self.users.get(email).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let hash = user.password_hash.clone();
        let matches = task::spawn_blocking(move || verify_password(&hasher, &password, &hash)).await?;

        Ok(matches.then_some(user))
    }
}

/// Register the demo account unless it already exists.
pub async fn seed_demo_user(store: &dyn CredentialStore) -> Result<(), StoreError> {
    match store.register(DEMO_EMAIL, DEMO_NAME, DEMO_PASSWORD).await {
        Ok(()) => {
            tracing::info!("Seeded demo account {}", DEMO_EMAIL);
            Ok(())
        }
        Err(StoreError::AlreadyExists) => Ok(()),
        Err(err) => Err(err),
    }
}
