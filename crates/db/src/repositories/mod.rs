use async_trait::async_trait;
use thiserror::Error;

use onboarding_core::domain::onboarding::{OnboardingState, UserId};

pub mod bot_identity;
pub mod kv;
pub mod memory;
pub mod onboarding;

pub use bot_identity::BotIdentityStore;
pub use kv::SqlKvStore;
pub use memory::InMemoryKvStore;
pub use onboarding::KvOnboardingStateRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}

/// Opaque byte values keyed by string, scoped to this bot.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OnboardingStateRepository: Send + Sync {
    /// `Ok(None)` means the user was never onboarded. A stored record that
    /// cannot be decoded is an error, not an absent record.
    async fn find(&self, user_id: &UserId) -> Result<Option<OnboardingState>, RepositoryError>;

    /// Persists the state with `last_updated` refreshed and returns what was stored.
    async fn save(&self, state: OnboardingState) -> Result<OnboardingState, RepositoryError>;
}
