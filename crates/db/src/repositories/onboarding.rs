use std::sync::Arc;

use chrono::Utc;

use onboarding_core::domain::onboarding::{OnboardingState, UserId};

use super::{KvStore, OnboardingStateRepository, RepositoryError};

const KEY_PREFIX: &str = "onboarding:user:";

pub fn state_key(user_id: &UserId) -> String {
    format!("{KEY_PREFIX}{user_id}")
}

/// Onboarding records stored as JSON documents in the bot's KV store.
#[derive(Clone)]
pub struct KvOnboardingStateRepository {
    kv: Arc<dyn KvStore>,
}

impl KvOnboardingStateRepository {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait::async_trait]
impl OnboardingStateRepository for KvOnboardingStateRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<OnboardingState>, RepositoryError> {
        let Some(raw) = self.kv.get(&state_key(user_id)).await? else {
            return Ok(None);
        };

        let state: OnboardingState = serde_json::from_slice(&raw).map_err(|e| {
            RepositoryError::Decode(format!("onboarding state for `{user_id}`: {e}"))
        })?;
        Ok(Some(state))
    }

    async fn save(&self, mut state: OnboardingState) -> Result<OnboardingState, RepositoryError> {
        state.stamp(Utc::now());
        let encoded =
            serde_json::to_vec(&state).map_err(|e| RepositoryError::Encode(e.to_string()))?;
        self.kv.set(&state_key(&state.user_id), encoded).await?;
        Ok(state)
    }
}
