use std::sync::Arc;

use super::{KvStore, RepositoryError};

pub const BOT_USER_ID_KEY: &str = "onboarding:bot_user_id";

/// Remembers the bot account id between restarts.
#[derive(Clone)]
pub struct BotIdentityStore {
    kv: Arc<dyn KvStore>,
}

impl BotIdentityStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn load(&self) -> Result<Option<String>, RepositoryError> {
        let Some(raw) = self.kv.get(BOT_USER_ID_KEY).await? else {
            return Ok(None);
        };
        let id = String::from_utf8(raw)
            .map_err(|e| RepositoryError::Decode(format!("bot user id: {e}")))?;
        let id = id.trim();
        Ok((!id.is_empty()).then(|| id.to_string()))
    }

    pub async fn store(&self, user_id: &str) -> Result<(), RepositoryError> {
        self.kv.set(BOT_USER_ID_KEY, user_id.as_bytes().to_vec()).await
    }
}
