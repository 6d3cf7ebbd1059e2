use chrono::Utc;
use sqlx::Row;

use super::{KvStore, RepositoryError};
use crate::DbPool;

pub struct SqlKvStore {
    pool: DbPool,
}

impl SqlKvStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KvStore for SqlKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM plugin_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => {
                let value: Vec<u8> =
                    r.try_get("value").map_err(|e| RepositoryError::Decode(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO plugin_kv (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqlKvStore;
    use crate::migrations::run_pending;
    use crate::repositories::KvStore;
    use crate::{connect_with_settings, DbPool};

    async fn setup() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = SqlKvStore::new(setup().await);
        assert_eq!(store.get("onboarding:user:nobody").await.expect("get"), None);
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let store = SqlKvStore::new(setup().await);

        store.set("k", b"first".to_vec()).await.expect("first set");
        store.set("k", b"second".to_vec()).await.expect("second set");

        assert_eq!(store.get("k").await.expect("get"), Some(b"second".to_vec()));
    }
}
