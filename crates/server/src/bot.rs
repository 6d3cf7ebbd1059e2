//! Resolves the bot account the onboarding DMs are sent from.
//!
//! Resolution happens once at startup, in this order: the configured user id,
//! the id remembered in the KV store, an existing bot with the configured
//! username, and finally a newly created bot. Profile and icon updates are
//! best effort and never block startup.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use onboarding_chat::host::{BotSpec, HostApi, HostError};
use onboarding_chat::model::BotPatch;
use onboarding_core::config::BotConfig;
use onboarding_db::{BotIdentityStore, RepositoryError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotIdentity {
    pub user_id: String,
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("bot account lookup or creation failed: {0}")]
    Host(#[from] HostError),
    #[error("bot account id could not be stored: {0}")]
    Store(#[from] RepositoryError),
}

pub async fn resolve_bot_identity(
    config: &BotConfig,
    host: &dyn HostApi,
    store: &BotIdentityStore,
) -> Result<BotIdentity, BotError> {
    let user_id = match configured_or_stored(config, store).await? {
        Some(user_id) => user_id,
        None => {
            let user_id = find_or_create(config, host).await?;
            store.store(&user_id).await?;
            user_id
        }
    };

    info!(event_name = "system.bot.resolved", bot_user_id = %user_id, "bot identity resolved");

    ensure_profile(config, host, &user_id).await;
    ensure_icon(config, host, &user_id).await;

    Ok(BotIdentity { user_id })
}

async fn configured_or_stored(
    config: &BotConfig,
    store: &BotIdentityStore,
) -> Result<Option<String>, BotError> {
    if let Some(user_id) = config.user_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        return Ok(Some(user_id.to_string()));
    }
    Ok(store.load().await?)
}

async fn find_or_create(config: &BotConfig, host: &dyn HostApi) -> Result<String, BotError> {
    let mut spec = BotSpec {
        username: config.username.clone(),
        display_name: config.display_name.clone(),
        description: config.description.clone(),
    };

    match host.get_user_by_username(&spec.username).await? {
        Some(user) if user.is_bot => return Ok(user.id),
        Some(_) => {
            spec.username = suffixed(&spec.username);
        }
        None => {}
    }

    match host.create_bot(&spec).await {
        Ok(bot) => Ok(bot.user_id),
        Err(HostError::Conflict(_)) => {
            spec.username = retry_username(&config.username);
            warn!(
                event_name = "system.bot.username_taken",
                username = %spec.username,
                "bot username taken; retrying with a unique suffix"
            );
            Ok(host.create_bot(&spec).await?.user_id)
        }
        Err(error) => Err(error.into()),
    }
}

fn suffixed(username: &str) -> String {
    format!("{username}-{}", Utc::now().timestamp())
}

/// Never equal to a `suffixed` name, so the second create attempt cannot hit the same conflict.
fn retry_username(username: &str) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{username}-{}-{}", Utc::now().timestamp(), &nonce[..8])
}

async fn ensure_profile(config: &BotConfig, host: &dyn HostApi, user_id: &str) {
    let patch = BotPatch {
        display_name: Some(config.display_name.clone()),
        description: Some(config.description.clone()),
    };
    if let Err(error) = host.patch_bot(user_id, patch).await {
        warn!(
            event_name = "system.bot.patch_failed",
            error = %error,
            "failed to patch bot profile"
        );
    }
}

async fn ensure_icon(config: &BotConfig, host: &dyn HostApi, user_id: &str) {
    let Some(path) = config.icon_path.as_deref() else {
        return;
    };

    let image = match tokio::fs::read(path).await {
        Ok(image) => image,
        Err(error) => {
            debug!(path = %path.display(), error = %error, "bot icon not set; file not readable");
            return;
        }
    };

    if let Err(error) = host.set_profile_image(user_id, image).await {
        warn!(event_name = "system.bot.icon_failed", error = %error, "failed to set bot icon");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use onboarding_chat::model::User;
    use onboarding_chat::InMemoryHost;
    use onboarding_core::config::AppConfig;
    use onboarding_db::{BotIdentityStore, InMemoryKvStore};

    use super::{resolve_bot_identity, retry_username, suffixed};

    fn store() -> BotIdentityStore {
        BotIdentityStore::new(Arc::new(InMemoryKvStore::new()))
    }

    #[tokio::test]
    async fn configured_user_id_wins_without_touching_the_host_accounts() {
        let mut config = AppConfig::default().bot;
        config.user_id = Some("configured-bot".to_string());
        let host = InMemoryHost::new();

        let identity = resolve_bot_identity(&config, &host, &store()).await.expect("resolve");

        assert_eq!(identity.user_id, "configured-bot");
        assert!(host.bots().await.is_empty());
    }

    #[tokio::test]
    async fn stored_id_is_reused() {
        let config = AppConfig::default().bot;
        let store = store();
        store.store("stored-bot").await.expect("seed");
        let host = InMemoryHost::new();

        let identity = resolve_bot_identity(&config, &host, &store).await.expect("resolve");

        assert_eq!(identity.user_id, "stored-bot");
        assert!(host.bots().await.is_empty());
    }

    #[tokio::test]
    async fn creates_and_remembers_the_bot_once() {
        let config = AppConfig::default().bot;
        let store = store();
        let host = InMemoryHost::new();

        let first = resolve_bot_identity(&config, &host, &store).await.expect("first");
        let second = resolve_bot_identity(&config, &host, &store).await.expect("second");

        assert_eq!(first, second);
        assert_eq!(host.bots().await.len(), 1);
        assert_eq!(store.load().await.expect("load"), Some(first.user_id));
    }

    #[tokio::test]
    async fn existing_bot_with_the_username_is_adopted() {
        let config = AppConfig::default().bot;
        let host = InMemoryHost::new();
        host.add_user(User {
            id: "existing-bot".to_string(),
            username: config.username.clone(),
            is_bot: true,
            ..User::default()
        })
        .await;

        let identity = resolve_bot_identity(&config, &host, &store()).await.expect("resolve");

        assert_eq!(identity.user_id, "existing-bot");
    }

    #[tokio::test]
    async fn username_taken_by_a_person_gets_a_suffix() {
        let config = AppConfig::default().bot;
        let host = InMemoryHost::new();
        host.add_user(User {
            id: "human".to_string(),
            username: config.username.clone(),
            ..User::default()
        })
        .await;

        let identity = resolve_bot_identity(&config, &host, &store()).await.expect("resolve");

        let bots = host.bots().await;
        assert_eq!(bots.len(), 1);
        assert_eq!(bots[0].user_id, identity.user_id);
        assert!(bots[0].username.starts_with("eoto-onboarding-bot-"));
    }

    #[tokio::test]
    async fn profile_patch_failure_does_not_block_startup() {
        let mut config = AppConfig::default().bot;
        config.user_id = Some("configured-bot".to_string());
        let host = InMemoryHost::new();
        host.fail("patch_bot").await;

        let identity = resolve_bot_identity(&config, &host, &store()).await;

        assert!(identity.is_ok());
    }

    #[tokio::test]
    async fn suffixed_name_conflict_retries_with_a_different_name() {
        let config = AppConfig::default().bot;
        let host = InMemoryHost::new();
        host.add_user(User {
            id: "human".to_string(),
            username: config.username.clone(),
            ..User::default()
        })
        .await;
        let now = Utc::now().timestamp();
        for (index, taken) in [now, now + 1].into_iter().enumerate() {
            host.add_user(User {
                id: format!("squatter-{index}"),
                username: format!("{}-{taken}", config.username),
                ..User::default()
            })
            .await;
        }

        let identity = resolve_bot_identity(&config, &host, &store()).await.expect("resolve");

        let bots = host.bots().await;
        assert_eq!(bots.len(), 1);
        assert_eq!(bots[0].user_id, identity.user_id);
        assert_ne!(bots[0].username, format!("{}-{now}", config.username));
        assert!(bots[0].username.starts_with("eoto-onboarding-bot-"));
    }

    #[test]
    fn retry_username_differs_from_the_first_suffix() {
        let first = suffixed("eoto-onboarding-bot");
        let retry = retry_username("eoto-onboarding-bot");

        assert_ne!(first, retry);
        assert!(retry.starts_with("eoto-onboarding-bot-"));
        assert_ne!(retry, retry_username("eoto-onboarding-bot"));
    }
}
