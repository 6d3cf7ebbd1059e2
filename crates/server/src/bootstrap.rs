use std::sync::Arc;
use std::time::Duration;

use onboarding_chat::{HostApi, HostError, MattermostClient};
use onboarding_core::config::AppConfig;
use onboarding_core::signature::{SignatureError, SignatureRenderer};
use onboarding_db::{
    connect_with_settings, migrations, BotIdentityStore, DbPool, KvOnboardingStateRepository,
    KvStore, SqlKvStore,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::bot::{resolve_bot_identity, BotError};
use crate::routes::AppState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("host api client could not be built: {0}")]
    Host(#[source] HostError),
    #[error(transparent)]
    Templates(#[from] SignatureError),
    #[error(transparent)]
    Bot(#[from] BotError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let client = MattermostClient::new(
        config.host.api_url.clone(),
        config.host.access_token.clone(),
        Duration::from_secs(config.host.timeout_secs),
    )
    .map_err(BootstrapError::Host)?;

    bootstrap_with_host(config, Arc::new(client)).await
}

/// Startup with an already-built host API; the seam tests use to avoid the network.
pub async fn bootstrap_with_host(
    config: AppConfig,
    host: Arc<dyn HostApi>,
) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let kv: Arc<dyn KvStore> = Arc::new(SqlKvStore::new(db_pool.clone()));
    let renderer = SignatureRenderer::new()?;
    let bot = resolve_bot_identity(&config.bot, host.as_ref(), &BotIdentityStore::new(kv.clone()))
        .await?;

    let callback_base_url = config.plugin.callback_base_url();
    if callback_base_url.is_none() {
        warn!(
            event_name = "system.bootstrap.no_site_url",
            correlation_id = "bootstrap",
            "plugin.site_url is not set; checklist buttons and the signature dialog are disabled"
        );
    }

    let state = AppState {
        host,
        states: Arc::new(KvOnboardingStateRepository::new(kv)),
        renderer: Arc::new(renderer),
        bot,
        language: config.plugin.language,
        callback_base_url,
        mount_path: config.plugin.mount_path(),
    };

    Ok(Application { config, db_pool, state })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use onboarding_chat::InMemoryHost;
    use onboarding_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use onboarding_core::i18n::Language;

    use crate::bootstrap::{bootstrap_with_host, BootstrapError};

    fn overrides() -> ConfigOverrides {
        ConfigOverrides {
            database_url: Some("sqlite::memory:".to_string()),
            host_access_token: Some("test-token".to_string()),
            ..ConfigOverrides::default()
        }
    }

    fn config(overrides: ConfigOverrides) -> AppConfig {
        AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() }).expect("config")
    }

    #[tokio::test]
    async fn bootstrap_reports_unreachable_database() {
        let result = bootstrap_with_host(
            config(ConfigOverrides {
                database_url: Some("sqlite:///nonexistent-dir/onboarding.db".to_string()),
                ..overrides()
            }),
            Arc::new(InMemoryHost::new()),
        )
        .await;

        assert!(matches!(result, Err(BootstrapError::DatabaseConnect(_))));
    }

    #[tokio::test]
    async fn bootstrap_migrates_resolves_bot_and_wires_state() {
        let host = Arc::new(InMemoryHost::new());
        let app = bootstrap_with_host(
            config(ConfigOverrides {
                site_url: Some("https://chat.example.org/".to_string()),
                language: Some(Language::En),
                ..overrides()
            }),
            host.clone(),
        )
        .await
        .expect("bootstrap");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'plugin_kv'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("sqlite_master");
        assert_eq!(table_count, 1);

        let bots = host.bots().await;
        assert_eq!(bots.len(), 1);
        assert_eq!(app.state.bot.user_id, bots[0].user_id);
        assert_eq!(app.state.language, Language::En);
        assert_eq!(
            app.state.callback_base_url.as_deref(),
            Some("https://chat.example.org/plugins/com.akinlosotutech.onboardinghelper")
        );
        assert_eq!(app.state.mount_path, "/plugins/com.akinlosotutech.onboardinghelper");

        app.db_pool.close().await;
    }

    #[tokio::test]
    async fn configured_bot_id_skips_account_creation() {
        let host = Arc::new(InMemoryHost::new());
        let app = bootstrap_with_host(
            config(ConfigOverrides { bot_user_id: Some("known-bot".to_string()), ..overrides() }),
            host.clone(),
        )
        .await
        .expect("bootstrap");

        assert_eq!(app.state.bot.user_id, "known-bot");
        assert!(host.bots().await.is_empty());
        assert_eq!(app.state.callback_base_url, None);
    }
}
