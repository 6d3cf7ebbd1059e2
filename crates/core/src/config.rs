use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;

pub const DEFAULT_PLUGIN_ID: &str = "com.akinlosotutech.onboardinghelper";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub host: HostConfig,
    pub plugin: PluginConfig,
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

/// Connection to the chat host's REST API.
#[derive(Clone, Debug)]
pub struct HostConfig {
    pub api_url: String,
    pub access_token: SecretString,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct PluginConfig {
    /// Public base URL this server is reached at, directly or through a proxy.
    /// Button and dialog callbacks go to `<site_url>/plugins/<plugin_id>/...`.
    pub site_url: Option<String>,
    pub plugin_id: String,
    pub language: Language,
}

#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Skips lookup and creation when the bot account is already known.
    pub user_id: Option<String>,
    pub username: String,
    pub display_name: String,
    pub description: String,
    pub icon_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub host_api_url: Option<String>,
    pub host_access_token: Option<String>,
    pub site_url: Option<String>,
    pub language: Option<Language>,
    pub bot_user_id: Option<String>,
    pub server_port: Option<u16>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://onboarding.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            host: HostConfig {
                api_url: "http://localhost:8065/api/v4".to_string(),
                access_token: String::new().into(),
                timeout_secs: 15,
            },
            plugin: PluginConfig {
                site_url: None,
                plugin_id: DEFAULT_PLUGIN_ID.to_string(),
                language: Language::De,
            },
            bot: BotConfig {
                user_id: None,
                username: "eoto-onboarding-bot".to_string(),
                display_name: "EOTO Onboarding Helper".to_string(),
                description: "Guides new teammates through onboarding.".to_string(),
                icon_path: None,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl PluginConfig {
    /// Path the callback routes are mounted under, `/plugins/<plugin_id>`.
    pub fn mount_path(&self) -> String {
        format!("/plugins/{}", self.plugin_id.trim())
    }

    /// `<site_url>/plugins/<plugin_id>`, or `None` when no site URL is set.
    pub fn callback_base_url(&self) -> Option<String> {
        let site_url = self.site_url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;
        Some(format!("{}{}", site_url.trim_end_matches('/'), self.mount_path()))
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from("onboarding.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(host) = patch.host {
            if let Some(api_url) = host.api_url {
                self.host.api_url = api_url;
            }
            if let Some(access_token) = host.access_token {
                self.host.access_token = secret_value(access_token);
            }
            if let Some(timeout_secs) = host.timeout_secs {
                self.host.timeout_secs = timeout_secs;
            }
        }

        if let Some(plugin) = patch.plugin {
            if let Some(site_url) = plugin.site_url {
                self.plugin.site_url = Some(site_url);
            }
            if let Some(plugin_id) = plugin.plugin_id {
                self.plugin.plugin_id = plugin_id;
            }
            if let Some(language) = plugin.language {
                self.plugin.language = Language::from_setting(&language);
            }
        }

        if let Some(bot) = patch.bot {
            if let Some(user_id) = bot.user_id {
                self.bot.user_id = Some(user_id);
            }
            if let Some(username) = bot.username {
                self.bot.username = username;
            }
            if let Some(display_name) = bot.display_name {
                self.bot.display_name = display_name;
            }
            if let Some(description) = bot.description {
                self.bot.description = description;
            }
            if let Some(icon_path) = bot.icon_path {
                self.bot.icon_path = Some(icon_path);
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("ONBOARDING_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("ONBOARDING_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections =
                parse_u32("ONBOARDING_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("ONBOARDING_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("ONBOARDING_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("ONBOARDING_HOST_API_URL") {
            self.host.api_url = value;
        }
        if let Some(value) = read_env("ONBOARDING_HOST_ACCESS_TOKEN") {
            self.host.access_token = secret_value(value);
        }
        if let Some(value) = read_env("ONBOARDING_HOST_TIMEOUT_SECS") {
            self.host.timeout_secs = parse_u64("ONBOARDING_HOST_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("ONBOARDING_PLUGIN_SITE_URL") {
            self.plugin.site_url = Some(value);
        }
        if let Some(value) = read_env("ONBOARDING_PLUGIN_ID") {
            self.plugin.plugin_id = value;
        }
        if let Some(value) = read_env("ONBOARDING_LANGUAGE") {
            self.plugin.language = Language::from_setting(&value);
        }

        if let Some(value) = read_env("ONBOARDING_BOT_USER_ID") {
            self.bot.user_id = Some(value);
        }
        if let Some(value) = read_env("ONBOARDING_BOT_USERNAME") {
            self.bot.username = value;
        }
        if let Some(value) = read_env("ONBOARDING_BOT_DISPLAY_NAME") {
            self.bot.display_name = value;
        }
        if let Some(value) = read_env("ONBOARDING_BOT_ICON_PATH") {
            self.bot.icon_path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("ONBOARDING_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("ONBOARDING_SERVER_PORT") {
            self.server.port = parse_u16("ONBOARDING_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("ONBOARDING_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("ONBOARDING_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("ONBOARDING_LOGGING_LEVEL").or_else(|| read_env("ONBOARDING_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("ONBOARDING_LOGGING_FORMAT").or_else(|| read_env("ONBOARDING_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(api_url) = overrides.host_api_url {
            self.host.api_url = api_url;
        }
        if let Some(access_token) = overrides.host_access_token {
            self.host.access_token = secret_value(access_token);
        }
        if let Some(site_url) = overrides.site_url {
            self.plugin.site_url = Some(site_url);
        }
        if let Some(language) = overrides.language {
            self.plugin.language = language;
        }
        if let Some(user_id) = overrides.bot_user_id {
            self.bot.user_id = Some(user_id);
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_host(&self.host)?;
        validate_plugin(&self.plugin)?;
        validate_bot(&self.bot)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("onboarding.toml"), PathBuf::from("config/onboarding.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_host(host: &HostConfig) -> Result<(), ConfigError> {
    if !is_http_url(&host.api_url) {
        return Err(ConfigError::Validation(
            "host.api_url must start with http:// or https://".to_string(),
        ));
    }

    if host.access_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "host.access_token is required. Create a personal access token or bot token with \
             permission to manage bots and post messages"
                .to_string(),
        ));
    }

    if host.timeout_secs == 0 || host.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "host.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_plugin(plugin: &PluginConfig) -> Result<(), ConfigError> {
    if plugin.plugin_id.trim().is_empty() {
        return Err(ConfigError::Validation("plugin.plugin_id must not be empty".to_string()));
    }
    if plugin.plugin_id.trim().contains(['/', '{', '}']) {
        return Err(ConfigError::Validation(
            "plugin.plugin_id must be a single path segment".to_string(),
        ));
    }

    if let Some(site_url) = plugin.site_url.as_deref().filter(|url| !url.trim().is_empty()) {
        if !is_http_url(site_url) {
            return Err(ConfigError::Validation(
                "plugin.site_url must start with http:// or https://".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_bot(bot: &BotConfig) -> Result<(), ConfigError> {
    if bot.username.trim().is_empty() {
        return Err(ConfigError::Validation("bot.username must not be empty".to_string()));
    }
    if bot.display_name.trim().is_empty() {
        return Err(ConfigError::Validation("bot.display_name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    value.starts_with("http://") || value.starts_with("https://")
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    host: Option<HostPatch>,
    plugin: Option<PluginPatch>,
    bot: Option<BotPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct HostPatch {
    api_url: Option<String>,
    access_token: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PluginPatch {
    site_url: Option<String>,
    plugin_id: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BotPatch {
    user_id: Option<String>,
    username: Option<String>,
    display_name: Option<String>,
    description: Option<String>,
    icon_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
