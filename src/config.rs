use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";
const DEFAULT_APPSHEET_BASE_URL: &str = "https://api.appsheet.com/api/v2";
const DEFAULT_LOCALE: &str = "en-US";
// AppSheet's documented sample coordinates; only used as the fixed request context
const DEFAULT_LOCATION: &str = "47.623098, -122.330184";
const DEFAULT_TIMEZONE: &str = "Pacific Standard Time";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROJECTS_TTL_SECS: u64 = 15 * 60;
const DEFAULT_REPORT_TTL_SECS: u64 = 5 * 60;

/// AppSheet connection settings and the fixed request context sent with every
/// Find action.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppSheetConfig {
    /// AppSheet application id
    #[validate(length(min = 1))]
    pub app_id: String,

    /// Static application access key sent as the `ApplicationAccessKey` header
    #[validate(length(min = 1))]
    pub access_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Cache TTLs in seconds. The project list changes rarely and gets the longer
/// one.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CacheConfig {
    #[serde(default = "default_projects_ttl")]
    pub projects_ttl_secs: u64,

    #[serde(default = "default_report_ttl")]
    pub report_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            projects_ttl_secs: default_projects_ttl(),
            report_ttl_secs: default_report_ttl(),
        }
    }
}

impl From<&CacheConfig> for crate::cache::TtlSettings {
    fn from(cfg: &CacheConfig) -> Self {
        Self {
            projects: std::time::Duration::from_secs(cfg.projects_ttl_secs),
            default: std::time::Duration::from_secs(cfg.report_ttl_secs),
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    #[validate]
    pub appsheet: AppSheetConfig,

    #[serde(default)]
    #[validate]
    pub cache: CacheConfig,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,
}

fn default_base_url() -> String {
    DEFAULT_APPSHEET_BASE_URL.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_projects_ttl() -> u64 {
    DEFAULT_PROJECTS_TTL_SECS
}
fn default_report_ttl() -> u64 {
    DEFAULT_REPORT_TTL_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("sitedash_api={level},tower_http=debug");
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Default config (config/default.toml)
/// 2. Environment-specific config (config/{env}.toml)
/// 3. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", DEFAULT_PORT)?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    // NOTE: the access key has no default - it MUST come from a config file or
    // the APP__APPSHEET__ACCESS_KEY environment variable.
    if config.get_string("appsheet.access_key").is_err() {
        error!("AppSheet access key is not configured. Set APP__APPSHEET__ACCESS_KEY or add it to config/{run_env}.toml.");
        return Err(AppConfigError::Load(ConfigError::NotFound(
            "appsheet.access_key is required but not configured".into(),
        )));
    }

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}
