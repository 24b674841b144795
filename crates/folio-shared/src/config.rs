//! Configuration management

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub admin: AdminSettings,
    pub session: SessionSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Public page URL; login redirects return here.
    pub public_url: String,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Backend-as-a-service connection (entities, auth, integrations).
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub app_id: String,
    pub login_url: String,
    pub timeout_secs: u64,
    /// Service credential used for public reads and contact mail.
    #[serde(default)]
    pub service_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminSettings {
    pub owner_email: String,
    pub admin_role: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub inactivity_timeout_secs: u32,
    pub warning_threshold_secs: u32,
    pub max_age_hours: i64,
    pub storage_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    #[serde(default)]
    pub directory: Option<String>,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionSettings {
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(self.max_age_hours)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: constants::INACTIVITY_TIMEOUT_SECS,
            warning_threshold_secs: constants::INACTIVITY_WARNING_SECS,
            max_age_hours: constants::SESSION_MAX_AGE_HOURS,
            storage_key: constants::SESSION_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only, no files or environment.
    pub fn defaults(env: &str) -> Result<Self, ConfigError> {
        Self::builder(env)?.build()?.try_deserialize()
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "folio-server")?
            .set_default("app.public_url", "http://localhost:5173/")?
            .set_default("backend.base_url", "https://app.base44.com")?
            .set_default("backend.app_id", "")?
            .set_default("backend.login_url", "https://app.base44.com/login")?
            .set_default("backend.timeout_secs", constants::DEFAULT_BACKEND_TIMEOUT_SECS)?
            .set_default("admin.owner_email", "")?
            .set_default("admin.admin_role", constants::ADMIN_ROLE)?
            .set_default("session.inactivity_timeout_secs", constants::INACTIVITY_TIMEOUT_SECS)?
            .set_default("session.warning_threshold_secs", constants::INACTIVITY_WARNING_SECS)?
            .set_default("session.max_age_hours", constants::SESSION_MAX_AGE_HOURS)?
            .set_default("session.storage_key", constants::SESSION_STORAGE_KEY)?
            .set_default("upload.max_bytes", constants::DEFAULT_UPLOAD_MAX_BYTES as u64)?
            .set_default("log.level", "info")
    }
}
