use serde::Deserialize;
use thiserror::Error;

/// Configuration errors. Fatal: the host must not register any callbacks
/// when construction fails.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required config field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Module configuration, validated once at startup and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    #[serde(default)]
    pub notification_room: String,
    #[serde(default)]
    pub admin_token: String,
    #[serde(default = "default_true")]
    pub suspend_users: bool,
    #[serde(default = "default_true")]
    pub force_join_room: bool,
    #[serde(default)]
    pub admin_user: Option<String>,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default = "default_reason")]
    pub reason: String,
    #[serde(default = "default_homeserver_url")]
    pub homeserver_url: String,
}

impl MonitorConfig {
    /// Parse and validate the raw config map handed over by the host.
    ///
    /// `notification_room` and `admin_token` must be present and non-empty.
    /// Unknown keys are rejected so a typo'd policy key fails at startup
    /// instead of silently applying a default.
    pub fn parse(raw: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(raw)?;

        if config.notification_room.is_empty() {
            return Err(ConfigError::MissingField("notification_room"));
        }
        if config.admin_token.is_empty() {
            return Err(ConfigError::MissingField("admin_token"));
        }

        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_reason() -> String {
    "Account suspended pending review".to_string()
}

fn default_homeserver_url() -> String {
    "http://localhost:8008".to_string()
}
