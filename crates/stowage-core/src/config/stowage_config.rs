//! Top-level stowage configuration with layered resolution.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    ObservabilityConfig, ServerConfig, StoreConfig, StressConfig, TelemetryConfig, UploadConfig,
};
use crate::errors::ConfigError;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "STOWAGE_CONFIG";

/// Looks up one environment variable. Abstracted so tests never touch the
/// process environment.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AWS_*`, `S3_BUCKET_NAME`, `LOCALSTACK_URL`, `STOWAGE_*`)
/// 2. TOML file named by `STOWAGE_CONFIG`
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StowageConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub telemetry: TelemetryConfig,
    pub stress: StressConfig,
    pub observability: ObservabilityConfig,
}

impl StowageConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();
        let path = env(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_with(path.as_deref(), &env)
    }

    /// Load configuration from an optional file and an explicit env lookup.
    pub fn load_with(path: Option<&Path>, env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides on top of the current values.
    pub fn apply_env_overrides(&mut self, env: EnvLookup<'_>) -> Result<(), ConfigError> {
        // Store
        if let Some(v) = env("AWS_ACCESS_KEY_ID") {
            self.store.access_key_id = Some(v);
        }
        if let Some(v) = env("AWS_SECRET_ACCESS_KEY") {
            self.store.secret_access_key = Some(v);
        }
        if let Some(v) = env("AWS_REGION") {
            self.store.region = v;
        }
        if let Some(v) = env("LOCALSTACK_URL") {
            self.store.endpoint_url = Some(v);
        }
        if let Some(v) = env("STOWAGE_S3_ENDPOINT") {
            self.store.endpoint_url = Some(v);
        }
        if let Some(v) = env("S3_BUCKET_NAME") {
            self.store.bucket = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Some(v) = parse_env(env, "STOWAGE_S3_FORCE_PATH_STYLE")? {
            self.store.force_path_style = v;
        }

        // Server
        if let Some(v) = env("STOWAGE_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        if let Some(v) = parse_env(env, "STOWAGE_MAX_UPLOAD_BYTES")? {
            self.server.max_upload_bytes = v;
        }

        // Upload
        if let Some(v) = env("STOWAGE_UPLOAD_PREFIX") {
            self.upload.key_prefix = v;
        }

        // Telemetry
        if let Some(v) = parse_env(env, "STOWAGE_SYSTEM_INTERVAL_SECS")? {
            self.telemetry.system_interval_secs = v;
        }
        if let Some(v) = parse_env(env, "STOWAGE_INVENTORY_INTERVAL_SECS")? {
            self.telemetry.inventory_interval_secs = v;
        }
        if let Some(v) = parse_env(env, "STOWAGE_SHIP_INTERVAL_SECS")? {
            self.telemetry.ship_interval_secs = v;
        }
        if let Some(v) = env("STOWAGE_LOG_BUFFER") {
            self.telemetry.log_buffer_path = PathBuf::from(v);
        }
        if let Some(v) = env("STOWAGE_LOG_PREFIX") {
            self.telemetry.log_key_prefix = v;
        }

        // Stress
        if let Some(v) = parse_env(env, "STOWAGE_STRESS_DURATION_SECS")? {
            self.stress.duration_secs = v;
        }
        if let Some(v) = parse_env(env, "STOWAGE_STRESS_WORKERS")? {
            self.stress.workers = Some(v);
        }

        // Observability
        if let Some(v) = env("STOWAGE_LOG") {
            self.observability.log_level = v;
        }
        if let Some(v) = parse_env(env, "STOWAGE_LOG_JSON")? {
            self.observability.json_stdout = v;
        }

        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("telemetry.system_interval_secs", self.telemetry.system_interval_secs),
            ("telemetry.inventory_interval_secs", self.telemetry.inventory_interval_secs),
            ("telemetry.ship_interval_secs", self.telemetry.ship_interval_secs),
            ("stress.duration_secs", self.stress.duration_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "server.max_upload_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.stress.workers == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "stress.workers".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationFailed {
                field: "server.bind_addr".to_string(),
                message: format!("{:?} is not a socket address", self.server.bind_addr),
            });
        }
        if self.telemetry.log_buffer_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "telemetry.log_buffer_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T>(env: EnvLookup<'_>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
    }
}
