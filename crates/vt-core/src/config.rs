//! Configuration types and parsing for veritemiz.yml

use crate::error::{CoreError, CoreResult};
use crate::ingest::MAX_UPLOAD_BYTES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "veritemiz.yml";

/// Service configuration from veritemiz.yml
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload limits and preview size
    #[serde(default)]
    pub upload: UploadConfig,

    /// Artifact store sizing
    #[serde(default)]
    pub store: StoreConfig,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,

    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Largest accepted upload in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Rows returned in the upload preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_max_bytes() -> usize {
    MAX_UPLOAD_BYTES
}

fn default_preview_rows() -> usize {
    10
}

/// Which artifact store implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// LRU cache with optional time-to-live (default)
    #[default]
    Bounded,
    /// Keep everything for the life of the process
    Unbounded,
}

/// Artifact store sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,

    /// Maximum artifacts held by the bounded store
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Seconds an artifact stays available; `null` disables expiry
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            capacity: default_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl StoreConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

fn default_capacity() -> usize {
    256
}

fn default_ttl_secs() -> Option<u64> {
    Some(3600)
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8000".to_string()]
}

/// Authentication settings
///
/// With no tokens configured every request is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Accepted bearer tokens
    #[serde(default)]
    pub tokens: Vec<String>,
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        !self.tokens.is_empty()
    }
}

impl Config {
    /// Load and validate configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            CoreError::ConfigParseError { message, .. } => CoreError::ConfigParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `veritemiz.yml` from `dir` if present, otherwise use defaults
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        // An empty document deserializes to `null`, not an empty mapping.
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> CoreResult<()> {
        if self.upload.max_bytes == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "upload.max_bytes must be greater than 0".to_string(),
            });
        }
        if self.store.kind == StoreKind::Bounded && self.store.capacity == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "store.capacity must be greater than 0".to_string(),
            });
        }
        if self.auth.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "auth.tokens must not contain empty tokens".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
