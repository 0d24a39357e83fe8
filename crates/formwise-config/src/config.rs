// crates/formwise-config/src/config.rs
// ============================================================================
// Module: Formwise Configuration Model
// Description: Config schema, loading guards, and validation rules.
// Purpose: Parse and validate the client configuration file, fail-closed.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The configuration file is TOML, located by explicit path or the
//! `FORMWISE_CONFIG` environment variable. Every load passes the same guards:
//! bounded path length, bounded file size, UTF-8 content, and full schema
//! validation before the config is handed out.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file path.
pub const FORMWISE_CONFIG_ENV: &str = "FORMWISE_CONFIG";

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Maximum accepted config path length in characters.
const MAX_PATH_LENGTH: usize = 4_096;

/// Maximum accepted length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;

/// Upper bound for configured timeouts in milliseconds.
const MAX_TIMEOUT_MS: u64 = 600_000;

/// Upper bound for a single staged upload in bytes.
const MAX_UPLOAD_BYTES: u64 = 1_073_741_824;

// ============================================================================
// SECTION: Configuration Schema
// ============================================================================

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormwiseConfig {
    /// Form server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload bounds.
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Form server endpoint and timeout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the form server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Maximum accepted response body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

/// Bounds on staged file uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Maximum size of a single staged file in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Maximum number of files staged at once.
    #[serde(default = "default_max_files")]
    pub max_files: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_files: default_max_files(),
        }
    }
}

/// Default form server base URL.
fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

/// Default connect timeout: 10 seconds.
const fn default_connect_timeout_ms() -> u64 {
    10_000
}

/// Default request timeout: 30 seconds.
const fn default_request_timeout_ms() -> u64 {
    30_000
}

/// Default response body cap: 8 MiB.
const fn default_max_body_bytes() -> u64 {
    8_388_608
}

/// Default single-file upload cap: 32 MiB.
const fn default_max_file_bytes() -> u64 {
    33_554_432
}

/// Default staged file count cap.
const fn default_max_files() -> u32 {
    16
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl FormwiseConfig {
    /// Loads configuration from an explicit path, the `FORMWISE_CONFIG`
    /// environment variable, or built-in defaults, in that order.
    ///
    /// A missing file at the resolved path yields defaults only when no path
    /// was requested; an explicitly named file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path violates a guard, the file
    /// cannot be read or parsed, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved: Option<PathBuf> = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => env::var(FORMWISE_CONFIG_ENV).ok().map(PathBuf::from),
        };

        let Some(resolved) = resolved else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };

        check_path(&resolved)?;
        let metadata = fs::metadata(&resolved)
            .map_err(|err| ConfigError::Io(format!("config file not readable: {err}")))?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }

        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("config file not readable: {err}")))?;
        let contents = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the whole configuration, fail-closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.upload.validate()
    }
}

impl ServerConfig {
    /// Validates endpoint and timeout settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("server.base_url must be non-empty".to_string()));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "server.base_url must be an http or https url".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 || self.connect_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(
                "server.connect_timeout_ms must be between 1 and 600000".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 || self.request_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::Invalid(
                "server.request_timeout_ms must be between 1 and 600000".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl UploadConfig {
    /// Validates upload bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_UPLOAD_BYTES {
            return Err(ConfigError::Invalid(
                "upload.max_file_bytes must be between 1 and 1073741824".to_string(),
            ));
        }
        if self.max_files == 0 {
            return Err(ConfigError::Invalid(
                "upload.max_files must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Applies the path guards shared by every load.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    let rendered = path.to_string_lossy();
    if rendered.len() > MAX_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem failure while reading the config.
    #[error("config io error: {0}")]
    Io(String),
    /// The file is not valid TOML for the schema.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A validation rule was violated.
    #[error("invalid config: {0}")]
    Invalid(String),
}
