//! Configuration module for faunadex
//!
//! Manages application configuration: the catalog service base URL, the
//! request timeout, the optional camera frame source, and output
//! verbosity. Configuration is stored in the user's config directory.

mod setup;

pub use setup::first_time_setup;

use crate::scan::{CameraDevice, DisabledCamera, FileCamera};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default service base URL when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FaunadexConfig {
    /// Catalog service API prefix, e.g. `http://localhost:8000/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Still image served as the camera frame source
    ///
    /// Unset means no camera: opening one is denied with an alert.
    #[serde(default)]
    pub camera_frame: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for FaunadexConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            quiet: false,
            request_timeout_secs: default_timeout_secs(),
            camera_frame: None,
        }
    }
}

impl FaunadexConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("faunadex").join("config.toml"))
    }

    /// Load configuration from file, creating a default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed,
    /// or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration, running the setup wizard on first run
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading fails or the wizard cannot save.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created,
    /// the configuration cannot be serialized to TOML, or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// The per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the camera device this configuration describes
    #[must_use]
    pub fn camera_device(&self) -> Arc<dyn CameraDevice> {
        match &self.camera_frame {
            Some(path) => Arc::new(FileCamera::new(path.clone())),
            None => Arc::new(DisabledCamera),
        }
    }
}
