//! Configuration loader

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::ClearLedgerConfig;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("config file not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Loads and validates a [`ClearLedgerConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ClearLedgerConfig,

    /// Path the configuration was read from, if any
    source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create loader with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: ClearLedgerConfig = toml::from_str(&content)?;

        Self::validate(&config)?;
        tracing::debug!(path = %path.display(), "Configuration loaded");

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClearLedgerConfig = toml::from_str(content)?;
        Self::validate(&config)?;

        Ok(Self {
            config,
            source: None,
        })
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_optional<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Ok(Self::new()),
        }
    }

    /// Get current configuration
    #[inline]
    pub fn get(&self) -> &ClearLedgerConfig {
        &self.config
    }

    /// Consume the loader, returning the configuration
    pub fn into_inner(self) -> ClearLedgerConfig {
        self.config
    }

    /// Path the configuration was read from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Validate configuration
    fn validate(config: &ClearLedgerConfig) -> Result<(), ConfigError> {
        config.settlement.planner_options()?;

        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
