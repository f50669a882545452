//! # Settings Module
//!
//! ## Purpose
//! Connection settings of the kinetics-estimation service. The values are passed to the
//! estimator at call time, there is no module-level state holding them.
//!
//! ## Architecture
//! - **ServiceConfig**: serializable settings (host, port, timeouts, log level)
//! - **SettingsManager**: loads, validates, updates and saves a `ServiceConfig`
//! - **Configuration File**: JSON file (estimator_config.json by default)
//!
//! ## Configuration Format
//! ```json
//! {
//!   "host": "localhost",
//!   "port": 5000,
//!   "timeout_secs": 10,
//!   "response_deadline_secs": null,
//!   "log_level": "info"
//! }
//! ```
//! Missing fields take their default values, a missing or unreadable file gives the defaults.
//!
//! ## Usage
//! ```rust, ignore
//! let mut manager = SettingsManager::new();
//! manager.set_port(5050)?;
//! let estimation = estimate_reactions(manager.config(), &reactants, &[])?;
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "estimator_config.json";

/// error types of loading, validating and saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Where and how to reach the estimation service.
///
/// # Fields
/// * `host` - host name or address of the service
/// * `port` - TCP port of the service
/// * `timeout_secs` - timeout of the connection attempt and of every single read or write
/// * `response_deadline_secs` - optional bound on receiving the whole response
/// * `log_level` - level used by the binary when it sets up logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub timeout_secs: u64,
    pub response_deadline_secs: Option<u64>,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            timeout_secs: 10,
            response_deadline_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.host.trim().is_empty() {
            return Err(invalid("host", "must not be empty"));
        }
        if self.port == 0 {
            return Err(invalid("port", "must be between 1 and 65535"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs", "must be at least one second"));
        }
        if self.response_deadline_secs == Some(0) {
            return Err(invalid("response_deadline_secs", "must be at least one second"));
        }
        Ok(())
    }
}

/// Keeps the service settings and the file they are persisted in.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: ServiceConfig,
    config_file: String,
}

impl SettingsManager {
    /// Loads settings from estimator_config.json in the current directory, or uses the defaults.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Loads settings from `config_file`, or uses the defaults if it is missing or invalid.
    pub fn with_config_file(config_file: &str) -> Self {
        let config = match Self::load_config(config_file) {
            Ok(config) => config,
            Err(e) => {
                warn!("cannot read settings from {}: {}, using defaults", config_file, e);
                ServiceConfig::default()
            }
        };
        Self {
            config,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<ServiceConfig, SettingsError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let config: ServiceConfig = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(ServiceConfig::default())
        }
    }

    /// Writes the settings as pretty JSON to `path`.
    pub fn write_config(&self, path: &str) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Saves the settings to the config file. Does nothing during tests.
    pub fn save_config(&self) -> Result<(), SettingsError> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            self.write_config(&self.config_file)
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    fn update(&mut self, change: impl FnOnce(&mut ServiceConfig)) -> Result<(), SettingsError> {
        let mut candidate = self.config.clone();
        change(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        self.save_config()
    }

    pub fn set_host(&mut self, host: &str) -> Result<(), SettingsError> {
        let host = host.trim().to_string();
        self.update(|c| c.host = host)
    }

    pub fn set_port(&mut self, port: u16) -> Result<(), SettingsError> {
        self.update(|c| c.port = port)
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) -> Result<(), SettingsError> {
        self.update(|c| c.timeout_secs = timeout_secs)
    }

    pub fn set_response_deadline_secs(
        &mut self,
        deadline_secs: Option<u64>,
    ) -> Result<(), SettingsError> {
        self.update(|c| c.response_deadline_secs = deadline_secs)
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), SettingsError> {
        if level.trim().parse::<log::LevelFilter>().is_err() {
            return Err(invalid("log_level", "expected off, error, warn, info, debug or trace"));
        }
        let level = level.trim().to_lowercase();
        self.update(|c| c.log_level = level)
    }

    /// Restores the default settings and saves them.
    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = ServiceConfig::default();
        self.save_config()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}
