use crate::decoder::CodeFormat;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QrScanConfig {
    pub scanner: ScannerConfig,
    pub history: HistoryConfig,
    pub auth: AuthConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Symbologies the scan session accepts
    #[serde(default = "default_accepted_formats")]
    pub accepted_formats: Vec<CodeFormat>,

    /// Characters of each payload shown in the history listing
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Maximum number of scans kept
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// Minimum password length enforced before creating an account
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SystemConfig {
    /// Event bus capacity
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,

    /// Log every published event at debug level
    #[serde(default = "default_debug_events")]
    pub debug_events: bool,
}

impl QrScanConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("qrscan.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let accepted_formats: Vec<String> = default_accepted_formats()
            .iter()
            .map(|format| format.as_str().to_string())
            .collect();

        let settings = Config::builder()
            // Start with default values
            .set_default("scanner.accepted_formats", accepted_formats)?
            .set_default("scanner.preview_chars", default_preview_chars() as i64)?
            .set_default("history.capacity", default_history_capacity() as i64)?
            .set_default(
                "auth.min_password_length",
                default_min_password_length() as i64,
            )?
            .set_default(
                "system.event_bus_capacity",
                default_event_bus_capacity() as i64,
            )?
            .set_default("system.debug_events", default_debug_events())?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables, e.g. QRSCAN_HISTORY__CAPACITY
            .add_source(
                Environment::with_prefix("QRSCAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: QrScanConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scanner.accepted_formats.is_empty() {
            return Err(ConfigError::Message(
                "Scanner must accept at least one code format".to_string(),
            ));
        }

        if self.scanner.preview_chars == 0 {
            return Err(ConfigError::Message(
                "Scanner preview_chars must be greater than 0".to_string(),
            ));
        }

        if self.history.capacity == 0 {
            return Err(ConfigError::Message(
                "History capacity must be greater than 0".to_string(),
            ));
        }

        if self.auth.min_password_length == 0 {
            return Err(ConfigError::Message(
                "Auth min_password_length must be greater than 0".to_string(),
            ));
        }

        if self.system.event_bus_capacity == 0 {
            return Err(ConfigError::Message(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for QrScanConfig {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig {
                accepted_formats: default_accepted_formats(),
                preview_chars: default_preview_chars(),
            },
            history: HistoryConfig {
                capacity: default_history_capacity(),
            },
            auth: AuthConfig {
                min_password_length: default_min_password_length(),
            },
            system: SystemConfig {
                event_bus_capacity: default_event_bus_capacity(),
                debug_events: default_debug_events(),
            },
        }
    }
}

// Default value functions
fn default_accepted_formats() -> Vec<CodeFormat> {
    CodeFormat::ALL.to_vec()
}
fn default_preview_chars() -> usize {
    30
}

fn default_history_capacity() -> usize {
    crate::history::DEFAULT_HISTORY_CAPACITY
}

fn default_min_password_length() -> usize {
    6
}

fn default_event_bus_capacity() -> usize {
    100
}
fn default_debug_events() -> bool {
    false
}
