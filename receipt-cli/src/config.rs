//! TOML configuration for the receipt tool.
//!
//! Every section is optional. An empty file (or no file at all) gives the
//! flat-amount form without subjects and the default school branding.
//!
//! ```toml
//! [catalog]
//! pricing = "typed"            # or "flat"
//! subject_policy = "required"  # or "not_collected"
//! grades = ["Grade 1", "Grade 2"]
//! subjects = ["Keyboard", "Violin", "Vocal"]
//!
//! [branding]
//! school_name = "ARADENA"
//! currency_prefix = "Rs."
//!
//! [logging]
//! level = "debug"
//! stdout = true
//! file = "receipts.log"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use receipt_core::{Branding, Catalog};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level (`"info"`) or any `EnvFilter` directive.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub stdout: bool,
    /// Log file, opened in append mode. Its directory must exist.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            stdout: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: Catalog,
    pub branding: Branding,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        if !config.catalog.is_usable() {
            return Err(ConfigError::Invalid(
                "subject_policy = \"required\" needs at least one subject".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
