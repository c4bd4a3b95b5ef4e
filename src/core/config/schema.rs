//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$MODINIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/modinit/config.toml`
//! 3. `~/.modinit/config.toml`
//!
//! # Project Config
//!
//! Located at `.modinit/config.toml` in the working directory (canonical).
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `root` must be a valid
//! module name).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::ModuleName;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// builtin = false
/// log_filter = "modinit=debug"
/// json = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Run initializers in builtin mode by default
    pub builtin: Option<bool>,

    /// `tracing` filter directive used when `MODINIT_LOG` is unset
    pub log_filter: Option<String>,

    /// Emit JSON output by default
    pub json: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "log_filter cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// manifest = "build/modules.toml"
/// root = "Std"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Manifest path, relative to the project directory
    pub manifest: Option<String>,

    /// Module to initialize when none is given on the command line
    pub root: Option<String>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            ModuleName::new(root).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid root module: {}", e))
            })?;
        }

        if let Some(manifest) = &self.manifest {
            if manifest.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
