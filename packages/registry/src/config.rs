//! # Registration policy — `registry.toml`
//!
//! Defines the TOML file describing how strict registration is
//! (filename: [`RegistryConfig::filename`] = `"registry.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [limits]
//! max_personal_phones = 2
//! max_emails = 2
//! subject_count = 4
//! phone_digits = 11
//!
//! [[subjects]]
//! name = "English"
//! required = true
//!
//! [[subjects]]
//! name = "Physics"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`RegistryConfig`] | Top-level config. Builder helper (`with_limits`), TOML (de)serialisation, file loading, and the canonical filename. |
//! | [`Limits`] | Slot caps, required subject count and phone length. |
//!
//! All structs derive or implement `Default` with the production values, so a
//! missing file or missing section is equivalent to the default configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{default_subjects, Subject};

/// Top-level configuration stored in `registry.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default = "default_subjects")]
    pub subjects: Vec<Subject>,
}

/// Numeric limits enforced by the validator and the form helpers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_personal_phones")]
    pub max_personal_phones: usize,
    #[serde(default = "default_max_emails")]
    pub max_emails: usize,
    /// Exact number of subjects a saved record carries.
    #[serde(default = "default_subject_count")]
    pub subject_count: usize,
    /// Digits in a phone number once punctuation is stripped.
    #[serde(default = "default_phone_digits")]
    pub phone_digits: usize,
}

fn default_max_personal_phones() -> usize {
    2
}

fn default_max_emails() -> usize {
    2
}

fn default_subject_count() -> usize {
    4
}

fn default_phone_digits() -> usize {
    11
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_personal_phones: default_max_personal_phones(),
            max_emails: default_max_emails(),
            subject_count: default_subject_count(),
            phone_digits: default_phone_digits(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            subjects: default_subjects(),
        }
    }
}

impl RegistryConfig {
    /// Builder method to replace the limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "registry.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read a config file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Names of the compulsory subjects, in catalog order.
    pub fn compulsory_subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects
            .iter()
            .filter(|s| s.required)
            .map(|s| s.name.as_str())
    }

    pub fn is_compulsory(&self, name: &str) -> bool {
        self.subjects.iter().any(|s| s.required && s.name == name)
    }

    pub fn offers(&self, name: &str) -> bool {
        self.subjects.iter().any(|s| s.name == name)
    }
}
