use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;
use crate::presentation::DEFAULT_CLOSE_LABEL;
use crate::toast::{DEFAULT_DURATION, DEFAULT_MAX_VISIBLE};
use crate::types::Platform;

mod defaults;
mod env;
mod raw;
mod serde;

pub use serde::HumantimeDuration;

const MAX_VISIBLE_BOUNDS: RangeInclusive<usize> = 1..=100;

#[derive(Debug, Clone)]
pub struct Config {
    pub toast: ToastSettings,
    pub queue_capacity: usize,
}

/// Provider configuration.
#[derive(Debug, Clone)]
pub struct ToastSettings {
    pub max_visible: usize,
    /// `Duration::ZERO` disables auto-dismiss for toasts without an explicit
    /// duration.
    pub default_duration: Duration,
    pub platform: Platform,
    pub close_label: String,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_VISIBLE,
            default_duration: DEFAULT_DURATION,
            platform: Platform::default(),
            close_label: DEFAULT_CLOSE_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }

    /// Parse a TOML document without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is malformed or fails validation.
    pub fn from_toml(source: &str) -> Result<Self> {
        raw::parse(source).map_err(ToastError::from)?.validate_and_build()
    }

    /// Override `max_visible`, enforcing the same bounds as the file.
    ///
    /// # Errors
    ///
    /// Returns an error when `max_visible` is outside `1..=100`.
    pub fn set_max_visible(&mut self, field: &'static str, max_visible: usize) -> Result<()> {
        check_max_visible(field, max_visible)?;
        self.toast.max_visible = max_visible;
        Ok(())
    }
}

fn check_max_visible(
    field: &'static str,
    value: usize,
) -> std::result::Result<(), crate::error::ConfigError> {
    if MAX_VISIBLE_BOUNDS.contains(&value) {
        return Ok(());
    }
    Err(crate::error::ConfigError::InvalidField {
        field,
        message: format!(
            "expected between {} and {}, got {value}",
            MAX_VISIBLE_BOUNDS.start(),
            MAX_VISIBLE_BOUNDS.end(),
        ),
    })
}
