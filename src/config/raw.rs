use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::types::Platform;

use super::defaults::{
    default_close_label, default_duration, default_max_visible, default_platform,
    default_queue_bound,
};
use super::env::{env_duration, env_parse, env_string};
use super::{Config, HumantimeDuration, ToastSettings, check_max_visible};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("MAXUI")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

pub(super) fn parse(source: &str) -> std::result::Result<RawConfig, ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
        .build()
        .map_err(|err| ConfigError::Parse(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
    #[serde(default)]
    pub(super) display: RawDisplay,
    #[serde(default)]
    pub(super) demo: RawDemo,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default = "default_max_visible")]
    pub(super) max_visible: usize,
    #[serde(default = "default_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) default_duration: Duration,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDisplay {
    #[serde(default = "default_platform")]
    pub(super) platform: String,
    #[serde(default = "default_close_label")]
    pub(super) close_label: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDemo {
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(max_visible) = env_parse::<usize>("TOAST_MAX_VISIBLE")? {
            self.toast.max_visible = max_visible;
        }
        if let Some(duration) = env_duration("TOAST_DEFAULT_DURATION")? {
            self.toast.default_duration = duration;
        }
        if let Some(platform) = env_string("TOAST_PLATFORM")? {
            self.display.platform = platform;
        }
        if let Some(queue) = env_parse::<usize>("TOAST_QUEUE_BOUND")? {
            self.demo.queue_bound = queue;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        check_max_visible("toast.max_visible", self.toast.max_visible)?;

        let platform = Platform::from_str(&self.display.platform).map_err(|err| {
            ConfigError::InvalidField {
                field: "display.platform",
                message: err,
            }
        })?;

        if self.demo.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "demo.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            toast: ToastSettings {
                max_visible: self.toast.max_visible,
                default_duration: self.toast.default_duration,
                platform,
                close_label: self.display.close_label,
            },
            queue_capacity: self.demo.queue_bound,
        })
    }
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            default_duration: default_duration(),
        }
    }
}

impl Default for RawDisplay {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            close_label: default_close_label(),
        }
    }
}

impl Default for RawDemo {
    fn default() -> Self {
        Self {
            queue_bound: default_queue_bound(),
        }
    }
}
