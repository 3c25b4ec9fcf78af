use std::time::Duration;

use crate::presentation::DEFAULT_CLOSE_LABEL;
use crate::toast::{DEFAULT_DURATION, DEFAULT_MAX_VISIBLE};

pub(super) const fn default_max_visible() -> usize {
    DEFAULT_MAX_VISIBLE
}

pub(super) const fn default_duration() -> Duration {
    DEFAULT_DURATION
}

pub(super) fn default_platform() -> String {
    "android".to_string()
}

pub(super) fn default_close_label() -> String {
    DEFAULT_CLOSE_LABEL.to_string()
}

pub(super) const fn default_queue_bound() -> usize {
    64
}
