#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod presentation;
pub mod telemetry;
pub mod toast;
pub mod types;
pub mod viewport;

pub use toast::{ToastAction, ToastHandle, ToastOptions, ToastProvider, use_toast};
pub use types::{Appearance, Platform, ToastId};

pub type Result<T> = std::result::Result<T, error::Error>;
