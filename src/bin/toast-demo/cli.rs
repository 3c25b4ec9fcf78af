use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use maxui_toast::Platform;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a toast script against a terminal viewport", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON-lines script to replay; stdin when omitted.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Maximum number of toasts visible at once.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub max_visible: Option<usize>,

    /// Default lifetime of a toast (e.g. "3s"; "0s" disables auto-dismiss).
    #[arg(long, value_parser = parse_duration)]
    pub default_duration: Option<Duration>,

    /// Platform whose close icon is drawn.
    #[arg(long, value_parser = Platform::from_str)]
    pub platform: Option<Platform>,

    /// Exit as soon as the script ends instead of waiting for toasts to expire.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_linger: bool,

    /// JSON log layer (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "maxui_toast=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
