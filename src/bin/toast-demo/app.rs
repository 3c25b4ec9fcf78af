use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender, bounded};
use maxui_toast::Result;
use maxui_toast::config::Config;
use maxui_toast::error::ScriptError;
use maxui_toast::telemetry::init_tracing;
use maxui_toast::viewport::{StaticHost, SurfaceRef};
use maxui_toast::{ToastProvider, use_toast};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::cli::Cli;
use super::script::{Command, parse_line};
use super::terminal::TerminalSurface;

const DEFAULT_CONFIG: &str = "maxui-toast.toml";
const LINGER_POLL: Duration = Duration::from_millis(50);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(max_visible) = cli.max_visible {
        config.set_max_visible("cli.max_visible", max_visible)?;
    }
    if let Some(duration) = cli.default_duration {
        config.toast.default_duration = duration;
    }
    if let Some(platform) = cli.platform {
        config.toast.platform = platform;
    }

    let terminal = TerminalSurface::new();
    let body: SurfaceRef = terminal.clone();
    let provider = ToastProvider::builder()
        .settings(&config.toast)
        .host(StaticHost::new(body))
        .build();
    info!(
        provider = %provider.provider_id(),
        max_visible = config.toast.max_visible,
        platform = %config.toast.platform,
        "replaying toast script"
    );

    let (tx, rx) = bounded(config.queue_capacity);
    let reader = tokio::spawn(read_script(cli.script.clone(), tx));

    tokio::select! {
        biased;
        _ = signal::ctrl_c() => {
            info!("shutdown signal received, stopping replay");
            reader.abort();
            return Ok(());
        }
        () = provider.scope(apply_commands(rx, Arc::clone(&terminal))) => {}
    }

    match reader.await {
        Ok(result) => result?,
        Err(err) => warn!(error = %err, "script reader terminated unexpectedly"),
    }

    if !cli.no_linger {
        provider.scope(linger()).await;
    }
    Ok(())
}

async fn read_script(path: Option<PathBuf>, tx: Sender<Command>) -> Result<()> {
    let result = match path.as_deref() {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|source| read_error(path, source))?;
            forward_lines(BufReader::new(file), path, &tx).await
        }
        None => forward_lines(BufReader::new(tokio::io::stdin()), Path::new("<stdin>"), &tx).await,
    };
    tx.close();
    result
}

async fn forward_lines<R>(reader: R, origin: &Path, tx: &Sender<Command>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0;
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| read_error(origin, source))?
    {
        line_no += 1;
        match parse_line(line_no, &line) {
            Ok(Some(command)) => {
                if tx.send(command).await.is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) if err.is_recoverable() => warn!(error = %err, "skipping script line"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn read_error(path: &Path, source: std::io::Error) -> ScriptError {
    ScriptError::Read {
        path: path.to_path_buf(),
        source,
    }
}

async fn apply_commands(rx: Receiver<Command>, terminal: Arc<TerminalSurface>) {
    let toasts = use_toast();
    while let Ok(command) = rx.recv().await {
        match command {
            Command::Show(show) => {
                let id = toasts.show(show.into_options());
                debug!(toast_id = %id, "show applied");
            }
            Command::Dismiss { id } => toasts.dismiss(&id),
            Command::Close { id } => match terminal.find(&id) {
                Some(view) if view.dismissible => view.close(),
                Some(_) => warn!(toast_id = %id, "toast has no close button"),
                None => warn!(toast_id = %id, "close: toast not visible"),
            },
            Command::Action { id } => match terminal.find(&id) {
                Some(view) => view.activate_action(),
                None => warn!(toast_id = %id, "action: toast not visible"),
            },
            Command::Clear => toasts.clear(),
            Command::Wait { duration } => sleep(duration).await,
        }
    }
}

/// Wait until every auto-dismissing toast has expired. Persistent toasts
/// never drain on their own, so stop once no timer is left.
async fn linger() {
    let toasts = use_toast();
    loop {
        if toasts.is_empty() || toasts.pending_timers() == 0 {
            break;
        }
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("shutdown signal received, leaving remaining toasts");
                break;
            }
            () = sleep(LINGER_POLL) => {}
        }
    }
    info!(remaining = toasts.len(), "replay finished");
}
