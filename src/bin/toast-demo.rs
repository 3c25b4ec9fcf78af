#[path = "toast-demo/app.rs"]
mod app;
#[path = "toast-demo/cli.rs"]
mod cli;
#[path = "toast-demo/script.rs"]
mod script;
#[path = "toast-demo/terminal.rs"]
mod terminal;

use std::error::Error as StdError;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            std::process::ExitCode::from(1)
        }
    }
}

fn report_error(err: &maxui_toast::error::Error) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
