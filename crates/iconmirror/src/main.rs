mod cli;
mod config;
mod pipeline;
mod runtime;
mod telemetry;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use iconmirror_core::pool::default_concurrency;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::cli::App;
use crate::config::Settings;

/// Exit status of a run cut short by Ctrl-C.
const INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let app = App::parse();
    telemetry::init(app.verbose, app.json);

    match run(&app) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(INTERRUPTED),
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the run was cancelled.
fn run(app: &App) -> Result<bool> {
    let settings = Settings::load(app.config.as_deref(), &app.overrides)?;
    let threads = settings
        .concurrency
        .unwrap_or_else(default_concurrency)
        .min(default_concurrency());
    let runtime = runtime::build(threads)?;

    runtime.block_on(async {
        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, finishing with the icons fetched so far");
                interrupt.cancel();
            }
        });

        let summary = pipeline::run(&settings, app.quiet, &cancel).await?;
        Ok(summary.cancelled)
    })
}
