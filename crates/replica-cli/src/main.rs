//! replica-sync
//!
//! Periodically mirrors a source directory into a replica directory.
//!
//! # Usage
//!
//! ```bash
//! replica-sync <SOURCE_DIR> <REPLICA_DIR> <LOG_FILE> <INTERVAL_SECONDS>
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity (default: `info`)

mod cli;
mod error;
mod logging;

use std::time::Duration;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use replica_core::{MirrorConfig, MirrorEngine, Scheduler};

use cli::Cli;
use error::Result;

#[tokio::main]
async fn main() {
    let cli = parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Parse arguments; wrong argument counts print usage to stdout.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
                eprint!("{}", e.render());
                std::process::exit(2);
            }
            _ => {
                print!("{}", e.render());
                std::process::exit(2);
            }
        },
    }
}

fn build_config(cli: &Cli) -> Result<MirrorConfig> {
    let config = MirrorConfig::new(
        &cli.source_dir,
        &cli.replica_dir,
        Duration::from_secs(cli.interval_seconds),
    )?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log_file)?;
    let config = build_config(&cli).inspect_err(|e| {
        tracing::error!("Invalid startup configuration: {}", e);
    })?;

    tracing::info!(
        source = %config.source.display(),
        replica = %config.replica.display(),
        log_file = %cli.log_file.display(),
        interval_secs = cli.interval_seconds,
        "Starting file synchronization"
    );

    let scheduler = Scheduler::new(config.interval)?;
    let engine = MirrorEngine::new(config);
    let stats = scheduler
        .run(move || engine.run_cycle(), shutdown_signal())
        .await;

    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        "File synchronization stopped"
    );
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
