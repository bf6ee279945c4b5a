//! Process-wide logger setup
//!
//! Installed exactly once at startup. Every event goes to standard output
//! and is appended, without ANSI colours, to the configured log file.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{CliError, Result};

/// Directive used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "info";

/// Open `path` for appending, creating it and its parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| replica_fs::Error::io(parent, e))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| replica_fs::Error::io(path, e))?;
    Ok(file)
}

/// Install the global subscriber writing to stdout and `log_file`.
pub fn init(log_file: &Path) -> Result<()> {
    let file = open_log_file(log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {}", e)))
}
