//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Keep a replica directory identical to a source directory
///
/// Every INTERVAL_SECONDS the replica is brought in line with the source:
/// missing files are copied, changed files are overwritten, and files that
/// no longer exist in the source are removed. Subdirectories are ignored.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "replica-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to mirror from
    pub source_dir: PathBuf,

    /// Directory to keep in sync with the source
    pub replica_dir: PathBuf,

    /// File that every action and error is appended to
    pub log_file: PathBuf,

    /// Seconds between sync cycles (positive integer)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_seconds: u64,
}
