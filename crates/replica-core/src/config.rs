//! Runtime configuration shared by every sync cycle

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Read-only configuration for one source/replica pair.
///
/// Built once at startup and shared by all cycles. Neither directory has
/// to exist yet: a missing root only fails the cycle that observes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Authoritative directory
    pub source: PathBuf,
    /// Directory kept identical to `source`
    pub replica: PathBuf,
    /// Time between cycle starts
    pub interval: Duration,
}

impl MirrorConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `interval` is zero or if source
    /// and replica resolve to the same existing directory.
    pub fn new(
        source: impl Into<PathBuf>,
        replica: impl Into<PathBuf>,
        interval: Duration,
    ) -> Result<Self> {
        let config = Self {
            source: source.into(),
            replica: replica.into(),
            interval,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidConfig {
                message: "interval must be greater than zero".into(),
            });
        }

        if same_directory(&self.source, &self.replica) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "source and replica are the same directory: {}",
                    self.source.display()
                ),
            });
        }

        Ok(())
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
