//! [`TreePair`] builder for source/replica test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `source/` and a `replica/` directory,
/// with helpers to populate and inspect both.
///
/// # Example
///
/// ```rust,no_run
/// use replica_test_utils::TreePair;
///
/// let pair = TreePair::new();
/// pair.write_source("a.txt", "x");
/// pair.write_replica("c.txt", "z");
/// assert_eq!(pair.replica_files().len(), 1);
/// ```
pub struct TreePair {
    temp_dir: TempDir,
}

impl Default for TreePair {
    fn default() -> Self {
        Self::new()
    }
}

impl TreePair {
    /// Create empty `source/` and `replica/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("source")).unwrap();
        fs::create_dir(temp_dir.path().join("replica")).unwrap();
        Self { temp_dir }
    }

    /// Create a pair pre-populated from `(name, content)` lists.
    pub fn with_files(source: &[(&str, &str)], replica: &[(&str, &str)]) -> Self {
        let pair = Self::new();
        for (name, content) in source {
            pair.write_source(name, content);
        }
        for (name, content) in replica {
            pair.write_replica(name, content);
        }
        pair
    }

    /// The temporary root containing both directories.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("source")
    }

    pub fn replica(&self) -> PathBuf {
        self.root().join("replica")
    }

    pub fn write_source(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.source().join(name), content).unwrap();
    }

    pub fn write_replica(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.replica().join(name), content).unwrap();
    }

    /// Regular files directly inside `source/`, name to content.
    pub fn source_files(&self) -> BTreeMap<String, Vec<u8>> {
        read_flat(&self.source())
    }

    /// Regular files directly inside `replica/`, name to content.
    pub fn replica_files(&self) -> BTreeMap<String, Vec<u8>> {
        read_flat(&self.replica())
    }

    /// Replica file content as UTF-8.
    pub fn read_replica(&self, name: &str) -> String {
        fs::read_to_string(self.replica().join(name)).unwrap()
    }

    /// Assert that the replica holds exactly the source's files and bytes.
    pub fn assert_converged(&self) {
        let source = self.source_files();
        let replica = self.replica_files();
        assert_eq!(
            source.keys().collect::<Vec<_>>(),
            replica.keys().collect::<Vec<_>>(),
            "Replica names differ from source names"
        );
        for (name, content) in &source {
            assert!(
                replica.get(name) == Some(content),
                "Replica content differs for {}",
                name
            );
        }
    }
}

fn read_flat(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| {
            let content = read_listed(&e.path())?;
            Some((e.file_name().to_string_lossy().into_owned(), content))
        })
        .collect()
}

// A running sync can rename a temp file away between listing and reading.
fn read_listed(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanished_entry_is_skipped() {
        let pair = TreePair::new();
        assert_eq!(read_listed(&pair.replica().join(".a.txt.1.tmp")), None);
    }

    #[test]
    fn files_are_read_by_name() {
        let pair = TreePair::with_files(&[("a.txt", "x")], &[]);
        fs::create_dir(pair.source().join("nested")).unwrap();

        let files = pair.source_files();

        assert_eq!(files.len(), 1);
        assert_eq!(files["a.txt"], b"x".to_vec());
    }
}
