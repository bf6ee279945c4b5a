//! Point-in-time listings of a directory's immediate entries
//!
//! A snapshot is taken fresh at the start of every cycle and never
//! mutated afterwards. Only regular files are included: directories,
//! symlinks and other special entries are skipped and never hashed,
//! copied or deleted.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A regular file found directly inside a snapshotted directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name, unique within one snapshot
    pub name: OsString,
    /// Full path to the file
    pub path: PathBuf,
}

/// The set of regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    root: PathBuf,
    entries: BTreeMap<OsString, FileEntry>,
}

impl DirectorySnapshot {
    /// List the immediate regular-file entries of `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if `dir` does not exist or is
    /// not a directory, and [`Error::Io`] if it cannot be listed.
    pub fn take(dir: &Path) -> Result<Self> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(Error::DirectoryNotFound {
                    path: dir.to_path_buf(),
                });
            }
        }

        let mut entries = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

            if !file_type.is_file() {
                tracing::debug!(path = %path.display(), "Skipping non-regular entry");
                continue;
            }

            let name = entry.file_name();
            entries.insert(name.clone(), FileEntry { name, path });
        }

        Ok(Self {
            root: dir.to_path_buf(),
            entries,
        })
    }

    /// The directory this snapshot was taken of.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up an entry by file name.
    pub fn get(&self, name: &OsStr) -> Option<&FileEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in file-name order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &OsStr> {
        self.entries.keys().map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where a file called `name` lives (or would live) in this directory.
    pub fn path_for(&self, name: &OsStr) -> PathBuf {
        self.root.join(name)
    }
}
