//! Replica mutations: atomic copies and removals

use fs2::FileExt;
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Copy `source` over `dest`, replacing any existing file.
///
/// The content is streamed into a hidden temp file next to `dest` while an
/// exclusive advisory lock is held, flushed, given the source's
/// permissions, and then renamed into place. Readers of `dest` see either
/// the old or the new content, never a partial write.
///
/// Returns the number of bytes copied.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| Error::io(source, e))?
        .permissions();

    let temp_path = temp_path_for(dest);
    let copied = match write_temp(&mut reader, source, &temp_path, permissions) {
        Ok(copied) => copied,
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&temp_path, dest) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(dest, e));
    }

    Ok(copied)
}

fn write_temp(
    reader: &mut File,
    source: &Path,
    temp_path: &Path,
    permissions: Permissions,
) -> Result<u64> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    FileExt::lock_exclusive(&temp_file).map_err(|_| Error::LockFailed {
        path: temp_path.to_path_buf(),
    })?;

    let copied = copy_stream(reader, &mut temp_file, source, temp_path)?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file
        .set_permissions(permissions)
        .map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: temp_path.to_path_buf(),
    })?;

    Ok(copied)
}

// Attributes read failures to the source and write failures to the temp file.
fn copy_stream(reader: &mut File, writer: &mut File, source: &Path, temp: &Path) -> Result<u64> {
    let mut buf = vec![0u8; crate::checksum::CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(source, e)),
        };
        writer.write_all(&buf[..n]).map_err(|e| Error::io(temp, e))?;
        total += n as u64;
    }
    Ok(total)
}

/// Hidden temp path used while copying into `dest`: `.<name>.<pid>.tmp`.
pub fn temp_path_for(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    dest.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Remove a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}
