//! Atomic whole-file writes and the advisory lock around read-modify-write.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use flipcheck_core::errors::TableError;

/// `<path>.<suffix>`, keeping the original extension.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<(), TableError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| TableError::io(dir, e))
        }
        _ => Ok(()),
    }
}

/// Write `contents` to `<path>.tmp`, then rename it over `path`.
/// A crash leaves either the old file or the new one, never a torn mix.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), TableError> {
    ensure_parent(path)?;
    let tmp = sibling_path(path, "tmp");
    let mut f = File::create(&tmp).map_err(|e| TableError::io(&tmp, e))?;
    f.write_all(contents.as_bytes())
        .and_then(|_| f.sync_all())
        .map_err(|e| TableError::io(&tmp, e))?;
    drop(f);
    fs::rename(&tmp, path).map_err(|e| TableError::io(path, e))
}

/// Run `f` while holding an exclusive advisory lock on `<target>.lock`.
pub fn with_exclusive_lock<T>(
    target: &Path,
    f: impl FnOnce() -> Result<T, TableError>,
) -> Result<T, TableError> {
    ensure_parent(target)?;
    let lock_path = sibling_path(target, "lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| TableError::io(&lock_path, e))?;
    let mut lock = fd_lock::RwLock::new(file);
    let _guard = lock.write().map_err(|source| TableError::LockFailed {
        path: lock_path.clone(),
        source,
    })?;
    f()
}
