//! Filesystem capability used by the secret pipeline.
//!
//! Every read and mutation of the host filesystem goes through [`HostFs`] so
//! the orchestration logic can be exercised against instrumented or fake
//! filesystems. [`OsFs`] is the real implementation.

mod host;
mod symlink;

pub use host::OsFs;
pub use symlink::resolve_symbolic_link;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Result of inspecting one path (symlinks followed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Anything that is not a directory is read as file content.
    File,
    Directory,
}

/// Host filesystem operations needed to materialize secrets.
pub trait HostFs {
    /// Inspect `path`, following symbolic links.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Inspect `path` without following symbolic links.
    fn is_symlink(&self, path: &Path) -> io::Result<bool>;

    /// Resolve every symbolic link in `path` to a real, absolute path.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Names of the entries in a directory, in listing order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create `path` and any missing parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Write `data` to `path`, truncating an existing file.
    /// `mode` applies only when the file is created.
    fn write(&self, path: &Path, data: &[u8], mode: u32) -> io::Result<()>;
}

/// Check whether `path` exists (symlinks followed).
///
/// Only "not found" maps to `Ok(false)`; any other failure is returned.
pub fn exists<F: HostFs + ?Sized>(fs: &F, path: &Path) -> io::Result<bool> {
    match fs.stat(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
