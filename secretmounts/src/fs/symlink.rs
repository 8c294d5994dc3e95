use std::io;
use std::path::{Path, PathBuf};

use super::HostFs;

/// Resolve `path` to its real target if it is a symbolic link.
///
/// Chained links are followed to the end. Paths that are not links are
/// returned unchanged. Fails if `path` cannot be inspected.
pub fn resolve_symbolic_link<F: HostFs + ?Sized>(fs: &F, path: &Path) -> io::Result<PathBuf> {
    if !fs.is_symlink(path)? {
        return Ok(path.to_path_buf());
    }
    fs.canonicalize(path)
}
