//! Recursive host secret tree reader.

use std::io;
use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};

use super::SecretFile;
use crate::fs::{EntryKind, HostFs};

/// Read every file beneath `root/prefix`.
///
/// An empty `prefix` reads the whole root. Paths that do not exist, including
/// dangling symlinks met while descending, contribute nothing. Sibling order
/// follows the directory listing and is not sorted. When the read root itself
/// is a file it is returned under its own file name.
pub fn read_secret_tree<F: HostFs + ?Sized>(
    fs: &F,
    root: &Path,
    prefix: &Path,
) -> SecretsResult<Vec<SecretFile>> {
    let mut files = Vec::new();
    collect(fs, root, prefix, &mut files).map_err(|e| {
        SecretsError::Storage(format!(
            "failed to read secrets from {}: {}",
            root.join(prefix).display(),
            e
        ))
    })?;
    Ok(files)
}

fn collect<F: HostFs + ?Sized>(
    fs: &F,
    root: &Path,
    relative: &Path,
    out: &mut Vec<SecretFile>,
) -> io::Result<()> {
    let path = if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    };

    match visit(fs, root, relative, &path, out) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Secret path vanished, skipping");
            Ok(())
        }
        result => result,
    }
}

fn visit<F: HostFs + ?Sized>(
    fs: &F,
    root: &Path,
    relative: &Path,
    path: &Path,
    out: &mut Vec<SecretFile>,
) -> io::Result<()> {
    match fs.stat(path)? {
        EntryKind::Directory => {
            for name in fs.read_dir(path)? {
                collect(fs, root, &relative.join(name), out)?;
            }
        }
        EntryKind::File => {
            let content = fs.read(path)?;
            let relative_name = if relative.as_os_str().is_empty() {
                path.file_name().map(PathBuf::from).unwrap_or_default()
            } else {
                relative.to_path_buf()
            };
            out.push(SecretFile {
                relative_name,
                content,
            });
        }
    }
    Ok(())
}
