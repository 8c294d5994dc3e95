//! `mounts.conf` reading and parsing.
//!
//! Each line has the form `host_path:container_path`. There are no comments
//! and no escaping; blank lines are malformed entries.

use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};

use crate::fs::HostFs;

/// A host directory and the container path it is exposed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPathPair {
    pub host_path: PathBuf,
    pub container_path: PathBuf,
}

impl MountPathPair {
    /// Split a line on its first `:`.
    ///
    /// Both halves must be non-empty; anything after the first `:` belongs to
    /// the container path.
    pub fn parse(line: &str) -> SecretsResult<Self> {
        match line.split_once(':') {
            Some((host, container)) if !host.is_empty() && !container.is_empty() => Ok(Self {
                host_path: PathBuf::from(host),
                container_path: PathBuf::from(container),
            }),
            _ => Err(SecretsError::Config(format!(
                "malformed mount-path entry {:?}: expected host_path:container_path",
                line
            ))),
        }
    }
}

impl std::str::FromStr for MountPathPair {
    type Err = SecretsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Read the raw lines of a mounts file.
///
/// A file that cannot be read yields no lines and a warning. Lines are split
/// on `\n` with a trailing `\r` removed and decoded one by one, so a line
/// that is not UTF-8 becomes an error for that line only. Content is not
/// validated here.
pub fn read_mount_lines<F: HostFs + ?Sized>(fs: &F, path: &Path) -> Vec<SecretsResult<String>> {
    let bytes = match fs.read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "Mounts file not readable, skipping");
            return Vec::new();
        }
    };

    let mut lines: Vec<&[u8]> = bytes.split(|b| *b == b'\n').collect();
    // A final newline does not start another line.
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8(line.to_vec()).map_err(|e| {
                SecretsError::Config(format!(
                    "line {} of {} is not valid UTF-8: {}",
                    idx + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
