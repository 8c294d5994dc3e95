//! Writes secret files into a staging directory.

use std::path::Path;

use secretmounts_shared::errors::{SecretsError, SecretsResult};
use secretmounts_shared::layout::modes;

use super::SecretFile;
use crate::fs::HostFs;

impl SecretFile {
    /// Save this secret under `dir`, creating missing parent directories.
    pub fn save_to<F: HostFs + ?Sized>(&self, fs: &F, dir: &Path) -> SecretsResult<()> {
        let path = dir.join(&self.relative_name);
        if let Some(parent) = path.parent() {
            fs.create_dir_all(parent, modes::SECRET).map_err(|e| {
                SecretsError::Storage(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs.write(&path, &self.content, modes::SECRET).map_err(|e| {
            SecretsError::Storage(format!("failed to write {}: {}", path.display(), e))
        })
    }
}

/// Write every secret under `dest`, overwriting files at the same path.
///
/// Stops at the first failure. Files already written stay on disk.
pub fn save_secrets<F: HostFs + ?Sized>(
    fs: &F,
    dest: &Path,
    secrets: &[SecretFile],
) -> SecretsResult<()> {
    for secret in secrets {
        secret.save_to(fs, dest).map_err(|e| {
            SecretsError::Storage(format!(
                "error saving data to container filesystem on host {}: {}",
                dest.display(),
                e
            ))
        })?;
    }
    tracing::debug!(dest = %dest.display(), count = secrets.len(), "Saved secrets");
    Ok(())
}
