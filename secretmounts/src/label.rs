//! Mount label application.
//!
//! Staging directories are labeled so the container's mandatory access
//! control policy allows reading them. The capability is a trait so callers
//! can plug in their own labeling subsystem.

use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};
use walkdir::WalkDir;

/// Extended attribute holding the SELinux context of a file.
pub const SELINUX_XATTR: &str = "security.selinux";

/// Mount point of selinuxfs when SELinux is enabled on the host.
const SELINUXFS: &str = "/sys/fs/selinux";

/// Applies a mount label to a path.
pub trait Relabeler {
    fn relabel(&self, path: &Path, label: &str, recursive: bool) -> SecretsResult<()>;
}

/// Labels paths by writing the `security.selinux` extended attribute.
///
/// An empty label, or a host without SELinux, makes relabeling a no-op.
#[derive(Debug, Clone, Copy)]
pub struct SelinuxRelabeler {
    enabled: bool,
}

impl SelinuxRelabeler {
    /// Detect whether SELinux is enabled on this host.
    pub fn from_host() -> Self {
        Self {
            enabled: Path::new(SELINUXFS).join("enforce").exists(),
        }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_label(path: &Path, label: &str) -> SecretsResult<()> {
        xattr::set(path, SELINUX_XATTR, label.as_bytes()).map_err(|e| {
            SecretsError::Label(format!(
                "failed to set label {:?} on {}: {}",
                label,
                path.display(),
                e
            ))
        })
    }
}

impl Relabeler for SelinuxRelabeler {
    fn relabel(&self, path: &Path, label: &str, recursive: bool) -> SecretsResult<()> {
        if !self.enabled || label.is_empty() {
            return Ok(());
        }

        for target in label_targets(path, recursive)? {
            Self::set_label(&target, label)?;
        }
        if recursive {
            tracing::debug!(path = %path.display(), label, "Relabeled recursively");
        }
        Ok(())
    }
}

/// Paths a relabel of `path` touches.
///
/// A recursive walk includes `path` itself and never descends through
/// symlinks; the links themselves are listed.
fn label_targets(path: &Path, recursive: bool) -> SecretsResult<Vec<PathBuf>> {
    if !recursive {
        return Ok(vec![path.to_path_buf()]);
    }

    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .map(|entry| {
            entry.map(walkdir::DirEntry::into_path).map_err(|e| {
                SecretsError::Label(format!("failed to walk {}: {}", path.display(), e))
            })
        })
        .collect()
}

/// Relabeler for hosts without a labeling subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRelabeler;

impl Relabeler for NoopRelabeler {
    fn relabel(&self, _path: &Path, _label: &str, _recursive: bool) -> SecretsResult<()> {
        Ok(())
    }
}
