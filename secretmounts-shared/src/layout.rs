//! Host-side layout of a container's working directory.
//!
//! Container paths (absolute paths as seen inside the container) are
//! re-rooted under the container working directory on the host:
//! ```text
//! {workdir}/
//! ├── run/secrets/           # FIPS secrets directory
//! │   └── system-fips        # FIPS marker secret
//! └── {container_path}/      # one staging directory per mounts.conf entry
//! ```

use std::path::{Component, Path, PathBuf};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Well-known host and container paths.
pub mod paths {
    /// System default mounts file (`host_path:container_path` per line).
    pub const DEFAULT_MOUNTS_FILE: &str = "/usr/share/containers/mounts.conf";

    /// User override mounts file, consulted before the system default.
    pub const OVERRIDE_MOUNTS_FILE: &str = "/etc/containers/mounts.conf";

    /// Host file whose presence signals system-wide FIPS mode.
    pub const FIPS_MARKER: &str = "/etc/system-fips";

    /// Container-side secrets directory receiving the FIPS marker.
    pub const SECRETS_DIR: &str = "/run/secrets";

    /// Name of the FIPS marker secret inside the secrets directory.
    pub const FIPS_SECRET_NAME: &str = "system-fips";
}

/// Directory modes used when materializing secrets.
pub mod modes {
    /// Staging and secrets directories.
    pub const STAGING_DIR: u32 = 0o755;

    /// Secret files and the directories created to hold them.
    pub const SECRET: u32 = 0o700;
}

// ============================================================================
// CONTAINER SECRETS LAYOUT
// ============================================================================

/// Per-container working directory layout.
#[derive(Clone, Debug)]
pub struct ContainerSecretsLayout {
    root: PathBuf,
}

impl ContainerSecretsLayout {
    /// Create a layout rooted at the container working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Container working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host location of a container path: {root}/{container_path}
    ///
    /// The container path is cleaned with [`clean_container_path`] first, so
    /// `..` never climbs above `root`.
    pub fn host_path(&self, container_path: impl AsRef<Path>) -> PathBuf {
        let mut out = self.root.clone();
        for component in clean_container_path(container_path).components() {
            if let Component::Normal(part) = component {
                out.push(part);
            }
        }
        out
    }

    /// Secrets directory on the host: {root}/{secrets_dir}
    pub fn secrets_dir(&self, secrets_dir: impl AsRef<Path>) -> PathBuf {
        self.host_path(secrets_dir)
    }
}

/// Lexically clean a container path into absolute form.
///
/// `run/secret`, `/run/secret/` and `/run/./x/../secret` all become
/// `/run/secret`. `..` stops at `/`.
pub fn clean_container_path(path: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.as_ref().components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}
