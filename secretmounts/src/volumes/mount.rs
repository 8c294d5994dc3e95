//! Bind mount descriptors for the container runtime.

use std::path::{Path, PathBuf};

use oci_spec::runtime::{Mount, MountBuilder};
use secretmounts_shared::errors::{SecretsError, SecretsResult};
use serde::{Deserialize, Serialize};

/// Mount type and option used for every secret mount.
pub const BIND: &str = "bind";

/// Container bind mount entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountDescriptor {
    /// Staging directory on the host
    pub source: PathBuf,
    /// Destination path in container
    pub destination: PathBuf,
    /// Mount type, always "bind"
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Vec<String>,
}

impl MountDescriptor {
    /// Bind mount of `source` at `destination`.
    pub fn bind(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            kind: BIND.to_string(),
            options: vec![BIND.to_string()],
        }
    }

    /// Convert into an OCI runtime-spec mount.
    pub fn to_oci(&self) -> SecretsResult<Mount> {
        MountBuilder::default()
            .destination(self.destination.clone())
            .typ(self.kind.clone())
            .source(self.source.clone())
            .options(self.options.clone())
            .build()
            .map_err(|e| {
                SecretsError::Spec(format!(
                    "failed to build mount for {}: {}",
                    self.destination.display(),
                    e
                ))
            })
    }
}

/// Convert a descriptor list for the runtime-spec builder, keeping order.
pub fn to_oci_mounts(mounts: &[MountDescriptor]) -> SecretsResult<Vec<Mount>> {
    mounts.iter().map(MountDescriptor::to_oci).collect()
}

/// Ordered secret mounts collected during one pass.
#[derive(Debug, Default)]
pub struct SecretMountSet {
    mounts: Vec<MountDescriptor>,
}

impl SecretMountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bind mount.
    pub fn add_bind(&mut self, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) {
        self.push(MountDescriptor::bind(source, destination));
    }

    pub fn push(&mut self, mount: MountDescriptor) {
        self.mounts.push(mount);
    }

    /// Whether some mount already targets `destination`.
    pub fn has_destination(&self, destination: &Path) -> bool {
        self.mounts.iter().any(|m| m.destination.as_path() == destination)
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Build container mount configuration.
    pub fn into_mounts(self) -> Vec<MountDescriptor> {
        self.mounts
    }
}
