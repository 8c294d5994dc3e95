//! Orchestration configuration.

use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};
use secretmounts_shared::layout::paths;
use serde::{Deserialize, Serialize};

/// Configuration for one secret mount pass.
///
/// Passed explicitly into [`crate::SecretMounts`]; nothing here is process-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretMountsConfig {
    /// Mounts files in processing order. The user override comes first.
    pub mount_files: Vec<PathBuf>,
    /// Host file whose presence enables the FIPS marker secret.
    pub fips_marker: PathBuf,
    /// Container-side directory receiving the FIPS marker secret.
    pub secrets_dir: PathBuf,
    /// File name of the FIPS marker secret.
    pub fips_secret_name: String,
}

impl Default for SecretMountsConfig {
    fn default() -> Self {
        Self {
            mount_files: vec![
                PathBuf::from(paths::OVERRIDE_MOUNTS_FILE),
                PathBuf::from(paths::DEFAULT_MOUNTS_FILE),
            ],
            fips_marker: PathBuf::from(paths::FIPS_MARKER),
            secrets_dir: PathBuf::from(paths::SECRETS_DIR),
            fips_secret_name: paths::FIPS_SECRET_NAME.to_string(),
        }
    }
}

impl SecretMountsConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> SecretsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SecretsError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SecretsError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Mounts files for a pass: `explicit` when non-empty, else the configured list.
    pub fn effective_mount_files<'a>(&'a self, explicit: &'a [PathBuf]) -> &'a [PathBuf] {
        if explicit.is_empty() {
            &self.mount_files
        } else {
            explicit
        }
    }
}
