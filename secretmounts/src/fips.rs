//! FIPS mode marker secret.
//!
//! When the host runs in FIPS mode, containers get an empty
//! `/run/secrets/system-fips` so their crypto libraries switch to FIPS mode
//! as well.

use secretmounts_shared::errors::{SecretsError, SecretsResult};
use secretmounts_shared::layout::{ContainerSecretsLayout, clean_container_path, modes};

use crate::config::SecretMountsConfig;
use crate::fs::{HostFs, exists};
use crate::volumes::SecretMountSet;

/// Mode of the created (empty) marker secret.
const FIPS_SECRET_MODE: u32 = 0o644;

/// Add the FIPS marker secret if the host marker file exists.
///
/// Never fails the pass: every error is logged and injection is skipped.
pub fn inject_fips_secret<F: HostFs + ?Sized>(
    fs: &F,
    config: &SecretMountsConfig,
    layout: &ContainerSecretsLayout,
    mounts: &mut SecretMountSet,
) {
    match exists(fs, &config.fips_marker) {
        Ok(true) => {
            if let Err(e) = add_fips_secret(fs, config, layout, mounts) {
                tracing::warn!(error = %e, "Error adding FIPS mode secret to container");
            }
        }
        Ok(false) => {
            tracing::debug!(
                marker = %config.fips_marker.display(),
                "FIPS marker does not exist on host, not mounting FIPS mode secret"
            );
        }
        Err(e) => {
            tracing::error!(
                marker = %config.fips_marker.display(),
                error = %e,
                "Error checking FIPS marker for FIPS mode secret"
            );
        }
    }
}

fn add_fips_secret<F: HostFs + ?Sized>(
    fs: &F,
    config: &SecretMountsConfig,
    layout: &ContainerSecretsLayout,
    mounts: &mut SecretMountSet,
) -> SecretsResult<()> {
    let dir_on_host = layout.secrets_dir(&config.secrets_dir);
    let storage = |what: &str, e: std::io::Error| {
        SecretsError::Storage(format!("{} {}: {}", what, dir_on_host.display(), e))
    };

    if !exists(fs, &dir_on_host).map_err(|e| storage("failed to stat", e))? {
        fs.create_dir_all(&dir_on_host, modes::STAGING_DIR)
            .map_err(|e| storage("making container directory on host failed for", e))?;
    }

    // Survives restarts; only created once.
    let secret = dir_on_host.join(&config.fips_secret_name);
    if !exists(fs, &secret).map_err(|e| storage("failed to stat FIPS secret in", e))? {
        fs.write(&secret, &[], FIPS_SECRET_MODE)
            .map_err(|e| storage("error creating FIPS mode secret in", e))?;
    }

    let destination = clean_container_path(&config.secrets_dir);
    if !mounts.has_destination(&destination) {
        mounts.add_bind(&dir_on_host, destination);
    }
    Ok(())
}
