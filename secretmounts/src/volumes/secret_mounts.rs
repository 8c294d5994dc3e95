//! Per-container secret mount pass.

use std::path::{Path, PathBuf};

use secretmounts_shared::errors::{SecretsError, SecretsResult};
use secretmounts_shared::layout::{ContainerSecretsLayout, clean_container_path, modes};

use super::{MountDescriptor, SecretMountSet};
use crate::config::SecretMountsConfig;
use crate::fips::inject_fips_secret;
use crate::fs::{HostFs, OsFs, exists, resolve_symbolic_link};
use crate::label::{Relabeler, SelinuxRelabeler};
use crate::mounts_conf::{MountPathPair, read_mount_lines};
use crate::secrets::{read_secret_tree, save_secrets};

/// Builds the secret bind mounts for one container.
///
/// Every failure is isolated to the mounts file or entry that caused it and
/// logged; a pass always yields a (possibly empty) mount list.
///
/// Not safe against two concurrent passes for the same working directory;
/// callers serialize container creation.
pub struct SecretMounts<F = OsFs, R = SelinuxRelabeler> {
    config: SecretMountsConfig,
    fs: F,
    relabeler: R,
}

impl SecretMounts {
    /// Orchestrator over the host filesystem and host SELinux labeling.
    pub fn new(config: SecretMountsConfig) -> Self {
        Self::with_capabilities(config, OsFs, SelinuxRelabeler::from_host())
    }
}

impl<F: HostFs, R: Relabeler> SecretMounts<F, R> {
    pub fn with_capabilities(config: SecretMountsConfig, fs: F, relabeler: R) -> Self {
        Self {
            config,
            fs,
            relabeler,
        }
    }

    pub fn config(&self) -> &SecretMountsConfig {
        &self.config
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn relabeler(&self) -> &R {
        &self.relabeler
    }

    /// Copy secrets into `container_working_dir` and return their mounts.
    ///
    /// `mount_files` overrides the configured mounts files when non-empty.
    /// Mounts come in mounts-file order, then line order, followed by the
    /// FIPS secrets mount when the host is in FIPS mode.
    pub fn mounts(
        &self,
        mount_label: &str,
        container_working_dir: &Path,
        mount_files: &[PathBuf],
    ) -> Vec<MountDescriptor> {
        let layout = ContainerSecretsLayout::new(container_working_dir);
        let mut mounts = SecretMountSet::new();

        for file in self.config.effective_mount_files(mount_files) {
            self.add_secrets_from_mounts_file(file, mount_label, &layout, &mut mounts);
        }

        inject_fips_secret(&self.fs, &self.config, &layout, &mut mounts);

        tracing::debug!(
            workdir = %container_working_dir.display(),
            count = mounts.len(),
            "Prepared secret mounts"
        );
        mounts.into_mounts()
    }

    fn add_secrets_from_mounts_file(
        &self,
        file: &Path,
        mount_label: &str,
        layout: &ContainerSecretsLayout,
        mounts: &mut SecretMountSet,
    ) {
        for line in read_mount_lines(&self.fs, file) {
            let pair = match line.and_then(|line| MountPathPair::parse(&line)) {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "Skipping mounts entry");
                    continue;
                }
            };

            // Earlier files take precedence for the same container path.
            let destination = clean_container_path(&pair.container_path);
            if mounts.has_destination(&destination) {
                tracing::warn!(
                    file = %file.display(),
                    destination = %destination.display(),
                    "Secret mount destination already configured, skipping"
                );
                continue;
            }

            match self.add_secret_pair(&pair, &destination, mount_label, layout) {
                Ok(mount) => mounts.push(mount),
                Err(SecretsError::NotFound(msg)) => {
                    tracing::warn!(file = %file.display(), "{}, skipping", msg);
                }
                Err(e) => {
                    tracing::warn!(
                        file = %file.display(),
                        host = %pair.host_path.display(),
                        error = %e,
                        "Error mounting secrets, skipping"
                    );
                }
            }
        }
    }

    /// Materialize one pair mounted at the cleaned `destination`.
    ///
    /// A missing host source is reported as [`SecretsError::NotFound`].
    fn add_secret_pair(
        &self,
        pair: &MountPathPair,
        destination: &Path,
        mount_label: &str,
        layout: &ContainerSecretsLayout,
    ) -> SecretsResult<MountDescriptor> {
        let host_exists = exists(&self.fs, &pair.host_path).map_err(|e| {
            SecretsError::Storage(format!(
                "error getting status of {}: {}",
                pair.host_path.display(),
                e
            ))
        })?;
        if !host_exists {
            return Err(SecretsError::NotFound(format!(
                "secret source {} doesn't exist",
                pair.host_path.display()
            )));
        }

        let staging = layout.host_path(destination);

        // On restart the secrets were already copied for this container.
        let staged = exists(&self.fs, &staging).map_err(|e| {
            SecretsError::Storage(format!(
                "error getting status of {}: {}",
                staging.display(),
                e
            ))
        })?;
        if staged {
            tracing::debug!(staging = %staging.display(), "Secrets already staged, reusing");
        } else {
            self.materialize(&pair.host_path, &staging, mount_label)?;
        }

        Ok(MountDescriptor::bind(staging, destination))
    }

    fn materialize(&self, host_path: &Path, staging: &Path, mount_label: &str) -> SecretsResult<()> {
        self.fs
            .create_dir_all(staging, modes::STAGING_DIR)
            .map_err(|e| {
                SecretsError::Storage(format!(
                    "making container directory {} failed: {}",
                    staging.display(),
                    e
                ))
            })?;

        let host_dir = resolve_symbolic_link(&self.fs, host_path).map_err(|e| {
            SecretsError::Storage(format!(
                "failed to resolve {}: {}",
                host_path.display(),
                e
            ))
        })?;

        let secrets = read_secret_tree(&self.fs, &host_dir, Path::new(""))?;
        save_secrets(&self.fs, staging, &secrets)?;

        self.relabeler
            .relabel(staging, mount_label, false)
            .map_err(|e| SecretsError::Label(format!("error applying correct labels: {}", e)))?;

        tracing::info!(
            host = %host_dir.display(),
            staging = %staging.display(),
            files = secrets.len(),
            "Materialized secrets"
        );
        Ok(())
    }
}

/// Run one pass with the default configuration against the host.
pub fn secret_mounts(
    mount_label: &str,
    container_working_dir: &Path,
    mount_files: &[PathBuf],
) -> Vec<MountDescriptor> {
    SecretMounts::new(SecretMountsConfig::default()).mounts(
        mount_label,
        container_working_dir,
        mount_files,
    )
}
