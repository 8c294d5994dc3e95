//! Secret mounts for containers.
//!
//! Before a container starts, host secret directories listed in `mounts.conf`
//! files are copied into per-container staging directories under the
//! container working directory, and a bind mount is produced for each of
//! them. Copies happen once per staging directory, so restarts reuse them.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mounts = secretmounts::secret_mounts("", Path::new("/var/lib/ctr/abc"), &[]);
//! for mount in &mounts {
//!     println!("{} -> {}", mount.source.display(), mount.destination.display());
//! }
//! ```

pub mod config;
pub mod fips;
pub mod fs;
pub mod label;
pub mod mounts_conf;
pub mod secrets;
pub mod volumes;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SecretMountsConfig;
pub use label::{NoopRelabeler, Relabeler, SelinuxRelabeler};
pub use mounts_conf::MountPathPair;
pub use secretmounts_shared::errors::{SecretsError, SecretsResult};
pub use secretmounts_shared::layout::ContainerSecretsLayout;
pub use volumes::{MountDescriptor, SecretMounts, secret_mounts, to_oci_mounts};
