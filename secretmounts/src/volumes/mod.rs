//! Secret mount assembly.
//!
//! - `MountDescriptor` - one bind mount handed to the container runtime
//! - `SecretMountSet` - ordered descriptor accumulator for one pass
//! - `SecretMounts` - the per-container orchestration pass

mod mount;
mod secret_mounts;

pub use mount::{BIND, MountDescriptor, SecretMountSet, to_oci_mounts};
pub use secret_mounts::{SecretMounts, secret_mounts};
