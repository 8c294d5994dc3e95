//! Host secret trees and their materialized copies.
//!
//! - [`read_secret_tree`] walks a host secret directory into [`SecretFile`]s
//! - [`save_secrets`] writes them under a staging directory

mod materialize;
mod reader;

pub use materialize::save_secrets;
pub use reader::read_secret_tree;

use std::path::PathBuf;

/// One file discovered under a host secret root.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretFile {
    /// Path relative to the read root, subdirectories preserved.
    pub relative_name: PathBuf,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for SecretFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secret content stays out of logs.
        f.debug_struct("SecretFile")
            .field("relative_name", &self.relative_name)
            .field("len", &self.content.len())
            .finish()
    }
}
