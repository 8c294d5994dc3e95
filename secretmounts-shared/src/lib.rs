//! Types shared between the secretmounts library and its CLI.

pub mod errors;
pub mod layout;

pub use errors::{SecretsError, SecretsResult};
