//! Error types for secret mount preparation.

use thiserror::Error;

/// Errors raised while preparing secret mounts.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Mount configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A configured secret source does not exist on the host.
    #[error("not found: {0}")]
    NotFound(String),

    /// Filesystem operation failed (mkdir, read, write, stat).
    #[error("storage error: {0}")]
    Storage(String),

    /// Applying a mount label failed.
    #[error("label error: {0}")]
    Label(String),

    /// Building a runtime-spec structure failed.
    #[error("runtime spec error: {0}")]
    Spec(String),
}

pub type SecretsResult<T> = Result<T, SecretsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let err = SecretsError::Storage("failed to create /ctr/run/secrets: denied".to_string());
        assert_eq!(
            err.to_string(),
            "storage error: failed to create /ctr/run/secrets: denied"
        );

        let err = SecretsError::Config("malformed mount-path entry \"abc\"".to_string());
        assert!(err.to_string().starts_with("configuration error:"));

        let err = SecretsError::NotFound("secret source /host/gone doesn't exist".to_string());
        assert_eq!(err.to_string(), "not found: secret source /host/gone doesn't exist");
    }
}
