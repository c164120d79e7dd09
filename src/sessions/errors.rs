use std::path::PathBuf;

use crate::core::errors::SessioError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid key: expected a non-empty string")]
    InvalidKey,

    #[error("Invalid session name: cannot be empty")]
    InvalidName,

    #[error("Location '{path}' is not a valid directory or not writable")]
    InvalidSessionPath { path: PathBuf },

    #[error("Session validation failed: token mismatch, session destroyed")]
    SessionViolated,

    #[error("Host subsystem operation failed: {source}")]
    Host {
        #[from]
        source: crate::host::errors::HostError,
    },
}

impl SessioError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::InvalidKey => "INVALID_KEY",
            SessionError::InvalidName => "INVALID_SESSION_NAME",
            SessionError::InvalidSessionPath { .. } => "INVALID_SESSION_PATH",
            SessionError::SessionViolated => "SESSION_VIOLATED",
            SessionError::Host { .. } => "HOST_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidKey
                | SessionError::InvalidName
                | SessionError::InvalidSessionPath { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_display() {
        let error = SessionError::InvalidKey;
        assert_eq!(error.to_string(), "Invalid key: expected a non-empty string");
        assert_eq!(error.error_code(), "INVALID_KEY");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_invalid_session_path_display() {
        let error = SessionError::InvalidSessionPath {
            path: PathBuf::from("/nonexistent/path"),
        };
        assert_eq!(
            error.to_string(),
            "Location '/nonexistent/path' is not a valid directory or not writable"
        );
        assert_eq!(error.error_code(), "INVALID_SESSION_PATH");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_session_violated_is_not_user_error() {
        let error = SessionError::SessionViolated;
        assert_eq!(error.error_code(), "SESSION_VIOLATED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_host_error_conversion() {
        let host_error = crate::host::errors::HostError::Io {
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
        };
        let error: SessionError = host_error.into();
        assert_eq!(error.error_code(), "HOST_ERROR");
        assert!(!error.is_user_error());
    }
}
