use crate::core::errors::SessioError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("IO operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Session record serialization failed: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl SessioError for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            HostError::Io { .. } => "HOST_IO_ERROR",
            HostError::Serialization { .. } => "HOST_SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_codes() {
        let error = HostError::Io {
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.error_code(), "HOST_IO_ERROR");
        assert!(!error.is_user_error());
        assert!(error.to_string().contains("IO operation failed"));
    }
}
