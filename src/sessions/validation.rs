//! Pure input validation, no I/O beyond the directory probe.

use std::fs;
use std::path::Path;

use crate::sessions::errors::SessionError;

/// Keys must be non-empty after trimming.
pub fn validate_key(key: &str) -> Result<(), SessionError> {
    if key.trim().is_empty() {
        return Err(SessionError::InvalidKey);
    }
    Ok(())
}

/// Session names must be non-empty; surrounding whitespace is dropped.
pub fn validate_session_name(name: &str) -> Result<String, SessionError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SessionError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// A file-backend directory must exist and be writable.
pub fn validate_session_dir(path: &Path) -> Result<(), SessionError> {
    let metadata = fs::metadata(path).map_err(|_| SessionError::InvalidSessionPath {
        path: path.to_path_buf(),
    })?;

    if !metadata.is_dir() || metadata.permissions().readonly() {
        return Err(SessionError::InvalidSessionPath {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_success() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("a").is_ok());
    }

    #[test]
    fn test_validate_key_empty() {
        assert!(matches!(validate_key(""), Err(SessionError::InvalidKey)));
        assert!(matches!(validate_key("   "), Err(SessionError::InvalidKey)));
    }

    #[test]
    fn test_validate_session_name() {
        assert_eq!(validate_session_name("checkout").unwrap(), "checkout");
        assert_eq!(validate_session_name("  checkout  ").unwrap(), "checkout");

        assert!(matches!(
            validate_session_name(""),
            Err(SessionError::InvalidName)
        ));
        assert!(matches!(
            validate_session_name("   "),
            Err(SessionError::InvalidName)
        ));
    }

    #[test]
    fn test_validate_session_dir_accepts_writable_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_session_dir(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_session_dir_rejects_missing_path() {
        let result = validate_session_dir(Path::new("/nonexistent/sessio/path"));
        assert!(matches!(
            result,
            Err(SessionError::InvalidSessionPath { .. })
        ));
    }

    #[test]
    fn test_validate_session_dir_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = validate_session_dir(&file);
        assert!(matches!(
            result,
            Err(SessionError::InvalidSessionPath { .. })
        ));
    }
}
