//! Error types for depot.

use thiserror::Error;

/// Common error type for depot.
#[derive(Error, Debug)]
pub enum DepotError {
    /// Client-supplied file name with no usable basename.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Payload larger than the free space on the storage volume.
    #[error("not enough disk space: {needed} bytes needed, {available} bytes available")]
    InsufficientStorage {
        /// Bytes the payload requires.
        needed: u64,
        /// Bytes available on the volume at check time.
        available: u64,
    },

    /// The storage volume could not be statted.
    #[error("capacity probe failed: {0}")]
    Probe(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for depot operations.
pub type Result<T> = std::result::Result<T, DepotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = DepotError::InvalidName("../..".to_string());
        assert_eq!(err.to_string(), "invalid file name: \"../..\"");
    }

    #[test]
    fn test_not_found_display() {
        let err = DepotError::NotFound("file \"a.txt\"".to_string());
        assert_eq!(err.to_string(), "file \"a.txt\" not found");
    }

    #[test]
    fn test_insufficient_storage_display() {
        let err = DepotError::InsufficientStorage {
            needed: 100,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "not enough disk space: 100 bytes needed, 10 bytes available"
        );
    }

    #[test]
    fn test_probe_display() {
        let err = DepotError::Probe("statvfs /nope: ENOENT".to_string());
        assert_eq!(
            err.to_string(),
            "capacity probe failed: statvfs /nope: ENOENT"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DepotError = io_err.into();
        assert!(matches!(err, DepotError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(DepotError::Config("bad".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
