//! Error types for Yukon.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for Yukon operations.
#[derive(Error, Debug)]
pub enum YukonError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed use-case document: {0}")]
    MalformedDocument(String),

    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid notification feed: {0}")]
    Feed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for Yukon operations.
pub type Result<T> = std::result::Result<T, YukonError>;

impl YukonError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Out-of-range error for an unsigned position.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Bounds-check `index` against `len`.
pub(crate) fn check_index(index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(YukonError::out_of_range(index, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, 1).unwrap(), 0);
        assert!(matches!(
            check_index(1, 1),
            Err(YukonError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_not_found_detection() {
        let err = YukonError::io(
            "missing.xml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.xml"));
        assert!(!YukonError::malformed("x").is_not_found());
    }
}
