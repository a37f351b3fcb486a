use std::path::PathBuf;

/// Failures surfaced by the memory store and the capture path.
#[derive(thiserror::Error, Debug)]
pub enum MemoryError {
    #[error("Memory store at {path} is unavailable: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Memory store at {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Memory store at {path} already holds an episode with id '{id}'")]
    DuplicateId { path: PathBuf, id: String },

    #[error("Nothing to capture: text is empty")]
    EmptyInput,
}

impl MemoryError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CorruptStore {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = MemoryError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_empty_input() {
        assert_eq!(
            MemoryError::EmptyInput.to_string(),
            "Nothing to capture: text is empty"
        );
    }

    #[test]
    fn test_display_storage_unavailable() {
        let err = MemoryError::unavailable(
            "/nope/memory.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Memory store at /nope/memory.json is unavailable: denied"
        );
    }

    #[test]
    fn test_corrupt_store_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MemoryError::corrupt("/tmp/memory.json", source);
        assert!(matches!(err, MemoryError::CorruptStore { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
