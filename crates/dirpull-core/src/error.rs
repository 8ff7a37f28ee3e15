//! Error types for traversal and sequence operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while walking a directory tree.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found (or vanished mid-traversal).
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error while listing a directory.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An individual entry of a directory listing could not be read.
    #[error("Failed to read entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walker already failed once and must be abandoned.
    #[error("Traversal was aborted by an earlier error and cannot continue")]
    Poisoned,
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an error for a single unreadable listing entry.
    pub fn read_entry(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadEntry {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::Io { path, .. }
            | Self::ReadEntry { path, .. } => Some(path),
            Self::Poisoned => None,
        }
    }

    /// Whether this error signals misuse of the walker rather than I/O.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Poisoned)
    }
}

/// Errors raised by [`ProducerIter`](crate::ProducerIter).
///
/// Usage errors are kept apart from failures of the underlying producer so
/// that callers can tell a misuse from an I/O problem, and both from a
/// sequence that was legitimately empty.
#[derive(Debug, Error)]
pub enum SequenceError<E> {
    /// `next_item` was called after the sequence ran out.
    #[error("No such element: the sequence is exhausted")]
    NoSuchElement,

    /// The requested operation is not supported by a forward-only sequence.
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: &'static str },

    /// The producer itself failed.
    #[error(transparent)]
    Producer(E),
}

impl<E> SequenceError<E> {
    /// Whether this is a usage error rather than a producer failure.
    pub fn is_usage(&self) -> bool {
        !matches!(self, Self::Producer(_))
    }

    /// Extract the producer error, if this is one.
    pub fn into_producer(self) -> Option<E> {
        match self {
            Self::Producer(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_error_io() {
        let err = WalkError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, WalkError::PermissionDenied { .. }));

        let err = WalkError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, WalkError::NotFound { .. }));

        let err = WalkError::io("/test/path", std::io::Error::other("boom"));
        assert!(matches!(err, WalkError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_walk_error_path() {
        let err = WalkError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert_eq!(err.path(), Some(&PathBuf::from("/etc/hosts")));
        assert!(!err.is_usage());

        assert_eq!(WalkError::Poisoned.path(), None);
        assert!(WalkError::Poisoned.is_usage());
    }

    #[test]
    fn test_sequence_error_kinds() {
        let err: SequenceError<WalkError> = SequenceError::NoSuchElement;
        assert!(err.is_usage());
        assert!(err.into_producer().is_none());

        let err: SequenceError<WalkError> = SequenceError::Unsupported { operation: "remove" };
        assert!(err.is_usage());
        assert_eq!(err.to_string(), "Operation not supported: remove");

        let err = SequenceError::Producer(WalkError::Poisoned);
        assert!(!err.is_usage());
        assert!(matches!(err.into_producer(), Some(WalkError::Poisoned)));
    }
}
