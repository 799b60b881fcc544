//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CullError>;

/// Everything that can go wrong while reviewing a directory.
///
/// None of these are fatal: the event loop converts them to a status-line
/// message and keeps running. There is no automatic retry; the user's next
/// gesture is the retry.
#[derive(Debug, Error)]
pub enum CullError {
    /// The access grant for the selected directory is missing or could not
    /// be re-activated.
    #[error("access denied for {path}: {reason}")]
    AccessDenied { path: PathBuf, reason: String },

    /// Reading the directory listing failed.
    #[error("could not list {path}: {source}")]
    ListingFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Moving a file to the trash failed. The entry has already been put
    /// back into the queue when this is returned.
    #[error("could not move {path} to trash: {cause}")]
    DispositionFailed {
        path: PathBuf,
        cause: DispositionCause,
    },

    /// Launching the default application for a file failed.
    #[error("could not open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// User configuration could not be read or written.
    #[error("config error: {0}")]
    Config(String),
}

/// Why a trash move failed.
///
/// A target that is simply gone is not represented here: the disposition
/// action treats it as an already-satisfied delete, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispositionCause {
    /// Permission to the file or its parent was lost after listing.
    PermissionLost(String),
    /// Any other I/O failure reported by the trash primitive.
    Io(String),
}

impl std::fmt::Display for DispositionCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispositionCause::PermissionLost(msg) => write!(f, "permission lost: {}", msg),
            DispositionCause::Io(msg) => write!(f, "{}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = CullError::AccessDenied {
            path: PathBuf::from("/tmp/photos"),
            reason: "grant released".to_string(),
        };
        assert_eq!(err.to_string(), "access denied for /tmp/photos: grant released");

        let err = CullError::DispositionFailed {
            path: PathBuf::from("/tmp/photos/a.png"),
            cause: DispositionCause::Io("device busy".to_string()),
        };
        assert!(err.to_string().contains("a.png"));
        assert!(err.to_string().contains("device busy"));
    }

    #[test]
    fn test_listing_failed_preserves_source() {
        let err = CullError::ListingFailed {
            path: PathBuf::from("/gone"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        assert!(err.to_string().starts_with("could not list /gone"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
