//! Error types for asset extraction operations.

use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while mirroring an asset namespace.
///
/// Most failures during a walk are contained at the node where they occur
/// and only show up in logs and in the
/// [`ExtractionReport`](crate::ExtractionReport). The variants here are the
/// ones that reach a caller: failures to set up the walk at all, and errors
/// from namespace construction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The destination root could not be resolved to a writable directory.
    #[error("destination directory unavailable: {reason}")]
    DestinationUnavailable {
        /// Why the destination was rejected.
        reason: String,
    },

    /// Listing a node of the asset namespace failed.
    #[error("failed to list assets under '{path}': {source}")]
    ListFailed {
        /// Asset path whose listing failed (empty for the root).
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An asset path or a child name reported by a namespace is not usable.
    #[error("invalid asset path '{path}': {reason}")]
    InvalidAssetPath {
        /// The offending path or name.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Package format is unsupported or unrecognized.
    #[error("unsupported package format")]
    UnsupportedFormat,

    /// Package archive is corrupted or invalid.
    #[error("invalid package archive: {0}")]
    InvalidArchive(String),
}

impl ExtractionError {
    /// Returns `true` if this error stops an extraction before or at the
    /// root of the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetmirror_core::ExtractionError;
    ///
    /// let err = ExtractionError::DestinationUnavailable {
    ///     reason: "no external storage".to_string(),
    /// };
    /// assert!(err.is_fatal());
    ///
    /// let err = ExtractionError::InvalidAssetPath {
    ///     path: "..".to_string(),
    ///     reason: "parent directory reference",
    /// };
    /// assert!(!err.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DestinationUnavailable { .. }
                | Self::ListFailed { .. }
                | Self::UnsupportedFormat
                | Self::InvalidArchive(_)
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetmirror_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("bad central directory".to_string());
    /// assert_eq!(err.context(), Some("bad central directory"));
    ///
    /// let err = ExtractionError::UnsupportedFormat;
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::DestinationUnavailable { reason } => Some(reason),
            Self::InvalidAssetPath { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
