//! Error types for archive and VTI processing.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! | Category | Variants | Typical cause |
//! |----------|----------|---------------|
//! | I/O | [`Io`][Error::Io] | File system operations |
//! | Format | [`Format`][Error::Format], [`ShapeMismatch`][Error::ShapeMismatch] | Malformed volumetric files |
//! | Archive | [`InvalidArchive`][Error::InvalidArchive] | File is not a gzip-compressed tar |
//! | Corruption | [`Truncated`][Error::Truncated] | Archive cut short by an interrupted job |
//!
//! A tar entry whose name does not match the snapshot pattern is *not* an
//! error: the extractor reports it as `Ok(None)` so the caller can skip it.

use std::io;

/// The main error type for archive and VTI operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A volumetric file is malformed or unreadable.
    ///
    /// Returned when required metadata is missing, a data array cannot be
    /// found, or the payload is not plain-text ascii.
    #[error("invalid VTI data: {0}")]
    Format(String),

    /// The stored value count does not fill the computed grid shape.
    ///
    /// Cell data must carry exactly one value per cell (one fewer than the
    /// point count per axis); point data one value per point. Anything else
    /// is a format defect, never a silent truncation.
    #[error("shape mismatch: {actual} values cannot fill grid shape {expected:?}")]
    ShapeMismatch {
        /// The shape computed from the grid dimensions.
        expected: Vec<usize>,
        /// The number of values actually stored in the file.
        actual: usize,
    },

    /// The archive cannot be opened as a gzip-compressed tar at all.
    ///
    /// This is fatal and aborts the run, unlike mid-stream truncation which
    /// yields partial results.
    #[error("not a valid gzip archive '{path}': {reason}")]
    InvalidArchive {
        /// The path that failed to open.
        path: String,
        /// What went wrong (missing magic bytes, unreadable file, ...).
        reason: String,
    },

    /// The archive stream ended mid-read.
    ///
    /// Archives produced by interrupted jobs commonly end this way. The
    /// scanner converts this into a partial, logged result; the dataset
    /// pipeline propagates it.
    #[error("archive truncated after {completed} complete directories: {reason}")]
    Truncated {
        /// Number of directories fully processed before the truncation.
        completed: usize,
        /// The underlying read failure.
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this error indicates a malformed volumetric file.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_) | Error::ShapeMismatch { .. })
    }

    /// Returns `true` if this error indicates mid-stream archive corruption.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }

    /// Creates a `Format` error from any message.
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

/// A specialized Result type for archive and VTI operations.
pub type Result<T> = std::result::Result<T, Error>;
