//! Error types for the pdfbg library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`BackdropError`] is **fatal**: the batch cannot start at all (no sources,
//!   output directory cannot be created, malformed color). Returned as
//!   `Err(BackdropError)` from [`crate::process`] and [`crate::process_iter`]
//!   before any file is touched.
//!
//! * [`FileError`] is **non-fatal**: a single source failed to open, compose or
//!   save. Stored inside [`crate::output::ProcessingResult::Failed`] so the
//!   remaining sources are still processed.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdfbg library.
///
/// Per-file failures use [`FileError`] and are reported through
/// [`crate::output::ProcessingResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum BackdropError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// The job was built without any source paths.
    #[error("No source files given\nPass at least one PDF path.")]
    EmptySources,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background color is not of the form `#RRGGBB`.
    #[error("Invalid color '{input}': expected #RRGGBB (e.g. #FFFFFF)")]
    InvalidColor { input: String },

    // ── Output directory ──────────────────────────────────────────────────
    /// The output directory is missing and could not be created, or exists
    /// but is not a directory.
    #[error("Output directory '{path}' is unavailable: {source}")]
    OutputDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Single-document operations ────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// A single-document operation (e.g. [`crate::inspect`]) failed.
    #[error(transparent)]
    File(#[from] FileError),
}

/// A non-fatal error for a single source file.
///
/// Stored in [`crate::output::ProcessingResult::Failed`]. The batch continues
/// with the next source.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The file could not be parsed as a PDF (corrupt, wrong format, unreadable).
    #[error("Failed to open '{path}' as PDF: {detail}")]
    OpenFailed { path: PathBuf, detail: String },

    /// The PDF is encrypted; decryption is not supported.
    #[error("PDF '{path}' is encrypted")]
    Encrypted { path: PathBuf },

    /// Building the destination document failed. `page` is 1-indexed, 0 when
    /// the failure is not tied to a page.
    #[error("Compositing failed at page {page}: {detail}")]
    ComposeFailed { page: usize, detail: String },

    /// Serialising or writing the destination file failed.
    #[error("Failed to write '{path}': {detail}")]
    SaveFailed { path: PathBuf, detail: String },

    /// The source path has no file name to derive the output name from.
    #[error("Source path '{path}' has no file name")]
    InvalidSourceName { path: PathBuf },
}

impl FileError {
    pub(crate) fn compose(page: usize, detail: impl Into<String>) -> Self {
        FileError::ComposeFailed {
            page,
            detail: detail.into(),
        }
    }
}
