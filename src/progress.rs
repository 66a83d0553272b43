//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::JobBuilder::progress_callback`] to receive each file's
//! outcome as soon as it is known, and a final completion event carrying the
//! output directory.
//!
//! # Example
//!
//! ```rust
//! use pdfbg::{BatchProgressCallback, Job};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct Counter(AtomicUsize);
//!
//! impl BatchProgressCallback for Counter {
//!     fn on_file_written(&self, index: usize, total: usize, _output: &std::path::Path, _pages: usize) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("processed {index}/{total}");
//!     }
//! }
//!
//! let job = Job::builder()
//!     .source("a.pdf")
//!     .output_dir("out")
//!     .progress_callback(Arc::new(Counter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::BatchStats;
use std::path::Path;
use std::sync::Arc;

/// Called by the compositor as it works through a batch.
///
/// Files are processed one at a time on the calling thread, so events arrive
/// strictly in input order. All methods default to no-ops.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once, after the output directory is ready and before any file.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a source is checked and opened.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in the job
    /// * `total`: number of sources in the job
    fn on_file_start(&self, index: usize, total: usize, source: &Path) {
        let _ = (index, total, source);
    }

    /// Called when the destination file has been saved.
    fn on_file_written(&self, index: usize, total: usize, output: &Path, page_count: usize) {
        let _ = (index, total, output, page_count);
    }

    /// Called when a source is skipped (missing or not a file).
    fn on_file_skipped(&self, index: usize, total: usize, source: &Path, reason: &str) {
        let _ = (index, total, source, reason);
    }

    /// Called when a source fails to open, compose or save.
    fn on_file_failed(&self, index: usize, total: usize, source: &Path, error: &str) {
        let _ = (index, total, source, error);
    }

    /// Called once after every source has been attempted.
    fn on_batch_complete(&self, output_dir: &Path, stats: &BatchStats) {
        let _ = (output_dir, stats);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::Job`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
