//! Incremental batch API: yield each file's report as soon as it is done.
//!
//! [`process_iter`] prepares the output directory and returns a [`BatchIter`].
//! Every call to `next()` processes exactly one source, synchronously, in input
//! order, so callers can drive a progress display ("processed i/total") or
//! stop between files by simply dropping the iterator.

use crate::compositor::process_file;
use crate::config::Job;
use crate::error::BackdropError;
use crate::output::{BatchStats, FileReport, ProcessingResult};
use crate::pipeline::input;
use std::iter::FusedIterator;
use std::time::Instant;
use tracing::info;

/// Iterator over the reports of a running batch.
///
/// Yields one [`FileReport`] per source. After the last one, the job's
/// progress callback receives `on_batch_complete` exactly once.
pub struct BatchIter<'a> {
    job: &'a Job,
    next: usize,
    stats: BatchStats,
    started: Instant,
    completed: bool,
}

/// Start processing `job` lazily.
///
/// # Errors
/// Returns `Err(BackdropError::OutputDirUnavailable)` when the output
/// directory cannot be created. Nothing else is fatal.
///
/// # Example
/// ```rust,no_run
/// use pdfbg::{process_iter, Job, ProcessingResult};
///
/// let job = Job::builder().sources(["a.pdf", "b.pdf"]).output_dir("out").build()?;
/// let total = job.sources().len();
/// for report in process_iter(&job)? {
///     println!("processed {}/{}", report.index, total);
///     if let ProcessingResult::Failed(e) = &report.result {
///         eprintln!("  {e}");
///     }
/// }
/// # Ok::<(), pdfbg::BackdropError>(())
/// ```
pub fn process_iter(job: &Job) -> Result<BatchIter<'_>, BackdropError> {
    input::ensure_output_dir(job.output_dir())?;

    let total = job.sources().len();
    info!(
        "Starting batch: {} files -> {} (background {})",
        total,
        job.output_dir().display(),
        job.background()
    );
    if let Some(cb) = job.progress_callback() {
        cb.on_batch_start(total);
    }

    Ok(BatchIter {
        job,
        next: 0,
        stats: BatchStats {
            total_files: total,
            ..BatchStats::default()
        },
        started: Instant::now(),
        completed: false,
    })
}

impl BatchIter<'_> {
    /// Counters for the files processed so far.
    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.stats.total_duration_ms = self.started.elapsed().as_millis() as u64;
        info!(
            "Batch complete: {} written, {} skipped, {} failed in {}ms",
            self.stats.written,
            self.stats.skipped,
            self.stats.failed,
            self.stats.total_duration_ms
        );
        if let Some(cb) = self.job.progress_callback() {
            cb.on_batch_complete(self.job.output_dir(), &self.stats);
        }
    }
}

impl Iterator for BatchIter<'_> {
    type Item = FileReport;

    fn next(&mut self) -> Option<FileReport> {
        let job = self.job;
        let total = job.sources().len();
        if self.next >= total {
            self.complete();
            return None;
        }

        let index = self.next;
        self.next += 1;
        let cb = job.progress_callback();
        if let Some(cb) = cb {
            cb.on_file_start(index + 1, total, &job.sources()[index]);
        }

        let report = process_file(job, index);
        self.stats.record(&report);

        if let Some(cb) = cb {
            match &report.result {
                ProcessingResult::Written(output) => {
                    cb.on_file_written(report.index, total, output, report.page_count)
                }
                ProcessingResult::Skipped(reason) => {
                    cb.on_file_skipped(report.index, total, &report.source, reason)
                }
                ProcessingResult::Failed(e) => {
                    cb.on_file_failed(report.index, total, &report.source, &e.to_string())
                }
            }
        }

        if self.next >= total {
            self.complete();
        }
        Some(report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.job.sources().len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter<'_> {}

impl FusedIterator for BatchIter<'_> {}
