//! Result types produced by a batch run.
//!
//! Every source yields exactly one [`FileReport`], in input order, whose
//! [`ProcessingResult`] says whether the file was written, skipped or failed.
//! [`BatchOutput`] collects the reports together with aggregate [`BatchStats`].

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reason reported when a source path does not exist.
pub const SKIP_MISSING: &str = "file does not exist";

/// Reason reported when a source path exists but is not a regular file.
pub const SKIP_NOT_A_FILE: &str = "not a regular file";

/// Outcome for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// The destination file was written to this path.
    Written(PathBuf),
    /// The source was not attempted.
    Skipped(String),
    /// Opening, compositing or saving failed.
    Failed(FileError),
}

impl ProcessingResult {
    pub fn is_written(&self) -> bool {
        matches!(self, ProcessingResult::Written(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ProcessingResult::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProcessingResult::Failed(_))
    }

    /// The written path, if any.
    pub fn output_path(&self) -> Option<&PathBuf> {
        match self {
            ProcessingResult::Written(p) => Some(p),
            _ => None,
        }
    }
}

/// Report for a single source, in the position it had in the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// 1-indexed position in the job's source list.
    pub index: usize,
    pub source: PathBuf,
    pub result: ProcessingResult,
    /// Pages written to the destination (0 unless written).
    pub page_count: usize,
    pub duration_ms: u64,
}

/// Aggregate counters for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_files: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_pages: usize,
    pub total_duration_ms: u64,
}

impl BatchStats {
    pub(crate) fn record(&mut self, report: &FileReport) {
        match report.result {
            ProcessingResult::Written(_) => {
                self.written += 1;
                self.total_pages += report.page_count;
            }
            ProcessingResult::Skipped(_) => self.skipped += 1,
            ProcessingResult::Failed(_) => self.failed += 1,
        }
    }

    /// Files attempted so far.
    pub fn processed(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}

/// Everything a finished batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub output_dir: PathBuf,
    /// One entry per source, same order as the job.
    pub files: Vec<FileReport>,
    pub stats: BatchStats,
}

/// Width and height of a page in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Effective `/Rotate`, one of 0, 90, 180, 270.
    pub rotation: i64,
}

/// Structural information about a PDF, as reported by [`crate::inspect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub pdf_version: String,
    pub page_count: usize,
    pub pages: Vec<PageGeometry>,
}
