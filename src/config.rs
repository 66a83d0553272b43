//! The immutable [`Job`] describing one batch invocation.
//!
//! A job is built fresh from caller state via [`JobBuilder`], executed once
//! by [`crate::process`] or [`crate::process_iter`], and dropped. Nothing is
//! persisted between runs.

use crate::color::Rgb;
use crate::error::BackdropError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// One batch of PDFs to rewrite onto a background color.
///
/// # Example
/// ```rust
/// use pdfbg::{Job, Rgb};
///
/// let job = Job::builder()
///     .sources(["a.pdf", "b.pdf"])
///     .output_dir("out")
///     .background("#FFF8E7".parse::<Rgb>().unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(job.sources().len(), 2);
/// ```
#[derive(Clone)]
pub struct Job {
    sources: Vec<PathBuf>,
    output_dir: PathBuf,
    background: Rgb,
    progress_callback: Option<ProgressCallback>,
}

impl Job {
    /// Create a new builder for `Job`.
    pub fn builder() -> JobBuilder {
        JobBuilder::default()
    }

    /// Source paths in processing order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Directory the `bg_*` files are written into. Created if absent.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn progress_callback(&self) -> Option<&ProgressCallback> {
        self.progress_callback.as_ref()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("sources", &self.sources)
            .field("output_dir", &self.output_dir)
            .field("background", &self.background.to_string())
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

/// Builder for [`Job`].
#[derive(Default)]
pub struct JobBuilder {
    sources: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    background: Rgb,
    progress_callback: Option<ProgressCallback>,
}

impl JobBuilder {
    /// Append one source path.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Append several source paths, keeping their order.
    pub fn sources<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Background color. Default: white.
    pub fn background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress_callback = Some(cb);
        self
    }

    /// Build the job, validating constraints.
    pub fn build(self) -> Result<Job, BackdropError> {
        if self.sources.is_empty() {
            return Err(BackdropError::EmptySources);
        }
        let output_dir = match self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => {
                return Err(BackdropError::InvalidConfig(
                    "output directory is required".into(),
                ))
            }
        };
        Ok(Job {
            sources: self.sources,
            output_dir,
            background: self.background,
            progress_callback: self.progress_callback,
        })
    }
}
