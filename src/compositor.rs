//! Eager (whole-batch) entry points and the per-file compositing routine.
//!
//! [`process`] runs every source of a [`Job`] and returns once all of them
//! have been attempted. Use [`crate::stream::process_iter`] instead to receive
//! each [`FileReport`] as soon as its file is done.

use crate::color::Rgb;
use crate::config::Job;
use crate::error::{BackdropError, FileError};
use crate::output::{BatchOutput, DocumentInfo, FileReport, ProcessingResult};
use crate::pipeline::compose::{Composer, PageCanvas};
use crate::pipeline::source::SourceDocument;
use crate::pipeline::{input, write};
use crate::stream::process_iter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Rewrite every source in `job` onto its background color.
///
/// # Returns
/// `Ok(BatchOutput)` once every source has been attempted, with one
/// [`FileReport`] per source in input order. Individual files that are
/// missing or fail are reported there, never as `Err`.
///
/// # Errors
/// Returns `Err(BackdropError)` only when the output directory cannot be
/// created; in that case no source is touched.
///
/// # Example
/// ```rust,no_run
/// use pdfbg::{process, Job, Rgb};
///
/// let job = Job::builder()
///     .sources(["a.pdf", "b.pdf"])
///     .output_dir("out")
///     .background(Rgb::from_hex("#FFF8E7")?)
///     .build()?;
/// let output = process(&job)?;
/// println!("{} written, {} failed", output.stats.written, output.stats.failed);
/// # Ok::<(), pdfbg::BackdropError>(())
/// ```
pub fn process(job: &Job) -> Result<BatchOutput, BackdropError> {
    let mut iter = process_iter(job)?;
    let files: Vec<FileReport> = iter.by_ref().collect();
    Ok(BatchOutput {
        output_dir: job.output_dir().to_path_buf(),
        files,
        stats: iter.stats().clone(),
    })
}

/// Open a PDF and report its page geometry without writing anything.
pub fn inspect(path: impl AsRef<Path>) -> Result<DocumentInfo, BackdropError> {
    let path = path.as_ref();
    if input::check_source(path).is_err() {
        return Err(BackdropError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let source = SourceDocument::open(path)?;
    Ok(source.info()?)
}

/// Process the source at `index` (0-based) of `job`.
///
/// Both documents live only inside this call; they are dropped on every
/// return path before the next source is opened.
pub(crate) fn process_file(job: &Job, index: usize) -> FileReport {
    let start = Instant::now();
    let source = job.sources()[index].clone();
    let mut page_count = 0;

    let result = match input::check_source(&source) {
        Err(reason) => {
            warn!("Skipping {}: {}", source.display(), reason);
            ProcessingResult::Skipped(reason.to_string())
        }
        Ok(()) => match composite_file(&source, job.output_dir(), job.background()) {
            Ok((output, pages)) => {
                info!(
                    "Wrote {} ({} pages) from {}",
                    output.display(),
                    pages,
                    source.display()
                );
                page_count = pages;
                ProcessingResult::Written(output)
            }
            Err(e) => {
                warn!("Failed {}: {}", source.display(), e);
                ProcessingResult::Failed(e)
            }
        },
    };

    FileReport {
        index: index + 1,
        source,
        result,
        page_count,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Open `source`, build the background-filled copy and save it.
///
/// Returns the output path and the number of pages written.
fn composite_file(
    source: &Path,
    output_dir: &Path,
    background: Rgb,
) -> Result<(PathBuf, usize), FileError> {
    let output = input::output_path_for(source, output_dir)?;
    let src = SourceDocument::open(source)?;
    if src.page_count() == 0 {
        return Err(FileError::compose(0, "document has no pages"));
    }

    let mut composer = Composer::new(&src);
    for i in 0..src.page_count() {
        let geometry = src.page_geometry(i)?;
        let mut canvas = PageCanvas::new(geometry.width, geometry.height);
        canvas.set_rotation(geometry.rotation);

        let rect = canvas.rect();
        canvas.fill_rect(rect, background);
        composer.show_page(&mut canvas, rect, i, true)?;
        composer.push_page(canvas)?;
        debug!("Page {}/{} composited", i + 1, src.page_count());
    }

    let page_count = composer.page_count();
    let mut doc = composer.finish();
    write::save_atomic(&mut doc, &output)?;
    Ok((output, page_count))
}
