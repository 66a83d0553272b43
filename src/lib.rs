//! # pdfbg
//!
//! Batch-rewrite PDF documents so every page sits on a solid background color.
//!
//! For each source file a new document is built whose pages are filled
//! rectangles of the chosen color, with the original page content shown on
//! top at the same size. Page count, page order and page geometry are
//! preserved. The result is written next to the others as `bg_<name>` in the
//! output directory.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Job (sources, output dir, color)
//!  │
//!  ├─ 0. Prepare  create the output directory (the only fatal step)
//!  └─ per source, in order:
//!      ├─ 1. Check    missing or not a file → Skipped
//!      ├─ 2. Open     parse with lopdf       → Failed on error
//!      ├─ 3. Compose  fill rect + source page as Form XObject, page by page
//!      └─ 4. Save     atomic write of bg_<name> → Written
//! ```
//!
//! One bad file never aborts the batch: every source yields exactly one
//! [`ProcessingResult`], in input order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfbg::{process, Job, ProcessingResult, Rgb};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let job = Job::builder()
//!         .sources(["slides.pdf", "notes.pdf"])
//!         .output_dir("out")
//!         .background(Rgb::from_hex("#FDF6E3")?)
//!         .build()?;
//!
//!     let output = process(&job)?;
//!     for file in &output.files {
//!         match &file.result {
//!             ProcessingResult::Written(path) => println!("wrote {}", path.display()),
//!             ProcessingResult::Skipped(reason) => println!("skipped: {reason}"),
//!             ProcessingResult::Failed(err) => eprintln!("failed: {err}"),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfbg` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdfbg = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use color::Rgb;
pub use compositor::{inspect, process};
pub use config::{Job, JobBuilder};
pub use error::{BackdropError, FileError};
pub use output::{
    BatchOutput, BatchStats, DocumentInfo, FileReport, PageGeometry, ProcessingResult,
};
pub use pipeline::input::OUTPUT_PREFIX;
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{process_iter, BatchIter};
