//! CLI binary for pdfbg.
//!
//! A thin shim over the library crate that maps CLI flags to a `Job` and
//! prints per-file results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfbg::{
    inspect, process, BatchProgressCallback, BatchStats, Job, ProcessingResult, ProgressCallback,
    Rgb,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a progress bar over files plus one log line
/// per file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Processing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
    }

    fn on_file_start(&self, _index: usize, _total: usize, source: &Path) {
        self.bar.set_message(file_name(source));
    }

    fn on_file_written(&self, index: usize, total: usize, output: &Path, page_count: usize) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            green("✓"),
            index,
            total,
            file_name(output),
            dim(&format!("{page_count} pages")),
        ));
        self.bar.inc(1);
    }

    fn on_file_skipped(&self, index: usize, total: usize, source: &Path, reason: &str) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            yellow("–"),
            index,
            total,
            file_name(source),
            yellow(reason),
        ));
        self.bar.inc(1);
    }

    fn on_file_failed(&self, index: usize, total: usize, source: &Path, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index,
            total,
            file_name(source),
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, output_dir: &Path, stats: &BatchStats) {
        self.bar.finish_and_clear();
        print_summary(output_dir, stats);
    }
}

fn print_summary(output_dir: &Path, stats: &BatchStats) {
    let mark = if stats.failed == 0 && stats.skipped == 0 {
        green("✔")
    } else if stats.written == 0 {
        red("✘")
    } else {
        cyan("⚠")
    };
    eprintln!(
        "{}  {}/{} files written  ({} skipped, {} failed)  {}ms  →  {}",
        mark,
        bold(&stats.written.to_string()),
        stats.total_files,
        stats.skipped,
        stats.failed,
        stats.total_duration_ms,
        bold(&output_dir.display().to_string()),
    );
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Put every page of two PDFs on a cream background
  pdfbg -o out -c '#FDF6E3' slides.pdf notes.pdf

  # Default background is white
  pdfbg -o out scans/*.pdf

  # Machine-readable per-file results
  pdfbg --json -o out a.pdf b.pdf > results.json

  # Show page sizes without writing anything
  pdfbg --inspect-only a.pdf

OUTPUT:
  Each input <name> is written to <output-dir>/bg_<name>. Existing files of
  that name are replaced. Missing inputs are skipped; inputs that cannot be
  read as PDF are reported as failed. The exit status is non-zero when any
  input failed.

ENVIRONMENT VARIABLES:
  PDFBG_OUTPUT_DIR   Default for --output-dir
  PDFBG_COLOR        Default for --color
  RUST_LOG           Log filter (e.g. pdfbg=debug)
"#;

/// Put every page of a set of PDFs on a solid background color.
#[derive(Parser, Debug)]
#[command(
    name = "pdfbg",
    version,
    about = "Put every page of a set of PDFs on a solid background color",
    long_about = "Rewrite PDF documents so that each page gets a solid background color \
beneath its original content. Page sizes, order and content are preserved; the result \
for <name> is written to <output-dir>/bg_<name>.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF files to process, in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the bg_* files (created if missing).
    #[arg(
        short,
        long,
        env = "PDFBG_OUTPUT_DIR",
        required_unless_present = "inspect_only"
    )]
    output_dir: Option<PathBuf>,

    /// Background color as #RRGGBB.
    #[arg(short, long, env = "PDFBG_COLOR", default_value = "#FFFFFF",
          value_parser = parse_color)]
    color: Rgb,

    /// Output per-file results as JSON instead of text.
    #[arg(long, env = "PDFBG_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFBG_NO_PROGRESS")]
    no_progress: bool,

    /// Print page geometry only, no output files.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFBG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFBG_QUIET")]
    quiet: bool,
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    Rgb::from_hex(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Library INFO logs would interleave with the progress bar; keep them
    // at error level while the bar is shown.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        return run_inspect(&cli);
    }

    // ── Build job ────────────────────────────────────────────────────────
    let output_dir = cli
        .output_dir
        .clone()
        .context("--output-dir is required")?;

    let mut builder = Job::builder()
        .sources(cli.inputs.iter().cloned())
        .output_dir(output_dir)
        .background(cli.color);
    if show_progress {
        builder = builder.progress_callback(CliProgressCallback::new() as ProgressCallback);
    }
    let job = builder.build().context("Invalid job")?;

    // ── Run batch ────────────────────────────────────────────────────────
    let output = process(&job).context("Batch failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if !cli.quiet && !show_progress {
        // The progress callback already printed everything otherwise.
        for file in &output.files {
            match &file.result {
                ProcessingResult::Written(path) => {
                    eprintln!("processed {}/{}  {}", file.index, output.stats.total_files, path.display())
                }
                ProcessingResult::Skipped(reason) => {
                    eprintln!("skipped   {}  ({})", file.source.display(), reason)
                }
                ProcessingResult::Failed(e) => {
                    eprintln!("failed    {}  ({})", file.source.display(), e)
                }
            }
        }
        print_summary(&output.output_dir, &output.stats);
    }

    if output.stats.failed > 0 {
        anyhow::bail!(
            "{}/{} files failed",
            output.stats.failed,
            output.stats.total_files
        );
    }
    Ok(())
}

fn run_inspect(cli: &Cli) -> Result<()> {
    let mut infos = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let info =
            inspect(path).with_context(|| format!("Failed to inspect {}", path.display()))?;
        infos.push(info);
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&infos).context("Failed to serialize metadata")?
        );
        return Ok(());
    }

    for info in infos {
        println!("File:         {}", info.path.display());
        println!("PDF Version:  {}", info.pdf_version);
        println!("Pages:        {}", info.page_count);
        for (i, page) in info.pages.iter().enumerate() {
            let rotation = if page.rotation != 0 {
                format!("  (rotate {})", page.rotation)
            } else {
                String::new()
            };
            println!(
                "  {:>4}  {:.2} x {:.2} pt{}",
                i + 1,
                page.width,
                page.height,
                rotation
            );
        }
    }
    Ok(())
}
