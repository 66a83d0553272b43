//! Input checks and output naming.
//!
//! A missing source is not an error: the batch records it as skipped and moves
//! on. The output directory is the one thing that must exist before any file
//! is touched; failing to create it aborts the batch.

use crate::error::{BackdropError, FileError};
use crate::output::{SKIP_MISSING, SKIP_NOT_A_FILE};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix prepended to the source file name to form the output name.
pub const OUTPUT_PREFIX: &str = "bg_";

/// Check that `path` names an existing regular file.
///
/// Returns the skip reason when it does not.
pub fn check_source(path: &Path) -> Result<(), &'static str> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(SKIP_NOT_A_FILE),
        Err(_) => Err(SKIP_MISSING),
    }
}

/// `<output_dir>/bg_<source file name>`.
pub fn output_path_for(source: &Path, output_dir: &Path) -> Result<PathBuf, FileError> {
    let name = source.file_name().ok_or_else(|| FileError::InvalidSourceName {
        path: source.to_path_buf(),
    })?;
    let mut file_name = std::ffi::OsString::from(OUTPUT_PREFIX);
    file_name.push(name);
    Ok(output_dir.join(file_name))
}

/// Create `dir` and any missing parents.
pub fn ensure_output_dir(dir: &Path) -> Result<(), BackdropError> {
    let unavailable = |source| BackdropError::OutputDirUnavailable {
        path: dir.to_path_buf(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(unavailable)?;
    if !dir.is_dir() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::Other,
            "not a directory",
        )));
    }
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}
