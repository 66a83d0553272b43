//! Persisting a finished destination document.
//!
//! The document is serialised in memory, written to a temporary file inside
//! the output directory and then renamed over the destination path. An
//! existing file of the same name is replaced; a failed save leaves neither a
//! partial file nor a stray temporary behind.

use crate::error::FileError;
use lopdf::Document;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Save `doc` to `path`, replacing any existing file.
pub fn save_atomic(doc: &mut Document, path: &Path) -> Result<u64, FileError> {
    let fail = |detail: String| FileError::SaveFailed {
        path: path.to_path_buf(),
        detail,
    };

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| fail(format!("serialisation failed: {e}")))?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail(format!("tempfile: {e}")))?;
    tmp.write_all(&buffer)
        .map_err(|e| fail(format!("tempfile write: {e}")))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| fail(format!("sync: {e}")))?;
    tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

    debug!("Wrote {} bytes to {}", buffer.len(), path.display());
    Ok(buffer.len() as u64)
}
