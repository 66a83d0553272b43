//! Source documents: open a PDF and read what compositing needs from each page.
//!
//! `lopdf` reads the whole file into memory during [`SourceDocument::open`],
//! so no file handle outlives that call. Page attributes that the PDF page
//! tree allows to be inherited (`MediaBox`, `CropBox`, `Rotate`, `Resources`)
//! are looked up through the `Parent` chain.

use crate::error::FileError;
use crate::output::{DocumentInfo, PageGeometry};
use crate::pipeline::geometry::Rect;
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Guards against cyclic `Parent` links in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

/// An opened source PDF.
pub struct SourceDocument {
    path: PathBuf,
    doc: Document,
    /// Page object ids in page order.
    pages: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse the file at `path`.
    ///
    /// Any parse failure (not a PDF, truncated, unreadable) is an
    /// [`FileError::OpenFailed`]. Encrypted documents are opened with the
    /// empty user password; those that need a real one are refused with
    /// [`FileError::Encrypted`].
    pub fn open(path: &Path) -> Result<Self, FileError> {
        let mut doc = Document::load(path).map_err(|e| FileError::OpenFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        if doc.is_encrypted() {
            if let Err(e) = doc.decrypt("") {
                debug!("Cannot decrypt {}: {}", path.display(), e);
                return Err(FileError::Encrypted {
                    path: path.to_path_buf(),
                });
            }
            // Nothing copied out of this document may carry the old handler.
            doc.trailer.remove(b"Encrypt");
            debug!("Decrypted {} with the empty user password", path.display());
        }

        // get_pages() is keyed by 1-based page number, so values() is in page order.
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        debug!("Opened {} ({} pages)", path.display(), pages.len());

        Ok(Self {
            path: path.to_path_buf(),
            doc,
            pages,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.doc
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, FileError> {
        self.pages.get(index).copied().ok_or_else(|| {
            FileError::compose(
                index + 1,
                format!("page index out of range ({} pages)", self.pages.len()),
            )
        })
    }

    /// The visible page area: `CropBox` if present, else `MediaBox`.
    pub fn page_box(&self, index: usize) -> Result<Rect, FileError> {
        let page_id = self.page_id(index)?;
        let rect = self
            .inherited(page_id, b"CropBox")
            .and_then(|obj| self.rect_from(obj))
            .or_else(|| {
                self.inherited(page_id, b"MediaBox")
                    .and_then(|obj| self.rect_from(obj))
            })
            .ok_or_else(|| FileError::compose(index + 1, "page has no usable MediaBox"))?;

        if !rect.is_valid() {
            return Err(FileError::compose(
                index + 1,
                format!(
                    "invalid page geometry {}x{}",
                    rect.width(),
                    rect.height()
                ),
            ));
        }
        Ok(rect)
    }

    /// Effective `/Rotate`, normalised to 0, 90, 180 or 270.
    pub fn page_rotation(&self, index: usize) -> Result<i64, FileError> {
        let page_id = self.page_id(index)?;
        let rotate = self
            .inherited(page_id, b"Rotate")
            .and_then(|obj| self.number(obj))
            .map(|deg| deg as i64)
            .unwrap_or(0);
        // Non-multiples of 90 are invalid; viewers treat them as 0.
        if rotate % 90 != 0 {
            return Ok(0);
        }
        Ok(rotate.rem_euclid(360))
    }

    pub fn page_geometry(&self, index: usize) -> Result<PageGeometry, FileError> {
        let rect = self.page_box(index)?;
        Ok(PageGeometry {
            width: rect.width(),
            height: rect.height(),
            rotation: self.page_rotation(index)?,
        })
    }

    /// The page's content streams, decoded and joined into one buffer.
    pub fn page_content(&self, index: usize) -> Result<Vec<u8>, FileError> {
        let page_id = self.page_id(index)?;
        let mut content = Vec::new();
        for stream_id in self.doc.get_page_contents(page_id) {
            let Ok(stream) = self.doc.get_object(stream_id).and_then(Object::as_stream) else {
                continue;
            };
            let bytes = if stream.dict.has(b"Filter") {
                stream.decompressed_content().map_err(|e| {
                    FileError::compose(index + 1, format!("cannot decode content stream: {e}"))
                })?
            } else {
                stream.content.clone()
            };
            content.extend_from_slice(&bytes);
            // Streams are concatenated; keep tokens from running together.
            content.push(b'\n');
        }
        Ok(content)
    }

    /// The page's (possibly inherited) resource dictionary, unresolved.
    pub fn page_resources(&self, index: usize) -> Result<Option<&Object>, FileError> {
        let page_id = self.page_id(index)?;
        Ok(self.inherited(page_id, b"Resources"))
    }

    /// The page's transparency group, if it declares one. Not inheritable.
    pub fn page_group(&self, index: usize) -> Result<Option<&Object>, FileError> {
        let page_id = self.page_id(index)?;
        let page = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| FileError::compose(index + 1, format!("page is not a dictionary: {e}")))?;
        Ok(page.get(b"Group").ok())
    }

    /// Structural summary of the whole document.
    pub fn info(&self) -> Result<DocumentInfo, FileError> {
        let pages = (0..self.page_count())
            .map(|i| self.page_geometry(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DocumentInfo {
            path: self.path.clone(),
            pdf_version: self.doc.version.clone(),
            page_count: pages.len(),
            pages,
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    /// Look `key` up on the page dictionary, then on each ancestor.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut current = Some(page_id);
        for _ in 0..MAX_TREE_DEPTH {
            let node = self.doc.get_dictionary(current?).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value);
            }
            current = node.get(b"Parent").and_then(Object::as_reference).ok();
        }
        None
    }

    /// Follow a single indirect reference.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn number(&self, obj: &Object) -> Option<f32> {
        match self.resolve(obj)? {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r as f32),
            _ => None,
        }
    }

    fn rect_from(&self, obj: &Object) -> Option<Rect> {
        let items = self.resolve(obj)?.as_array().ok()?;
        if items.len() != 4 {
            return None;
        }
        let mut v = [0.0f32; 4];
        for (slot, item) in v.iter_mut().zip(items) {
            *slot = self.number(item)?;
        }
        Some(Rect::new(v[0], v[1], v[2], v[3]))
    }
}
