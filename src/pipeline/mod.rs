//! Pipeline stages for background compositing.
//!
//! Each submodule implements one step of processing a single source file.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ source ──▶ compose ──▶ write
//! (check)   (lopdf)    (canvas)    (atomic)
//! ```
//!
//! 1. [`input`]: existence check, `bg_` output naming, output directory
//! 2. [`source`]: open the PDF, read page boxes, rotation, content, resources
//! 3. [`compose`]: new document; per page a filled rectangle plus the source
//!    page shown on top as a Form XObject
//! 4. [`write`]: serialise and atomically replace the destination file
//!
//! [`geometry`] holds the rectangle type and placement matrix shared by
//! `source` and `compose`.

pub mod compose;
pub mod geometry;
pub mod input;
pub mod source;
pub mod write;

#[cfg(test)]
pub(crate) mod testing;
