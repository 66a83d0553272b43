//! Destination document construction.
//!
//! A [`Composer`] owns a fresh `lopdf::Document` and appends one page per
//! [`PageCanvas`]. A canvas records drawing operations for one page: solid
//! rectangles and "show page" placements of a source page. A shown source page
//! becomes a Form XObject whose `BBox` is the source page box and whose
//! resources are deep-copied from the source document.
//!
//! ```text
//! q r g b RG r g b rg 0 0 W H re B Q     background
//! q a b c d e f cm /P1 Do Q              source page on top
//! ```

use crate::color::Rgb;
use crate::error::FileError;
use crate::pipeline::geometry::{placement_matrix, Rect};
use crate::pipeline::source::SourceDocument;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use tracing::debug;

const PDF_VERSION: &str = "1.7";

/// Copies objects out of one source document, giving each a fresh id in the
/// destination. Each source object is copied at most once.
struct ObjectImporter {
    map: HashMap<ObjectId, ObjectId>,
}

impl ObjectImporter {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    fn import_reference(
        &mut self,
        source: &Document,
        dest: &mut Document,
        id: ObjectId,
    ) -> ObjectId {
        if let Some(&new_id) = self.map.get(&id) {
            return new_id;
        }
        // Reserve first so reference cycles terminate.
        let new_id = dest.new_object_id();
        self.map.insert(id, new_id);

        // A dangling reference resolves to null.
        let object = source.get_object(id).cloned().unwrap_or(Object::Null);
        let object = self.import_object(source, dest, object);
        dest.objects.insert(new_id, object);
        new_id
    }

    fn import_object(&mut self, source: &Document, dest: &mut Document, object: Object) -> Object {
        match object {
            Object::Reference(id) => Object::Reference(self.import_reference(source, dest, id)),
            Object::Array(items) => Object::Array(
                items
                    .into_iter()
                    .map(|item| self.import_object(source, dest, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => {
                Object::Dictionary(self.import_dictionary(source, dest, dict))
            }
            Object::Stream(mut stream) => {
                stream.dict = self.import_dictionary(source, dest, stream.dict);
                Object::Stream(stream)
            }
            other => other,
        }
    }

    fn import_dictionary(
        &mut self,
        source: &Document,
        dest: &mut Document,
        mut dict: Dictionary,
    ) -> Dictionary {
        for (_, value) in dict.iter_mut() {
            let taken = std::mem::replace(value, Object::Null);
            *value = self.import_object(source, dest, taken);
        }
        dict
    }
}

/// Drawing operations for one destination page.
pub struct PageCanvas {
    rect: Rect,
    rotation: i64,
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

impl PageCanvas {
    /// A blank page of `width` x `height` points.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            rect: Rect::from_size(width, height),
            rotation: 0,
            operations: Vec::new(),
            xobjects: Dictionary::new(),
        }
    }

    /// The full page area.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Set the `/Rotate` entry written on the page.
    pub fn set_rotation(&mut self, degrees: i64) {
        self.rotation = degrees;
    }

    /// Draw `rect` filled and outlined in `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let rgb = || vec![real(color.r), real(color.g), real(color.b)];
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", rgb()),
            Operation::new("rg", rgb()),
            Operation::new(
                "re",
                vec![
                    real(rect.x0),
                    real(rect.y0),
                    real(rect.width()),
                    real(rect.height()),
                ],
            ),
            Operation::new("B", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }
}

/// Builds a new document from canvases, importing source content as needed.
pub struct Composer<'a> {
    source: &'a SourceDocument,
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    importer: ObjectImporter,
}

impl<'a> Composer<'a> {
    /// Start an empty destination document for content from `source`.
    pub fn new(source: &'a SourceDocument) -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        Self {
            source,
            doc,
            pages_id,
            page_ids: Vec::new(),
            importer: ObjectImporter::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append `canvas` as the next page.
    pub fn push_page(&mut self, canvas: PageCanvas) -> Result<(), FileError> {
        let page_number = self.page_ids.len() + 1;
        let content = Content {
            operations: canvas.operations,
        }
        .encode()
        .map_err(|e| FileError::compose(page_number, format!("content encoding failed: {e}")))?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => rect_object(canvas.rect),
            "Resources" => dictionary! {
                "XObject" => canvas.xobjects,
            },
            "Contents" => content_id,
        };
        if canvas.rotation != 0 {
            page.set("Rotate", Object::Integer(canvas.rotation));
        }
        let page_id = self.doc.add_object(page);
        self.page_ids.push(page_id);
        debug!(
            "Composed page {} ({}x{})",
            page_number,
            canvas.rect.width(),
            canvas.rect.height()
        );
        Ok(())
    }

    /// Place page `page_index` of the source into `rect` on `canvas`, on top
    /// of whatever has been drawn so far. No rotation is applied to the
    /// placement.
    pub fn show_page(
        &mut self,
        canvas: &mut PageCanvas,
        rect: Rect,
        page_index: usize,
        keep_proportion: bool,
    ) -> Result<(), FileError> {
        let src_box = self.source.page_box(page_index)?;
        let matrix = placement_matrix(src_box, rect, keep_proportion);
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(FileError::compose(page_index + 1, "placement is not finite"));
        }

        let form_id = self.import_page_as_form(page_index)?;
        let name = format!("P{}", canvas.xobjects.len() + 1).into_bytes();
        canvas.xobjects.set(name.clone(), Object::Reference(form_id));
        canvas.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("cm", matrix.iter().map(|&v| real(v)).collect()),
            Operation::new("Do", vec![Object::Name(name)]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    /// Close the page tree and return the finished document.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => self.page_ids.len() as i64,
                "Kids" => kids,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        self.doc
    }

    fn import_page_as_form(&mut self, index: usize) -> Result<ObjectId, FileError> {
        let source = self.source;
        let bbox = source.page_box(index)?;
        let content = source.page_content(index)?;

        let mut form = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => rect_object(bbox),
        };
        if let Some(resources) = source.page_resources(index)? {
            let imported =
                self.importer
                    .import_object(source.document(), &mut self.doc, resources.clone());
            form.set("Resources", imported);
        }
        if let Some(group) = source.page_group(index)? {
            let imported = self
                .importer
                .import_object(source.document(), &mut self.doc, group.clone());
            form.set("Group", imported);
        }
        Ok(self.doc.add_object(Stream::new(form, content)))
    }
}

fn real(v: f32) -> Object {
    Object::Real(v.into())
}

fn rect_object(rect: Rect) -> Object {
    Object::Array(rect.to_array().iter().map(|&v| real(v)).collect())
}
