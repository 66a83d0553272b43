//! Builders for small on-disk PDFs used by unit tests.

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// One page of a generated test PDF.
#[derive(Debug, Clone)]
pub(crate) struct PageSpec {
    pub media_box: Option<[i64; 4]>,
    pub crop_box: Option<[i64; 4]>,
    pub rotate: Option<i64>,
    /// Adds a `/Group` transparency group dictionary.
    pub transparency_group: bool,
    /// One content stream per entry.
    pub contents: Vec<String>,
}

impl PageSpec {
    pub fn size(width: i64, height: i64) -> Self {
        Self {
            media_box: Some([0, 0, width, height]),
            crop_box: None,
            rotate: None,
            transparency_group: false,
            contents: vec!["BT /F1 12 Tf 20 20 Td (Hello) Tj ET".into()],
        }
    }
}

fn rect(v: [i64; 4]) -> Object {
    Object::Array(v.iter().map(|&n| Object::Integer(n)).collect())
}

/// Build a document whose pages share one Helvetica font resource.
pub(crate) fn build_pdf(pages: &[PageSpec], inherited: Option<([i64; 4], i64)>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for spec in pages {
        let content_ids: Vec<Object> = spec
            .contents
            .iter()
            .map(|c| {
                Object::Reference(
                    doc.add_object(Stream::new(Dictionary::new(), c.clone().into_bytes())),
                )
            })
            .collect();

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "Contents" => Object::Array(content_ids),
        };
        if let Some(mb) = spec.media_box {
            page.set("MediaBox", rect(mb));
        }
        if let Some(cb) = spec.crop_box {
            page.set("CropBox", rect(cb));
        }
        if let Some(r) = spec.rotate {
            page.set("Rotate", Object::Integer(r));
        }
        if spec.transparency_group {
            page.set(
                "Group",
                dictionary! {
                    "Type" => "Group",
                    "S" => "Transparency",
                    "CS" => "DeviceRGB",
                },
            );
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    if let Some((mb, rotate)) = inherited {
        pages_dict.set("MediaBox", rect(mb));
        pages_dict.set("Rotate", Object::Integer(rotate));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn save(mut doc: Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

pub(crate) fn write_pdf(dir: &Path, name: &str, pages: &[PageSpec]) -> PathBuf {
    save(build_pdf(pages, None), dir, name)
}

/// Like [`write_pdf`], with `MediaBox` and `Rotate` set on the `Pages` node.
pub(crate) fn write_pdf_inherited(
    dir: &Path,
    name: &str,
    pages: &[PageSpec],
    media_box: [i64; 4],
    rotate: i64,
) -> PathBuf {
    save(build_pdf(pages, Some((media_box, rotate))), dir, name)
}
