//! Shared helpers for integration tests: build small PDFs with lopdf and
//! read back what the compositor wrote.

#![allow(dead_code)]

use lopdf::{dictionary, encryption, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::{Path, PathBuf};

/// Write a PDF with one page per `(width, height)` entry.
pub fn write_pdf(dir: &Path, name: &str, sizes: &[(i64, i64)]) -> PathBuf {
    let boxes: Vec<[i64; 4]> = sizes.iter().map(|&(w, h)| [0, 0, w, h]).collect();
    write_pdf_with_boxes(dir, name, &boxes)
}

/// Write a PDF with one page per MediaBox.
pub fn write_pdf_with_boxes(dir: &Path, name: &str, boxes: &[[i64; 4]]) -> PathBuf {
    save(build(boxes, None, None), dir, name)
}

/// Write a PDF whose `Pages` node and/or pages carry a `/Rotate` entry.
pub fn write_rotated_pdf(
    dir: &Path,
    name: &str,
    sizes: &[(i64, i64)],
    inherited: Option<i64>,
    on_page: Option<i64>,
) -> PathBuf {
    let boxes: Vec<[i64; 4]> = sizes.iter().map(|&(w, h)| [0, 0, w, h]).collect();
    save(build(&boxes, inherited, on_page), dir, name)
}

/// Write a PDF encrypted with the standard security handler (RC4, 40 bit).
///
/// With `empty_user_password` the file opens without a password, like the
/// usual owner-password-only PDFs. Otherwise it declares a handler revision
/// the reader cannot decrypt.
pub fn write_encrypted_pdf(
    dir: &Path,
    name: &str,
    sizes: &[(i64, i64)],
    empty_user_password: bool,
) -> PathBuf {
    let boxes: Vec<[i64; 4]> = sizes.iter().map(|&(w, h)| [0, 0, w, h]).collect();
    let mut doc = build(&boxes, None, None);

    let (v, r) = if empty_user_password { (1, 2) } else { (4, 4) };
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => v,
        "R" => r,
        "O" => Object::String(vec![0x5a; 32], StringFormat::Hexadecimal),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    let file_id = Object::String(b"pdfbg-test-file!".to_vec(), StringFormat::Hexadecimal);
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    if empty_user_password {
        // RC4 is symmetric: running the decryptor over plaintext encrypts it.
        let key = encryption::get_encryption_key(&doc, "", false).unwrap();
        let stream_ids: Vec<ObjectId> = doc
            .objects
            .iter()
            .filter(|(_, o)| o.as_stream().is_ok())
            .map(|(&id, _)| id)
            .collect();
        for id in stream_ids {
            let sealed = encryption::decrypt_object(&key, id, doc.get_object(id).unwrap()).unwrap();
            doc.get_object_mut(id)
                .unwrap()
                .as_stream_mut()
                .unwrap()
                .set_content(sealed);
        }
    }
    save(doc, dir, name)
}

fn build(boxes: &[[i64; 4]], inherited_rotate: Option<i64>, page_rotate: Option<i64>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for (i, mb) in boxes.iter().enumerate() {
        let text = format!("BT /F1 12 Tf 20 20 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), text.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => mb.iter().map(|&n| Object::Integer(n)).collect::<Vec<_>>(),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
            "Contents" => content_id,
        };
        if let Some(r) = page_rotate {
            page.set("Rotate", r);
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }
    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
    };
    if let Some(r) = inherited_rotate {
        pages_dict.set("Rotate", r);
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

pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is definitely not a pdf").unwrap();
    path
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        other => panic!("not a number: {other:?}"),
    }
}

fn pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// `(width, height)` of every page's MediaBox.
pub fn page_sizes(path: &Path) -> Vec<(f32, f32)> {
    let doc = Document::load(path).unwrap();
    pages(&doc)
        .into_iter()
        .map(|id| {
            let mb = doc
                .get_dictionary(id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap();
            let v: Vec<f32> = mb.iter().map(number).collect();
            (v[2] - v[0], v[3] - v[1])
        })
        .collect()
}

/// The `rg` (fill color) operands of the first fill on each page.
pub fn background_colors(path: &Path) -> Vec<(f32, f32, f32)> {
    let doc = Document::load(path).unwrap();
    pages(&doc)
        .into_iter()
        .map(|id| {
            let content = doc.get_and_decode_page_content(id).unwrap();
            let rg = content
                .operations
                .iter()
                .find(|op| op.operator == "rg")
                .expect("page has no fill color");
            let v: Vec<f32> = rg.operands.iter().map(number).collect();
            (v[0], v[1], v[2])
        })
        .collect()
}

/// The `/Rotate` entry written on each page, 0 when absent.
pub fn page_rotations(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    pages(&doc)
        .into_iter()
        .map(|id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Rotate")
                .and_then(Object::as_i64)
                .unwrap_or(0)
        })
        .collect()
}
