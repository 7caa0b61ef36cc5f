//! Shared helpers for building and inspecting test PDFs

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use std::path::{Path, PathBuf};

/// Write a PDF with `num_pages` pages whose text reads `"<label> p<index>"`.
///
/// Resources and MediaBox live on the page tree root, so every page inherits them.
pub fn write_pdf(path: &Path, label: &str, num_pages: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]));

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        page_label(label, i).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|&id| Object::Reference(id)).collect()),
        ),
        ("Resources", Object::Reference(resources_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("Failed to write test PDF");
    path.to_path_buf()
}

/// Give page `from` of the PDF at `path` a link annotation pointing at page `to`
pub fn add_page_link(path: &Path, from: usize, to: usize) {
    let mut doc = Document::load(path).expect("Failed to load PDF");
    let pages = doc.get_pages();
    let from_id = pages[&(from as u32 + 1)];
    let to_id = pages[&(to as u32 + 1)];
    let link = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Link".to_vec())),
        (
            "Dest",
            Object::Array(vec![Object::Reference(to_id), Object::Name(b"Fit".to_vec())]),
        ),
    ]);
    doc.get_dictionary_mut(from_id)
        .expect("Missing page")
        .set("Annots", Object::Array(vec![Object::Dictionary(link)]));
    doc.save(path).expect("Failed to write test PDF");
}

/// Text written on page `index` of a PDF labelled `label`
pub fn page_label(label: &str, index: usize) -> String {
    format!("{} p{}", label, index)
}

/// Labels of every page in `path`, in page order
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|&id| {
            let content = doc.get_page_content(id).expect("Failed to read page content");
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').expect("No text on page") + 1;
            let end = text[start..].find(')').expect("Unterminated text") + start;
            text[start..end].to_string()
        })
        .collect()
}

/// Decoded content stream bytes of every page in `path`
pub fn page_contents(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .values()
        .map(|&id| doc.get_page_content(id).expect("Failed to read page content"))
        .collect()
}

/// Expected labels for pages `range` of a PDF labelled `label`
pub fn labels(label: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| page_label(label, i)).collect()
}

/// Names of the files in `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
