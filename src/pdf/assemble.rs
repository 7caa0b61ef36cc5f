//! Page assembly using lopdf
//!
//! Every page operation in this crate (extract, slice, combine) boils down to
//! copying a run of pages out of one or more source documents into a fresh
//! document. [`PageAssembler`] is that primitive.
//!
//! Based on the lopdf merge example:
//! https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Accumulates pages from source documents into a single output document
///
/// # Example
///
/// ```no_run
/// use lopdf::Document;
/// use pdf_sigpages::pdf::PageAssembler;
/// use std::path::Path;
///
/// let mut assembler = PageAssembler::new();
/// assembler.append(Document::load("agreement.pdf")?, 0..3)?;
/// assembler.append_all(Document::load("signatures.pdf")?)?;
/// assembler.write(Path::new("combined.pdf"))?;
/// # Ok::<(), pdf_sigpages::Error>(())
/// ```
pub struct PageAssembler {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl PageAssembler {
    pub fn new() -> Self {
        Self {
            document: Document::with_version("1.5"),
            page_ids: Vec::new(),
        }
    }

    /// Number of pages appended so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append every page of `source`, in order. Returns the number of pages added.
    pub fn append_all(&mut self, source: Document) -> Result<usize> {
        let count = source.get_pages().len();
        self.append(source, 0..count)
    }

    /// Append pages `range` (zero-based, end exclusive) of `source`, in order.
    ///
    /// The assembler is left untouched if this returns an error.
    pub fn append(&mut self, mut source: Document, range: Range<usize>) -> Result<usize> {
        // Renumber objects in the source so they can't collide with ours
        source.renumber_objects_with(self.document.max_id + 1);

        let ordered: Vec<ObjectId> = source.get_pages().into_values().collect();
        let selected = ordered.get(range.clone()).ok_or_else(|| {
            Error::General(format!(
                "Page range {}..{} out of bounds (document has {} pages)",
                range.start,
                range.end,
                ordered.len()
            ))
        })?;

        for &page_id in selected {
            flatten_inherited_attributes(&mut source, page_id)?;
        }
        detach_unselected(&mut source, &ordered, selected);

        self.page_ids.extend_from_slice(selected);
        self.document.max_id = self.document.max_id.max(source.max_id);
        self.document.objects.extend(source.objects);

        Ok(selected.len())
    }

    /// Build the page tree and save the assembled document to `path`
    pub fn write(mut self, path: &Path) -> Result<()> {
        let pages_id = self.document.new_object_id();

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(self.page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));

        let catalog_id = self.document.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        self.document.objects.insert(pages_id, Object::Dictionary(pages_object));
        self.document.objects.insert(catalog_id, Object::Dictionary(catalog));
        self.document.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &self.page_ids {
            if let Ok(Object::Dictionary(dict)) = self.document.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        // Drop source catalogs and anything only they referenced
        self.document.prune_objects();
        self.document.save(path)?;

        Ok(())
    }
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the source's page tree nodes and unselected pages.
///
/// References to them from the kept pages (link destinations, `Parent`) are
/// replaced with null, so pruning can drop everything only those pages used.
fn detach_unselected(doc: &mut Document, pages: &[ObjectId], selected: &[ObjectId]) {
    let kept: HashSet<ObjectId> = selected.iter().copied().collect();
    let mut detached: HashSet<ObjectId> = pages
        .iter()
        .copied()
        .filter(|id| !kept.contains(id))
        .collect();

    for &page_id in pages {
        let mut parent = doc
            .get_dictionary(page_id)
            .and_then(|page| page.get(b"Parent"))
            .and_then(Object::as_reference)
            .ok();
        while let Some(node_id) = parent {
            if !detached.insert(node_id) {
                break;
            }
            parent = doc
                .get_dictionary(node_id)
                .and_then(|node| node.get(b"Parent"))
                .and_then(Object::as_reference)
                .ok();
        }
    }

    for id in &detached {
        doc.objects.remove(id);
    }
    for object in doc.objects.values_mut() {
        null_references(object, &detached);
    }
}

fn null_references(object: &mut Object, targets: &HashSet<ObjectId>) {
    match object {
        Object::Reference(id) => {
            let id = *id;
            if targets.contains(&id) {
                *object = Object::Null;
            }
        }
        Object::Array(items) => {
            for item in items {
                null_references(item, targets);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                null_references(value, targets);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                null_references(value, targets);
            }
        }
        _ => {}
    }
}

/// Copy inheritable attributes from the page tree onto the page itself.
///
/// Pages are re-parented onto a flat page tree when written, so anything they
/// inherited from their old ancestors would otherwise be lost.
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    let mut inherited: Vec<(Vec<u8>, Object)> = Vec::new();
    let mut visited = HashSet::new();
    while let Some(node_id) = parent {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }
        let node = doc.get_dictionary(node_id)?;
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}
