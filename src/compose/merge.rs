//! Source-document merging.
//!
//! Combines every page of every source document, in upload order, into one
//! destination document. Original page content and size are preserved: page
//! objects are carried over untouched, only their object ids are remapped
//! to avoid collisions, and the destination page tree is rebuilt to list
//! the concatenated pages.

use crate::domain::SourceDocument;
use crate::error::{OverstampError, OverstampResult};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Merges the source documents into a single open [`Document`].
///
/// The result is left unserialized so the stamping pass can draw on the
/// merged pages before the output is flattened.
pub fn merge_documents(documents: &[SourceDocument]) -> OverstampResult<Document> {
    if documents.is_empty() {
        return Err(OverstampError::NoDocuments);
    }

    // Load everything up front; a single bad file fails the whole batch
    // before any composition work happens.
    let mut loaded = Vec::with_capacity(documents.len());
    for source in documents {
        let doc = Document::load_mem(&source.bytes).map_err(|e| OverstampError::DocumentParse {
            name: source.display_name.clone(),
            source: e,
        })?;
        loaded.push(doc);
    }

    let mut loaded = loaded.into_iter();
    let mut dest = match loaded.next() {
        Some(doc) => doc,
        None => return Err(OverstampError::NoDocuments),
    };
    let mut dest_max_id = dest.max_id;
    let mut dest_page_refs = page_references(&dest);

    for source in loaded {
        let source_pages = page_references(&source);

        // Offset every object id in the source so nothing collides with
        // what the destination already holds.
        let id_offset = dest_max_id;
        let mut remapped = BTreeMap::new();
        for (old_id, object) in source.objects.into_iter() {
            let new_id = (old_id.0 + id_offset, old_id.1);
            remapped.insert(new_id, remap_object_refs(object, id_offset));
        }
        for (id, object) in remapped {
            dest.objects.insert(id, object);
        }

        for old_page_ref in source_pages {
            dest_page_refs.push((old_page_ref.0 + id_offset, old_page_ref.1));
        }

        dest_max_id = (source.max_id + id_offset).max(dest_max_id);
    }

    update_page_tree(&mut dest, dest_page_refs)?;
    dest.max_id = dest_max_id;

    Ok(dest)
}

/// Page object references in page order.
fn page_references(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Recursively remaps object references by the given id offset.
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Rewrites the destination's root Pages node to list the merged pages.
///
/// Page Parent pointers are left untouched so attributes inherited from the
/// original page trees (MediaBox, Resources) keep resolving.
fn update_page_tree(doc: &mut Document, page_refs: Vec<ObjectId>) -> OverstampResult<()> {
    let root_obj = doc
        .trailer
        .get(b"Root")
        .map_err(|_| OverstampError::Operation("no Root in trailer".into()))?;
    let catalog_id = root_obj
        .as_reference()
        .map_err(|_| OverstampError::Operation("Root is not a reference".into()))?;

    let catalog = doc
        .objects
        .get(&catalog_id)
        .ok_or_else(|| OverstampError::Operation("catalog not found".into()))?
        .as_dict()
        .map_err(|_| OverstampError::Operation("invalid catalog".into()))?;

    let pages_obj = catalog
        .get(b"Pages")
        .map_err(|_| OverstampError::Operation("no Pages in catalog".into()))?;
    let pages_id = pages_obj
        .as_reference()
        .map_err(|_| OverstampError::Operation("Pages is not a reference".into()))?;

    if let Some(Object::Dictionary(ref mut pages_dict)) = doc.objects.get_mut(&pages_id) {
        let kids = page_refs
            .iter()
            .map(|&id| Object::Reference(id))
            .collect::<Vec<_>>();
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(page_refs.len() as i64));
        Ok(())
    } else {
        Err(OverstampError::Operation("invalid pages dictionary".into()))
    }
}
