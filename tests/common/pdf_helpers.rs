//! PDF inspection helpers.

use anyhow::Result;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

/// Loads output bytes back into a document, panicking with a useful message
/// on malformed output.
pub fn load_doc(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output should be a loadable PDF")
}

/// Number of pages in a serialized PDF.
pub fn page_count(bytes: &[u8]) -> usize {
    load_doc(bytes).get_pages().len()
}

/// Page object ids in page order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Decoded content operations for one page.
pub fn page_ops(doc: &Document, page_id: ObjectId) -> Content {
    let raw = doc.get_page_content(page_id).expect("page content");
    Content::decode(&raw).expect("decodable page content")
}

/// All strings shown by `Tj` operators on a page.
pub fn shown_strings(doc: &Document, page_id: ObjectId) -> Vec<String> {
    page_ops(doc, page_id)
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

/// All `x y w h` operand tuples of `re` operators on a page.
pub fn cover_rects(doc: &Document, page_id: ObjectId) -> Vec<[f32; 4]> {
    page_ops(doc, page_id)
        .operations
        .iter()
        .filter(|op| op.operator == "re")
        .map(|op| {
            let mut rect = [0.0f32; 4];
            for (slot, operand) in rect.iter_mut().zip(&op.operands) {
                *slot = match operand {
                    Object::Real(r) => *r,
                    Object::Integer(i) => *i as f32,
                    other => panic!("unexpected re operand {:?}", other),
                };
            }
            rect
        })
        .collect()
}

/// RGB operand triples of non-white `rg` operators on a page (stamp text
/// colors; the white cover fill is filtered out).
pub fn text_colors(doc: &Document, page_id: ObjectId) -> Vec<[f32; 3]> {
    page_ops(doc, page_id)
        .operations
        .iter()
        .filter(|op| op.operator == "rg")
        .map(|op| {
            let mut rgb = [0.0f32; 3];
            for (slot, operand) in rgb.iter_mut().zip(&op.operands) {
                *slot = match operand {
                    Object::Real(r) => *r,
                    Object::Integer(i) => *i as f32,
                    other => panic!("unexpected rg operand {:?}", other),
                };
            }
            rgb
        })
        .filter(|rgb| *rgb != [1.0, 1.0, 1.0])
        .collect()
}

/// Extracts text from serialized PDF bytes.
pub fn extract_text_mem(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("failed to extract text: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::letter_pdf_bytes;

    #[test]
    fn test_shown_strings_finds_fixture_markers() {
        let bytes = letter_pdf_bytes(1, "Helper");
        let doc = load_doc(&bytes);
        let page = page_ids(&doc)[0];
        assert_eq!(shown_strings(&doc, page), vec!["Helper-Page-1".to_string()]);
    }

    #[test]
    fn test_cover_rects_empty_on_plain_fixture() {
        let bytes = letter_pdf_bytes(1, "Helper");
        let doc = load_doc(&bytes);
        let page = page_ids(&doc)[0];
        assert!(cover_rects(&doc, page).is_empty());
    }
}
