//! Per-page stamp painting.
//!
//! For every page of the merged document, each rectangle is mapped into the
//! page's point space and painted as an opaque white cover (inflated by the
//! rectangle's padding) followed by its replacement text. The drawing is
//! appended to the page's existing content so the cover occludes whatever
//! the page originally showed underneath.

use crate::compose::job::CompositionJob;
use crate::compose::transform::{text_anchor, PreviewTransform};
use crate::domain::{Rect, Rgb};
use crate::error::{OverstampError, OverstampResult};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resource name the stamp font is registered under on each page. Chosen to
/// be unlikely to collide with names already present in source documents.
pub const STAMP_FONT_KEY: &str = "FStamp";

/// US Letter, used when a page carries no resolvable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Maximum Parent-chain hops when resolving inherited page attributes.
const INHERIT_DEPTH_LIMIT: usize = 10;

/// Paints every rectangle onto every page of the document.
///
/// Returns the number of stamps applied (rectangles times pages). With an
/// empty rectangle list this is a no-op; job validation has already
/// guaranteed a fallback text exists in that case, and the output is the
/// unmodified merge.
pub(crate) fn stamp_document(doc: &mut Document, job: &CompositionJob) -> OverstampResult<usize> {
    if job.rects.is_empty() {
        return Ok(0);
    }

    let transform = PreviewTransform::new(job.preview_scale)?;
    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();

    // The font resource is only needed when at least one rectangle
    // resolves to non-empty text; bare covers stay font-free.
    let needs_font = job
        .rects
        .iter()
        .any(|r| !r.resolved_text(job.fallback_text).is_empty());
    let font_id = if needs_font {
        Some(add_stamp_font(doc))
    } else {
        None
    };

    let mut stamps = 0usize;
    for (page_num, page_id) in pages {
        let media_box = media_box(doc, page_id);
        let page_height = media_box[3] - media_box[1];

        let ops = build_stamp_ops(job.rects, job.fallback_text, &transform, page_height);
        let content = Content { operations: ops };
        let encoded = content.encode().map_err(|e| {
            OverstampError::Operation(format!(
                "failed to encode stamp content for page {}: {}",
                page_num, e
            ))
        })?;

        append_content(doc, page_id, encoded)?;
        if let Some(font_id) = font_id {
            ensure_stamp_font(doc, page_id, font_id)?;
        }
        stamps += job.rects.len();
    }

    Ok(stamps)
}

/// Content operations for all rectangles on one page: per rectangle, the
/// white cover first, then the text on top of it.
fn build_stamp_ops(
    rects: &[Rect],
    fallback_text: &str,
    transform: &PreviewTransform,
    page_height: f32,
) -> Vec<Operation> {
    let point_per_pixel = transform.point_per_pixel();
    let mut ops = Vec::new();

    for rect in rects {
        let area = transform.to_points(&rect.bounds, page_height);
        let cover = area.inflated(rect.style.padding * point_per_pixel);

        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(Rgb::WHITE.r),
                Object::Real(Rgb::WHITE.g),
                Object::Real(Rgb::WHITE.b),
            ],
        ));
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(cover.x),
                Object::Real(cover.y),
                Object::Real(cover.w),
                Object::Real(cover.h),
            ],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));

        let text = rect.resolved_text(fallback_text);
        if text.is_empty() {
            continue;
        }

        let color = Rgb::parse_hex(&rect.style.color);
        let (text_x, text_y) = text_anchor(&area, rect.style.font_size);

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(STAMP_FONT_KEY.as_bytes().to_vec()),
                Object::Real(rect.style.font_size),
            ],
        ));
        ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(text_x), Object::Real(text_y)],
        ));
        ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        ops.push(Operation::new("ET", vec![]));
    }

    ops
}

/// Registers the standard Helvetica font object used for all stamp text.
fn add_stamp_font(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    doc.add_object(Object::Dictionary(font))
}

/// Appends an encoded content stream to a page's Contents.
fn append_content(doc: &mut Document, page_id: ObjectId, content: Vec<u8>) -> OverstampResult<()> {
    let stamp_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), content)));

    let existing = page_dict(doc, page_id)?.get(b"Contents").ok().cloned();
    let new_contents = match existing {
        Some(Object::Reference(id)) => Object::Array(vec![
            Object::Reference(id),
            Object::Reference(stamp_id),
        ]),
        Some(Object::Array(mut refs)) => {
            refs.push(Object::Reference(stamp_id));
            Object::Array(refs)
        }
        // A direct inline stream is hoisted into its own object so the
        // original content keeps rendering ahead of the stamp.
        Some(stream @ Object::Stream(_)) => {
            let moved = doc.add_object(stream);
            Object::Array(vec![Object::Reference(moved), Object::Reference(stamp_id)])
        }
        _ => Object::Reference(stamp_id),
    };

    match doc.get_object_mut(page_id) {
        Ok(Object::Dictionary(dict)) => {
            dict.set("Contents", new_contents);
            Ok(())
        }
        _ => Err(OverstampError::Operation(format!(
            "page object ({}, {}) is not a dictionary",
            page_id.0, page_id.1
        ))),
    }
}

/// Makes the stamp font reachable from the page's resources.
///
/// Handles the three shapes a page can take: resources held in a referenced
/// dictionary (shared dictionaries simply gain one more font key), an
/// inline dictionary, or no own resources at all — in which case the
/// nearest inherited dictionary is copied onto the page so its existing
/// entries keep resolving.
fn ensure_stamp_font(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> OverstampResult<()> {
    let resources_entry = page_dict(doc, page_id)?.get(b"Resources").ok().cloned();

    match resources_entry {
        Some(Object::Reference(res_id)) => {
            let mut res = match doc.get_object(res_id) {
                Ok(Object::Dictionary(dict)) => dict.clone(),
                _ => Dictionary::new(),
            };
            add_font_entry(doc, &mut res, font_id);
            if let Ok(target) = doc.get_object_mut(res_id) {
                *target = Object::Dictionary(res);
            }
            Ok(())
        }
        Some(Object::Dictionary(mut res)) => {
            add_font_entry(doc, &mut res, font_id);
            set_page_resources(doc, page_id, res)
        }
        _ => {
            let mut res = inherited_resources(doc, page_id).unwrap_or_default();
            add_font_entry(doc, &mut res, font_id);
            set_page_resources(doc, page_id, res)
        }
    }
}

/// Adds the stamp font to a resources dictionary's Font entry, resolving an
/// indirect Font dictionary if present.
fn add_font_entry(doc: &mut Document, resources: &mut Dictionary, font_id: ObjectId) {
    match resources.get(b"Font").ok().cloned() {
        Some(Object::Reference(fonts_id)) => {
            if let Ok(Object::Dictionary(fonts)) = doc.get_object_mut(fonts_id) {
                fonts.set(STAMP_FONT_KEY, Object::Reference(font_id));
            }
        }
        Some(Object::Dictionary(mut fonts)) => {
            fonts.set(STAMP_FONT_KEY, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
        _ => {
            let mut fonts = Dictionary::new();
            fonts.set(STAMP_FONT_KEY, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
    }
}

fn set_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    resources: Dictionary,
) -> OverstampResult<()> {
    match doc.get_object_mut(page_id) {
        Ok(Object::Dictionary(dict)) => {
            dict.set("Resources", Object::Dictionary(resources));
            Ok(())
        }
        _ => Err(OverstampError::Operation(format!(
            "page object ({}, {}) is not a dictionary",
            page_id.0, page_id.1
        ))),
    }
}

/// Nearest Resources dictionary on the page's Parent chain, resolved to a
/// concrete dictionary clone.
fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = doc.get_object(page_id).ok()?;

    for _ in 0..INHERIT_DEPTH_LIMIT {
        let dict = current.as_dict().ok()?;
        if let Ok(entry) = dict.get(b"Resources") {
            match entry {
                Object::Dictionary(res) => return Some(res.clone()),
                Object::Reference(res_id) => {
                    if let Ok(Object::Dictionary(res)) = doc.get_object(*res_id) {
                        return Some(res.clone());
                    }
                    return None;
                }
                _ => return None,
            }
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                current = doc.get_object(*parent_id).ok()?;
            }
            _ => return None,
        }
    }
    None
}

fn page_dict<'a>(doc: &'a Document, page_id: ObjectId) -> OverstampResult<&'a Dictionary> {
    doc.get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| {
            OverstampError::Operation(format!(
                "failed to read page object ({}, {}): {}",
                page_id.0, page_id.1, e
            ))
        })
}

/// Page size in points from the page's MediaBox, walking the Parent chain
/// for inherited values. Defaults to US Letter when nothing resolves — the
/// original content is then unpositionable anyway, so a stamp at Letter
/// coordinates is the least surprising outcome.
fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let mut current = match doc.get_object(page_id) {
        Ok(obj) => obj,
        Err(_) => return DEFAULT_MEDIA_BOX,
    };

    for _ in 0..INHERIT_DEPTH_LIMIT {
        let dict = match current.as_dict() {
            Ok(dict) => dict,
            Err(_) => return DEFAULT_MEDIA_BOX,
        };

        if let Ok(entry) = dict.get(b"MediaBox") {
            let values = match entry {
                Object::Array(arr) => media_box_values(arr),
                Object::Reference(id) => match doc.get_object(*id) {
                    Ok(Object::Array(arr)) => media_box_values(arr),
                    _ => None,
                },
                _ => None,
            };
            if let Some(media_box) = values {
                return media_box;
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => match doc.get_object(*parent_id) {
                Ok(parent) => current = parent,
                Err(_) => return DEFAULT_MEDIA_BOX,
            },
            _ => return DEFAULT_MEDIA_BOX,
        }
    }

    DEFAULT_MEDIA_BOX
}

fn media_box_values(arr: &[Object]) -> Option<[f32; 4]> {
    if arr.len() != 4 {
        return None;
    }
    let mut values = [0.0f32; 4];
    for (slot, obj) in values.iter_mut().zip(arr) {
        *slot = match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => return None,
        };
    }
    Some(values)
}
