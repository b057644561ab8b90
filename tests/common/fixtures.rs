//! Test fixtures and PDF builders.
//!
//! Two kinds of fixture documents:
//! - [`TestPdfBuilder`] produces realistic documents through printpdf
//!   (proper fonts, extractable text).
//! - [`exact_pdf_bytes`] produces minimal lopdf documents with exact
//!   MediaBox geometry, for assertions on mapped coordinates.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

/// Builder for multi-page test PDFs with custom content.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// let bytes = TestPdfBuilder::new()
///     .with_title("Statement")
///     .with_page("Account 12345")
///     .with_page("Amount due: $40")
///     .build_bytes()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestPdfBuilder {
    title: String,
    pages: Vec<String>,
    page_width: Mm,
    page_height: Mm,
}

impl TestPdfBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test Document".to_string(),
            pages: Vec::new(),
            // US Letter so geometry assertions line up with 612x792 points.
            page_width: Mm(215.9),
            page_height: Mm(279.4),
        }
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Appends one page carrying the given text.
    pub fn with_page(mut self, content: &str) -> Self {
        self.pages.push(content.to_string());
        self
    }

    /// Sets custom page dimensions in millimeters.
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.page_width = Mm(width);
        self.page_height = Mm(height);
        self
    }

    /// Builds the PDF and returns its bytes.
    pub fn build_bytes(self) -> Result<Vec<u8>> {
        let pages = if self.pages.is_empty() {
            vec![self.title.clone()]
        } else {
            self.pages.clone()
        };

        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, self.page_width, self.page_height, "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut layer = doc.get_page(page1).get_layer(layer1);
        for (i, content) in pages.iter().enumerate() {
            if i > 0 {
                let (page, layer_idx) = doc.add_page(self.page_width, self.page_height, "Layer 1");
                layer = doc.get_page(page).get_layer(layer_idx);
            }
            layer.use_text(content.as_str(), 12.0, Mm(20.0), Mm(250.0), &font);
        }

        let mut writer = BufWriter::new(Cursor::new(Vec::new()));
        doc.save(&mut writer)?;
        let cursor = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flush failed: {}", e))?;
        Ok(cursor.into_inner())
    }

    /// Builds the PDF and writes it to the specified path.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let bytes = self.build_bytes()?;
        fs::write(output_path, bytes)?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal PDF with exact page geometry and identifiable per-page content.
///
/// Each page carries `<prefix>-Page-<n>` in a real text object with a
/// Helvetica resource, so both content-stream and text-extraction
/// assertions can find it.
pub fn exact_pdf_bytes(num_pages: u32, width: f32, height: f32, prefix: &str) -> Vec<u8> {
    use ::lopdf::content::{Content, Operation};
    use ::lopdf::{dictionary, Dictionary, Document, Object, Stream};

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

    let mut page_ids = Vec::new();
    for page_num in 0..num_pages {
        let marker = format!("{}-Page-{}", prefix, page_num + 1);
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Real(12.0)],
                ),
                Operation::new("Td", vec![Object::Real(50.0), Object::Real(height - 92.0)]),
                Operation::new("Tj", vec![Object::string_literal(marker)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("encodable fixture content"),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width),
                Object::Real(height),
            ],
        });
        page_ids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => num_pages as i64,
            "Kids" => page_ids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save fixture pdf");
    buffer
}

/// US Letter fixture (612x792 points).
pub fn letter_pdf_bytes(num_pages: u32, prefix: &str) -> Vec<u8> {
    exact_pdf_bytes(num_pages, 612.0, 792.0, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_produces_requested_pages() {
        let bytes = TestPdfBuilder::new()
            .with_title("Multi")
            .with_page("one")
            .with_page("two")
            .with_page("three")
            .build_bytes()
            .unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_builder_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fixture.pdf");

        TestPdfBuilder::new()
            .with_page("content")
            .build(&path)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_exact_pdf_page_markers() {
        let bytes = exact_pdf_bytes(2, 612.0, 792.0, "Doc");
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);

        let first_page = *doc.get_pages().get(&1).unwrap();
        let content = doc.get_page_content(first_page).unwrap();
        assert!(String::from_utf8_lossy(&content).contains("Doc-Page-1"));
    }
}
