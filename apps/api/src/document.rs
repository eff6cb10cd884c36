//! PDF text extraction.
//!
//! Pure and synchronous: bytes in, text out. Callers inside the async server go
//! through `extraction::pipeline::extract_text_async`, which moves this onto the
//! blocking pool.

use std::panic::catch_unwind;

use thiserror::Error;

/// The input is not a document the PDF backend can read.
#[derive(Debug, Error)]
pub enum DocumentFormatError {
    #[error("not a readable PDF document: {0}")]
    Unreadable(String),

    #[error("PDF parser aborted on malformed input: {0}")]
    ParserPanic(String),
}

/// Extracts the text of every page, in page order, and concatenates it.
///
/// Pages without extractable text contribute an empty string. No length limit
/// is applied here.
pub fn extract_text(document: &[u8]) -> Result<String, DocumentFormatError> {
    // pdf-extract panics on some malformed font and xref data instead of returning an error.
    let pages = catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(document))
        .map_err(|payload| DocumentFormatError::ParserPanic(panic_message(payload.as_ref())))?
        .map_err(|e| DocumentFormatError::Unreadable(e.to_string()))?;

    Ok(pages.concat())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builds small PDFs in memory for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Document, Object, Stream};

    /// One page per element; an empty string yields a page with no text operators.
    pub(crate) fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                Dictionary::new(),
                content.encode().expect("encode page content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize pdf");
        bytes
    }
}
