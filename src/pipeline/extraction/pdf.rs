use super::types::{PageExtraction, PdfExtractor};
use super::ExtractionError;

/// Character budget for one PDF's text in the model prompt.
pub const MAX_PDF_TEXT_CHARS: usize = 10_000;
/// Appended when a PDF's text is cut at `MAX_PDF_TEXT_CHARS`.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]...";
/// Stands in for the text of a PDF that could not be read.
pub const PDF_FAILURE_PLACEHOLDER: &str = "[Failed to extract text from PDF]";

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError> {
        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        if page_texts.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageExtraction {
                page_number: i + 1,
                text,
            })
            .collect())
    }
}

/// Prompt-ready text for one uploaded PDF.
///
/// Never fails: an unreadable PDF yields `PDF_FAILURE_PLACEHOLDER` so the
/// rest of the request still goes through.
pub fn extract_report_text(extractor: &dyn PdfExtractor, pdf_bytes: &[u8]) -> String {
    match extractor.extract_text(pdf_bytes) {
        Ok(pages) => {
            let joined = pages
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            truncate_report_text(joined.trim())
        }
        Err(e) => {
            tracing::warn!(error = %e, bytes = pdf_bytes.len(), "PDF text extraction failed");
            PDF_FAILURE_PLACEHOLDER.to_string()
        }
    }
}

/// Cut text to `MAX_PDF_TEXT_CHARS` characters, marking the cut.
pub fn truncate_report_text(text: &str) -> String {
    match text.char_indices().nth(MAX_PDF_TEXT_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a PDF with one text line per page using lopdf.
    fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
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

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    struct FixedPages(Vec<&'static str>);

    impl PdfExtractor for FixedPages {
        fn extract_text(&self, _: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError> {
            Ok(self
                .0
                .iter()
                .enumerate()
                .map(|(i, t)| PageExtraction {
                    page_number: i + 1,
                    text: t.to_string(),
                })
                .collect())
        }
    }

    struct Broken;

    impl PdfExtractor for Broken {
        fn extract_text(&self, _: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError> {
            Err(ExtractionError::PdfParsing("xref table missing".into()))
        }
    }

    #[test]
    fn extract_text_from_digital_pdf() {
        let pdf_bytes = make_test_pdf(&["Hemoglobin 13.5 g/dL"]);
        let pages = PdfTextExtractor.extract_text(&pdf_bytes).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert!(
            pages[0].text.contains("Hemoglobin"),
            "Expected page text to contain 'Hemoglobin', got: {}",
            pages[0].text
        );
    }

    #[test]
    fn extract_text_numbers_pages() {
        let pdf_bytes = make_test_pdf(&["Page one", "Page two"]);
        let pages = PdfTextExtractor.extract_text(&pdf_bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_number, 2);
    }

    #[test]
    fn invalid_pdf_returns_error() {
        assert!(PdfTextExtractor.extract_text(b"not a pdf").is_err());
    }

    #[test]
    fn report_text_joins_and_trims_pages() {
        let extractor = FixedPages(vec!["  ECG report", "QTc 440 ms  \n"]);
        assert_eq!(extract_report_text(&extractor, b""), "ECG report\nQTc 440 ms");
    }

    #[test]
    fn report_text_failure_yields_placeholder() {
        assert_eq!(extract_report_text(&Broken, b"%PDF-"), PDF_FAILURE_PLACEHOLDER);
    }

    #[test]
    fn report_text_from_invalid_bytes_yields_placeholder() {
        assert_eq!(
            extract_report_text(&PdfTextExtractor, b"definitely not a pdf"),
            PDF_FAILURE_PLACEHOLDER
        );
    }

    #[test]
    fn long_text_truncated_with_marker() {
        let text = "a".repeat(MAX_PDF_TEXT_CHARS + 50);
        let out = truncate_report_text(&text);
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert_eq!(out.chars().count(), MAX_PDF_TEXT_CHARS + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn text_at_limit_not_truncated() {
        let text = "é".repeat(MAX_PDF_TEXT_CHARS);
        assert_eq!(truncate_report_text(&text), text);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let text = "µ".repeat(MAX_PDF_TEXT_CHARS + 1);
        let out = truncate_report_text(&text);
        assert!(out.starts_with(&"µ".repeat(MAX_PDF_TEXT_CHARS)));
        assert!(out.ends_with(TRUNCATION_MARKER));
    }
}
