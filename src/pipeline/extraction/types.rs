use super::ExtractionError;

/// Text of a single PDF page.
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub page_number: usize,
    pub text: String,
}

/// PDF text extraction abstraction (allows mocking for tests)
pub trait PdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError>;
}
