//! User-message assembly for report analysis.

use base64::Engine;

use super::types::{ContentPart, ReportFile};
use crate::pipeline::prompt_templates::display_location;

/// Base64 data URL for an uploaded file.
pub fn to_data_url(file: &ReportFile) -> String {
    let mime = if file.mime_type.is_empty() {
        "application/octet-stream"
    } else {
        file.mime_type.as_str()
    };
    let b64 = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
    format!("data:{mime};base64,{b64}")
}

/// Ordered parts of the user message:
/// 1. question with location (only if a question was asked)
/// 2. one text part per PDF, numbered when there are several
/// 3. images; labelled A and B when comparing two or more
pub fn build_user_content(
    question: &str,
    location: &str,
    compare: bool,
    image_urls: &[String],
    pdf_texts: &[String],
) -> Vec<ContentPart> {
    let mut parts = Vec::new();

    let question = question.trim();
    if !question.is_empty() {
        parts.push(ContentPart::text(format!(
            "User question: {question}\nLocation: {}",
            display_location(location)
        )));
    }

    for (i, text) in pdf_texts.iter().enumerate() {
        let label = if pdf_texts.len() > 1 {
            format!(" (PDF {})", i + 1)
        } else {
            String::new()
        };
        parts.push(ContentPart::text(format!("Extracted PDF text{label}:\n{text}")));
    }

    if compare && image_urls.len() >= 2 {
        parts.push(ContentPart::text("Image A"));
        parts.push(ContentPart::image(image_urls[0].clone()));
        parts.push(ContentPart::text("Image B"));
        parts.push(ContentPart::image(image_urls[1].clone()));
    } else {
        parts.extend(image_urls.iter().cloned().map(ContentPart::image));
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("data:image/png;base64,{i}")).collect()
    }

    #[test]
    fn data_url_encodes_bytes_with_mime() {
        let file = ReportFile {
            file_name: "ecg.png".into(),
            mime_type: "image/png".into(),
            bytes: b"hello".to_vec(),
        };
        assert_eq!(to_data_url(&file), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn data_url_defaults_mime() {
        let file = ReportFile {
            file_name: "blob".into(),
            mime_type: String::new(),
            bytes: vec![0xff],
        };
        assert!(to_data_url(&file).starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn question_part_includes_location() {
        let parts = build_user_content(" Is this normal? ", "", false, &[], &[]);
        assert_eq!(
            parts,
            vec![ContentPart::text("User question: Is this normal?\nLocation: Unknown")]
        );
    }

    #[test]
    fn blank_question_omitted() {
        let parts = build_user_content("  ", "Delhi", false, &urls(1), &[]);
        assert_eq!(parts, vec![ContentPart::image("data:image/png;base64,0")]);
    }

    #[test]
    fn single_pdf_unnumbered() {
        let parts = build_user_content("", "", false, &[], &["TSH 2.1".to_string()]);
        assert_eq!(parts, vec![ContentPart::text("Extracted PDF text:\nTSH 2.1")]);
    }

    #[test]
    fn multiple_pdfs_numbered() {
        let pdfs = vec!["a".to_string(), "b".to_string()];
        let parts = build_user_content("", "", false, &[], &pdfs);
        assert_eq!(parts[0], ContentPart::text("Extracted PDF text (PDF 1):\na"));
        assert_eq!(parts[1], ContentPart::text("Extracted PDF text (PDF 2):\nb"));
    }

    #[test]
    fn compare_labels_first_two_images() {
        let parts = build_user_content("q", "", true, &urls(3), &[]);
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[1], ContentPart::text("Image A"));
        assert_eq!(parts[2], ContentPart::image("data:image/png;base64,0"));
        assert_eq!(parts[3], ContentPart::text("Image B"));
        assert_eq!(parts[4], ContentPart::image("data:image/png;base64,1"));
    }

    #[test]
    fn compare_with_one_image_sends_it_plainly() {
        let parts = build_user_content("", "", true, &urls(1), &[]);
        assert_eq!(parts, vec![ContentPart::image("data:image/png;base64,0")]);
    }

    #[test]
    fn order_is_question_pdfs_images() {
        let parts = build_user_content("q", "x", false, &urls(2), &["p".to_string()]);
        assert!(matches!(&parts[0], ContentPart::Text { text } if text.starts_with("User question")));
        assert!(matches!(&parts[1], ContentPart::Text { text } if text.starts_with("Extracted PDF")));
        assert!(matches!(parts[2], ContentPart::ImageUrl { .. }));
        assert!(matches!(parts[3], ContentPart::ImageUrl { .. }));
    }
}
