use serde::{Deserialize, Serialize};

/// Sampling temperature for report analysis.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;
/// Completion token cap for report analysis.
pub const ANALYSIS_MAX_TOKENS: u32 = 1200;

/// How an uploaded file is fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Sent inline as a base64 data URL.
    Image,
    /// Text-extracted and sent as a text part.
    Pdf,
    /// Ignored.
    Unsupported,
}

/// One uploaded report file.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    pub fn kind(&self) -> ReportKind {
        if self.mime_type.starts_with("image/") {
            ReportKind::Image
        } else if self.mime_type == "application/pdf" {
            ReportKind::Pdf
        } else {
            ReportKind::Unsupported
        }
    }
}

/// A parsed analysis request, independent of the transport.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub question: String,
    pub location: String,
    /// Side-by-side comparison of the first two images.
    pub compare: bool,
    pub reports: Vec<ReportFile>,
}

/// Sanitized answer plus the disclaimer shown with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub answer: String,
    pub disclaimer: String,
}

// ═══════════════════════════════════════════════════════════
// Chat-completion wire types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Response body from `/chat/completions`. Every level is optional; a
/// missing answer reads as empty text.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or `""`.
    pub fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}
