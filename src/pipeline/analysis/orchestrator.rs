//! Report analysis: uploaded files + question → sanitized model answer.

use std::sync::Arc;

use super::content::{build_user_content, to_data_url};
use super::openrouter::ChatModel;
use super::types::{
    AnalysisOutcome, AnalysisRequest, ChatMessage, ChatRequest, ChatRole, MessageContent,
    ReportKind, ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE,
};
use super::AnalysisError;
use crate::pipeline::extraction::{extract_report_text, PdfExtractor};
use crate::pipeline::prompt_templates::build_system_prompt;
use crate::pipeline::safety::{sanitize_str, ANALYSIS_DISCLAIMER};

/// Runs one analysis end to end. Shared across requests; holds no
/// per-request state.
pub struct ReportAnalyzer {
    model: Box<dyn ChatModel>,
    pdf_extractor: Arc<dyn PdfExtractor + Send + Sync>,
    model_id: String,
}

impl ReportAnalyzer {
    pub fn new(
        model: Box<dyn ChatModel>,
        pdf_extractor: Arc<dyn PdfExtractor + Send + Sync>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            model,
            pdf_extractor,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Whether the model backend has credentials.
    pub fn is_configured(&self) -> bool {
        self.model.is_configured()
    }

    /// Analyze one request.
    ///
    /// Images become data URLs, PDFs become extracted text (placeholder on
    /// failure), anything else is ignored. The model's raw answer is
    /// sanitized before it is returned.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalysisError> {
        let mut image_urls = Vec::new();
        let mut pdf_bytes = Vec::new();
        for file in request.reports {
            match file.kind() {
                ReportKind::Image => image_urls.push(to_data_url(&file)),
                ReportKind::Pdf => pdf_bytes.push(file.bytes),
                ReportKind::Unsupported => {
                    tracing::debug!(mime = %file.mime_type, "Ignoring unsupported report file");
                }
            }
        }

        let pdf_texts = self.extract_pdfs(pdf_bytes).await?;

        if request.question.trim().is_empty() && image_urls.is_empty() && pdf_texts.is_empty() {
            return Err(AnalysisError::EmptyRequest);
        }

        let chat_request = ChatRequest {
            model: self.model_id.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: MessageContent::Text(build_system_prompt(
                        &request.location,
                        request.compare,
                    )),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: MessageContent::Parts(build_user_content(
                        &request.question,
                        &request.location,
                        request.compare,
                        &image_urls,
                        &pdf_texts,
                    )),
                },
            ],
            temperature: ANALYSIS_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
        };

        tracing::info!(
            images = image_urls.len(),
            pdfs = pdf_texts.len(),
            compare = request.compare,
            model = %self.model_id,
            "Sending report analysis request"
        );

        let raw = self.model.complete(&chat_request).await?;
        let answer = sanitize_str(&raw);

        tracing::info!(
            raw_chars = raw.len(),
            answer_chars = answer.len(),
            "Report analysis complete"
        );

        Ok(AnalysisOutcome {
            answer,
            disclaimer: ANALYSIS_DISCLAIMER.to_string(),
        })
    }

    /// PDF parsing is CPU-bound; run it off the async workers.
    async fn extract_pdfs(&self, pdfs: Vec<Vec<u8>>) -> Result<Vec<String>, AnalysisError> {
        if pdfs.is_empty() {
            return Ok(Vec::new());
        }
        let extractor = Arc::clone(&self.pdf_extractor);
        tokio::task::spawn_blocking(move || {
            pdfs.iter()
                .map(|bytes| extract_report_text(extractor.as_ref(), bytes))
                .collect::<Vec<String>>()
        })
        .await
        .map_err(|e| AnalysisError::Extraction(e.to_string()))
    }
}
