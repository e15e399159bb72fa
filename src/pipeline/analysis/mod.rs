pub mod types;
pub mod content;
pub mod openrouter;
pub mod orchestrator;

pub use types::*;
pub use content::*;
pub use openrouter::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model API key is not configured")]
    MissingApiKey,

    #[error("Cannot reach model API at {0}")]
    Connection(String),

    #[error("Model request timed out after {0}s")]
    Timeout(u64),

    #[error("Model API returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please provide a question and/or at least one report image or PDF.")]
    EmptyRequest,

    #[error("Report extraction task failed: {0}")]
    Extraction(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}
