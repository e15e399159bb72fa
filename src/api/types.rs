//! Shared state for the analysis API.

use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::pipeline::analysis::{ModelError, OpenRouterClient, ReportAnalyzer};
use crate::pipeline::extraction::PdfTextExtractor;

/// Shared context for all API routes. Cheap to clone.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AnalyzerConfig>,
    pub analyzer: Arc<ReportAnalyzer>,
}

impl ApiContext {
    pub fn new(config: AnalyzerConfig, analyzer: ReportAnalyzer) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
        }
    }

    /// Production wiring: OpenRouter model + pdf-extract text layer.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self, ModelError> {
        let model = OpenRouterClient::from_config(&config)?;
        let analyzer = ReportAnalyzer::new(
            Box::new(model),
            Arc::new(PdfTextExtractor),
            config.model_id.clone(),
        );
        Ok(Self::new(config, analyzer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_config_reflects_api_key_presence() {
        let ctx = ApiContext::from_config(AnalyzerConfig::default()).unwrap();
        assert!(!ctx.analyzer.is_configured());
        assert_eq!(ctx.analyzer.model_id(), crate::config::DEFAULT_MODEL_ID);

        let ctx = ApiContext::from_config(AnalyzerConfig {
            api_key: Some("sk-test".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(ctx.analyzer.is_configured());
    }
}
