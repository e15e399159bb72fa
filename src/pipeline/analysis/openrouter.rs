use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::types::{ChatCompletionResponse, ChatRequest};
use super::ModelError;
use crate::config::AnalyzerConfig;

/// Sent as `HTTP-Referer`; OpenRouter uses it for app attribution.
const REFERER: &str = "http://localhost";
/// Sent as `X-Title`.
const APP_TITLE: &str = "Medical Analysis Assistant";

/// Chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one request and return the first choice's text (empty if absent).
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError>;

    /// Whether credentials are present. Checked before any work is done.
    fn is_configured(&self) -> bool {
        true
    }
}

/// OpenRouter (OpenAI-compatible) chat-completion client.
pub struct OpenRouterClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OpenRouterClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, ModelError> {
        Self::new(
            &config.base_url,
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatModel for OpenRouterClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ModelError::Connection(self.base_url.clone())
                } else {
                    ModelError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::ResponseParsing(e.to_string()))?;

        Ok(parsed.into_text())
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Mock chat model for testing: returns a canned answer (or error) and
/// keeps the last request for inspection.
pub struct MockChatModel {
    response: Result<String, (u16, String)>,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChatModel {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            last_request: Mutex::new(None),
        }
    }

    /// Fail every call with an upstream error.
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Err((status, body.to_string())),
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => Err(ModelError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
