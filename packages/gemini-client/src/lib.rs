//! Pure Gemini REST API client
//!
//! A small client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Supports system instructions, Google Search
//! grounding, and schema-constrained JSON output.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest, StructuredOutput};
//!
//! let client = GeminiClient::new(api_key);
//!
//! let request = GenerateContentRequest::new("Who won the 2022 World Cup?")
//!     .system("Answer with sources")
//!     .google_search()
//!     .json_schema(Answer::gemini_schema());
//!
//! let response = client.generate_content("gemini-3-flash-preview", &request).await?;
//! let text = response.text();
//! let citations = response.grounding_chunks();
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{GeminiError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for `generateContent` on `model`.
    ///
    /// Accepts both `gemini-x` and `models/gemini-x`.
    pub fn generate_content_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Generate content.
    ///
    /// Sends the request and returns the full response, including grounding
    /// metadata. A prompt blocked before any candidate was produced is
    /// reported as [`GeminiError::Api`].
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if self.api_key.trim().is_empty() {
            return Err(GeminiError::Config("API key is empty".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.generate_content_url(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(describe_api_error(status, &error_text)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        if body.candidates.is_empty() {
            if let Some(reason) = body
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                warn!(reason, "Gemini blocked the prompt");
                return Err(GeminiError::Api(format!("Prompt blocked: {}", reason)));
            }
        }

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            candidates = body.candidates.len(),
            grounding_chunks = body.grounding_chunks().len(),
            total_tokens = body.usage_metadata.as_ref().map(|u| u.total_token_count),
            "Gemini generate content"
        );

        Ok(body)
    }
}

/// Human-readable message for a non-2xx response.
///
/// Prefers the `error.message` of Gemini's error envelope, falling back to
/// the raw body.
fn describe_api_error(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<types::ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{} ({}): {}", status.as_u16(), code, envelope.error.message),
            None => format!("{}: {}", status.as_u16(), envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("{}: empty response body", status.as_u16()),
        Err(_) => format!("{}: {}", status.as_u16(), body.trim()),
    }
}
