//! The seam between the orchestrator and the generative API.
//!
//! [`GroundedModel`] abstracts a single grounded generation call so the
//! orchestrator can be exercised without network access (see
//! [`crate::testing::MockModel`]). [`GeminiModel`] is the production
//! implementation.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest, GenerateContentResponse};
use tracing::debug;

use crate::error::Result;
use crate::prompt::FactCheckRequest;
use crate::types::Citation;

/// What a grounded call returns before any parsing.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    /// Raw text payload, expected to be the contracted JSON
    pub text: Option<String>,

    /// Raw search citations, in the order the provider listed them
    pub citations: Vec<Citation>,
}

/// A generative model that can answer with web-grounded output.
#[async_trait]
pub trait GroundedModel: Send + Sync {
    /// Perform one remote call for `request`.
    async fn generate(&self, request: &FactCheckRequest) -> Result<ModelReply>;
}

/// Gemini-backed [`GroundedModel`].
#[derive(Clone)]
pub struct GeminiModel {
    client: GeminiClient,
    model: String,
}

impl GeminiModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GroundedModel for GeminiModel {
    async fn generate(&self, request: &FactCheckRequest) -> Result<ModelReply> {
        let response = self
            .client
            .generate_content(&self.model, &to_gemini_request(request))
            .await?;

        let reply = to_reply(&response);
        debug!(
            model = %self.model,
            model_version = response.model_version.as_deref().unwrap_or("unknown"),
            has_text = reply.text.is_some(),
            citations = reply.citations.len(),
            "Grounded generation complete"
        );
        Ok(reply)
    }
}

fn to_gemini_request(request: &FactCheckRequest) -> GenerateContentRequest {
    let gemini = GenerateContentRequest::new(request.prompt.clone())
        .system(request.system_instruction.clone())
        .json_schema(request.response_schema.clone());

    if request.web_search {
        gemini.google_search()
    } else {
        gemini
    }
}

fn to_reply(response: &GenerateContentResponse) -> ModelReply {
    ModelReply {
        text: response.text(),
        citations: response
            .grounding_chunks()
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| Citation {
                uri: web.uri.clone(),
                title: web.title.clone(),
            })
            .collect(),
    }
}
