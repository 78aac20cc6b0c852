//! Testing utilities including a mock model.
//!
//! Useful for exercising [`crate::FactChecker`] without making real API or
//! network calls.

use async_trait::async_trait;
use gemini_client::GeminiError;
use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::model::{GroundedModel, ModelReply};
use crate::prompt::FactCheckRequest;
use crate::types::Citation;

#[derive(Debug, Clone)]
enum MockBehavior {
    Reply(ModelReply),
    Network(String),
    Api(String),
}

/// A scripted [`GroundedModel`].
///
/// Returns the same configured reply (or failure) for every call and records
/// each request for assertions.
#[derive(Clone)]
pub struct MockModel {
    behavior: MockBehavior,
    calls: Arc<RwLock<Vec<FactCheckRequest>>>,
}

impl MockModel {
    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::default(),
        }
    }

    /// Reply with `text` as the payload and no citations.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(ModelReply {
            text: Some(text.into()),
            citations: Vec::new(),
        }))
    }

    /// Reply successfully but with no text at all.
    pub fn empty() -> Self {
        Self::with_behavior(MockBehavior::Reply(ModelReply::default()))
    }

    /// Fail every call with a network error.
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Network(message.into()))
    }

    /// Fail every call with an API error.
    pub fn api_failure(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Api(message.into()))
    }

    /// Add a grounding citation to the reply.
    pub fn with_citation(mut self, citation: Citation) -> Self {
        if let MockBehavior::Reply(reply) = &mut self.behavior {
            reply.citations.push(citation);
        }
        self
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<FactCheckRequest> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl GroundedModel for MockModel {
    async fn generate(&self, request: &FactCheckRequest) -> Result<ModelReply> {
        self.calls.write().unwrap().push(request.clone());

        match &self.behavior {
            MockBehavior::Reply(reply) => Ok(reply.clone()),
            MockBehavior::Network(msg) => Err(GeminiError::Network(msg.clone()).into()),
            MockBehavior::Api(msg) => Err(GeminiError::Api(msg.clone()).into()),
        }
    }
}
