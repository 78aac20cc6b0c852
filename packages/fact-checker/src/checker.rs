//! Fact-check orchestration.
//!
//! [`FactChecker::check`] is the single entry point: build the request, make
//! the grounded call, parse the answer, merge sources. Every failure along
//! the way becomes an `ERROR` [`FactCheckResult`]; nothing is returned as an
//! `Err` and nothing panics.

use gemini_client::GeminiClient;
use tracing::{error, info};

use crate::config::FactCheckConfig;
use crate::error::{FactCheckError, Result};
use crate::merge::merge;
use crate::model::{GeminiModel, GroundedModel};
use crate::normalize::normalize;
use crate::prompt;
use crate::types::FactCheckResult;

/// Checks claims against a grounded generative model.
///
/// Holds no per-query state; concurrent calls to [`check`](Self::check) are
/// independent.
pub struct FactChecker<M = GeminiModel> {
    /// Present only when an API key was configured
    model: Option<M>,
}

impl FactChecker<GeminiModel> {
    /// Create a Gemini-backed checker.
    ///
    /// Without an API key the checker is still created; every check then
    /// returns an `ERROR` result explaining the missing key.
    pub fn new(config: FactCheckConfig) -> Self {
        let model = config.api_key().map(|key| {
            let client = GeminiClient::new(key).with_base_url(config.base_url.as_str());
            GeminiModel::new(client, config.model.as_str())
        });

        if model.is_none() {
            info!("No API key configured; fact checks will report a configuration error");
        }

        Self { model }
    }
}

impl<M: GroundedModel> FactChecker<M> {
    /// Create a checker around an existing model backend.
    pub fn with_model(model: M) -> Self {
        Self { model: Some(model) }
    }

    /// Create a checker with no credential. Every check fails.
    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// The model backend, if configured.
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// Check a claim. Never fails; errors become an `ERROR` verdict.
    pub async fn check(&self, input: &str) -> FactCheckResult {
        match self.try_check(input).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Fact check failed");
                FactCheckResult::error(format!("An error occurred: {}. Please try again.", e))
            }
        }
    }

    /// Check a claim, returning the typed error on failure.
    pub async fn try_check(&self, input: &str) -> Result<FactCheckResult> {
        let model = self
            .model
            .as_ref()
            .ok_or(FactCheckError::MissingCredential)?;

        let start = std::time::Instant::now();
        info!(input_len = input.len(), "Starting fact check");

        let request = prompt::build(input);
        let reply = model.generate(&request).await?;
        let answer = normalize(reply.text.as_deref())?;
        let sources = merge(&answer.sources, &reply.citations);

        let result = FactCheckResult {
            status: answer.status.into(),
            explanation: answer.explanation,
            sources,
        };

        info!(
            status = %result.status,
            sources = result.sources.len(),
            declared_sources = answer.sources.len(),
            duration_ms = start.elapsed().as_millis(),
            "Fact check complete"
        );

        Ok(result)
    }
}
