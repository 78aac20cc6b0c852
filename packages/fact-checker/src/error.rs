//! Error types for the fact-checking pipeline.
//!
//! None of these reach the caller of [`crate::FactChecker::check`]; they are
//! folded into an `ERROR` verdict there.

use gemini_client::GeminiError;
use thiserror::Error;

/// Result type for fact-checking operations.
pub type Result<T> = std::result::Result<T, FactCheckError>;

#[derive(Debug, Error)]
pub enum FactCheckError {
    /// No API key was configured
    #[error("API key is not configured. Set GEMINI_API_KEY in your environment")]
    MissingCredential,

    /// Network or API failure during the remote call
    #[error("Remote call failed: {0}")]
    Remote(#[from] GeminiError),

    /// The call succeeded but carried no text
    #[error("No response text received from the model")]
    EmptyResponse,

    /// The text was not JSON matching the response contract.
    ///
    /// The serde error is kept as the source only: its message can quote the
    /// payload, which must not reach the user-facing explanation.
    #[error("Failed to parse the model's response. It did not return valid JSON")]
    MalformedResponse(#[source] serde_json::Error),
}

impl FactCheckError {
    /// Short machine-friendly label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Remote(_) => "remote",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}
