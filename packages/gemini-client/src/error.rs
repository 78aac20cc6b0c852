//! Errors raised by [`crate::GeminiClient`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

/// Failure of a `generateContent` call, by where it went wrong.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The client cannot make the call at all, e.g. a blank `x-goog-api-key`.
    /// Nothing was sent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never got an HTTP response (DNS, TLS, refused connection).
    #[error("Network error: {0}")]
    Network(String),

    /// Gemini answered but refused: a non-2xx status, described from the
    /// `{"error": {...}}` envelope when present, or a prompt rejected via
    /// `promptFeedback.blockReason`.
    #[error("API error: {0}")]
    Api(String),

    /// A 2xx body that does not decode as a `GenerateContentResponse`.
    #[error("Parse error: {0}")]
    Parse(String),
}
