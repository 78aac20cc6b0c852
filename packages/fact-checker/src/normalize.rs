//! Response parsing.

use gemini_client::strip_code_blocks;
use tracing::error;

use crate::error::{FactCheckError, Result};
use crate::types::ModelAnswer;

const MAX_LOGGED_PAYLOAD: usize = 2000;

/// Parse the model's text payload into a [`ModelAnswer`].
///
/// A missing or whitespace-only payload is [`FactCheckError::EmptyResponse`].
/// A surrounding Markdown code fence is tolerated. On a parse failure the
/// raw payload is logged; it is never part of the returned error message.
pub fn normalize(text: Option<&str>) -> Result<ModelAnswer> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(FactCheckError::EmptyResponse),
    };

    serde_json::from_str(strip_code_blocks(text)).map_err(|e| {
        error!(
            error = %e,
            payload = %truncate_for_log(text, MAX_LOGGED_PAYLOAD),
            "Failed to parse model response"
        );
        FactCheckError::MalformedResponse(e)
    })
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated {} bytes]", &s[..end], s.len() - end)
}
