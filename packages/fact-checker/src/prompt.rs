//! Request construction.
//!
//! Pure: turns the user's claim into the instruction, prompt, and output
//! contract sent to the model. The claim is not validated here; the caller
//! rejects blank input before a check is started.

use gemini_client::StructuredOutput;

use crate::types::ModelAnswer;

/// Persona and evidentiary standard for every check.
pub const SYSTEM_INSTRUCTION: &str = "You are a highly accurate Real-Time Fact Checker. \
Your goal is to critically evaluate news headlines, article links, or messages provided by the user. \
You must use Google Search to find relevant, up-to-date information from reputable sources.";

/// A fully built fact-check request, independent of any provider's wire format.
#[derive(Debug, Clone)]
pub struct FactCheckRequest {
    pub system_instruction: String,
    pub prompt: String,
    /// Output contract for the JSON answer (Gemini schema dialect)
    pub response_schema: serde_json::Value,
    /// Ask the model to ground its answer in live web search
    pub web_search: bool,
}

/// Build the request for `input`.
pub fn build(input: &str) -> FactCheckRequest {
    FactCheckRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt: render_prompt(input),
        response_schema: ModelAnswer::gemini_schema(),
        web_search: true,
    }
}

fn render_prompt(input: &str) -> String {
    format!(
        r#"Based on the following input: "{input}", perform a comprehensive fact check.

1. Classify the credibility of the input as exactly one of:
   - REAL: Verified by multiple reputable sources.
   - FAKE: Clearly debunked, satirical, or a known hoax/scam.
   - UNVERIFIED: Insufficient evidence from reputable sources to confirm or deny.

2. Give a concise, clear explanation for the classification. If it is fake or a scam, say precisely why (clickbait, satirical site, debunked by fact-checkers, misleading information).

3. List at least 2 reputable sources (e.g. Reuters, BBC, AP, official government sites, established academic institutions), each with its title and direct URL. Prefer sources that directly address whether the input is true.

4. Return only a JSON object with the fields "status", "explanation", and "sources" conforming to the provided schema. Do not add any text or formatting outside the JSON object."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_input_verbatim() {
        let request = build("Scientists confirm the moon is hollow");
        assert!(request
            .prompt
            .contains(r#""Scientists confirm the moon is hollow""#));
    }

    #[test]
    fn test_prompt_carries_rubric() {
        let prompt = build("x").prompt;
        for label in ["REAL:", "FAKE:", "UNVERIFIED:"] {
            assert!(prompt.contains(label), "missing {}", label);
        }
        assert!(prompt.contains("at least 2 reputable sources"));
    }

    #[test]
    fn test_degenerate_input_passes_through() {
        let request = build("");
        assert!(request.prompt.contains(r#"input: """#));
    }

    #[test]
    fn test_web_search_enabled() {
        let request = build("claim");
        assert!(request.web_search);
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_schema_contract() {
        let schema = build("claim").response_schema;

        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["required"],
            serde_json::json!(["status", "explanation", "sources"])
        );
        assert_eq!(
            schema["properties"]["status"]["enum"],
            serde_json::json!(["REAL", "FAKE", "UNVERIFIED"])
        );
        assert_eq!(schema["properties"]["explanation"]["type"], "STRING");

        let sources = &schema["properties"]["sources"];
        assert_eq!(sources["type"], "ARRAY");
        assert_eq!(sources["minItems"], 2);
        assert_eq!(
            sources["items"]["required"],
            serde_json::json!(["title", "url"])
        );
    }
}
