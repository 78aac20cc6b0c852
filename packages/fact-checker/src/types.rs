//! Verdicts, sources, and the result returned to callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a fact check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Verified by multiple reputable sources
    Real,
    /// Debunked, satirical, or a known hoax
    Fake,
    /// Not enough reputable evidence either way
    Unverified,
    /// The check itself failed
    Error,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Fake => "FAKE",
            Self::Unverified => "UNVERIFIED",
            Self::Error => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of [`Verdict`] the model is allowed to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ModelVerdict {
    Real,
    Fake,
    Unverified,
}

impl From<ModelVerdict> for Verdict {
    fn from(v: ModelVerdict) -> Self {
        match v {
            ModelVerdict::Real => Verdict::Real,
            ModelVerdict::Fake => Verdict::Fake,
            ModelVerdict::Unverified => Verdict::Unverified,
        }
    }
}

// Identity is the exact url, compared byte for byte.

/// A reputable source supporting the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    /// Title of the reputable source.
    #[serde(default)]
    pub title: String,

    /// URL of the reputable source.
    #[serde(default)]
    pub url: String,
}

impl Source {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Text to show for this source: the title, or the URL when the title is blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// A raw retrieval record surfaced by search grounding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl Citation {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            title: Some(title.into()),
        }
    }
}

// The schema for this type is sent with every request: its doc comments are
// the descriptions the model sees.

/// A fact-check verdict with its explanation and sources.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ModelAnswer {
    /// The fact-check status of the input: REAL, FAKE, or UNVERIFIED.
    pub status: ModelVerdict,

    /// A detailed explanation for the fact-check determination.
    pub explanation: String,

    /// An array of at least two reputable source objects, each with a title and URL.
    #[serde(default)]
    #[schemars(length(min = 2))]
    pub sources: Vec<Source>,
}

/// Result of one fact check.
///
/// Built once per query and never mutated. `sources` holds no two entries
/// with the same URL; an `ERROR` result has no sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub status: Verdict,
    pub explanation: String,
    pub sources: Vec<Source>,
}

impl FactCheckResult {
    /// An `ERROR` result carrying a user-facing explanation.
    pub fn error(explanation: impl Into<String>) -> Self {
        Self {
            status: Verdict::Error,
            explanation: explanation.into(),
            sources: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}
