//! Grounded fact checking.
//!
//! Takes a claim (headline, link, or message), asks a web-grounded Gemini
//! model for a verdict, and assembles a [`FactCheckResult`]: the verdict,
//! an explanation, and the supporting sources with duplicates removed.
//!
//! # Example
//!
//! ```rust,ignore
//! use fact_checker::{FactCheckConfig, FactChecker};
//!
//! let checker = FactChecker::new(FactCheckConfig::from_env());
//! let result = checker.check("NASA confirms the moon is hollow").await;
//!
//! println!("{}: {}", result.status, result.explanation);
//! for source in &result.sources {
//!     println!("  {} <{}>", source.display_title(), source.url);
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`prompt`]: builds the instruction, prompt, and response schema
//! - [`model`]: the [`GroundedModel`] seam and its Gemini implementation
//! - [`normalize`](mod@normalize): parses the model's JSON answer
//! - [`merge`](mod@merge): unions declared sources with grounding citations
//! - [`checker`]: [`FactChecker`], which funnels every failure into an
//!   `ERROR` verdict

pub mod checker;
pub mod config;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod prompt;
pub mod testing;
pub mod types;

pub use checker::FactChecker;
pub use config::FactCheckConfig;
pub use error::{FactCheckError, Result};
pub use merge::merge;
pub use model::{GeminiModel, GroundedModel, ModelReply};
pub use normalize::normalize;
pub use prompt::{build, FactCheckRequest};
pub use types::{Citation, FactCheckResult, ModelAnswer, ModelVerdict, Source, Verdict};
