//! Terminal rendering of fact-check results.

use colored::{ColoredString, Colorize};
use fact_checker::{FactCheckResult, Verdict};

pub const FOOTER: &str = "Powered by Gemini API with Google Search grounding.";

const LOADING: &str = "Checking sources...";

/// Presentation state of the result area.
///
/// Each submission moves `Idle`/`Done` to `Checking` and then to a fresh
/// `Done`; the previous result is dropped, not kept as history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Idle,
    Checking,
    Done(FactCheckResult),
}

impl CheckState {
    pub fn result(&self) -> Option<&FactCheckResult> {
        match self {
            Self::Done(result) => Some(result),
            _ => None,
        }
    }
}

/// Render the result area for `state`.
///
/// `Idle` shows nothing, `Checking` a loading line, `Done` the full result.
pub fn render_state(state: &CheckState) -> String {
    match state {
        CheckState::Idle => String::new(),
        CheckState::Checking => format!("{}\n", LOADING.dimmed()),
        CheckState::Done(result) => render(result),
    }
}

/// Reject claims that are empty after trimming.
pub fn validate_claim(input: &str) -> Result<&str, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err("Please enter a headline, link, or message to check.")
    } else {
        Ok(trimmed)
    }
}

/// Status badge, colored by verdict.
pub fn badge(status: Verdict) -> ColoredString {
    let label = format!(" {} ", status);
    match status {
        Verdict::Real => label.black().on_green().bold(),
        Verdict::Fake => label.white().on_red().bold(),
        Verdict::Unverified => label.black().on_yellow().bold(),
        Verdict::Error => label.white().on_bright_red().bold(),
    }
}

fn heading(status: Verdict) -> &'static str {
    match status {
        Verdict::Real => "Looks real",
        Verdict::Fake => "Likely fake",
        Verdict::Unverified => "Could not be verified",
        Verdict::Error => "Check failed",
    }
}

/// Render a result for the terminal.
///
/// An `ERROR` result gets a banner repeating its explanation above the body.
pub fn render(result: &FactCheckResult) -> String {
    let mut out = String::new();

    if result.is_error() {
        out.push_str(&format!(
            "{} {}\n\n",
            "Error:".red().bold(),
            result.explanation.red()
        ));
    }

    out.push_str(&format!(
        "{}  {}\n\n",
        badge(result.status),
        heading(result.status).bold()
    ));
    out.push_str(&result.explanation);
    out.push('\n');

    if !result.sources.is_empty() {
        out.push_str(&format!("\n{}\n", "Sources".bold().underline()));
        for (i, source) in result.sources.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, source.display_title()));
            if !source.url.trim().is_empty() {
                out.push_str(&format!("     {}\n", source.url.cyan()));
            }
        }
    }

    out
}
