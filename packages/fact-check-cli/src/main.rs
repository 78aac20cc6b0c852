//! `factcheck` - check a headline, link, or message against live web sources.
//!
//! ```text
//! factcheck "NASA confirms the moon is hollow"
//! factcheck --json "https://example.com/story"
//! factcheck                      # interactive
//! ```
//!
//! Configuration comes from the environment (`GEMINI_API_KEY`,
//! `GEMINI_MODEL`, `GEMINI_BASE_URL`, optionally via `.env`).

mod render;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use fact_checker::{FactCheckConfig, FactChecker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use render::{render_state, validate_claim, CheckState, FOOTER};

const QUIT_WORDS: &[&str] = &[":q", "quit", "exit"];

#[derive(Parser)]
#[command(name = "factcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check a headline, link, or message against live web sources", long_about = None)]
struct Cli {
    /// Claim to check (omit for interactive mode)
    claim: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Gemini model to use (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// API base URL (overrides GEMINI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = FactCheckConfig::from_env();
    if let Some(model) = &cli.model {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    tracing::debug!(model = %config.model, has_api_key = config.has_api_key(), "Loaded configuration");

    let checker = FactChecker::new(config);

    if cli.claim.is_empty() {
        run_interactive(&checker, cli.json).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let joined = cli.claim.join(" ");
    let claim = match validate_claim(&joined) {
        Ok(claim) => claim,
        Err(msg) => {
            eprintln!("{}", msg.yellow());
            return Ok(ExitCode::from(64));
        }
    };

    let mut state = CheckState::Idle;
    run_check(&checker, claim, &mut state, !cli.json).await;
    print_state(&state, cli.json)?;

    Ok(match state.result() {
        Some(result) if result.is_error() => ExitCode::from(2),
        _ => ExitCode::SUCCESS,
    })
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,fact_checker=debug,gemini_client=debug,fact_check_cli=debug"
    } else {
        "warn,fact_checker=info,gemini_client=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

/// Run one check, moving `state` through `Checking` to `Done`.
///
/// The `Checking` view is drawn on stderr while the call is in flight and
/// cleared once it completes.
async fn run_check(
    checker: &FactChecker,
    claim: &str,
    state: &mut CheckState,
    show_progress: bool,
) {
    *state = CheckState::Checking;
    tracing::debug!(?state, "Submitting claim");

    let term = Term::stderr();
    let progress = show_progress && term.is_term();

    if progress {
        let _ = term.write_str(&render_state(state));
    }

    let result = checker.check(claim).await;

    if progress {
        let _ = term.clear_last_lines(1);
    }

    *state = CheckState::Done(result);
}

fn print_state(state: &CheckState, json: bool) -> Result<()> {
    let Some(result) = state.result() else {
        return Ok(());
    };

    if json {
        let text =
            serde_json::to_string_pretty(result).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        println!();
        print!("{}", render_state(state));
        println!();
        println!("{}", FOOTER.dimmed());
    }
    Ok(())
}

async fn run_interactive(checker: &FactChecker, json: bool) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();
    let mut state = CheckState::Idle;

    println!("{}", "Real-Time Fact Checker".bright_cyan().bold());
    println!(
        "{}",
        "Paste a headline, article link, or message. Type :q to quit.".dimmed()
    );

    loop {
        println!();
        let input: String = Input::with_theme(&theme)
            .with_prompt("Claim")
            .validate_with(|input: &String| validate_claim(input).map(|_| ()))
            .interact_text_on(&term)
            .context("Failed to read input")?;

        let claim = input.trim();
        if QUIT_WORDS.contains(&claim) {
            break;
        }

        run_check(checker, claim, &mut state, !json).await;
        print_state(&state, json)?;
    }

    if let Some(last) = state.result() {
        tracing::debug!(status = %last.status, "Leaving interactive mode");
    }
    println!("{}", "Goodbye!".bright_blue());
    Ok(())
}
