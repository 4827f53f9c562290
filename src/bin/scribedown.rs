//! CLI binary for scribedown.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` / `PersistTargets` and prints results.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scribedown::{
    convert, ConversionConfig, ConversionRequest, Document, InputMode, NotionClient,
    OpenAiProvider, PersistTargets, SaveOptions, SaveOutcome, ScribedownError,
};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Markdown markers in the input are meaningful; already-formatted text
    /// is passed through unchanged.
    Markdown,
    /// Treat the input as plain text and always convert.
    Text,
}

impl From<Mode> for InputMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Markdown => InputMode::Markdown,
            Mode::Text => InputMode::Text,
        }
    }
}

/// Convert notes and transcripts to Markdown, save to disk and Notion.
#[derive(Debug, Parser)]
#[command(name = "scribedown", version, about)]
struct Cli {
    /// Input text file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Summarise transcription input instead of merely formatting it.
    #[arg(short, long)]
    summary: bool,

    /// Custom summary instruction (replaces the built-in one).
    #[arg(long, env = "SCRIBEDOWN_SUMMARY_PROMPT")]
    summary_prompt: Option<String>,

    /// LLM model identifier.
    #[arg(short, long, env = "SCRIBEDOWN_MODEL", default_value = scribedown::DEFAULT_MODEL)]
    model: String,

    /// Input mode; gates Markdown detection.
    #[arg(long, value_enum, default_value = "markdown")]
    mode: Mode,

    /// Directory for the saved Markdown file.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the converted Markdown to stdout without saving.
    #[arg(long)]
    no_save: bool,

    /// Also create a Notion page (needs NOTION_API_KEY and NOTION_DATABASE_ID).
    #[arg(long)]
    notion: bool,

    /// OpenAI API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let text = text.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "input is empty");

    let provider = match cli.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => Some(OpenAiProvider::new(key).context("failed to build OpenAI client")?),
        None => None,
    };

    let mut config = ConversionConfig::builder().model(cli.model.as_str());
    if let Some(prompt) = &cli.summary_prompt {
        config = config.summary_prompt(prompt.as_str());
    }
    let config = config.build()?;

    let mode: InputMode = cli.mode.into();
    let request = ConversionRequest {
        text,
        wants_summary: cli.summary,
        mode,
    };

    let result = convert(
        &request,
        &config,
        provider.as_ref().map(|p| p as &dyn scribedown::CompletionProvider),
    )
    .await;

    if let Some(e) = &result.error {
        eprintln!("{} {e}", red("✗"));
        std::process::exit(1);
    }
    if result.was_already_markup {
        eprintln!("{}", dim("input is already markdown; no conversion needed"));
    }

    if cli.no_save {
        println!("{}", result.text);
        return Ok(());
    }

    let mut doc = Document::new(request.text.clone(), mode);
    doc.replace_text(result.text);

    let notion_client = if cli.notion {
        let key = std::env::var("NOTION_API_KEY").unwrap_or_default();
        let db = std::env::var("NOTION_DATABASE_ID").unwrap_or_default();
        if key.is_empty() || db.is_empty() {
            return Err(ScribedownError::RemoteStoreNotConfigured.into());
        }
        Some(NotionClient::new(key, db).context("failed to build Notion client")?)
    } else {
        None
    };

    let targets = PersistTargets {
        file: Some(SaveOptions {
            directory: cli.out_dir.clone(),
            suggested_name: None,
            skip_picker: true,
        }),
        picker: None,
        page_store: notion_client
            .as_ref()
            .map(|c| c as &dyn scribedown::PageStore),
        completion: provider
            .as_ref()
            .map(|p| p as &dyn scribedown::CompletionProvider),
        model: cli.model.clone(),
    };

    let report = scribedown::persist(&doc, &targets).await;

    let mut failed = false;
    if let Some(outcome) = report.file {
        match outcome {
            Ok(SaveOutcome::Saved(path)) => {
                eprintln!("{} saved {}", green("✓"), path.display())
            }
            Ok(SaveOutcome::Cancelled) => eprintln!("{}", dim("save cancelled")),
            Err(e) => {
                eprintln!("{} {e}", red("✗"));
                failed = true;
            }
        }
    }
    if let Some(outcome) = report.page {
        match outcome {
            Ok(page) => eprintln!("{} notion page {}", green("✓"), page.page_url),
            Err(e) => {
                eprintln!("{} {e}", red("✗"));
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
