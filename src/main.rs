//! Sentiment Engine CLI
//!
//! Scores a document, its tokens, or a text column of a CSV file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sentiment_engine::{
    config::Config,
    data::Table,
    report,
    SentimentEngine, SentimentError,
};
use serde_json::json;
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sentiment-engine")]
#[command(about = "Sentiment analysis for text and CSV data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and its tokens
    Analyze {
        /// Text to analyze (read from stdin when omitted)
        text: Option<String>,
    },
    /// Show per-token sentiment only
    Tokens {
        /// Text to analyze (read from stdin when omitted)
        text: Option<String>,
    },
    /// Analyze a text column of a CSV file
    Batch {
        /// CSV file with a header row
        path: String,
        /// Column to analyze (first text column when omitted)
        #[arg(short = 'C', long)]
        column: Option<String>,
        /// Analyze rows one at a time
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => match Config::load_default()? {
            Some(config) => config,
            None => {
                tracing::debug!("No config file found, using built-in configuration");
                Config::default()
            }
        },
    };

    match cli.command {
        Commands::Analyze { text } => {
            let engine = SentimentEngine::from_config(&config)?;
            analyze_text(&engine, text, cli.json)
        }
        Commands::Tokens { text } => {
            let engine = SentimentEngine::from_config(&config)?;
            analyze_tokens(&engine, text, cli.json)
        }
        Commands::Batch {
            path,
            column,
            sequential,
        } => {
            if sequential {
                config.batch.parallel = false;
            }
            let engine = SentimentEngine::from_config(&config)?;
            analyze_csv(&engine, &path, column.as_deref(), cli.json)
        }
    }
}

/// Argument text, or all of stdin
fn read_input(text: Option<String>) -> anyhow::Result<Vec<u8>> {
    match text {
        Some(text) => Ok(text.into_bytes()),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn analyze_text(engine: &SentimentEngine, text: Option<String>, as_json: bool) -> anyhow::Result<()> {
    let input = read_input(text)?;
    let document = engine.analyze_document_bytes(&input)?;
    let tokens = engine.analyze_tokens_bytes(&input)?;

    if as_json {
        let out = json!({
            "document": document,
            "breakdown": document.score.breakdown(),
            "tokens": tokens,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Results");
        println!("{}", report::DocumentReport(&document));
        println!("Token Sentiment");
        println!("{}", report::TokenReport(&tokens));
    }
    Ok(())
}

fn analyze_tokens(engine: &SentimentEngine, text: Option<String>, as_json: bool) -> anyhow::Result<()> {
    let input = read_input(text)?;
    let tokens = engine.analyze_tokens_bytes(&input)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        println!("{}", report::TokenReport(&tokens));
    }
    Ok(())
}

fn analyze_csv(
    engine: &SentimentEngine,
    path: &str,
    column: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let table = Table::from_csv_path(path).with_context(|| format!("Failed to load {}", path))?;
    tracing::info!("Loaded {} rows from {}", table.len(), path);

    let result = match engine.analyze_table(&table, column) {
        Ok(result) => result,
        Err(SentimentError::NoTextColumnFound) => {
            tracing::warn!("No suitable text column found in {}", path);
            if as_json {
                println!("{}", json!({ "warning": "No suitable text column found" }));
            } else {
                println!("Warning: No suitable text column found in the CSV file.");
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if result.has_errors() {
        tracing::warn!("{} row(s) could not be analyzed", result.errors.len());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::BatchReport(&result));
    }
    Ok(())
}
