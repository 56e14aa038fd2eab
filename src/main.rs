// src/main.rs
// review-responder CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use review_responder::{
    JsonReviewSource, OllamaBackend, ResponderConfig, ResponseGenerator, ReviewSource,
};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "review-responder")]
#[command(about = "Draft replies to customer reviews in the reviewer's language")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.review-responder/config.toml)
    #[arg(long, global = true, env = "REVIEW_RESPONDER_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reply to a single review
    Reply {
        /// Review text
        text: String,

        /// Star rating, 1 to 5
        #[arg(short, long)]
        rating: Option<f32>,

        /// formal, friendly or empathetic
        #[arg(short, long)]
        tone: Option<String>,

        /// Draft with the local model, templates as fallback
        #[arg(long)]
        ai: bool,
    },

    /// Reply to every review in a JSON or NDJSON file
    Batch {
        /// Reviews file
        file: PathBuf,

        /// Maximum number of reviews to process
        #[arg(short, long)]
        max: Option<usize>,

        /// Tone for reviews without a rating
        #[arg(short, long)]
        tone: Option<String>,

        /// Draft with the local model, templates as fallback
        #[arg(long)]
        ai: bool,
    },

    /// Show detected language, sentiment and tone
    Detect {
        /// Review text
        text: String,

        /// Star rating, 1 to 5
        #[arg(short, long)]
        rating: Option<f32>,
    },
}

/// Load config and fold in the `--ai` flag
fn load_config(path: Option<&Path>, ai: bool) -> Result<ResponderConfig> {
    let mut config = ResponderConfig::load(path).context("loading configuration")?;
    if ai {
        config.use_ai = true;
    }
    Ok(config)
}

/// Warn early when the model server is unreachable; replies still fall back to templates
async fn check_backend(config: &ResponderConfig) {
    if !config.use_ai {
        return;
    }
    let backend = OllamaBackend::new(&config.backend);
    match backend.ping().await {
        Ok(()) => info!(host = %backend.base_url(), model = %backend.model(), "Model server ready"),
        Err(e) => warn!(error = %e, "Model server check failed, replies will use templates"),
    }
}

async fn run_reply(
    config: ResponderConfig,
    text: String,
    rating: Option<f32>,
    tone: Option<String>,
) -> Result<()> {
    check_backend(&config).await;
    let generator = ResponseGenerator::from_config(&config)?;
    let response = generator.generate_response(&text, rating, tone.as_deref()).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_batch(
    config: ResponderConfig,
    file: PathBuf,
    max: Option<usize>,
    tone: Option<String>,
) -> Result<()> {
    check_backend(&config).await;
    let generator = ResponseGenerator::from_config(&config)?;

    let source = JsonReviewSource::new(&file);
    let max = max.unwrap_or(config.batch.max_reviews);
    let reviews = source
        .fetch(max)
        .await
        .with_context(|| format!("reading reviews from {}", file.display()))?;

    let records = generator
        .generate_batch_with_tone(reviews, tone.as_deref(), config.batch.concurrency)
        .await;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

async fn run_detect(config: ResponderConfig, text: String, rating: Option<f32>) -> Result<()> {
    let generator = ResponseGenerator::from_config(&config)?;
    let analysis = generator.analyze(&text, rating, None).await;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".review-responder/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Reply {
            text,
            rating,
            tone,
            ai,
        } => {
            let config = load_config(cli.config.as_deref(), ai)?;
            run_reply(config, text, rating, tone).await?;
        }
        Commands::Batch {
            file,
            max,
            tone,
            ai,
        } => {
            let config = load_config(cli.config.as_deref(), ai)?;
            run_batch(config, file, max, tone).await?;
        }
        Commands::Detect { text, rating } => {
            let config = load_config(cli.config.as_deref(), false)?;
            run_detect(config, text, rating).await?;
        }
    }

    Ok(())
}
