mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use coach_recall::config::{default_config_path, CoachRecallConfig};
use coach_recall::memory::Exchange;

#[derive(Parser)]
#[command(name = "coach-recall", version, about = "Conversational memory for an AI coach")]
struct Cli {
    /// Config file (defaults to ~/.coach-recall/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Retrieve the most useful stored facts for an utterance
    Recall {
        /// JSON array of facts
        #[arg(long)]
        facts: PathBuf,
        /// Maximum number of facts to return
        #[arg(long)]
        top_k: Option<usize>,
        query: String,
    },
    /// Filter candidate statements down to those worth storing
    Admit {
        /// JSON array of existing facts
        #[arg(long)]
        facts: PathBuf,
        /// Include the computed embeddings in the output
        #[arg(long)]
        with_embeddings: bool,
        #[arg(required = true)]
        statements: Vec<String>,
    },
    /// Fold a completed exchange into the rolling summary
    Summarize {
        /// Current summary file (missing file means no summary yet)
        #[arg(long)]
        current: Option<PathBuf>,
        /// Write the updated summary here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        utterance: String,
        #[arg(long)]
        reply: String,
        #[arg(long)]
        max_chars: Option<usize>,
    },
    /// Show the effective configuration and probe the embedding service
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = CoachRecallConfig::load_from(&config_path)?;

    // Log to stderr so stdout stays clean JSON.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Recall {
            facts,
            top_k,
            query,
        } => {
            cli::recall::recall(&config, &facts, &query, top_k).await?;
        }
        Command::Admit {
            facts,
            with_embeddings,
            statements,
        } => {
            cli::admit::admit(&config, &facts, statements, with_embeddings).await?;
        }
        Command::Summarize {
            current,
            output,
            utterance,
            reply,
            max_chars,
        } => {
            cli::summarize::summarize(
                current.as_deref(),
                output.as_deref(),
                &Exchange::new(utterance, reply),
                max_chars.unwrap_or(config.summary.max_chars),
            )?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&config, &config_path).await?;
        }
    }

    Ok(())
}
