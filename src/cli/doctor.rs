//! CLI `doctor` command — print the resolved configuration and probe the encoder.

use anyhow::{Context, Result};
use std::path::Path;

use coach_recall::config::CoachRecallConfig;

const PROBE_TEXT: &str = "I usually prefer morning workouts";

/// Print the effective configuration and check the embedding service answers.
pub async fn doctor(config: &CoachRecallConfig, config_path: &Path) -> Result<()> {
    println!("coach-recall Health Report");
    println!("==========================");
    println!();
    println!(
        "Config file:       {}{}",
        config_path.display(),
        if config_path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!();
    println!("Embedding:");
    println!("  Provider:        {}", config.embedding.provider);
    println!("  Model:           {}", config.embedding.model);
    println!("  Endpoint:        {}", config.embedding.api_base);
    println!("  Dimensions:      {}", config.embedding.dimensions);
    println!(
        "  API key:         {}",
        if config.embedding.api_key.is_some() || std::env::var("OPENAI_API_KEY").is_ok() {
            "set"
        } else {
            "(not set)"
        }
    );
    println!();
    println!("Retrieval:");
    println!("  top_k:           {}", config.retrieval.top_k);
    println!("  half-life:       {} days", config.retrieval.half_life_days);
    println!(
        "  blend:           {:.2} similarity / {:.2} freshness",
        config.retrieval.similarity_weight,
        1.0 - config.retrieval.similarity_weight
    );
    println!("  MMR lambda:      {}", config.retrieval.mmr_lambda);
    println!();
    println!("Admission:");
    println!("  Duplicate at:    cosine >= {}", config.admission.duplicate_threshold);
    println!();
    println!("Summary:");
    println!("  Max chars:       {}", config.summary.max_chars);
    println!();

    let embedding_config = config.embedding.clone();
    let probe = tokio::task::spawn_blocking(move || -> Result<_> {
        let provider = coach_recall::embedding::create_provider(&embedding_config)?;
        let started = std::time::Instant::now();
        let result = provider.embed(PROBE_TEXT);
        Ok((result, started.elapsed()))
    })
    .await
    .context("encoder probe task panicked")??;

    match probe {
        (Ok(embedding), elapsed) => {
            println!(
                "Encoder probe:     OK ({} dims in {} ms)",
                embedding.len(),
                elapsed.as_millis()
            );
        }
        (Err(e), _) => {
            println!("Encoder probe:     FAILED ({e})");
            println!();
            println!("Check the endpoint and API key, or set `provider = \"hashing\"`");
            println!("under [embedding] for offline use.");
        }
    }

    Ok(())
}
