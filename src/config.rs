use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CoachRecallConfig {
    pub logging: LoggingConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub admission: AdmissionConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `"openai"` (any OpenAI-compatible endpoint) or `"hashing"` (offline).
    pub provider: String,
    pub model: String,
    pub api_base: String,
    /// Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    pub dimensions: usize,
    pub timeout_ms: u64,
    pub batch_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub half_life_days: f64,
    /// Weight of topical similarity in the blended score; freshness gets the rest.
    pub similarity_weight: f64,
    pub mmr_lambda: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdmissionConfig {
    pub duplicate_threshold: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SummaryConfig {
    pub max_chars: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "text-embedding-3-large".into(),
            api_base: "https://api.openai.com/v1".into(),
            api_key: None,
            dimensions: 3072,
            timeout_ms: 30_000,
            batch_size: 64,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 8,
            half_life_days: 30.0,
            similarity_weight: 0.7,
            mmr_lambda: 0.5,
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.92,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { max_chars: 4000 }
    }
}

/// Returns `~/.coach-recall/`
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".coach-recall")
}

/// Returns the default config file path: `~/.coach-recall/config.toml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

impl CoachRecallConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides and validate.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            debug!("no config file at {}, using defaults", path.display());
            CoachRecallConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (COACH_RECALL_LOG_LEVEL, COACH_RECALL_API_BASE, COACH_RECALL_API_KEY, COACH_RECALL_MODEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("COACH_RECALL_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Ok(val) = std::env::var("COACH_RECALL_API_BASE") {
            self.embedding.api_base = val;
        }
        if let Ok(val) = std::env::var("COACH_RECALL_API_KEY") {
            self.embedding.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("COACH_RECALL_MODEL") {
            self.embedding.model = val;
        }
    }

    /// Reject values that would make the ranking math meaningless.
    pub fn validate(&self) -> Result<()> {
        let r = &self.retrieval;
        anyhow::ensure!(r.top_k > 0, "retrieval.top_k must be at least 1");
        anyhow::ensure!(
            r.half_life_days > 0.0,
            "retrieval.half_life_days must be positive, got {}",
            r.half_life_days
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&r.similarity_weight),
            "retrieval.similarity_weight must be within [0, 1], got {}",
            r.similarity_weight
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&r.mmr_lambda),
            "retrieval.mmr_lambda must be within [0, 1], got {}",
            r.mmr_lambda
        );
        anyhow::ensure!(
            (-1.0..=1.0).contains(&self.admission.duplicate_threshold),
            "admission.duplicate_threshold must be a cosine value, got {}",
            self.admission.duplicate_threshold
        );
        anyhow::ensure!(
            self.embedding.dimensions > 0,
            "embedding.dimensions must be at least 1"
        );
        anyhow::ensure!(
            self.embedding.batch_size > 0,
            "embedding.batch_size must be at least 1"
        );
        anyhow::ensure!(self.summary.max_chars > 0, "summary.max_chars must be at least 1");
        Ok(())
    }
}
