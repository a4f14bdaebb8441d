//! Conversational memory for an AI coach.
//!
//! Turns a user's utterance into a ranked, deduplicated, time-aware set of
//! previously stored facts about that user, and decides which statements from a
//! finished coaching session deserve to become long-term memory.
//!
//! Storage is the caller's business: every function here computes over facts
//! passed in and returns values for the caller to persist. The only external
//! call is the embedding service.
//!
//! # Pipeline
//!
//! | Stage | Function | Notes |
//! |-------|----------|-------|
//! | Encode | [`embedding::EmbeddingProvider::embed`] | remote or offline, pinned model |
//! | Score | [`memory::cosine_similarity`] | zero vectors score `0.0` |
//! | Blend | [`memory::recency_boost`] | 70% similarity, 30% freshness, 30-day half-life |
//! | Diversify | [`memory::select_diverse`] | MMR, lambda 0.5 |
//! | Admit | [`memory::filter_for_admission`] | stable, actionable, cosine < 0.92 to stored |
//! | Summarize | [`memory::update_summary`] | newest first, oldest tail dropped |
//!
//! All weights and thresholds are defaults from [`config`], not tuned constants.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`error`] — The two error kinds the engine can raise
//! - [`embedding`] — Text-to-vector providers and the caller-owned cache
//! - [`memory`] — Ranking, selection, admission, and summary logic

pub mod config;
pub mod embedding;
pub mod error;
pub mod memory;
