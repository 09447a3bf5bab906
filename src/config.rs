use std::env;

use anyhow::{Context, Result};

/// Engine defaults, overridable from PAPERLENS_* environment variables.
///
/// Nothing here is secret; the env layer exists so operators can tune
/// caps and defaults without recompiling. The .env file is loaded
/// automatically at CLI startup via dotenvy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of vocabulary terms retained by the vectorizer.
    pub vocab_cap: usize,
    /// Soft upper bound on corpus size; larger corpora are truncated
    /// (with a note in the result envelope) rather than left to hang.
    pub max_papers: usize,
    /// Seed for k-means, NMF initialization, and synthetic impact
    /// targets. Fixed so repeated calls on identical input yield
    /// identical results.
    pub seed: u64,
    /// Default cluster count when the caller doesn't pass one.
    pub default_k: usize,
    /// Default topic count when the caller doesn't pass one.
    pub default_topic_count: usize,
    /// Default cosine similarity threshold.
    pub default_similarity_threshold: f64,
    /// Keywords reported per cluster centroid.
    pub cluster_keywords: usize,
    /// Keywords reported per topic.
    pub topic_keywords: usize,
    /// Cap on reported gap candidates.
    pub max_gaps: usize,
    /// Iteration budget for the NMF factorization.
    pub nmf_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vocab_cap: 100,
            max_papers: 500,
            seed: 42,
            default_k: 3,
            default_topic_count: 5,
            default_similarity_threshold: 0.4,
            cluster_keywords: 8,
            topic_keywords: 8,
            max_gaps: 10,
            nmf_iterations: 200,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults above for anything unset.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = parse_env("PAPERLENS_VOCAB_CAP")? {
            cfg.vocab_cap = v;
        }
        if let Some(v) = parse_env("PAPERLENS_MAX_PAPERS")? {
            cfg.max_papers = v;
        }
        if let Some(v) = parse_env("PAPERLENS_SEED")? {
            cfg.seed = v;
        }
        if let Some(v) = parse_env("PAPERLENS_DEFAULT_K")? {
            cfg.default_k = v;
        }
        if let Some(v) = parse_env("PAPERLENS_DEFAULT_TOPICS")? {
            cfg.default_topic_count = v;
        }
        if let Some(v) = parse_env::<f64>("PAPERLENS_SIMILARITY_THRESHOLD")? {
            cfg.default_similarity_threshold = v;
        }
        if let Some(v) = parse_env("PAPERLENS_MAX_GAPS")? {
            cfg.max_gaps = v;
        }
        Ok(cfg)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .parse()
                .with_context(|| format!("invalid value for {key}: {raw:?}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
