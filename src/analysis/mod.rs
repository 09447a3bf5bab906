// Analysis request/response types and the engine error taxonomy.
//
// The orchestrator itself lives in `engine`; this module holds the
// vocabulary shared between it and the callers: which analyses exist,
// the tunable parameters, the typed failure conditions, and the single
// result envelope every call returns.

pub mod engine;

pub use engine::AnalysisEngine;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::ClusteringResult;
use crate::gaps::GapResult;
use crate::impact::ImpactResult;
use crate::similarity::SimilarityResult;
use crate::topics::TopicResult;
use crate::trends::TrendResult;

/// The analyses a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Clustering,
    Topics,
    Similarity,
    Trends,
    Gaps,
    Impact,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 6] = [
        AnalysisType::Clustering,
        AnalysisType::Topics,
        AnalysisType::Similarity,
        AnalysisType::Trends,
        AnalysisType::Gaps,
        AnalysisType::Impact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisType::Clustering => "clustering",
            AnalysisType::Topics => "topics",
            AnalysisType::Similarity => "similarity",
            AnalysisType::Trends => "trends",
            AnalysisType::Gaps => "gaps",
            AnalysisType::Impact => "impact",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse caller-supplied type names into a requested set.
///
/// Accepts a few legacy aliases ("topic_modeling", "trend_analysis")
/// plus "all". Unrecognized names are tolerated as
/// long as at least one name is recognized; a request where nothing is
/// recognized is the one truly invalid call and fails.
pub fn parse_types(raw: &[String]) -> Result<BTreeSet<AnalysisType>, AnalysisError> {
    let mut requested = BTreeSet::new();
    let mut unrecognized = Vec::new();

    for name in raw {
        match name.trim().to_lowercase().as_str() {
            "all" => requested.extend(AnalysisType::ALL),
            "clustering" | "cluster" => {
                requested.insert(AnalysisType::Clustering);
            }
            "topics" | "topic_modeling" => {
                requested.insert(AnalysisType::Topics);
            }
            "similarity" => {
                requested.insert(AnalysisType::Similarity);
            }
            "trends" | "trend" | "trend_analysis" => {
                requested.insert(AnalysisType::Trends);
            }
            "gaps" | "gap" => {
                requested.insert(AnalysisType::Gaps);
            }
            "impact" => {
                requested.insert(AnalysisType::Impact);
            }
            other => unrecognized.push(other.to_string()),
        }
    }

    if requested.is_empty() {
        return Err(AnalysisError::UnrecognizedTypes(unrecognized));
    }
    Ok(requested)
}

/// Caller-tunable parameters; anything unset falls back to the engine
/// configuration defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalysisParams {
    pub k: Option<usize>,
    pub topic_count: Option<usize>,
    pub similarity_threshold: Option<f64>,
}

/// Whether the numeric backend is usable for this engine instance.
///
/// An unusable backend is an explicit, injectable status rather than a
/// silent swap to mock output, so degraded-mode behavior is testable
/// and visible to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Available,
    Unavailable(String),
}

/// Recoverable per-engine failure conditions. These never escape
/// `analyze()`; the orchestrator absorbs them into a degraded,
/// schema-valid sub-result plus a note in the envelope.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("numeric backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Fatal request errors — the only way `analyze()` itself fails.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no analysis types requested")]
    EmptyRequest,
    #[error("no recognized analysis types in request: {0:?}")]
    UnrecognizedTypes(Vec<String>),
}

/// The orchestrator's single output envelope: whichever sub-results
/// were requested, plus the degraded flag and notes explaining any
/// engine that ran in fallback mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub requested: Vec<AnalysisType>,
    /// Number of papers actually analyzed (after the soft cap).
    pub paper_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<ClusteringResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<TopicResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<SimilarityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<TrendResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaps: Option<GapResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactResult>,
    /// True when any requested engine ran in fallback mode.
    pub degraded: bool,
    /// One entry per degradation, naming the engine and the cause.
    pub notes: Vec<String>,
}
