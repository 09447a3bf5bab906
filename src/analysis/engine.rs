// The analysis orchestrator.
//
// Accepts a corpus and a requested analysis set, invokes the relevant
// engines through the shared normalizer/vectorizer, and merges the
// results into one envelope. Failure containment is the central
// policy: each engine's failure is caught individually and replaced by
// a structurally valid degraded sub-result, so one engine going down
// never blocks the others in the same call.
//
// The engine is stateless across calls apart from the vector-space
// memo cache, which is populate-once and safe to share between
// concurrent `analyze()` calls.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cluster::{self, ClusteringResult};
use crate::config::EngineConfig;
use crate::corpus::{self, Paper};
use crate::gaps::{self, GapResult};
use crate::impact::{self, ImpactResult};
use crate::similarity::{self, SimilarityResult};
use crate::topics::{self, TopicResult};
use crate::trends::{self, TrendResult};
use crate::vectorize::{VectorCache, VectorSpace};

use super::{
    AnalysisError, AnalysisParams, AnalysisResult, AnalysisType, BackendStatus, EngineError,
};

pub struct AnalysisEngine {
    cfg: EngineConfig,
    backend: BackendStatus,
    cache: VectorCache,
}

impl AnalysisEngine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            backend: BackendStatus::Available,
            cache: VectorCache::new(),
        }
    }

    /// Construct with an explicit backend status. Tests (and callers
    /// probing degraded behavior) inject `Unavailable` here; there is
    /// no hidden fallback path anywhere else.
    pub fn with_backend(cfg: EngineConfig, backend: BackendStatus) -> Self {
        Self {
            cfg,
            backend,
            cache: VectorCache::new(),
        }
    }

    /// Run the requested analyses over the corpus.
    ///
    /// Always returns a well-formed envelope for a valid request:
    /// per-engine `InsufficientData` / `BackendUnavailable` conditions
    /// are folded into degraded sub-results and notes, never thrown.
    /// The only fatal case is a request with no recognized types.
    pub fn analyze(
        &self,
        papers: &[Paper],
        requested: &BTreeSet<AnalysisType>,
        params: &AnalysisParams,
    ) -> Result<AnalysisResult, AnalysisError> {
        if requested.is_empty() {
            return Err(AnalysisError::EmptyRequest);
        }

        let mut result = AnalysisResult {
            requested: requested.iter().copied().collect(),
            paper_count: papers.len().min(self.cfg.max_papers),
            clustering: None,
            topics: None,
            similarity: None,
            trends: None,
            gaps: None,
            impact: None,
            degraded: false,
            notes: vec![],
        };

        // Soft upper bound: truncate rather than hang on an oversized corpus.
        let papers = if papers.len() > self.cfg.max_papers {
            result.notes.push(format!(
                "corpus truncated from {} to {} papers",
                papers.len(),
                self.cfg.max_papers
            ));
            &papers[..self.cfg.max_papers]
        } else {
            papers
        };

        info!(
            papers = papers.len(),
            requested = result.requested.len(),
            "starting analysis"
        );

        let docs = corpus::normalize(papers);

        // The vector space is built once per invocation and shared
        // read-only by the content engines; engines that don't need it
        // never trigger the build.
        let needs_vectors = requested.iter().any(|t| {
            matches!(
                t,
                AnalysisType::Clustering | AnalysisType::Topics | AnalysisType::Similarity
            )
        });
        let space: Option<Arc<VectorSpace>> = match (&self.backend, needs_vectors) {
            (BackendStatus::Available, true) => {
                Some(self.cache.get_or_build(&docs, self.cfg.vocab_cap))
            }
            _ => None,
        };

        for &analysis in requested {
            match analysis {
                AnalysisType::Clustering => {
                    let outcome = self.require_backend().and_then(|_| {
                        cluster::cluster(
                            space.as_ref().expect("vector space built when backend available"),
                            params.k.unwrap_or(self.cfg.default_k),
                            self.cfg.cluster_keywords,
                            self.cfg.seed,
                        )
                    });
                    result.clustering = Some(outcome.unwrap_or_else(|e| {
                        degrade(&mut result.degraded, &mut result.notes, analysis, &e);
                        ClusteringResult {
                            clusters: vec![],
                            summary: degraded_summary(analysis, &e),
                        }
                    }));
                }
                AnalysisType::Topics => {
                    let outcome = self.require_backend().and_then(|_| {
                        topics::extract_topics(
                            space.as_ref().expect("vector space built when backend available"),
                            params.topic_count.unwrap_or(self.cfg.default_topic_count),
                            self.cfg.topic_keywords,
                            self.cfg.seed,
                            self.cfg.nmf_iterations,
                        )
                    });
                    result.topics = Some(outcome.unwrap_or_else(|e| {
                        degrade(&mut result.degraded, &mut result.notes, analysis, &e);
                        TopicResult {
                            topics: vec![],
                            dominant: vec![],
                            fallback: true,
                            summary: degraded_summary(analysis, &e),
                        }
                    }));
                }
                AnalysisType::Similarity => {
                    let threshold = params
                        .similarity_threshold
                        .unwrap_or(self.cfg.default_similarity_threshold);
                    let outcome = self.require_backend().and_then(|_| {
                        similarity::pairwise(
                            space.as_ref().expect("vector space built when backend available"),
                            threshold,
                        )
                    });
                    result.similarity = Some(outcome.unwrap_or_else(|e| {
                        degrade(&mut result.degraded, &mut result.notes, analysis, &e);
                        SimilarityResult {
                            pairs: vec![],
                            threshold,
                            summary: degraded_summary(analysis, &e),
                        }
                    }));
                }
                AnalysisType::Trends => {
                    // Trend analysis reads metadata only and degrades
                    // in-band (insufficient_temporal_data flag).
                    result.trends = Some(trends::analyze_trends(papers));
                }
                AnalysisType::Gaps => {
                    // Lexicon scan over normalized text; no numeric backend.
                    result.gaps = Some(gaps::find_gaps(&docs, self.cfg.max_gaps).unwrap_or_else(
                        |e| {
                            degrade(&mut result.degraded, &mut result.notes, analysis, &e);
                            GapResult {
                                gaps: vec![],
                                summary: degraded_summary(analysis, &e),
                            }
                        },
                    ));
                }
                AnalysisType::Impact => {
                    let outcome = self
                        .require_backend()
                        .and_then(|_| impact::predict_impact(papers, self.cfg.seed));
                    result.impact = Some(outcome.unwrap_or_else(|e| {
                        degrade(&mut result.degraded, &mut result.notes, analysis, &e);
                        ImpactResult {
                            ranking: vec![],
                            demonstrative: true,
                            summary: degraded_summary(analysis, &e),
                        }
                    }));
                }
            }
        }

        Ok(result)
    }

    fn require_backend(&self) -> Result<(), EngineError> {
        match &self.backend {
            BackendStatus::Available => Ok(()),
            BackendStatus::Unavailable(reason) => {
                Err(EngineError::BackendUnavailable(reason.clone()))
            }
        }
    }
}

fn degrade(
    degraded: &mut bool,
    notes: &mut Vec<String>,
    analysis: AnalysisType,
    error: &EngineError,
) {
    warn!(engine = %analysis, error = %error, "engine degraded, substituting placeholder result");
    *degraded = true;
    notes.push(format!("{analysis}: {error}"));
}

fn degraded_summary(analysis: AnalysisType, error: &EngineError) -> String {
    format!("{analysis} unavailable: {error}")
}
