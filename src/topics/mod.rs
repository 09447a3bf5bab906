// Latent topic extraction over the paper vector space.
//
// Factors the TF-IDF matrix with NMF and reads topics off the factor
// pair: each topic's keyword list comes from its row of the topic-term
// matrix, its weight is that topic's share of the total paper-loading
// mass, and each paper's dominant topic is the argmax of its loadings.

pub mod nmf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::EngineError;
use crate::vectorize::VectorSpace;

/// One extracted topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    /// Top topic terms, most representative first.
    pub keywords: Vec<String>,
    /// Fraction of corpus mass attributed to this topic. Weights for
    /// one extraction sum to 1.0 within floating tolerance.
    pub weight: f64,
    /// Non-negative loading per paper, one entry per corpus index.
    pub paper_weights: Vec<PaperLoading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperLoading {
    pub paper_index: usize,
    pub loading: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicResult {
    pub topics: Vec<Topic>,
    /// Dominant topic id per paper index (argmax loading).
    pub dominant: Vec<usize>,
    /// True when the corpus gave NMF nothing to factor and a single
    /// low-confidence placeholder topic was substituted.
    pub fallback: bool,
    pub summary: String,
}

/// Extract `min(requested, N, V)` topics from the vector space.
///
/// An empty vocabulary (or empty corpus) can't support a
/// factorization; instead of failing, a single fallback topic covering
/// the whole corpus is returned with `fallback = true`.
pub fn extract_topics(
    space: &VectorSpace,
    requested: usize,
    keywords_per_topic: usize,
    seed: u64,
    max_iter: usize,
) -> Result<TopicResult, EngineError> {
    let n = space.n_docs();
    let v = space.n_terms();
    let components = requested.max(1).min(n).min(v);

    if components == 0 {
        return Ok(fallback_result(n));
    }

    let factorization = nmf::factorize(&space.matrix, components, seed, max_iter);
    let w = &factorization.w;
    let h = &factorization.h;

    let total_mass: f64 = w.iter().sum();
    debug!(n, v, components, total_mass, "NMF factorization complete");

    let mut topics = Vec::with_capacity(components);
    for topic_id in 0..components {
        let column_mass: f64 = w.column(topic_id).sum();
        let weight = if total_mass > f64::EPSILON {
            column_mass / total_mass
        } else {
            1.0 / components as f64
        };

        let paper_weights = w
            .column(topic_id)
            .iter()
            .enumerate()
            .map(|(paper_index, &loading)| PaperLoading {
                paper_index,
                loading,
            })
            .collect();

        topics.push(Topic {
            id: topic_id,
            keywords: topic_keywords(&h.row(topic_id).to_vec(), &space.vocab, keywords_per_topic),
            weight,
            paper_weights,
        });
    }

    // Dominant topic per paper: argmax over that paper's loadings.
    let dominant = (0..n)
        .map(|paper_index| {
            let row = w.row(paper_index);
            row.iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(topic_id, _)| topic_id)
                .unwrap_or(0)
        })
        .collect();

    Ok(TopicResult {
        summary: format!("Extracted {components} key research topics from {n} papers."),
        topics,
        dominant,
        fallback: false,
    })
}

/// Single placeholder topic for corpora the factorization can't
/// handle. Flagged low-confidence via `fallback`, never an error.
fn fallback_result(n: usize) -> TopicResult {
    let paper_weights = (0..n)
        .map(|paper_index| PaperLoading {
            paper_index,
            loading: 0.0,
        })
        .collect();
    TopicResult {
        topics: vec![Topic {
            id: 0,
            keywords: vec![],
            weight: 1.0,
            paper_weights,
        }],
        dominant: vec![0; n],
        fallback: true,
        summary: "Corpus vocabulary too sparse for topic extraction; returning a low-confidence placeholder topic.".to_string(),
    }
}

/// Top topic terms by descending weight, ties alphabetical.
fn topic_keywords(row: &[f64], vocab: &[String], count: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, f64)> = vocab.iter().zip(row.iter().copied()).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked
        .into_iter()
        .take(count)
        .filter(|(_, weight)| *weight > 0.0)
        .map(|(term, _)| term.clone())
        .collect()
}
