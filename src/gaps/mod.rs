// Literature gap detection via lexicon complement pairs.
//
// Scans each normalized document for topic, method, and dataset terms,
// then reports as gaps the (topic, method) and (method, dataset) pairs
// whose terms are each observed somewhere in the corpus but never
// co-occur within a single paper. A gap is a weak proxy for an
// unexplored research direction; the complement condition ("never
// together in one paper") is the defining invariant and holds by
// construction.

pub mod lexicon;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::EngineError;

/// Gap detection is noise below this corpus size.
const MIN_PAPERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    TopicMethod,
    MethodDataset,
}

/// A term pair observed in the corpus but never within one paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapCandidate {
    pub term_a: String,
    pub term_b: String,
    pub kind: GapKind,
    pub description: String,
    /// Heuristic confidence from the two terms' individual document
    /// frequencies: pairs of individually common terms that still
    /// never meet are the more interesting gaps.
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapResult {
    pub gaps: Vec<GapCandidate>,
    pub summary: String,
}

/// Find lexicon-term pairs that never co-occur in a single paper.
///
/// Results are capped to `max_gaps`, sorted by descending confidence
/// with alphabetical term tiebreaks.
pub fn find_gaps(docs: &[String], max_gaps: usize) -> Result<GapResult, EngineError> {
    if docs.len() < MIN_PAPERS {
        return Err(EngineError::InsufficientData(format!(
            "gap detection requires at least {MIN_PAPERS} papers, got {}",
            docs.len()
        )));
    }

    let lowered: Vec<String> = docs.iter().map(|d| d.to_lowercase()).collect();

    let topic_hits = occurrences(lexicon::TOPIC_TERMS, &lowered);
    let method_hits = occurrences(lexicon::METHOD_TERMS, &lowered);
    let dataset_hits = occurrences(lexicon::DATASET_TERMS, &lowered);

    let mut gaps = Vec::new();
    collect_gaps(&topic_hits, &method_hits, GapKind::TopicMethod, docs.len(), &mut gaps);
    collect_gaps(&method_hits, &dataset_hits, GapKind::MethodDataset, docs.len(), &mut gaps);

    gaps.sort_by(|x, y| {
        y.confidence
            .partial_cmp(&x.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.term_a.cmp(&y.term_a))
            .then_with(|| x.term_b.cmp(&y.term_b))
    });
    let total = gaps.len();
    gaps.truncate(max_gaps);

    debug!(total, reported = gaps.len(), "gap detection complete");

    Ok(GapResult {
        summary: format!(
            "Identified {} candidate literature gaps ({} before the cap).",
            gaps.len(),
            total
        ),
        gaps,
    })
}

/// For each lexicon term, the set of document indices containing it.
/// Terms observed nowhere are dropped here, which is what restricts
/// the cross product to *observed* terms.
fn occurrences(terms: &[&str], lowered_docs: &[String]) -> Vec<(String, BTreeSet<usize>)> {
    terms
        .iter()
        .filter_map(|term| {
            let hits: BTreeSet<usize> = lowered_docs
                .iter()
                .enumerate()
                .filter(|(_, doc)| doc.contains(term))
                .map(|(i, _)| i)
                .collect();
            if hits.is_empty() {
                None
            } else {
                Some((term.to_string(), hits))
            }
        })
        .collect()
}

fn collect_gaps(
    left: &[(String, BTreeSet<usize>)],
    right: &[(String, BTreeSet<usize>)],
    kind: GapKind,
    n_docs: usize,
    out: &mut Vec<GapCandidate>,
) {
    for (term_a, hits_a) in left {
        for (term_b, hits_b) in right {
            if hits_a.intersection(hits_b).next().is_some() {
                continue;
            }
            let freq_a = hits_a.len() as f64 / n_docs as f64;
            let freq_b = hits_b.len() as f64 / n_docs as f64;
            out.push(GapCandidate {
                term_a: term_a.clone(),
                term_b: term_b.clone(),
                kind,
                description: format!(
                    "'{term_a}' appears in {} papers and '{term_b}' in {}, but never together",
                    hits_a.len(),
                    hits_b.len()
                ),
                confidence: ((freq_a + freq_b) / 2.0).min(0.95),
            });
        }
    }
}
