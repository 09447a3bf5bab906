// TF-IDF matrix construction.
//
// Each paper is treated as a separate document for IDF computation —
// words that appear in every paper get downweighted, while words that
// are distinctive to certain papers get boosted.
//
// Determinism matters here: downstream clustering and topic results
// must be reproducible, so the vocabulary is selected by an explicit
// ordering (total corpus frequency descending, ties broken
// alphabetically) rather than by map iteration order.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use stop_words::{get, LANGUAGE};

use super::VectorSpace;

/// Minimum token length retained by the tokenizer.
const MIN_TOKEN_LEN: usize = 3;

/// Lowercase and split a document into index-worthy tokens.
///
/// Tokens are maximal alphanumeric runs of length >= 3 that contain at
/// least one letter (pure numbers carry no topical signal) and are not
/// English stopwords.
pub fn tokenize(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .filter(|t| !stopwords.contains(*t))
        .map(str::to_string)
        .collect()
}

/// The stopword set used throughout the crate.
pub fn english_stopwords() -> HashSet<String> {
    get(LANGUAGE::English).into_iter().collect()
}

/// Build a TF-IDF document-term matrix with a bounded vocabulary.
///
/// IDF is smoothed (`ln((1 + n) / (1 + df)) + 1`) and rows are
/// L2-normalized, so the dot product of two rows is their cosine
/// similarity. A corpus of size 1 still produces a valid 1xV matrix;
/// a corpus whose documents are all stopwords produces an Nx0 matrix,
/// which downstream engines treat as an empty vocabulary.
pub fn build(docs: &[String], vocab_cap: usize) -> VectorSpace {
    let stopwords = english_stopwords();

    // Per-document token counts, plus corpus-wide totals and document
    // frequencies for vocabulary selection and IDF.
    let mut doc_counts: Vec<HashMap<String, usize>> = Vec::with_capacity(docs.len());
    let mut total_counts: HashMap<String, usize> = HashMap::new();
    let mut doc_freq: HashMap<String, usize> = HashMap::new();

    for doc in docs {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokenize(doc, &stopwords) {
            *counts.entry(token).or_insert(0) += 1;
        }
        for (term, count) in &counts {
            *total_counts.entry(term.clone()).or_insert(0) += count;
            *doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        doc_counts.push(counts);
    }

    // Retain the top-cap terms by total frequency, ties alphabetical.
    let mut ranked: Vec<(String, usize)> = total_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(vocab_cap);
    let vocab: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();

    let n = docs.len();
    let v = vocab.len();
    let mut matrix = Array2::<f64>::zeros((n, v));

    let idf: Vec<f64> = vocab
        .iter()
        .map(|term| {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            ((1.0 + n as f64) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    for (row, counts) in doc_counts.iter().enumerate() {
        for (col, term) in vocab.iter().enumerate() {
            if let Some(&tf) = counts.get(term) {
                matrix[[row, col]] = tf as f64 * idf[col];
            }
        }
        // L2-normalize the row; all-zero rows (no vocabulary hits) stay zero.
        let norm = matrix.row(row).iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            matrix.row_mut(row).mapv_inplace(|x| x / norm);
        }
    }

    VectorSpace { matrix, vocab }
}
