// Document-term vector space shared by the content engines.
//
// The vectorizer builds one TF-IDF matrix per orchestrator call; the
// clustering, topic, and similarity engines all read from it. An
// optional memo cache keyed by corpus fingerprint avoids rebuilding
// the matrix for a repeated corpus — a pure optimization, safe to
// share across concurrent calls because entries are populate-once and
// never mutated after insertion.

pub mod tfidf;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ndarray::Array2;

use crate::corpus;

/// A numeric document-term representation: one row per paper, one
/// column per retained vocabulary term. Rows are L2-normalized, so
/// cosine similarity between papers is the plain dot product.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    pub matrix: Array2<f64>,
    /// Retained vocabulary, column-aligned with the matrix.
    pub vocab: Vec<String>,
}

impl VectorSpace {
    pub fn n_docs(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.vocab.len()
    }

    /// True when stopword filtering left nothing to vectorize.
    pub fn has_empty_vocab(&self) -> bool {
        self.vocab.is_empty()
    }
}

/// Read-through memoization cache: corpus fingerprint -> VectorSpace.
///
/// Replace-on-miss, never update-in-place. Lock poisoning is treated
/// as a cache miss rather than a panic; the cache is an optimization,
/// not a correctness requirement.
#[derive(Default)]
pub struct VectorCache {
    inner: RwLock<HashMap<String, Arc<VectorSpace>>>,
}

impl VectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the vector space for this normalized corpus, building and
    /// inserting it on a miss.
    pub fn get_or_build(&self, docs: &[String], vocab_cap: usize) -> Arc<VectorSpace> {
        let key = corpus::fingerprint(docs, vocab_cap);

        if let Ok(guard) = self.inner.read() {
            if let Some(space) = guard.get(&key) {
                return Arc::clone(space);
            }
        }

        let space = Arc::new(tfidf::build(docs, vocab_cap));
        if let Ok(mut guard) = self.inner.write() {
            guard.insert(key, Arc::clone(&space));
        }
        space
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_returns_same_instance_for_same_corpus() {
        let cache = VectorCache::new();
        let docs = vec![
            "neural networks for image classification".to_string(),
            "transformers for language modeling".to_string(),
        ];
        let a = cache.get_or_build(&docs, 100);
        let b = cache.get_or_build(&docs, 100);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_vocab_cap() {
        let cache = VectorCache::new();
        let docs = vec!["neural networks for image classification".to_string()];
        let a = cache.get_or_build(&docs, 100);
        let b = cache.get_or_build(&docs, 2);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }
}
