// Pairwise cosine similarity between papers.
//
// Vector-space rows are L2-normalized, so cosine similarity is the
// plain dot product: symmetric, unit diagonal, and non-negative for
// TF-IDF vectors. Only pairs at or above the caller's threshold are
// surfaced.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::analysis::EngineError;
use crate::vectorize::VectorSpace;

/// A surfaced pair of similar papers, `a < b`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub a: usize,
    pub b: usize,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Pairs with `score >= threshold`, sorted by descending score,
    /// ties broken by ascending `(a, b)`.
    pub pairs: Vec<SimilarityPair>,
    pub threshold: f64,
    pub summary: String,
}

/// Compute all unordered pair similarities and keep those at or above
/// the threshold. Requires at least two papers; below that there is no
/// meaningful pair to score and the call reports insufficient data.
pub fn pairwise(space: &VectorSpace, threshold: f64) -> Result<SimilarityResult, EngineError> {
    let n = space.n_docs();
    if n < 2 {
        return Err(EngineError::InsufficientData(
            "similarity analysis requires at least 2 papers".to_string(),
        ));
    }

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let score = row_cosine(space, i, j);
            if score >= threshold {
                pairs.push(SimilarityPair { a: i, b: j, score });
            }
        }
    }

    pairs.sort_by(|x, y| {
        y.score
            .partial_cmp(&x.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.a.cmp(&y.a))
            .then_with(|| x.b.cmp(&y.b))
    });

    Ok(SimilarityResult {
        summary: format!(
            "Found {} similar paper pairs with similarity above {threshold}.",
            pairs.len()
        ),
        pairs,
        threshold,
    })
}

/// Full similarity matrix: symmetric with unit diagonal. The diagonal
/// is 1.0 by definition even for zero-vector rows (a paper is always
/// identical to itself).
pub fn matrix(space: &VectorSpace) -> Array2<f64> {
    let n = space.n_docs();
    let mut out = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        out[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let score = row_cosine(space, i, j);
            out[[i, j]] = score;
            out[[j, i]] = score;
        }
    }
    out
}

fn row_cosine(space: &VectorSpace, i: usize, j: usize) -> f64 {
    // Rows are unit length (or all-zero); clamp guards the floating-
    // point edge where a dot product lands a hair above 1.0.
    space.matrix.row(i).dot(&space.matrix.row(j)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorize::tfidf;

    fn space() -> VectorSpace {
        tfidf::build(
            &[
                "graph neural networks for molecule property prediction".to_string(),
                "molecule property prediction with graph neural networks".to_string(),
                "economic indicators of monetary policy outcomes".to_string(),
            ],
            100,
        )
    }

    #[test]
    fn test_matrix_symmetric_unit_diagonal() {
        let space = space();
        let m = matrix(&space);
        for i in 0..3 {
            assert!((m[[i, i]] - 1.0).abs() < 1e-12);
            for j in 0..3 {
                assert!((m[[i, j]] - m[[j, i]]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_near_duplicate_papers_score_high() {
        let result = pairwise(&space(), 0.3).unwrap();
        assert!(!result.pairs.is_empty());
        let top = &result.pairs[0];
        assert_eq!((top.a, top.b), (0, 1));
        assert!(top.score > 0.8, "near-duplicates scored {}", top.score);
    }

    #[test]
    fn test_single_paper_is_insufficient() {
        let space = tfidf::build(&["only one paper here".to_string()], 100);
        let err = pairwise(&space, 0.4).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_all_pairs_meet_threshold_and_sorted() {
        let result = pairwise(&space(), 0.1).unwrap();
        for pair in &result.pairs {
            assert!(pair.score >= 0.1);
            assert!(pair.a < pair.b);
        }
        for window in result.pairs.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }
}
