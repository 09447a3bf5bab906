// Unit tests for the vector-space engines: clustering, topics,
// similarity. Exercises the partition, weight-sum, and symmetry
// invariants directly against the library API.

use paperlens::cluster;
use paperlens::similarity;
use paperlens::topics;
use paperlens::vectorize::tfidf;
use paperlens::vectorize::VectorSpace;

fn sample_space(n: usize) -> VectorSpace {
    let themes = [
        "convolutional networks for image classification benchmarks",
        "transformer language models and attention pretraining",
        "reinforcement learning agents for robotic control tasks",
        "bayesian inference for probabilistic time series forecasting",
        "graph neural networks for molecular property prediction",
        "contrastive self-supervised representation learning methods",
        "speech recognition with recurrent acoustic models",
        "federated learning under differential privacy constraints",
    ];
    let docs: Vec<String> = (0..n)
        .map(|i| format!("paper {i}: {}", themes[i % themes.len()]))
        .collect();
    tfidf::build(&docs, 100)
}

// ============================================================
// Clustering — partition invariants
// ============================================================

#[test]
fn cluster_count_is_min_of_k_and_n() {
    for (n, k, expected) in [(6, 3, 3), (2, 5, 2), (4, 4, 4), (1, 3, 1)] {
        let space = sample_space(n);
        let result = cluster::cluster(&space, k, 8, 42).unwrap();
        assert_eq!(result.clusters.len(), expected, "n={n}, k={k}");
    }
}

#[test]
fn clusters_partition_all_paper_indices() {
    let space = sample_space(7);
    let result = cluster::cluster(&space, 3, 8, 42).unwrap();

    let mut seen = vec![0usize; 7];
    for cluster in &result.clusters {
        for &index in &cluster.members {
            seen[index] += 1;
        }
    }
    assert!(
        seen.iter().all(|&count| count == 1),
        "every paper index must appear in exactly one cluster: {seen:?}"
    );
}

#[test]
fn clustering_empty_corpus_is_empty_not_error() {
    let space = tfidf::build(&[], 100);
    let result = cluster::cluster(&space, 3, 8, 42).unwrap();
    assert!(result.clusters.is_empty());
}

#[test]
fn clustering_is_deterministic_across_calls() {
    let space = sample_space(8);
    let a = cluster::cluster(&space, 3, 8, 42).unwrap();
    let b = cluster::cluster(&space, 3, 8, 42).unwrap();
    for (ca, cb) in a.clusters.iter().zip(&b.clusters) {
        assert_eq!(ca.members, cb.members);
        assert_eq!(ca.keywords, cb.keywords);
    }
}

#[test]
fn cluster_keywords_come_from_vocabulary() {
    let space = sample_space(6);
    let result = cluster::cluster(&space, 2, 8, 42).unwrap();
    for cluster in &result.clusters {
        assert!(cluster.keywords.len() <= 8);
        for keyword in &cluster.keywords {
            assert!(space.vocab.contains(keyword), "unknown keyword {keyword}");
        }
    }
}

// ============================================================
// Topics — weight and loading invariants
// ============================================================

#[test]
fn topic_weights_sum_to_one_within_tolerance() {
    let space = sample_space(6);
    let result = topics::extract_topics(&space, 3, 8, 42, 200).unwrap();
    let sum: f64 = result.topics.iter().map(|t| t.weight).sum();
    assert!((sum - 1.0).abs() < 1e-6, "weights sum to {sum}");
}

#[test]
fn topic_loadings_are_nonnegative_and_cover_corpus() {
    let space = sample_space(5);
    let result = topics::extract_topics(&space, 2, 8, 42, 200).unwrap();
    for topic in &result.topics {
        assert_eq!(topic.paper_weights.len(), 5);
        for loading in &topic.paper_weights {
            assert!(loading.loading >= 0.0);
        }
    }
}

#[test]
fn topic_count_capped_by_corpus_and_vocabulary() {
    let space = sample_space(3);
    let result = topics::extract_topics(&space, 10, 8, 42, 200).unwrap();
    assert_eq!(result.topics.len(), 3);
}

// ============================================================
// Similarity — matrix and pair invariants
// ============================================================

#[test]
fn similarity_matrix_symmetric_with_unit_diagonal() {
    for n in [1, 2, 5] {
        let space = sample_space(n);
        let matrix = similarity::matrix(&space);
        for i in 0..n {
            assert!((matrix[[i, i]] - 1.0).abs() < 1e-12, "diagonal at {i}");
            for j in 0..n {
                assert!(
                    (matrix[[i, j]] - matrix[[j, i]]).abs() < 1e-12,
                    "asymmetry at ({i}, {j})"
                );
            }
        }
    }
}

#[test]
fn similarity_pairs_meet_threshold_sorted_descending() {
    let space = sample_space(8);
    let result = similarity::pairwise(&space, 0.05).unwrap();
    for pair in &result.pairs {
        assert!(pair.a < pair.b);
        assert!(pair.score >= 0.05);
        assert!(pair.score <= 1.0);
    }
    for window in result.pairs.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[test]
fn similarity_tie_break_is_ascending_index_pair() {
    // Identical documents make all cross-pair scores equal: ordering
    // must then fall back to ascending (a, b).
    let docs = vec!["graph networks for molecules".to_string(); 4];
    let space = tfidf::build(&docs, 100);
    let result = similarity::pairwise(&space, 0.5).unwrap();
    for window in result.pairs.windows(2) {
        if (window[0].score - window[1].score).abs() < 1e-12 {
            assert!(
                (window[0].a, window[0].b) < (window[1].a, window[1].b),
                "tie not broken by ascending index pair"
            );
        }
    }
}
