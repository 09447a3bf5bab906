// K-means clustering of the paper vector space.
//
// Partitions the corpus into k = min(requested, N) content clusters
// and describes each cluster by the top-weighted terms of its TF-IDF
// centroid. The k-means RNG is seeded from the engine configuration so
// repeated calls on identical input yield identical partitions — a
// requirement at the API boundary, even though k-means itself doesn't
// need it.

use linfa::dataset::AsTargets;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::Axis;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::EngineError;
use crate::vectorize::VectorSpace;

/// One content cluster. Clusters partition the paper indices: every
/// paper belongs to exactly one cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    /// Top centroid terms, most representative first.
    pub keywords: Vec<String>,
    /// Paper indices assigned to this cluster, ascending.
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringResult {
    pub clusters: Vec<Cluster>,
    pub summary: String,
}

/// Partition the vector space into `min(requested_k, N)` clusters.
///
/// `N = 0` yields an empty cluster list rather than an error. An empty
/// vocabulary (stopword-only corpus) leaves k-means nothing to measure
/// distance over and is reported as insufficient data.
pub fn cluster(
    space: &VectorSpace,
    requested_k: usize,
    keywords_per_cluster: usize,
    seed: u64,
) -> Result<ClusteringResult, EngineError> {
    let n = space.n_docs();
    if n == 0 {
        return Ok(ClusteringResult {
            clusters: vec![],
            summary: "No papers to cluster.".to_string(),
        });
    }
    if space.has_empty_vocab() {
        return Err(EngineError::InsufficientData(
            "vocabulary is empty after stopword filtering".to_string(),
        ));
    }

    let k = requested_k.max(1).min(n);
    let rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    let dataset = DatasetBase::from(space.matrix.clone());
    let model = KMeans::params_with_rng(k, rng)
        .max_n_iterations(300)
        .tolerance(1e-4)
        .fit(&dataset)
        .map_err(|e| EngineError::BackendUnavailable(format!("k-means fit failed: {e}")))?;

    let predictions = model.predict(&dataset);
    let labels: Vec<usize> = predictions.as_targets().iter().copied().collect();
    let centroids = model.centroids();

    debug!(n, k, "k-means partition complete");

    let mut clusters: Vec<Cluster> = (0..k)
        .map(|id| Cluster {
            id,
            keywords: centroid_keywords(
                &centroids.index_axis(Axis(0), id).to_vec(),
                &space.vocab,
                keywords_per_cluster,
            ),
            members: vec![],
        })
        .collect();

    for (paper_index, &label) in labels.iter().enumerate() {
        clusters[label].members.push(paper_index);
    }

    Ok(ClusteringResult {
        summary: format!("Clustered {n} papers into {k} groups based on content similarity."),
        clusters,
    })
}

/// Top centroid terms by descending weight, ties broken by term
/// alphabetical order so the listing is reproducible.
fn centroid_keywords(centroid: &[f64], vocab: &[String], count: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, f64)> = vocab.iter().zip(centroid.iter().copied()).collect();
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
