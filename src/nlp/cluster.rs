use tracing::debug;

use crate::error::{PipelineError, Result};

use super::{SegmentClusterer, SparseVector};

/// Label given to vectors outside any cluster
pub const NOISE_LABEL: i32 = -1;

/// Configuration for segment clustering
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Smallest group of segments that forms a topic
    pub min_cluster_size: usize,
    /// Cosine similarity at which two segments are linked
    pub min_similarity: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 2,
            min_similarity: 0.2,
        }
    }
}

/// Single-linkage clustering over cosine similarity
///
/// Vectors linked directly or transitively by a similarity at or above the
/// threshold share a cluster. Clusters smaller than `min_cluster_size` are
/// noise. Labels are numbered in order of each cluster's first member.
#[derive(Debug, Clone, Default)]
pub struct SimilarityClusterer {
    pub config: ClusterConfig,
}

impl SimilarityClusterer {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }
}

impl SegmentClusterer for SimilarityClusterer {
    fn cluster(&self, vectors: &[SparseVector]) -> Result<Vec<i32>> {
        if self.config.min_cluster_size < 2 {
            return Err(PipelineError::config(format!(
                "min_cluster_size must be at least 2, got {}",
                self.config.min_cluster_size
            )));
        }

        let mut components = DisjointSet::new(vectors.len());
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                if vectors[i].cosine_similarity(&vectors[j]) >= self.config.min_similarity {
                    components.union(i, j);
                }
            }
        }

        let mut sizes = vec![0usize; vectors.len()];
        for i in 0..vectors.len() {
            sizes[components.find(i)] += 1;
        }

        let mut root_labels: Vec<Option<i32>> = vec![None; vectors.len()];
        let mut next_label = 0;
        let mut labels = Vec::with_capacity(vectors.len());
        for i in 0..vectors.len() {
            let root = components.find(i);
            if sizes[root] < self.config.min_cluster_size {
                labels.push(NOISE_LABEL);
                continue;
            }
            let label = *root_labels[root].get_or_insert_with(|| {
                next_label += 1;
                next_label - 1
            });
            labels.push(label);
        }

        debug!(
            "Clustering: {} vectors, {} clusters, {} noise",
            vectors.len(),
            next_label,
            labels.iter().filter(|&&l| l < 0).count()
        );

        Ok(labels)
    }
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            // Lower index becomes the root
            let (keep, merge) = if root_a < root_b { (root_a, root_b) } else { (root_b, root_a) };
            self.parent[merge] = keep;
        }
    }
}
