//! Statistical capabilities the topic pipeline depends on
//!
//! Each capability is a single-method trait so the deterministic pipeline can
//! run against the built-in implementations or against fixed stand-ins.

pub mod cluster;
pub mod lexicon;
pub mod tfidf;

pub use cluster::*;
pub use lexicon::*;
pub use tfidf::*;

use serde::Serialize;

use crate::error::Result;

/// Reduces text to lowercase base forms of content words
pub trait LemmaExtractor {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>>;
}

/// Turns lemma documents into weighted term vectors
pub trait FeatureModel {
    fn fit(&self, documents: &[Vec<String>]) -> Result<Vec<SparseVector>>;
}

/// Assigns a cluster label to every vector; negative means unclustered
pub trait SegmentClusterer {
    fn cluster(&self, vectors: &[SparseVector]) -> Result<Vec<i32>>;
}

/// Sparse vector of `(term index, weight)` pairs sorted by term index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(index, _)| index);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a < 1e-12 || norm_b < 1e-12 {
            0.0
        } else {
            self.dot(other) / (norm_a * norm_b)
        }
    }
}
