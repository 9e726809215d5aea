use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::{PipelineError, Result};

use super::{FeatureModel, SparseVector};

/// Configuration for TF-IDF weighting
#[derive(Debug, Clone)]
pub struct TfIdfConfig {
    /// Terms in fewer documents than this are dropped
    pub min_df: usize,
    /// Terms in more than this share of documents are dropped (0, 1]
    pub max_df: f64,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            min_df: 1,
            max_df: 0.95,
        }
    }
}

/// TF-IDF vectorizer with smoothed idf and L2-normalized rows
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    pub config: TfIdfConfig,
}

impl TfIdfModel {
    pub fn new(config: TfIdfConfig) -> Self {
        Self { config }
    }

    fn validate(&self, doc_count: usize) -> Result<()> {
        if !(self.config.max_df > 0.0 && self.config.max_df <= 1.0) {
            return Err(PipelineError::config(format!(
                "max_df must be in (0, 1], got {}",
                self.config.max_df
            )));
        }
        let max_docs = self.config.max_df * doc_count as f64;
        if max_docs < self.config.min_df as f64 {
            return Err(PipelineError::config(format!(
                "max_df ({}) covers fewer documents than min_df ({})",
                self.config.max_df, self.config.min_df
            )));
        }
        Ok(())
    }
}

impl FeatureModel for TfIdfModel {
    fn fit(&self, documents: &[Vec<String>]) -> Result<Vec<SparseVector>> {
        if documents.is_empty() {
            return Ok(vec![]);
        }
        self.validate(documents.len())?;

        let doc_count = documents.len();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in documents {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Sorted vocabulary keeps term indices independent of hash order
        let max_docs = self.config.max_df * doc_count as f64;
        let vocabulary: BTreeMap<&str, usize> = {
            let mut kept: Vec<&str> = doc_freq
                .iter()
                .filter(|&(_, &df)| df >= self.config.min_df && df as f64 <= max_docs)
                .map(|(&term, _)| term)
                .collect();
            kept.sort_unstable();
            kept.into_iter().enumerate().map(|(i, t)| (t, i)).collect()
        };

        if vocabulary.is_empty() {
            return Err(PipelineError::Capability {
                stage: "feature weighting",
                message: "no terms remain after document-frequency pruning".to_string(),
            });
        }

        debug!(
            "TF-IDF: {} documents, {} terms kept of {}",
            doc_count,
            vocabulary.len(),
            doc_freq.len()
        );

        let vectors = documents
            .iter()
            .map(|tokens| {
                // Keyed by term index so weights and the norm sum in a fixed order
                let mut tf: BTreeMap<usize, (&str, usize)> = BTreeMap::new();
                for token in tokens {
                    if let Some(&index) = vocabulary.get(token.as_str()) {
                        tf.entry(index).or_insert((token.as_str(), 0)).1 += 1;
                    }
                }

                let entries: Vec<(usize, f64)> = tf
                    .into_iter()
                    .map(|(index, (term, count))| {
                        let df = doc_freq[term];
                        let idf = ((doc_count + 1) as f64 / (df + 1) as f64).ln() + 1.0;
                        (index, count as f64 * idf)
                    })
                    .collect();

                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                let entries = if norm > 0.0 {
                    entries.into_iter().map(|(i, w)| (i, w / norm)).collect()
                } else {
                    entries
                };
                SparseVector::new(entries)
            })
            .collect();

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&str]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.split_whitespace().map(|w| w.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_are_normalized() {
        let model = TfIdfModel::default();
        let vectors = model
            .fit(&docs(&["silnice stavba silnice", "škola oprava", "silnice oprava"]))
            .unwrap();

        assert_eq!(vectors.len(), 3);
        for v in &vectors {
            assert!((v.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_terms_in_every_document_are_pruned() {
        let model = TfIdfModel::default();
        let vectors = model.fit(&docs(&["město silnice", "město škola"])).unwrap();

        // "město" is in 100% of documents, above max_df
        assert!(vectors[0].cosine_similarity(&vectors[1]).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let model = TfIdfModel::default();
        let err = model.fit(&docs(&["město", "město"])).unwrap_err();
        assert!(matches!(err, PipelineError::Capability { .. }));
    }

    #[test]
    fn test_refitting_gives_identical_weights() {
        let documents = docs(&[
            "silnice stavba silnice rozpočet dotace obchvat",
            "škola oprava rozpočet učitel tělocvična",
            "silnice oprava kanalizace vodovod chodník",
            "dotace obchvat kanalizace most lávka",
        ]);
        let model = TfIdfModel::default();
        let bits = |vectors: &[SparseVector]| -> Vec<Vec<(usize, u64)>> {
            vectors
                .iter()
                .map(|v| v.entries.iter().map(|&(i, w)| (i, w.to_bits())).collect())
                .collect()
        };

        let first = bits(&model.fit(&documents).unwrap());
        for _ in 0..50 {
            assert_eq!(bits(&model.fit(&documents).unwrap()), first);
        }
    }

    #[test]
    fn test_invalid_max_df() {
        let model = TfIdfModel::new(TfIdfConfig {
            min_df: 1,
            max_df: 1.5,
        });
        let err = model.fit(&docs(&["a"])).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
