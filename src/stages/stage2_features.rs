use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::models::{LemmaProfile, Segment};
use crate::nlp::{FeatureModel, LemmaExtractor, SegmentClusterer};

/// Result of Stage 2
#[derive(Debug, Clone)]
pub struct FeatureResult {
    /// Lemma frequencies per segment, aligned with the segment list
    pub lemma_profiles: Vec<LemmaProfile>,
    /// Cluster label per segment; negative means unclustered
    pub labels: Vec<i32>,
}

impl FeatureResult {
    pub fn cluster_count(&self) -> usize {
        let mut labels: Vec<i32> = self.labels.iter().copied().filter(|&l| l >= 0).collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l < 0).count()
    }
}

/// Execute Stage 2: lemmatize, weight and cluster the segments
///
/// 1. Lemmatize each segment's full text into a lemma document
/// 2. Weight the documents into term vectors
/// 3. Cluster the vectors into topic labels
pub fn extract_features(
    segments: &[Segment],
    lemmatizer: &dyn LemmaExtractor,
    features: &dyn FeatureModel,
    clusterer: &dyn SegmentClusterer,
) -> Result<FeatureResult> {
    let documents = lemmatize_segments(segments, lemmatizer)?;
    let lemma_profiles: Vec<LemmaProfile> = documents
        .iter()
        .map(|doc| doc.iter().map(String::as_str).collect())
        .collect();

    let vectors = features.fit(&documents)?;
    expect_aligned("feature weighting", vectors.len(), segments.len())?;

    let labels = clusterer.cluster(&vectors)?;
    expect_aligned("clustering", labels.len(), segments.len())?;

    let result = FeatureResult {
        lemma_profiles,
        labels,
    };

    info!(
        "Stage 2: {} segments in {} clusters, {} unclustered",
        segments.len(),
        result.cluster_count(),
        result.noise_count()
    );

    Ok(result)
}

/// Lemma document per segment, in segment order
pub fn lemmatize_segments(
    segments: &[Segment],
    lemmatizer: &dyn LemmaExtractor,
) -> Result<Vec<Vec<String>>> {
    segments
        .iter()
        .map(|segment| {
            lemmatizer.lemmatize(&segment.full_text()).inspect_err(|e| {
                warn!("Lemmatization failed on segment {}: {}", segment.index, e);
            })
        })
        .collect()
}

fn expect_aligned(stage: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(PipelineError::Capability {
            stage,
            message: format!("returned {} results for {} segments", got, expected),
        });
    }
    Ok(())
}
