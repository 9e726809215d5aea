use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

use super::TermCounter;

/// Lemma frequencies of one segment
pub type LemmaProfile = TermCounter;

/// How the time on a topic was spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicType {
    /// One speaker held the floor
    Monologue,
    /// Three or more speakers took part
    Discussion,
    /// Short exchanges between few speakers
    Procedural,
}

impl std::fmt::Display for TopicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TopicType::Monologue => "monologue",
            TopicType::Discussion => "discussion",
            TopicType::Procedural => "procedural",
        };
        f.write_str(name)
    }
}

/// A cluster of segments sharing subject matter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Cluster label
    pub topic_id: u32,
    /// Member segment indices in clustering assignment order
    pub segment_ids: Vec<usize>,
    pub segments_count: usize,
    /// Earliest member segment start in seconds
    pub t_start: u64,
    /// Latest member segment end in seconds
    pub t_end: u64,
    /// Span of the member segments in minutes, one decimal
    pub time_minutes: f64,
    /// Up to 15 most frequent content lemmas, descending
    pub top_lemmas: Vec<String>,
    /// Sorted speakers contributing text
    pub speakers: Vec<String>,
    pub dominant_speaker: Option<String>,
    pub dominant_ratio: f64,
    pub topic_type: TopicType,
    /// Comma-joined domain labels, possibly empty
    pub topic_hint: String,
    /// Up to three evidence sentences
    pub representative_text: Vec<String>,
}

/// Thresholds for building the generation payload
#[derive(Debug, Clone)]
pub struct PayloadConfig {
    /// Topics shorter than this are dropped
    pub min_minutes: f64,
    /// Maximum number of topics kept
    pub max_topics: usize,
    /// Maximum evidence sentences per topic
    pub max_evidence_per_topic: usize,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            min_minutes: 2.0,
            max_topics: 12,
            max_evidence_per_topic: 3,
        }
    }
}

impl PayloadConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_minutes.is_finite() || self.min_minutes < 0.0 {
            return Err(PipelineError::config(format!(
                "min_minutes must be a non-negative number, got {}",
                self.min_minutes
            )));
        }
        if self.max_topics == 0 {
            return Err(PipelineError::config("max_topics must be at least 1"));
        }
        Ok(())
    }
}

/// A ranked topic as handed to the text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmTopicEntry {
    /// 1-based rank
    pub order: usize,
    pub time_minutes: f64,
    pub topic_type: TopicType,
    pub topic_hint: String,
    pub evidence: Vec<String>,
}

/// Round to one decimal place
///
/// Rounds the exact binary value, with exact ties going to the even tenth,
/// so `1.15` (stored just below 1.15) becomes `1.1` and `0.25` becomes `0.2`.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let lower = (value * 10.0).floor();
    // sign of 20v - (2 * lower + 1) with a single rounding, so it is exact
    let above_midpoint = value.mul_add(20.0, -(2.0 * lower + 1.0));
    let tenths = if above_midpoint > 0.0 {
        lower + 1.0
    } else if above_midpoint < 0.0 {
        lower
    } else if lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    tenths / 10.0
}
