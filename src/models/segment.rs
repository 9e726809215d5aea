use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Configuration for the sliding segment window
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Window length in seconds
    pub segment_len_secs: u64,
    /// Overlap between neighbouring windows in seconds
    pub segment_overlap_secs: u64,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            segment_len_secs: 300,     // 5 minutes
            segment_overlap_secs: 120, // 2 minutes
        }
    }
}

impl SegmentConfig {
    /// Distance between the starts of two consecutive windows
    pub fn step_secs(&self) -> u64 {
        self.segment_len_secs.saturating_sub(self.segment_overlap_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segment_len_secs == 0 {
            return Err(PipelineError::config("segment length must be positive"));
        }
        if self.segment_overlap_secs >= self.segment_len_secs {
            return Err(PipelineError::config(format!(
                "segment overlap ({}s) must be shorter than segment length ({}s)",
                self.segment_overlap_secs, self.segment_len_secs
            )));
        }
        Ok(())
    }
}

/// A fixed-length time window over the merged utterances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Window start in seconds
    pub t_start: u64,
    /// Window end in seconds (`t_start + segment length`)
    pub t_end: u64,
    /// 1-based sequential index
    pub index: usize,
    /// Speakers with at least one utterance overlapping the window
    pub speakers: BTreeSet<String>,
    /// Per-speaker text, utterances joined in transcript order
    pub speaker_texts: BTreeMap<String, String>,
    /// Total words of all overlapping utterances
    pub word_count: usize,
}

impl Segment {
    /// All speaker texts joined by spaces, in speaker order
    pub fn full_text(&self) -> String {
        self.speaker_texts
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn duration_secs(&self) -> u64 {
        self.t_end.saturating_sub(self.t_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_overlap_not_shorter_than_length() {
        let config = SegmentConfig {
            segment_len_secs: 120,
            segment_overlap_secs: 120,
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Configuration(_))
        ));

        assert!(SegmentConfig::default().validate().is_ok());
        assert_eq!(SegmentConfig::default().step_secs(), 180);
    }

    #[test]
    fn test_full_text_joins_speakers() {
        let segment = Segment {
            t_start: 0,
            t_end: 300,
            index: 1,
            speakers: ["A".to_string(), "B".to_string()].into_iter().collect(),
            speaker_texts: [
                ("B".to_string(), "druhý".to_string()),
                ("A".to_string(), "první".to_string()),
            ]
            .into_iter()
            .collect(),
            word_count: 2,
        };

        assert_eq!(segment.full_text(), "první druhý");
        assert_eq!(segment.duration_secs(), 300);
    }
}
