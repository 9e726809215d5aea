use serde::{Deserialize, Serialize};

/// Configuration for merging consecutive lines of the same speaker
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Maximum gap in seconds between two lines that still merge
    pub merge_gap_secs: u64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { merge_gap_secs: 5 }
    }
}

/// One text line of the transcript, stamped with its header time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// Header timestamp in seconds
    pub t: u64,
    /// Speaker label from the header
    pub speaker: String,
    /// Corrected line text
    pub text: String,
}

/// A continuous span of speech by one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: String,
    /// Start timestamp in seconds
    pub t_start: u64,
    /// End timestamp in seconds (timestamp of the last merged line)
    pub t_end: u64,
    /// Merged line texts joined by single spaces
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, t_start: u64, t_end: u64, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            t_start,
            t_end: t_end.max(t_start),
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether this utterance overlaps the closed window `[start, end]`
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        self.t_end >= start && self.t_start <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_closed_window() {
        let utterance = Utterance::new("A", 10, 20, "dobrý den");

        assert!(utterance.overlaps(20, 30));
        assert!(utterance.overlaps(0, 10));
        assert!(utterance.overlaps(12, 15));
        assert!(!utterance.overlaps(21, 40));
        assert!(!utterance.overlaps(0, 9));
    }

    #[test]
    fn test_new_keeps_start_before_end() {
        let utterance = Utterance::new("A", 30, 10, "text");
        assert_eq!(utterance.t_start, 30);
        assert_eq!(utterance.t_end, 30);
        assert_eq!(utterance.word_count(), 1);
    }
}
