use crate::models::{Segment, TermCounter, TopicType};

/// Share of words above which a single speaker makes a monologue
const MONOLOGUE_DOMINANCE: f64 = 0.75;

/// Speaker composition of a topic
#[derive(Debug, Clone)]
pub struct SpeakerStats {
    /// Words per speaker in first-seen order
    pub speaker_words: TermCounter,
    pub total_words: usize,
    /// Word share of the most talkative speaker (0 when nobody spoke)
    pub dominant_ratio: f64,
    pub speaker_count: usize,
    pub dominant_speaker: Option<String>,
}

impl SpeakerStats {
    /// Speakers sorted by name
    pub fn sorted_speakers(&self) -> Vec<String> {
        let mut speakers: Vec<String> = self
            .speaker_words
            .iter()
            .map(|(speaker, _)| speaker.to_string())
            .collect();
        speakers.sort();
        speakers
    }
}

/// Sum word counts per speaker over the member segments
pub fn analyze_speakers(segments: &[&Segment]) -> SpeakerStats {
    let mut speaker_words = TermCounter::new();
    for segment in segments {
        for (speaker, text) in &segment.speaker_texts {
            speaker_words.add(speaker, text.split_whitespace().count());
        }
    }

    let total_words = speaker_words.total();
    let top = speaker_words.most_common(1);
    let dominant_ratio = match top.first() {
        Some(&(_, words)) if total_words > 0 => words as f64 / total_words as f64,
        _ => 0.0,
    };
    let dominant_speaker = top
        .first()
        .filter(|_| total_words > 0)
        .map(|(speaker, _)| speaker.to_string());

    SpeakerStats {
        speaker_count: speaker_words.len(),
        total_words,
        dominant_ratio,
        dominant_speaker,
        speaker_words,
    }
}

/// Classify a topic by its speaker composition
///
/// Rules are checked in order:
/// 1. one speaker holds more than 75% of words among at most 3 speakers → monologue
/// 2. three or more speakers → discussion
/// 3. anything else → procedural
pub fn determine_topic_type(stats: &SpeakerStats) -> TopicType {
    if stats.dominant_ratio > MONOLOGUE_DOMINANCE && stats.speaker_count <= 3 {
        TopicType::Monologue
    } else if stats.speaker_count >= 3 {
        TopicType::Discussion
    } else {
        TopicType::Procedural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn segment(texts: &[(&str, &str)]) -> Segment {
        let speaker_texts: BTreeMap<String, String> = texts
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect();
        Segment {
            t_start: 0,
            t_end: 300,
            index: 1,
            speakers: speaker_texts.keys().cloned().collect(),
            word_count: speaker_texts.values().map(|t| t.split_whitespace().count()).sum(),
            speaker_texts,
        }
    }

    #[test]
    fn test_dominant_speaker_makes_monologue() {
        let seg = segment(&[
            ("starosta", "jedna dva tři čtyři pět šest sedm osm devět"),
            ("radní", "ano"),
        ]);
        let stats = analyze_speakers(&[&seg]);

        assert_eq!(stats.total_words, 10);
        assert_eq!(stats.dominant_speaker.as_deref(), Some("starosta"));
        assert!((stats.dominant_ratio - 0.9).abs() < 1e-9);
        assert_eq!(determine_topic_type(&stats), TopicType::Monologue);
    }

    #[test]
    fn test_three_balanced_speakers_make_discussion() {
        let seg = segment(&[("A", "a b"), ("B", "c d"), ("C", "e f")]);
        let stats = analyze_speakers(&[&seg]);

        assert_eq!(stats.speaker_count, 3);
        assert_eq!(determine_topic_type(&stats), TopicType::Discussion);
    }

    #[test]
    fn test_two_balanced_speakers_are_procedural() {
        let seg = segment(&[("A", "a b"), ("B", "c d")]);
        let stats = analyze_speakers(&[&seg]);

        // Ties go to the first speaker seen
        assert_eq!(stats.dominant_speaker.as_deref(), Some("A"));
        assert_eq!(determine_topic_type(&stats), TopicType::Procedural);
    }

    #[test]
    fn test_no_words_gives_zero_ratio() {
        let seg = segment(&[("A", "")]);
        let stats = analyze_speakers(&[&seg]);

        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.dominant_ratio, 0.0);
        assert!(stats.dominant_speaker.is_none());
        assert_eq!(stats.sorted_speakers(), vec!["A".to_string()]);
        assert_eq!(determine_topic_type(&stats), TopicType::Procedural);
    }
}
