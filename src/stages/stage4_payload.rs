use tracing::info;

use crate::error::Result;
use crate::models::{round1, LlmTopicEntry, PayloadConfig, Topic};

/// Execute Stage 4: rank topics into the generation payload
///
/// Drops topics shorter than `min_minutes`, sorts by time spent (stable),
/// keeps the first `max_topics` and truncates their evidence.
pub fn build_llm_payload(topics: &[Topic], config: &PayloadConfig) -> Result<Vec<LlmTopicEntry>> {
    config.validate()?;

    let mut kept: Vec<&Topic> = topics
        .iter()
        .filter(|t| t.time_minutes >= config.min_minutes)
        .collect();

    kept.sort_by(|a, b| {
        b.time_minutes
            .partial_cmp(&a.time_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    kept.truncate(config.max_topics);

    let entries: Vec<LlmTopicEntry> = kept
        .into_iter()
        .enumerate()
        .map(|(i, topic)| LlmTopicEntry {
            order: i + 1,
            time_minutes: round1(topic.time_minutes),
            topic_type: topic.topic_type,
            topic_hint: topic.topic_hint.clone(),
            evidence: topic
                .representative_text
                .iter()
                .take(config.max_evidence_per_topic)
                .cloned()
                .collect(),
        })
        .collect();

    info!(
        "Stage 4: {} of {} topics in payload (min {:.1} min, max {})",
        entries.len(),
        topics.len(),
        config.min_minutes,
        config.max_topics
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TopicType;

    fn topic(id: u32, minutes: f64, evidence: usize) -> Topic {
        Topic {
            topic_id: id,
            segment_ids: vec![],
            segments_count: 0,
            t_start: 0,
            t_end: 0,
            time_minutes: minutes,
            top_lemmas: vec![],
            speakers: vec![],
            dominant_speaker: None,
            dominant_ratio: 0.0,
            topic_type: TopicType::Procedural,
            topic_hint: format!("hint {id}"),
            representative_text: (0..evidence).map(|i| format!("věta {i}")).collect(),
        }
    }

    #[test]
    fn test_filters_sorts_and_numbers() {
        // deliberately unsorted input
        let topics = vec![topic(0, 3.0, 1), topic(1, 1.5, 1), topic(2, 8.0, 3), topic(3, 3.0, 0)];
        let config = PayloadConfig {
            min_minutes: 2.0,
            max_topics: 10,
            max_evidence_per_topic: 2,
        };
        let payload = build_llm_payload(&topics, &config).unwrap();

        let orders: Vec<usize> = payload.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        let hints: Vec<&str> = payload.iter().map(|e| e.topic_hint.as_str()).collect();
        assert_eq!(hints, vec!["hint 2", "hint 0", "hint 3"]);
        assert_eq!(payload[0].evidence.len(), 2);
        assert!(payload.iter().all(|e| e.time_minutes >= 2.0));
    }

    #[test]
    fn test_truncates_to_max_topics() {
        let topics: Vec<Topic> = (0..20).map(|i| topic(i, 20.0 - i as f64, 1)).collect();
        let config = PayloadConfig {
            min_minutes: 0.0,
            max_topics: 5,
            max_evidence_per_topic: 3,
        };
        let payload = build_llm_payload(&topics, &config).unwrap();

        assert_eq!(payload.len(), 5);
        assert_eq!(payload[4].time_minutes, 16.0);
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = PayloadConfig {
            max_topics: 0,
            ..Default::default()
        };
        assert!(build_llm_payload(&[], &config).is_err());
    }
}
