use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::evidence::{select_evidence, EvidenceConfig};
use crate::heuristics::{analyze_speakers, determine_topic_type, generate_topic_hint, HeuristicTables};
use crate::models::{round1, LemmaProfile, Segment, TermCounter, Topic};

/// Configuration for Stage 3 topic aggregation
#[derive(Debug, Clone)]
pub struct TopicConfig {
    /// Most frequent lemmas considered before stop-lemma filtering
    pub candidate_lemmas: usize,
    /// Lemmas kept per topic after filtering
    pub max_top_lemmas: usize,
    pub evidence: EvidenceConfig,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            candidate_lemmas: 20,
            max_top_lemmas: 15,
            evidence: EvidenceConfig::default(),
        }
    }
}

/// Execute Stage 3: aggregate clustered segments into topics
///
/// Segments are grouped by label in order of first appearance; negative
/// labels are dropped. The result is sorted by `time_minutes` descending,
/// stable for ties.
pub fn summarize_topics(
    segments: &[Segment],
    labels: &[i32],
    lemma_profiles: &[LemmaProfile],
    tables: &HeuristicTables,
    config: &TopicConfig,
) -> Result<Vec<Topic>> {
    if labels.len() != segments.len() || lemma_profiles.len() != segments.len() {
        return Err(PipelineError::Capability {
            stage: "topic aggregation",
            message: format!(
                "{} labels and {} lemma profiles for {} segments",
                labels.len(),
                lemma_profiles.len(),
                segments.len()
            ),
        });
    }

    let mut groups: Vec<(u32, Vec<usize>)> = Vec::new();
    for (position, &label) in labels.iter().enumerate() {
        let Ok(label) = u32::try_from(label) else {
            continue;
        };
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(position),
            None => groups.push((label, vec![position])),
        }
    }

    let mut topics: Vec<Topic> = groups
        .iter()
        .map(|(label, members)| {
            let member_segments: Vec<&Segment> = members.iter().map(|&i| &segments[i]).collect();
            let profiles: Vec<&LemmaProfile> = members.iter().map(|&i| &lemma_profiles[i]).collect();
            build_topic(*label, &member_segments, &profiles, tables, config)
        })
        .collect();

    topics.sort_by(|a, b| {
        b.time_minutes
            .partial_cmp(&a.time_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    info!(
        "Stage 3: {} topics from {} segments ({} unclustered)",
        topics.len(),
        segments.len(),
        labels.iter().filter(|&&l| l < 0).count()
    );

    Ok(topics)
}

fn build_topic(
    label: u32,
    segments: &[&Segment],
    profiles: &[&LemmaProfile],
    tables: &HeuristicTables,
    config: &TopicConfig,
) -> Topic {
    let t_start = segments.iter().map(|s| s.t_start).min().unwrap_or(0);
    let t_end = segments.iter().map(|s| s.t_end).max().unwrap_or(t_start);
    let time_minutes = round1(t_end.saturating_sub(t_start) as f64 / 60.0);

    let top_lemmas = compute_top_lemmas(profiles, tables, config);
    let speaker_stats = analyze_speakers(segments);
    let topic_type = determine_topic_type(&speaker_stats);
    let topic_hint = generate_topic_hint(&top_lemmas, tables);

    let text = segments
        .iter()
        .map(|s| s.full_text())
        .collect::<Vec<_>>()
        .join(" ");
    let representative_text = select_evidence(&text, &top_lemmas, &topic_hint, tables, &config.evidence);

    debug!(
        "Topic {}: {} segments, {:.1} min, {}, hint '{}', {} evidence",
        label,
        segments.len(),
        time_minutes,
        topic_type,
        topic_hint,
        representative_text.len()
    );

    Topic {
        topic_id: label,
        segment_ids: segments.iter().map(|s| s.index).collect(),
        segments_count: segments.len(),
        t_start,
        t_end,
        time_minutes,
        top_lemmas,
        speakers: speaker_stats.sorted_speakers(),
        dominant_speaker: speaker_stats.dominant_speaker.clone(),
        dominant_ratio: speaker_stats.dominant_ratio,
        topic_type,
        topic_hint,
        representative_text,
    }
}

/// Most frequent lemmas across the profiles, minus stop lemmas
///
/// Only the `candidate_lemmas` most frequent are considered, so stop lemmas
/// shrink the list rather than pulling rarer lemmas in.
fn compute_top_lemmas(
    profiles: &[&LemmaProfile],
    tables: &HeuristicTables,
    config: &TopicConfig,
) -> Vec<String> {
    let mut counter = TermCounter::new();
    for profile in profiles {
        counter.merge(profile);
    }

    counter
        .most_common(config.candidate_lemmas)
        .into_iter()
        .filter(|(lemma, _)| !tables.is_stop_lemma(lemma))
        .take(config.max_top_lemmas)
        .map(|(lemma, _)| lemma.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::models::TopicType;

    fn segment(index: usize, t_start: u64, texts: &[(&str, &str)]) -> Segment {
        let speaker_texts: BTreeMap<String, String> = texts
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect();
        Segment {
            t_start,
            t_end: t_start + 300,
            index,
            speakers: speaker_texts.keys().cloned().collect(),
            word_count: speaker_texts.values().map(|t| t.split_whitespace().count()).sum(),
            speaker_texts,
        }
    }

    fn profile(text: &str) -> LemmaProfile {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_noise_segments_never_form_topics() {
        let segments = vec![
            segment(1, 0, &[("A", "silnice silnice")]),
            segment(2, 180, &[("B", "škola")]),
            segment(3, 360, &[("A", "silnice")]),
        ];
        let profiles: Vec<LemmaProfile> = segments.iter().map(|s| profile(&s.full_text())).collect();

        let topics = summarize_topics(
            &segments,
            &[0, -1, 0],
            &profiles,
            &HeuristicTables::default(),
            &TopicConfig::default(),
        )
        .unwrap();

        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].segment_ids, vec![1, 3]);
        assert_eq!(topics[0].speakers, vec!["A".to_string()]);
        assert!(!topics[0].top_lemmas.contains(&"škola".to_string()));
        // 0..660 seconds
        assert_eq!(topics[0].time_minutes, 11.0);
    }

    #[test]
    fn test_top_lemmas_skip_stop_lemmas_and_keep_frequency_order() {
        let mut words = Vec::new();
        for (i, lemma) in ["být", "rozpočet", "mít", "dotace", "město"].iter().enumerate() {
            for _ in 0..(10 - i) {
                words.push(*lemma);
            }
        }
        let extra: Vec<String> = (0..30).map(|i| format!("slovo{i}")).collect();
        let text = format!("{} {}", words.join(" "), extra.join(" "));
        let segments = vec![segment(1, 0, &[("A", &text)])];
        let profiles = vec![profile(&text)];
        let tables = HeuristicTables::default();

        let topics =
            summarize_topics(&segments, &[4], &profiles, &tables, &TopicConfig::default()).unwrap();
        let top = &topics[0].top_lemmas;

        assert_eq!(top.len(), 15);
        assert_eq!(&top[..3], &["rozpočet", "dotace", "město"]);
        assert!(top.iter().all(|l| !tables.is_stop_lemma(l)));
        let counts: Vec<usize> = top.iter().map(|l| profiles[0].get(l)).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        // ties resolve to first-seen
        assert_eq!(top[3], "slovo0");
        assert_eq!(topics[0].topic_id, 4);
        assert_eq!(topics[0].topic_hint, "dotace a financování");
    }

    #[test]
    fn test_topics_sorted_by_time_with_stable_ties() {
        let segments = vec![
            segment(1, 0, &[("A", "a")]),
            segment(2, 180, &[("B", "b")]),
            segment(3, 360, &[("C", "c")]),
            segment(4, 540, &[("D", "d")]),
            segment(5, 720, &[("E", "e")]),
        ];
        let profiles: Vec<LemmaProfile> = segments.iter().map(|s| profile(&s.full_text())).collect();

        // label 7 spans one segment, label 3 spans two, label 1 one
        let topics = summarize_topics(
            &segments,
            &[7, 3, 3, 1, -1],
            &profiles,
            &HeuristicTables::default(),
            &TopicConfig::default(),
        )
        .unwrap();

        let ids: Vec<u32> = topics.iter().map(|t| t.topic_id).collect();
        assert_eq!(ids, vec![3, 7, 1]);
        assert_eq!(topics[0].time_minutes, 8.0);
        assert_eq!(topics[1].time_minutes, 5.0);
    }

    #[test]
    fn test_speaker_composition_sets_topic_type() {
        let segments = vec![segment(
            1,
            0,
            &[("A", "jedna dva"), ("B", "tři čtyři"), ("C", "pět šest")],
        )];
        let profiles = vec![profile(&segments[0].full_text())];

        let topics = summarize_topics(
            &segments,
            &[0],
            &profiles,
            &HeuristicTables::default(),
            &TopicConfig::default(),
        )
        .unwrap();

        assert_eq!(topics[0].topic_type, TopicType::Discussion);
        assert_eq!(topics[0].speakers.len(), 3);
    }

    #[test]
    fn test_misaligned_inputs_rejected() {
        let segments = vec![segment(1, 0, &[("A", "a")])];
        let result = summarize_topics(
            &segments,
            &[0, 0],
            &[],
            &HeuristicTables::default(),
            &TopicConfig::default(),
        );
        assert!(result.is_err());
    }
}
