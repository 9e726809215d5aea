use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::models::{Segment, SegmentConfig, Utterance};

/// Execute Stage 1: slide an overlapping window over the utterances
///
/// Starting at the earliest utterance, a window `[t, t + len]` collects every
/// utterance overlapping it and advances by `len - overlap` until it passes
/// the latest utterance end. Windows with no utterance emit nothing.
pub fn build_segments(utterances: &[Utterance], config: &SegmentConfig) -> Result<Vec<Segment>> {
    config.validate()?;

    let (Some(t_min), Some(t_max)) = (
        utterances.iter().map(|u| u.t_start).min(),
        utterances.iter().map(|u| u.t_end).max(),
    ) else {
        return Err(PipelineError::input("no utterances to segment"));
    };

    if t_max <= t_min {
        return Err(PipelineError::input(format!(
            "transcript spans no time (all utterances at {}s)",
            t_min
        )));
    }

    let step = config.step_secs();
    let mut segments = Vec::new();
    let mut window_start = t_min;

    while window_start < t_max {
        let window_end = window_start
            .checked_add(config.segment_len_secs)
            .ok_or_else(|| PipelineError::input(format!("window at {}s overflows time", window_start)))?;

        let chunk: Vec<&Utterance> = utterances
            .iter()
            .filter(|u| u.overlaps(window_start, window_end))
            .collect();

        if chunk.is_empty() {
            debug!("Window {}s-{}s is empty, skipping", window_start, window_end);
        } else {
            segments.push(make_segment(segments.len() + 1, window_start, window_end, &chunk));
        }

        window_start = window_start
            .checked_add(step)
            .ok_or_else(|| PipelineError::input(format!("window at {}s overflows time", window_start)))?;
    }

    info!(
        "Stage 1: {} segments over {}s-{}s ({}s windows, {}s step)",
        segments.len(),
        t_min,
        t_max,
        config.segment_len_secs,
        step
    );

    Ok(segments)
}

fn make_segment(index: usize, t_start: u64, t_end: u64, chunk: &[&Utterance]) -> Segment {
    let mut speakers = BTreeSet::new();
    let mut grouped: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for utterance in chunk {
        speakers.insert(utterance.speaker.clone());
        grouped
            .entry(utterance.speaker.clone())
            .or_default()
            .push(utterance.text.as_str());
    }

    Segment {
        t_start,
        t_end,
        index,
        speakers,
        speaker_texts: grouped
            .into_iter()
            .map(|(speaker, texts)| (speaker, texts.join(" ")))
            .collect(),
        word_count: chunk.iter().map(|u| u.word_count()).sum(),
    }
}
