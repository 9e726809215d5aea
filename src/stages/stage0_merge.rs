use tracing::info;

use crate::models::{MergeConfig, RawLine, Utterance};

/// Execute Stage 0: merge consecutive lines into utterances
///
/// A line joins the current utterance when it has the same speaker and starts
/// no more than `merge_gap_secs` after the utterance's last line.
pub fn merge_utterances(lines: &[RawLine], config: &MergeConfig) -> Vec<Utterance> {
    let mut merged: Vec<Utterance> = Vec::new();
    let mut current: Option<Utterance> = None;

    for line in lines {
        let continues = current.as_mut().filter(|u| {
            u.speaker == line.speaker && line.t.saturating_sub(u.t_end) <= config.merge_gap_secs
        });

        if let Some(utterance) = continues {
            utterance.text.push(' ');
            utterance.text.push_str(&line.text);
            utterance.t_end = utterance.t_end.max(line.t);
            continue;
        }

        if let Some(done) = current.take() {
            merged.push(done);
        }
        current = Some(Utterance::new(&line.speaker, line.t, line.t, &line.text));
    }

    if let Some(done) = current {
        merged.push(done);
    }

    info!("Stage 0: {} lines merged into {} utterances", lines.len(), merged.len());

    merged
}
