use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::error::PipelineError;
use crate::heuristics::{CorrectionTable, HeuristicTables};
use crate::models::{LlmTopicEntry, RawLine};
use crate::nlp::LexiconLemmatizer;

static HEADER_RE: OnceLock<Regex> = OnceLock::new();

/// Largest hour a header may carry; stamps are `HH:MM:SS` recording offsets
const MAX_HOURS: u64 = 99;

/// Configuration for transcript loading
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Substitutions applied to every line before parsing
    pub corrections: CorrectionTable,
}

/// Read and parse a transcript file
pub fn parse_transcript_file(path: &Path, config: &LoaderConfig) -> Result<Vec<RawLine>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {:?}", path))?;
    Ok(parse_transcript(&content, config)?)
}

/// Parse transcript text into timestamped lines
///
/// Format:
/// ```text
/// [HH:MM:SS] SPEAKER:
/// Text spoken by the speaker...
/// ```
/// Each non-empty line after a header becomes one `RawLine` carrying the
/// header's time and speaker. Lines before the first header are skipped.
pub fn parse_transcript(content: &str, config: &LoaderConfig) -> crate::Result<Vec<RawLine>> {
    let header_re =
        HEADER_RE.get_or_init(|| Regex::new(r"^\[(\d+):(\d+):(\d+)\]\s+(\w+):").unwrap());

    let mut lines = Vec::new();
    let mut current: Option<(u64, String)> = None;
    let mut skipped = 0usize;

    for line in content.lines() {
        let line = config.corrections.apply(line.trim());

        if let Some(caps) = header_re.captures(&line) {
            match parse_time(&caps[1], &caps[2], &caps[3]) {
                Some(t) => current = Some((t, caps[4].to_string())),
                None => {
                    debug!("Skipping header with unreadable time: {}", line);
                    current = None;
                    skipped += 1;
                }
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match &current {
            Some((t, speaker)) => lines.push(RawLine {
                t: *t,
                speaker: speaker.clone(),
                text: line,
            }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} lines without a valid speaker header", skipped);
    }

    if lines.is_empty() {
        return Err(PipelineError::input("no utterances found in transcript"));
    }

    Ok(lines)
}

fn parse_time(h: &str, m: &str, s: &str) -> Option<u64> {
    let h: u64 = h.parse().ok().filter(|&h| h <= MAX_HOURS)?;
    let m: u64 = m.parse().ok()?;
    let s: u64 = s.parse().ok()?;
    h.checked_mul(3600)?.checked_add(m.checked_mul(60)?)?.checked_add(s)
}

/// Load heuristic tables from JSON; missing fields keep their defaults
pub fn load_tables(path: &Path) -> Result<HeuristicTables> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tables: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse tables: {:?}", path))
}

/// Load a tab-separated lemma lexicon
pub fn load_lexicon(path: &Path) -> crate::Result<LexiconLemmatizer> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::ModelLoad {
        capability: "lexicon",
        message: format!("{}: {}", path.display(), e),
    })?;
    LexiconLemmatizer::from_lexicon(&content)
}

/// Load a generation payload written by `analyze`
pub fn load_payload(path: &Path) -> Result<Vec<LlmTopicEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read topics: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse topics: {:?}", path))
}
