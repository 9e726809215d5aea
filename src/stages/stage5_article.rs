use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::LlmTopicEntry;

const SUMMARY_PLACEHOLDER: &str = "<<< VLOŽ SHRNUTÍ (3–4 VĚTY) >>>";
const BODY_PLACEHOLDER: &str = "<<< VLOŽ TEXT ČLÁNKU ZDE >>>";

/// Configuration for Stage 5 article handoff
#[derive(Debug, Clone)]
pub struct ArticleConfig {
    /// Meeting date as YYYY-MM-DD
    pub meeting_date: String,
    /// Sequence number of the meeting
    pub meeting_number: u32,
    /// Jekyll layout name
    pub layout: String,
}

/// Page metadata; always computed, never generated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingMetadata {
    pub layout: String,
    pub title: String,
    pub meeting_date: String,
    pub meeting_number: u32,
    pub meeting_duration: String,
    pub meeting_duration_minutes: u64,
}

/// Execute Stage 5: compute page metadata from the ranked topics
pub fn build_meeting_metadata(
    entries: &[LlmTopicEntry],
    config: &ArticleConfig,
) -> Result<MeetingMetadata> {
    NaiveDate::parse_from_str(&config.meeting_date, "%Y-%m-%d").map_err(|_| {
        PipelineError::config(format!(
            "invalid meeting date '{}', expected YYYY-MM-DD",
            config.meeting_date
        ))
    })?;
    if config.meeting_number < 1 {
        return Err(PipelineError::config("meeting number must be positive"));
    }

    let total_minutes = entries.iter().map(|e| e.time_minutes).sum::<f64>().max(0.0).floor() as u64;

    let metadata = MeetingMetadata {
        layout: config.layout.clone(),
        title: format!("Jednání zastupitelstva – {}", config.meeting_date),
        meeting_date: config.meeting_date.clone(),
        meeting_number: config.meeting_number,
        meeting_duration: format!("{} h {} min", total_minutes / 60, total_minutes % 60),
        meeting_duration_minutes: total_minutes,
    };

    info!(
        "Stage 5: meeting #{} on {}, {} of ranked topics",
        metadata.meeting_number, metadata.meeting_date, metadata.meeting_duration
    );

    Ok(metadata)
}

/// Jekyll page: YAML front matter followed by the article body
///
/// Missing summary or body are replaced by placeholders for manual editing.
pub fn build_draft_page(metadata: &MeetingMetadata, summary: Option<&str>, body: Option<&str>) -> String {
    let summary = summary.filter(|s| !s.trim().is_empty()).unwrap_or(SUMMARY_PLACEHOLDER);
    let body = body.filter(|b| !b.trim().is_empty()).unwrap_or(BODY_PLACEHOLDER);

    let mut lines = vec![
        "---".to_string(),
        format!("layout: {}", metadata.layout),
        format!("title: {}", quote(&metadata.title)),
        format!("meeting_date: {}", metadata.meeting_date),
        format!("meeting_number: {}", metadata.meeting_number),
        format!("meeting_duration: {}", quote(&metadata.meeting_duration)),
        format!("meeting_duration_minutes: {}", metadata.meeting_duration_minutes),
        "summary: >".to_string(),
    ];
    lines.extend(summary.trim().lines().map(|line| format!("  {}", line)));
    lines.push("---".to_string());

    format!("{}\n\n{}\n", lines.join("\n"), body.trim())
}

/// Double-quoted YAML scalar; JSON string escaping is valid YAML
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}
