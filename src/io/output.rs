use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{LlmTopicEntry, Segment, Topic};

pub const SEGMENTS_FILE: &str = "segments.json";
pub const TOPICS_FILE: &str = "topics.json";
pub const PAYLOAD_FILE: &str = "llm_input.json";
pub const PROMPT_FILE: &str = "llm_prompt.txt";
pub const DRAFT_FILE: &str = "jekyll_draft.md";

/// A topic together with the segments it was built from
#[derive(Debug, Serialize)]
pub struct TopicRecord<'a> {
    #[serde(flatten)]
    pub topic: &'a Topic,
    pub segments: Vec<&'a Segment>,
}

impl<'a> TopicRecord<'a> {
    /// Pair each topic with its member segments, looked up by segment index
    pub fn collect(topics: &'a [Topic], segments: &'a [Segment]) -> Vec<Self> {
        let by_index: HashMap<usize, &Segment> = segments.iter().map(|s| (s.index, s)).collect();

        topics
            .iter()
            .map(|topic| TopicRecord {
                topic,
                segments: topic
                    .segment_ids
                    .iter()
                    .filter_map(|id| by_index.get(id).copied())
                    .collect(),
            })
            .collect()
    }
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

/// Write a text file
pub fn write_text(text: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    write!(file, "{}", text)?;
    Ok(())
}

/// Paths of the analysis artifacts inside an output directory
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub segments: PathBuf,
    pub topics: PathBuf,
    pub payload: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            segments: dir.join(SEGMENTS_FILE),
            topics: dir.join(TOPICS_FILE),
            payload: dir.join(PAYLOAD_FILE),
        }
    }
}

/// Write segments, topics with their segments, and the generation payload
pub fn write_artifacts(
    dir: &Path,
    segments: &[Segment],
    topics: &[Topic],
    payload: &[LlmTopicEntry],
) -> Result<ArtifactPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let paths = ArtifactPaths::in_dir(dir);
    write_json(segments, &paths.segments)?;
    write_json(&TopicRecord::collect(topics, segments), &paths.topics)?;
    write_json(payload, &paths.payload)?;
    Ok(paths)
}

/// Human-readable topic listing
pub fn format_topic_listing(topics: &[Topic]) -> String {
    let mut output = String::new();
    for topic in topics {
        output.push_str(&format!(
            "Topic {} | {:.1} min | {}",
            topic.topic_id, topic.time_minutes, topic.topic_type
        ));
        if !topic.topic_hint.is_empty() {
            output.push_str(&format!(" | {}", topic.topic_hint));
        }
        output.push('\n');
        output.push_str(&topic.top_lemmas.join(", "));
        output.push_str("\n\n");
    }
    output
}
