pub mod stage0_merge;
pub mod stage1_segment;
pub mod stage2_features;
pub mod stage3_topics;
pub mod stage4_payload;
pub mod stage5_article;

pub use stage0_merge::*;
pub use stage1_segment::*;
pub use stage2_features::*;
pub use stage3_topics::*;
pub use stage4_payload::*;
pub use stage5_article::*;

use tracing::info;

use crate::error::Result;
use crate::heuristics::HeuristicTables;
use crate::io::{parse_transcript, LoaderConfig};
use crate::models::{
    LemmaProfile, LlmTopicEntry, MergeConfig, PayloadConfig, Segment, SegmentConfig, Topic,
    Utterance,
};
use crate::nlp::{FeatureModel, LemmaExtractor, SegmentClusterer};

/// Configuration for a full analysis run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Lookup tables; their corrections also drive transcript loading
    pub tables: HeuristicTables,
    pub merge: MergeConfig,
    pub segment: SegmentConfig,
    pub topics: TopicConfig,
    pub payload: PayloadConfig,
}

impl PipelineConfig {
    pub fn loader(&self) -> LoaderConfig {
        LoaderConfig {
            corrections: self.tables.corrections.clone(),
        }
    }
}

/// Every intermediate artifact of an analysis run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub utterances: Vec<Utterance>,
    pub segments: Vec<Segment>,
    pub lemma_profiles: Vec<LemmaProfile>,
    pub labels: Vec<i32>,
    pub topics: Vec<Topic>,
    pub payload: Vec<LlmTopicEntry>,
}

/// Run stages 0 through 4 on raw transcript text
pub fn run_pipeline(
    transcript: &str,
    config: &PipelineConfig,
    lemmatizer: &dyn LemmaExtractor,
    features: &dyn FeatureModel,
    clusterer: &dyn SegmentClusterer,
) -> Result<PipelineOutput> {
    let lines = parse_transcript(transcript, &config.loader())?;
    info!("Loaded {} transcript lines", lines.len());

    let utterances = merge_utterances(&lines, &config.merge);
    let segments = build_segments(&utterances, &config.segment)?;
    let FeatureResult {
        lemma_profiles,
        labels,
    } = extract_features(&segments, lemmatizer, features, clusterer)?;
    let topics = summarize_topics(&segments, &labels, &lemma_profiles, &config.tables, &config.topics)?;
    let payload = build_llm_payload(&topics, &config.payload)?;

    Ok(PipelineOutput {
        utterances,
        segments,
        lemma_profiles,
        labels,
        topics,
        payload,
    })
}
