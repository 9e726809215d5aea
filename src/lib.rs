pub mod error;
pub mod evidence;
pub mod heuristics;
pub mod io;
pub mod llm;
pub mod models;
pub mod nlp;
pub mod stages;

pub use error::{PipelineError, Result};
pub use heuristics::{CorrectionTable, HeuristicTables};
pub use io::{parse_transcript, parse_transcript_file, write_artifacts, LoaderConfig};
pub use llm::{AnthropicClient, AnthropicConfig};
pub use models::{
    LlmTopicEntry, MergeConfig, PayloadConfig, Segment, SegmentConfig, Topic, TopicType, Utterance,
};
pub use nlp::{
    ClusterConfig, FeatureModel, LemmaExtractor, LexiconLemmatizer, SegmentClusterer,
    SimilarityClusterer, TfIdfConfig, TfIdfModel,
};
pub use stages::{
    build_draft_page, build_llm_payload, build_meeting_metadata, build_segments,
    extract_features, merge_utterances, run_pipeline, summarize_topics, ArticleConfig,
    PipelineConfig, PipelineOutput, TopicConfig,
};
