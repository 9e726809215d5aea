use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use agenda::io::{
    format_topic_listing, load_lexicon, load_payload, load_tables, write_json, write_text,
    DRAFT_FILE, PROMPT_FILE, SEGMENTS_FILE,
};
use agenda::llm::{build_article_prompt, split_article};
use agenda::{
    build_draft_page, build_meeting_metadata, build_segments, merge_utterances,
    parse_transcript_file, run_pipeline, write_artifacts, AnthropicClient, AnthropicConfig,
    ArticleConfig, ClusterConfig, HeuristicTables, LexiconLemmatizer, LoaderConfig, MergeConfig, PayloadConfig,
    PipelineConfig, SegmentConfig, SimilarityClusterer, TfIdfModel, TopicConfig,
};

#[derive(Parser)]
#[command(name = "agenda")]
#[command(author, version, about = "Topic extraction from council meeting transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract ranked topics with evidence from a transcript
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Tab-separated lemma lexicon (form, lemma, tag)
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Minimum cosine similarity linking two segments
        #[arg(long, default_value = "0.2")]
        min_similarity: f64,

        /// Smallest number of segments forming a topic
        #[arg(long, default_value = "2")]
        min_cluster_size: usize,

        /// Topics shorter than this many minutes are left out of the payload
        #[arg(long, default_value = "3.0")]
        min_minutes: f64,

        /// Maximum number of topics in the payload
        #[arg(long, default_value = "10")]
        max_topics: usize,

        /// Maximum evidence sentences per topic in the payload
        #[arg(long, default_value = "3")]
        max_evidence: usize,
    },

    /// Only merge and segment a transcript, writing segments.json
    Segments {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Prepare the article prompt and Jekyll draft from a topic payload
    Article {
        /// Payload written by `analyze` (llm_input.json)
        #[arg(short, long)]
        topics: PathBuf,

        /// Meeting date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Meeting sequence number
        #[arg(long)]
        number: u32,

        /// Output directory
        #[arg(short, long, default_value = "out")]
        output: PathBuf,

        /// Jekyll layout name
        #[arg(long, default_value = "meeting")]
        layout: String,

        /// Send the prompt to the Anthropic API and fill the draft
        #[arg(long)]
        send: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the built-in heuristic tables as JSON
    Tables,
}

#[derive(Args)]
struct InputArgs {
    /// Input transcript file
    #[arg(short, long)]
    file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Heuristic tables (JSON); missing fields use the built-in tables
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Segment window length in seconds
    #[arg(long, default_value = "300")]
    segment_len: u64,

    /// Overlap between consecutive windows in seconds
    #[arg(long, default_value = "120")]
    segment_overlap: u64,

    /// Maximum gap in seconds between merged lines of one speaker
    #[arg(long, default_value = "5")]
    merge_gap: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl InputArgs {
    fn tables(&self) -> Result<HeuristicTables> {
        match &self.tables {
            Some(path) => load_tables(path),
            None => Ok(HeuristicTables::default()),
        }
    }

    fn merge(&self) -> MergeConfig {
        MergeConfig {
            merge_gap_secs: self.merge_gap,
        }
    }

    fn segment(&self) -> SegmentConfig {
        SegmentConfig {
            segment_len_secs: self.segment_len,
            segment_overlap_secs: self.segment_overlap,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            lexicon,
            min_similarity,
            min_cluster_size,
            min_minutes,
            max_topics,
            max_evidence,
        } => {
            setup_logging(input.verbose);
            let payload = PayloadConfig {
                min_minutes,
                max_topics,
                max_evidence_per_topic: max_evidence,
            };
            let cluster = ClusterConfig {
                min_cluster_size,
                min_similarity,
            };
            analyze_transcript(&input, lexicon.as_deref(), cluster, payload)
        }
        Commands::Segments { input } => {
            setup_logging(input.verbose);
            segment_transcript(&input)
        }
        Commands::Article {
            topics,
            date,
            number,
            output,
            layout,
            send,
            verbose,
        } => {
            setup_logging(verbose);
            let config = ArticleConfig {
                meeting_date: date,
                meeting_number: number,
                layout,
            };
            prepare_article(&topics, &output, &config, send).await
        }
        Commands::Tables => {
            let json = serde_json::to_string_pretty(&HeuristicTables::default())?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn analyze_transcript(
    input: &InputArgs,
    lexicon: Option<&Path>,
    cluster: ClusterConfig,
    payload: PayloadConfig,
) -> Result<()> {
    info!("Loading transcript from {:?}", input.file);
    let transcript = std::fs::read_to_string(&input.file)
        .with_context(|| format!("Failed to read transcript: {:?}", input.file))?;

    let lemmatizer = match lexicon {
        Some(path) => load_lexicon(path).context("Failed to load lexicon")?,
        None => {
            info!("No lexicon given, lemmatizing without one");
            LexiconLemmatizer::lexicon_free()
        }
    };

    let config = PipelineConfig {
        tables: input.tables()?,
        merge: input.merge(),
        segment: input.segment(),
        topics: TopicConfig::default(),
        payload,
    };

    let output = run_pipeline(
        &transcript,
        &config,
        &lemmatizer,
        &TfIdfModel::default(),
        &SimilarityClusterer::new(cluster),
    )
    .context("Topic analysis failed")?;

    let paths = write_artifacts(&input.output, &output.segments, &output.topics, &output.payload)?;
    info!("Segments written to {:?}", paths.segments);
    info!("Topics written to {:?}", paths.topics);
    info!("Payload written to {:?}", paths.payload);

    print!("{}", format_topic_listing(&output.topics));

    info!(
        "Complete: {} utterances, {} segments, {} topics, {} in payload",
        output.utterances.len(),
        output.segments.len(),
        output.topics.len(),
        output.payload.len()
    );

    Ok(())
}

fn segment_transcript(input: &InputArgs) -> Result<()> {
    info!("Loading transcript from {:?}", input.file);
    let tables = input.tables()?;
    let loader = LoaderConfig {
        corrections: tables.corrections,
    };
    let lines = parse_transcript_file(&input.file, &loader)?;

    let utterances = merge_utterances(&lines, &input.merge());
    let segments = build_segments(&utterances, &input.segment())?;

    std::fs::create_dir_all(&input.output)
        .with_context(|| format!("Failed to create output directory: {:?}", input.output))?;
    let path = input.output.join(SEGMENTS_FILE);
    write_json(&segments, &path)?;

    info!("{} segments written to {:?}", segments.len(), path);
    Ok(())
}

async fn prepare_article(
    topics: &Path,
    output: &Path,
    config: &ArticleConfig,
    send: bool,
) -> Result<()> {
    let entries = load_payload(topics)?;
    info!("Loaded {} topics from {:?}", entries.len(), topics);

    let metadata = build_meeting_metadata(&entries, config)?;
    let prompt = build_article_prompt(&entries).context("Failed to serialize topics for prompt")?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {:?}", output))?;
    let prompt_path = output.join(PROMPT_FILE);
    write_text(&prompt, &prompt_path)?;
    info!("Prompt written to {:?}", prompt_path);

    let article = if send {
        info!("Requesting article text");
        let client = AnthropicClient::new(AnthropicConfig::from_env()?);
        let text = client.send_message(None, &prompt).await?;
        Some(split_article(&text))
    } else {
        None
    };

    let page = match &article {
        Some((summary, body)) => build_draft_page(&metadata, Some(summary.as_str()), Some(body.as_str())),
        None => build_draft_page(&metadata, None, None),
    };
    let draft_path = output.join(DRAFT_FILE);
    write_text(&page, &draft_path)?;
    info!("Draft written to {:?}", draft_path);

    Ok(())
}
