use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use paperlens::analysis::{self, AnalysisEngine, AnalysisParams};
use paperlens::config::EngineConfig;
use paperlens::corpus::Paper;
use paperlens::output::terminal;

/// Paperlens: numerical analysis for research-paper corpora.
///
/// Reads a JSON array of paper records and derives content clusters,
/// latent topics, pairwise similarity, publication trends, literature
/// gaps, and a demonstrative impact ranking.
#[derive(Parser)]
#[command(name = "paperlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a corpus of papers from a JSON file
    Analyze {
        /// Path to a JSON array of paper records
        file: PathBuf,

        /// Comma-separated analysis types (clustering, topics,
        /// similarity, trends, gaps, impact) or "all"
        #[arg(long, value_delimiter = ',', default_value = "all")]
        types: Vec<String>,

        /// Requested number of clusters
        #[arg(long)]
        k: Option<usize>,

        /// Requested number of topics
        #[arg(long)]
        topics: Option<usize>,

        /// Cosine similarity threshold (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the raw result envelope as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Print an example input document for the analyze command
    Schema,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("paperlens=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            types,
            k,
            topics,
            threshold,
            json,
        } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let papers: Vec<Paper> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of papers", file.display()))?;
            info!(papers = papers.len(), "corpus loaded");

            let requested = analysis::parse_types(&types)?;
            let params = AnalysisParams {
                k,
                topic_count: topics,
                similarity_threshold: threshold,
            };

            let cfg = EngineConfig::load()?;
            let engine = AnalysisEngine::new(cfg);
            let result = engine.analyze(&papers, &requested, &params)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_result(&result, &papers);
            }
        }

        Commands::Schema => {
            println!("{}", example_corpus());
        }
    }

    Ok(())
}

fn example_corpus() -> String {
    let example = vec![Paper {
        id: Some("2301.00001".to_string()),
        title: "An Example Paper Title".to_string(),
        abstract_text: "One or two paragraphs of abstract text.".to_string(),
        authors: vec!["First Author".to_string(), "Second Author".to_string()],
        published_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 15),
        source: "arxiv".to_string(),
        metadata: [("links".to_string(), "https://github.com/example/code".to_string())]
            .into_iter()
            .collect(),
    }];
    serde_json::to_string_pretty(&example).unwrap_or_default()
}
