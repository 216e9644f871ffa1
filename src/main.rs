use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use tracing::info;

use tweetrag_openai::{OpenAiConfig, OpenAiEmbedder, OpenAiGenerator};
use tweetrag_rag::{EmbeddingProvider, GenerationProvider, RagPipeline, SimilarityMetric};

mod ingest;
mod logging;
mod settings;
mod ui;

use settings::Settings;

#[derive(Parser)]
#[command(name = "tweetrag")]
#[command(about = "Ask questions about a collection of tweets", long_about = None)]
struct Cli {
    /// JSON file of tweets to copy into the upload directory before indexing
    #[arg(short, long)]
    records: Option<PathBuf>,

    /// Directory holding the tweet files to index
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Ask a single question and exit
    #[arg(short, long)]
    question: Option<String>,

    /// Ground answers on at most this many tweets instead of all of them
    #[arg(long)]
    top_k: Option<usize>,

    /// Similarity used to rank tweets: cosine or dot_product
    #[arg(long)]
    metric: Option<SimilarityMetric>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(cli.upload_dir, cli.top_k, cli.metric);
    let openai = OpenAiConfig::from_env()?;
    let pipeline = RagPipeline::new(OpenAiEmbedder::new(&openai)?, OpenAiGenerator::new(&openai)?)
        .with_breadth(settings.breadth())
        .with_metric(settings.metric);
    info!("Using upload directory {}", settings.upload_dir.display());

    if let Some(path) = cli.records {
        ingest::save_upload(&settings.upload_dir, &path)?;
    }

    reindex(&pipeline, &settings.upload_dir).await?;

    if let Some(question) = cli.question {
        let answer = pipeline.answer(&question).await?;
        println!("{}", answer);
        return Ok(());
    }

    ui::display_banner(&settings.project_name, pipeline.count());

    let mut history = Vec::new();
    loop {
        let input = ui::read_input(&mut history)?;
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            "help" => ui::print_help(),
            "count" => println!("{} tweets indexed", pipeline.count()),
            "reindex" => {
                if let Err(e) = reindex(&pipeline, &settings.upload_dir).await {
                    ui::print_error("Re-index failed", &e);
                }
            }
            _ => {
                println!("{} Thinking...", "🤖".blue());
                match pipeline.answer(&input).await {
                    Ok(answer) => ui::print_answer(&answer),
                    Err(e) => ui::print_error("Question failed", &anyhow::Error::from(e)),
                }
            }
        }
    }

    Ok(())
}

async fn reindex<E, G>(pipeline: &RagPipeline<E, G>, upload_dir: &Path) -> Result<()>
where
    E: EmbeddingProvider,
    G: GenerationProvider,
{
    let records = ingest::load_upload_dir(upload_dir)?;
    let report = pipeline.index(records).await?;
    ui::print_report(&report);
    Ok(())
}
