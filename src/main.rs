use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use paper_intel::embedding::FastEmbedProvider;
use paper_intel::llm::GroqClient;
use paper_intel::model::Config;
use paper_intel::service::{PaperIntelService, SemanticScholarClient};

/// Analyze a research paper PDF: structured summary, citation impact
/// rating and claim support checking, with optional follow-up questions.
#[derive(Debug, Parser)]
#[command(name = "paper-intel", version, about)]
struct Cli {
    /// URL of the paper PDF
    url: Url,

    /// Claims to check against the paper instead of the summary's findings
    #[arg(long)]
    claims: Option<String>,

    /// File holding the claims to check
    #[arg(long, conflicts_with = "claims")]
    claims_file: Option<PathBuf>,

    /// Question to ask about the paper after the analysis
    #[arg(long)]
    question: Option<String>,

    /// Override the configured chunk size
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Analysis failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env();
    if let Some(chunk_size) = cli.chunk_size {
        config.analysis.chunk_size = chunk_size;
    }

    let claims = match &cli.claims_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => cli.claims.clone(),
    };

    let gateway = Arc::new(GroqClient::new(&config.llm)?);
    let embedder = Arc::new(FastEmbedProvider::new(&config.embedding)?);
    let citations = Arc::new(SemanticScholarClient::new(&config.citations));
    let service = PaperIntelService::new(gateway, embedder, citations, &config);

    let analyzed = service.analyze(&cli.url, claims.as_deref()).await?;
    print_json(&analyzed.report, cli.pretty)?;

    if let Some(question) = &cli.question {
        let answer = service.ask(question, &analyzed.chunks).await?;
        print_json(&answer, cli.pretty)?;
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), serde_json::Error> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
