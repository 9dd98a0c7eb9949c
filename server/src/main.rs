use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use folio_server::analyzer::TextAnalyzer;
use folio_server::api;
use folio_server::config::CONFIG;
use folio_server::corpus::Corpus;
use folio_server::indexer::InvertedIndex;
use folio_server::query_engine::QueryEngine;

#[derive(Debug, Parser)]
#[command(about = "Full-text search over a corpus of Shakespeare lines")]
struct Args {
    /// Corpus JSON file (overrides CORPUS_PATH)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let corpus_path = args
        .corpus
        .unwrap_or_else(|| PathBuf::from(&CONFIG.corpus_path));
    let port: u16 = match args.port {
        Some(port) => port,
        None => CONFIG.port.parse().context("PORT is not a valid port")?,
    };

    let analyzer = TextAnalyzer::line_pipeline();
    let corpus = Arc::new(Corpus::load(&corpus_path, &analyzer)?);
    let index = Arc::new(InvertedIndex::build(&corpus));
    tracing::info!(
        lines = corpus.len(),
        terms = index.num_terms(),
        "corpus indexed"
    );

    let query_engine = Arc::new(QueryEngine::new(corpus, index, analyzer));
    let router = api::create_router(query_engine, &CONFIG.static_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    tracing::info!("listening on port {port}");
    axum::serve(listener, router).await?;

    Ok(())
}
