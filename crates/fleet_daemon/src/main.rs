mod error;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use fleet_world::{load_content_or_standard, GameRepository, InMemoryRepository, JsonDirRepository};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "fleet_daemon", about = "HTTP service for satellite fleet games")]
struct Args {
    #[arg(long, default_value_t = 3001)]
    port: u16,
    /// Keep games as JSON files here. Games live in memory when omitted.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = "./content")]
    content_dir: PathBuf,
    /// Seed for game creation and turn dice. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let content = load_content_or_standard(&args.content_dir)?;
    let repo: Arc<dyn GameRepository> = match &args.data_dir {
        Some(dir) => Arc::new(JsonDirRepository::new(dir)?),
        None => Arc::new(InMemoryRepository::new()),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let cors_origin: HeaderValue = args
        .cors_origin
        .parse()
        .with_context(|| format!("invalid --cors-origin: {}", args.cors_origin))?;

    tracing::info!(
        content_version = %content.content_version,
        seed,
        data_dir = ?args.data_dir,
        "starting fleet daemon"
    );
    let app = routes::make_router(AppState::new(repo, content, seed), cors_origin);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
