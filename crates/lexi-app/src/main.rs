use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lexi_client::{GenerationBackend, HttpGenerationClient};
use lexi_config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use crate::controller::AppController;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "lexi", about = "AI vocabulary notebook in your terminal")]
struct Args {
    /// Backend base URL override (defaults to LEXI_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Notebook file override (defaults to LEXI_NOTEBOOK_PATH)
    #[arg(long)]
    notebook: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Log to stderr so lines stay off the interactive prompt.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(url) = args.backend_url {
        config.backend.base_url = url;
    }
    if let Some(path) = args.notebook {
        config.storage.notebook_path = path;
    }

    let backend: Arc<dyn GenerationBackend> = Arc::new(HttpGenerationClient::new(&config.backend)?);
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(Arc::clone(&state));
    let mut tasks = controller.spawn_tasks(backend);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}
