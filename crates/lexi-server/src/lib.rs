pub mod gemini;
pub mod prompts;
pub mod routes;
pub mod state;

use clap::Parser;
use lexi_config::server::ServerConfig;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "lexi-server", about = "Capability backend for the lexi vocabulary app")]
pub struct Args {
    /// Bind address override (defaults to LEXI_BIND or 127.0.0.1:8787)
    #[arg(long)]
    pub bind: Option<String>,
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = ServerConfig::new();
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if config.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    let bind = config.bind.clone();
    let app = routes::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("lexi-server listening on {bind}");
    axum::serve(listener, app).await?;

    Ok(())
}
