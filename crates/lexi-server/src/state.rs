use std::sync::Arc;

use lexi_config::server::ServerConfig;

use crate::gemini::GeminiClient;

#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            gemini: Arc::new(GeminiClient::new(config)),
        }
    }
}
