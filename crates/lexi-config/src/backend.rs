use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

/// Where the generation client sends its per-capability requests.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds. Unset means wait indefinitely and
    /// surface whatever the transport eventually raises.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

impl BackendConfig {
    pub fn new() -> Self {
        let base_url = env::var("LEXI_BACKEND_URL").unwrap_or_else(|_| default_base_url());

        let timeout_ms = env::var("LEXI_BACKEND_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            base_url,
            timeout_ms,
        }
    }
}
