use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::languages::LanguagesConfig;
use self::storage::StorageConfig;

pub mod backend;
pub mod languages;
pub mod server;
pub mod storage;

/// Application configuration, assembled from environment variables with
/// sensible defaults. `server::ServerConfig` is read separately by the
/// capability backend binary.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub languages: LanguagesConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            backend: BackendConfig::new(),
            languages: LanguagesConfig::new(),
            storage: StorageConfig::new(),
        }
    }
}
