use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_notebook_path() -> PathBuf {
    PathBuf::from("notebook.json")
}

/// Durable state location: a single JSON file holding the notebook array.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_notebook_path")]
    pub notebook_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notebook_path: default_notebook_path(),
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        let notebook_path = env::var("LEXI_NOTEBOOK_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_notebook_path());

        Self { notebook_path }
    }
}
