use std::env;

use lexi_core::types::Language;
use serde::{Deserialize, Serialize};

fn default_native() -> Language {
    Language::English
}

fn default_target() -> Language {
    Language::Spanish
}

/// The language pairing for the session: definitions are written for a
/// `native` speaker learning `target`.
#[derive(Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct LanguagesConfig {
    #[serde(default = "default_native")]
    pub native: Language,
    #[serde(default = "default_target")]
    pub target: Language,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            native: default_native(),
            target: default_target(),
        }
    }
}

impl LanguagesConfig {
    pub fn new() -> Self {
        let native = env::var("LEXI_NATIVE_LANG")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_native);

        let target = env::var("LEXI_TARGET_LANG")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_target);

        Self { native, target }
    }
}
