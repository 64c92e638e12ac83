use std::env;

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_tts_voice() -> String {
    "Kore".to_string()
}

/// Capability backend settings. Model names and the voice are plain
/// configuration so a provider swap never touches handler code.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Provider API key; requests fail with a server error when empty.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            api_key: String::new(),
            api_base: default_api_base(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        let bind = env::var("LEXI_BIND").unwrap_or_else(|_| default_bind());
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let api_base = env::var("GEMINI_API_BASE").unwrap_or_else(|_| default_api_base());
        let text_model = env::var("LEXI_TEXT_MODEL").unwrap_or_else(|_| default_text_model());
        let image_model = env::var("LEXI_IMAGE_MODEL").unwrap_or_else(|_| default_image_model());
        let tts_model = env::var("LEXI_TTS_MODEL").unwrap_or_else(|_| default_tts_model());
        let tts_voice = env::var("LEXI_TTS_VOICE").unwrap_or_else(|_| default_tts_voice());

        Self {
            bind,
            api_key,
            api_base,
            text_model,
            image_model,
            tts_model,
            tts_voice,
        }
    }
}
