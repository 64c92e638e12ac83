mod http;

pub use http::HttpGenerationClient;

use lexi_core::types::{ExampleSentence, Language, QuickCategory};
use serde::Deserialize;

/// Normalized payload of the definition capability.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionParts {
    pub definition: String,
    pub examples: Vec<ExampleSentence>,
    pub usage_note: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Story generation needs at least one word; rejected before any
    /// network call.
    #[error("word list is empty")]
    EmptyWordList,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// One operation per AI capability. Every call is an independent round
/// trip with no shared mutable state; absence of an image or audio clip is
/// a valid outcome, not an error.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn definition(
        &self,
        term: &str,
        native: Language,
        target: Language,
    ) -> Result<DefinitionParts, GenerateError>;

    /// Returns a self-contained data URI, or `None` when the provider
    /// produced no image.
    async fn image(&self, term: &str, target: Language) -> Result<Option<String>, GenerateError>;

    /// Decoded audio bytes for the given text, or `None` when the provider
    /// produced no clip.
    async fn speech(&self, text: &str) -> Result<Option<Vec<u8>>, GenerateError>;

    async fn story(
        &self,
        words: &[String],
        native: Language,
        target: Language,
    ) -> Result<String, GenerateError>;

    async fn quick_answer(
        &self,
        term: &str,
        category: QuickCategory,
        native: Language,
        target: Language,
    ) -> Result<String, GenerateError>;
}
