use lexi_config::server::ServerConfig;
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider API key is not configured")]
    MissingApiKey,

    #[error("provider network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider response is missing content")]
    MissingContent,
}

/// Thin client for a `generateContent`-style provider API. Model names,
/// base URL, and the TTS voice all come from configuration.
pub struct GeminiClient {
    http: reqwest::Client,
    config: ServerConfig,
}

impl GeminiClient {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn generate(&self, model: &str, body: Value) -> Result<Value, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let url = format!("{}/v1beta/models/{model}:generateContent", self.config.api_base);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Ask the text model for a JSON document matching `schema`; returns
    /// the raw JSON text so the capability handler can pass it through.
    pub async fn generate_json(&self, prompt: &str, schema: Value) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });

        let response = self.generate(&self.config.text_model, body).await?;
        first_text_part(&response)
            .map(str::to_owned)
            .ok_or(ProviderError::MissingContent)
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let response = self.generate(&self.config.text_model, body).await?;
        first_text_part(&response)
            .map(|text| text.trim().to_string())
            .ok_or(ProviderError::MissingContent)
    }

    /// `None` means the model produced no image part, which is a valid
    /// outcome rather than an error.
    pub async fn generate_image(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        });

        let response = self.generate(&self.config.image_model, body).await?;
        Ok(first_inline_data(&response))
    }

    pub async fn generate_speech(&self, text: &str) -> Result<Option<String>, ProviderError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.config.tts_voice }
                    }
                },
            },
        });

        let response = self.generate(&self.config.tts_model, body).await?;
        Ok(first_inline_data(&response))
    }
}

fn candidate_parts(response: &Value) -> Option<&Vec<Value>> {
    response
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
}

fn first_text_part(response: &Value) -> Option<&str> {
    candidate_parts(response)?
        .iter()
        .find_map(|part| part.get("text").and_then(Value::as_str))
}

fn first_inline_data(response: &Value) -> Option<String> {
    candidate_parts(response)?
        .iter()
        .find_map(|part| {
            part.get("inlineData")
                .and_then(|data| data.get("data"))
                .and_then(Value::as_str)
        })
        .map(str::to_owned)
}
