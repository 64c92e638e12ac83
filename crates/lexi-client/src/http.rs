use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lexi_config::backend::BackendConfig;
use lexi_core::types::{Language, QuickCategory};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{DefinitionParts, GenerateError, GenerationBackend};

/// Generation client backed by the per-capability HTTP endpoints.
#[derive(Clone)]
pub struct HttpGenerationClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGenerationClient {
    pub fn new(config: &BackendConfig) -> Result<Self, GenerateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    async fn call<R>(
        &self,
        capability: &str,
        payload: &impl Serialize,
    ) -> Result<R, GenerateError>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}/api/{capability}", self.base_url);
        let response = self.http.post(url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status(status.as_u16()));
        }

        parse_payload(capability, &response.text().await?)
    }
}

fn parse_payload<R>(capability: &str, body: &str) -> Result<R, GenerateError>
where
    R: DeserializeOwned,
{
    serde_json::from_str(strip_code_fence(body))
        .map_err(|e| GenerateError::Malformed(format!("{capability}: {e}")))
}

/// The model occasionally wraps its JSON payload in a markdown code fence;
/// strip it before parsing.
fn strip_code_fence(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionRequest<'a> {
    term: &'a str,
    native_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageRequest<'a> {
    term: &'a str,
    target_lang: &'a str,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    image: Option<String>,
}

#[derive(Deserialize)]
struct SpeechResponse {
    audio: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoryRequest<'a> {
    words: &'a [String],
    native_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct StoryResponse {
    story: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickRequest<'a> {
    term: &'a str,
    category: QuickCategory,
    native_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct QuickResponse {
    answer: String,
}

#[async_trait::async_trait]
impl GenerationBackend for HttpGenerationClient {
    async fn definition(
        &self,
        term: &str,
        native: Language,
        target: Language,
    ) -> Result<DefinitionParts, GenerateError> {
        self.call(
            "definition",
            &DefinitionRequest {
                term,
                native_lang: native.display_name(),
                target_lang: target.display_name(),
            },
        )
        .await
    }

    async fn image(&self, term: &str, target: Language) -> Result<Option<String>, GenerateError> {
        let response: ImageResponse = self
            .call(
                "image",
                &ImageRequest {
                    term,
                    target_lang: target.display_name(),
                },
            )
            .await?;

        Ok(response.image)
    }

    async fn speech(&self, text: &str) -> Result<Option<Vec<u8>>, GenerateError> {
        let response: SpeechResponse = self.call("speech", &SpeechRequest { text }).await?;

        match response.audio {
            None => Ok(None),
            Some(encoded) => STANDARD
                .decode(encoded)
                .map(Some)
                .map_err(|e| GenerateError::Malformed(format!("speech: {e}"))),
        }
    }

    async fn story(
        &self,
        words: &[String],
        native: Language,
        target: Language,
    ) -> Result<String, GenerateError> {
        if words.is_empty() {
            return Err(GenerateError::EmptyWordList);
        }

        let response: StoryResponse = self
            .call(
                "story",
                &StoryRequest {
                    words,
                    native_lang: native.display_name(),
                    target_lang: target.display_name(),
                },
            )
            .await?;

        Ok(response.story)
    }

    async fn quick_answer(
        &self,
        term: &str,
        category: QuickCategory,
        native: Language,
        target: Language,
    ) -> Result<String, GenerateError> {
        let response: QuickResponse = self
            .call(
                "quick",
                &QuickRequest {
                    term,
                    category,
                    native_lang: native.display_name(),
                    target_lang: target.display_name(),
                },
            )
            .await?;

        Ok(response.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_plain_and_tagged_fences() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```json\n{\"a\":1}\n```  "), "{\"a\":1}");
    }

    #[test]
    fn fenced_definition_parses_like_bare_json() {
        let bare = r#"{"definition":"cat","examples":[{"target":"El gato duerme.","native":"The cat sleeps."}],"usageNote":"everyday word"}"#;
        let fenced = format!("```json\n{bare}\n```");

        let a: DefinitionParts = parse_payload("definition", bare).unwrap();
        let b: DefinitionParts = parse_payload("definition", &fenced).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.usage_note, "everyday word");
        assert_eq!(a.examples.len(), 1);
    }

    #[test]
    fn garbage_payload_is_malformed_not_default() {
        let err = parse_payload::<DefinitionParts>("definition", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, GenerateError::Malformed(_)));
    }

    #[tokio::test]
    async fn empty_story_word_list_fails_before_any_request() {
        // Unroutable base URL: reaching the network would fail with a
        // different error variant than the one asserted here.
        let client = HttpGenerationClient::new(&BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: Some(50),
        })
        .unwrap();

        let err = client
            .story(&[], Language::English, Language::Spanish)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyWordList));
    }
}
