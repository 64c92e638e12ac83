use std::collections::HashMap;

use kanal::AsyncSender;
use lexi_client::GenerationBackend;
use lexi_core::types::AppEvent;

/// Session-lifetime cache of pronunciation clips keyed on the exact text.
/// No eviction; repeated playback of the same sentence costs one fetch.
#[derive(Default)]
pub struct SpeechCache {
    clips: HashMap<String, Vec<u8>>,
}

impl SpeechCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str) -> Option<&Vec<u8>> {
        self.clips.get(text)
    }

    pub fn insert(&mut self, text: String, clip: Vec<u8>) {
        self.clips.insert(text, clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

pub async fn handle_speech(
    cache: &mut SpeechCache,
    backend: &dyn GenerationBackend,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Some(clip) = cache.get(&text) {
        let audio = Some(clip.clone());
        app_to_ui_tx
            .send(AppEvent::SpeechReady { text, audio })
            .await?;
        return Ok(());
    }

    match backend.speech(&text).await {
        Ok(Some(clip)) => {
            cache.insert(text.clone(), clip.clone());
            app_to_ui_tx
                .send(AppEvent::SpeechReady {
                    text,
                    audio: Some(clip),
                })
                .await?;
        }
        // No clip generated: a valid outcome, not an error.
        Ok(None) => {
            app_to_ui_tx
                .send(AppEvent::SpeechReady { text, audio: None })
                .await?;
        }
        Err(e) => {
            tracing::warn!("speech generation failed: {e}");
            app_to_ui_tx
                .send(AppEvent::SpeechFailed(
                    "Could not fetch pronunciation. Try again.".to_string(),
                ))
                .await?;
        }
    }

    Ok(())
}
