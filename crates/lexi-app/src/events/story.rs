use std::sync::Arc;

use kanal::AsyncSender;
use lexi_client::GenerationBackend;
use lexi_core::types::AppEvent;
use lexi_notebook::Notebook;

use crate::state::AppState;

pub async fn handle_story(
    state: &Arc<AppState>,
    notebook: &Notebook,
    backend: &dyn GenerationBackend,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    // An empty notebook never reaches the backend; the client would
    // reject the empty word list anyway.
    if notebook.is_empty() {
        app_to_ui_tx
            .send(AppEvent::StoryFailed(
                "Save some words to your notebook first!".to_string(),
            ))
            .await?;
        return Ok(());
    }

    let words = notebook.terms();
    let (native, target) = {
        let config = state.config.read().await;
        (config.languages.native, config.languages.target)
    };

    match backend.story(&words, native, target).await {
        Ok(story) => app_to_ui_tx.send(AppEvent::StoryReady(story)).await?,
        Err(e) => {
            tracing::warn!("story generation failed: {e}");
            app_to_ui_tx
                .send(AppEvent::StoryFailed(
                    "Oops! Something went wrong. Please try again.".to_string(),
                ))
                .await?;
        }
    }

    Ok(())
}
