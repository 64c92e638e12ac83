use std::sync::Arc;

use kanal::AsyncSender;
use lexi_client::GenerationBackend;
use lexi_core::types::{AppEvent, QuickCategory};

use crate::state::AppState;

// TODO: consider caching answers per (term, category) the way speech
// clips are cached per text.
pub async fn handle_quick(
    state: &Arc<AppState>,
    backend: &dyn GenerationBackend,
    term: &str,
    category: QuickCategory,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (native, target) = {
        let config = state.config.read().await;
        (config.languages.native, config.languages.target)
    };

    match backend.quick_answer(term, category, native, target).await {
        Ok(answer) => {
            app_to_ui_tx
                .send(AppEvent::QuickReady { category, answer })
                .await?;
        }
        Err(e) => {
            tracing::warn!("quick answer ({category}) for '{term}' failed: {e}");
            app_to_ui_tx
                .send(AppEvent::QuickFailed(
                    "Oops! My brain froze. Try again?".to_string(),
                ))
                .await?;
        }
    }

    Ok(())
}
