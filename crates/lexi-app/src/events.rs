use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_client::GenerationBackend;
use lexi_core::search::SearchTracker;
use lexi_core::types::AppEvent;
use lexi_notebook::Notebook;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod notebook;
pub mod quick;
pub mod search;
pub mod speech;
pub mod story;

use notebook::{handle_remove, handle_toggle_save};
use quick::handle_quick;
use search::{handle_search, handle_search_finished};
use speech::{SpeechCache, handle_speech};
use story::handle_story;

/// App's main loop. The notebook is restored before the first event is
/// consumed, so no save can race a pending load.
pub async fn event_loop(
    state: Arc<AppState>,
    backend: Arc<dyn GenerationBackend>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    internal_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let notebook_path = {
        let config = state.config.read().await;
        config.storage.notebook_path.clone()
    };

    let mut notebook = Notebook::from_entries(lexi_notebook::load(&notebook_path));
    tracing::info!(entries = notebook.len(), "notebook restored");
    app_to_ui_tx
        .send(AppEvent::NotebookChanged(notebook.entries().to_vec()))
        .await?;

    let mut tracker = SearchTracker::new();
    let mut speech_cache = SpeechCache::new();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        match event {
            AppEvent::Search(term) => {
                handle_search(
                    &state,
                    &mut tracker,
                    &backend,
                    &app_to_ui_tx,
                    &internal_tx,
                    term,
                )
                .await?;
            }
            AppEvent::SearchFinished { ticket, outcome } => {
                handle_search_finished(&mut tracker, ticket, outcome, &app_to_ui_tx).await?;
            }
            AppEvent::ToggleSave(entry) => {
                handle_toggle_save(&mut notebook, *entry, &notebook_path, &app_to_ui_tx).await?;
            }
            AppEvent::RemoveEntry(id) => {
                handle_remove(&mut notebook, id, &notebook_path, &app_to_ui_tx).await?;
            }
            AppEvent::MakeStory => {
                handle_story(&state, &notebook, backend.as_ref(), &app_to_ui_tx).await?;
            }
            AppEvent::QuickAnswer { term, category } => {
                handle_quick(&state, backend.as_ref(), &term, category, &app_to_ui_tx).await?;
            }
            AppEvent::PlaySpeech(text) => {
                handle_speech(&mut speech_cache, backend.as_ref(), text, &app_to_ui_tx).await?;
            }
            AppEvent::Shutdown => break,
            other => {
                // UI-bound events never arrive on this channel.
                tracing::debug!("ignoring event: {:?}", std::mem::discriminant(&other));
            }
        }
    }

    Ok(())
}
