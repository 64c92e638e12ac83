use std::sync::Arc;

use kanal::AsyncSender;
use lexi_client::{GenerateError, GenerationBackend};
use lexi_core::search::{SearchPhase, SearchTracker};
use lexi_core::types::{AppEvent, DictionaryEntry, Language};

use crate::state::AppState;

/// What the user sees when a search fails, whatever the cause.
pub const GENERIC_SEARCH_ERROR: &str = "Oops! Something went wrong. Please try again.";

/// Kick off a search: validate, mark the tracker loading, and spawn the
/// concurrent definition+image fetch. The spawned task reports back
/// through the event channel with its ticket; a newer search makes that
/// ticket stale without cancelling the network calls.
pub async fn handle_search(
    state: &Arc<AppState>,
    tracker: &mut SearchTracker,
    backend: &Arc<dyn GenerationBackend>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    internal_tx: &AsyncSender<AppEvent>,
    term: String,
) -> anyhow::Result<()> {
    let term = term.trim().to_string();
    if term.is_empty() {
        // Whitespace-only input is a complete no-op: no transition, no
        // network call.
        return Ok(());
    }

    let ticket = tracker.begin();
    app_to_ui_tx.send(AppEvent::SearchLoading).await?;

    let (native, target) = {
        let config = state.config.read().await;
        (config.languages.native, config.languages.target)
    };

    let backend = Arc::clone(backend);
    let tx = internal_tx.clone();
    tokio::spawn(async move {
        let outcome = match fetch_entry(backend.as_ref(), &term, native, target).await {
            Ok(entry) => Ok(Box::new(entry)),
            Err(e) => {
                tracing::warn!("search for '{term}' failed: {e}");
                Err(GENERIC_SEARCH_ERROR.to_string())
            }
        };

        // The loop may already be gone during shutdown.
        let _ = tx.send(AppEvent::SearchFinished { ticket, outcome }).await;
    });

    Ok(())
}

/// Fan out to definition and image together and wait for both. Either
/// failure fails the whole search; no partial entry is ever exposed.
async fn fetch_entry(
    backend: &dyn GenerationBackend,
    term: &str,
    native: Language,
    target: Language,
) -> Result<DictionaryEntry, GenerateError> {
    let (definition, image) = tokio::join!(
        backend.definition(term, native, target),
        backend.image(term, target),
    );

    let parts = definition?;
    let image_url = image?;

    Ok(DictionaryEntry::new(
        term.to_string(),
        parts.definition,
        parts.examples,
        parts.usage_note,
        image_url,
    ))
}

/// Resolve a completed fetch against the tracker. Stale tickets are
/// dropped without touching the displayed state.
pub async fn handle_search_finished(
    tracker: &mut SearchTracker,
    ticket: u64,
    outcome: Result<Box<DictionaryEntry>, String>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !tracker.finish(ticket, outcome) {
        tracing::debug!("dropping completion of abandoned search (ticket {ticket})");
        return Ok(());
    }

    match tracker.phase() {
        SearchPhase::Result(entry) => {
            app_to_ui_tx
                .send(AppEvent::SearchResult(entry.clone()))
                .await?;
        }
        SearchPhase::Failed(message) => {
            app_to_ui_tx
                .send(AppEvent::SearchFailed(message.clone()))
                .await?;
        }
        _ => {}
    }

    Ok(())
}
