use std::path::Path;

use kanal::AsyncSender;
use lexi_core::types::{AppEvent, DictionaryEntry};
use lexi_notebook::Notebook;
use uuid::Uuid;

pub async fn handle_toggle_save(
    notebook: &mut Notebook,
    entry: DictionaryEntry,
    path: &Path,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let saved = notebook.toggle_save(entry);
    tracing::info!(saved, entries = notebook.len(), "notebook toggled");

    persist(notebook, path);
    app_to_ui_tx
        .send(AppEvent::NotebookChanged(notebook.entries().to_vec()))
        .await?;

    Ok(())
}

pub async fn handle_remove(
    notebook: &mut Notebook,
    id: Uuid,
    path: &Path,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !notebook.remove(id) {
        tracing::debug!("remove of unknown entry {id} ignored");
        return Ok(());
    }

    persist(notebook, path);
    app_to_ui_tx
        .send(AppEvent::NotebookChanged(notebook.entries().to_vec()))
        .await?;

    Ok(())
}

/// Persist in the same task turn as the mutation. Failures are logged and
/// swallowed; the in-memory collection is never rolled back.
fn persist(notebook: &Notebook, path: &Path) {
    if let Err(e) = lexi_notebook::save(path, notebook.entries()) {
        tracing::warn!("failed to persist notebook: {e}");
    }
}
