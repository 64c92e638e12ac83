use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use lexi_client::{DefinitionParts, GenerateError, GenerationBackend};
use lexi_config::Config;
use lexi_core::types::{AppEvent, DictionaryEntry, ExampleSentence, Language, QuickCategory};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::events::search::GENERIC_SEARCH_ERROR;
use crate::state::AppState;

#[derive(Default)]
struct StubBackend {
    definition_calls: AtomicUsize,
    image_calls: AtomicUsize,
    story_calls: AtomicUsize,
    speech_calls: AtomicUsize,
    fail_definition: bool,
    fail_image: bool,
    speech_clip: Option<Vec<u8>>,
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn definition(
        &self,
        term: &str,
        _native: Language,
        _target: Language,
    ) -> Result<DefinitionParts, GenerateError> {
        self.definition_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_definition {
            return Err(GenerateError::Status(500));
        }
        Ok(DefinitionParts {
            definition: format!("definition of {term}"),
            examples: vec![ExampleSentence {
                target: format!("Uso {term}."),
                native: format!("I use {term}."),
            }],
            usage_note: "casual".to_string(),
        })
    }

    async fn image(&self, _term: &str, _target: Language) -> Result<Option<String>, GenerateError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_image {
            return Err(GenerateError::Status(500));
        }
        Ok(Some("data:image/png;base64,aGk=".to_string()))
    }

    async fn speech(&self, _text: &str) -> Result<Option<Vec<u8>>, GenerateError> {
        self.speech_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.speech_clip.clone())
    }

    async fn story(
        &self,
        words: &[String],
        _native: Language,
        _target: Language,
    ) -> Result<String, GenerateError> {
        self.story_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("a dialogue with {}", words.join(", ")))
    }

    async fn quick_answer(
        &self,
        term: &str,
        category: QuickCategory,
        _native: Language,
        _target: Language,
    ) -> Result<String, GenerateError> {
        Ok(format!("{category} answer for {term}"))
    }
}

struct Harness {
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
    backend: Arc<StubBackend>,
    _cancel: CancellationToken,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn next_event(&self) -> AppEvent {
        timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    async fn expect_silence(&self) {
        let result = timeout(Duration::from_millis(200), self.rx.recv()).await;
        assert!(result.is_err(), "unexpected event: {:?}", result);
    }
}

/// Spawns the event loop against a stub backend and a tempdir notebook,
/// consuming the initial NotebookChanged emitted after the restore.
async fn spawn_loop(stub: StubBackend) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::default();
    config.storage.notebook_path = dir.path().join("notebook.json");

    let state = Arc::new(AppState::new(config));
    let backend = Arc::new(stub);
    let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(64);
    let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(64);
    let cancel = CancellationToken::new();

    tokio::spawn(event_loop(
        state,
        Arc::clone(&backend) as Arc<dyn GenerationBackend>,
        ui_to_app_rx,
        app_to_ui_tx,
        ui_to_app_tx.clone(),
        cancel.clone(),
    ));

    let harness = Harness {
        tx: ui_to_app_tx,
        rx: app_to_ui_rx,
        backend,
        _cancel: cancel,
        _dir: dir,
    };

    match harness.next_event().await {
        AppEvent::NotebookChanged(entries) => assert!(entries.is_empty()),
        other => panic!("expected initial NotebookChanged, got {other:?}"),
    }

    harness
}

fn entry(term: &str, definition: &str) -> DictionaryEntry {
    DictionaryEntry::new(
        term.to_string(),
        definition.to_string(),
        vec![],
        String::new(),
        None,
    )
}

#[tokio::test]
async fn search_success_goes_loading_then_result() {
    let harness = spawn_loop(StubBackend::default()).await;

    harness
        .tx
        .send(AppEvent::Search("  gato ".to_string()))
        .await
        .unwrap();

    assert!(matches!(harness.next_event().await, AppEvent::SearchLoading));

    match harness.next_event().await {
        AppEvent::SearchResult(result) => {
            assert_eq!(result.term, "gato");
            assert_eq!(result.definition, "definition of gato");
            assert!(result.image_url.is_some());
            assert_eq!(result.examples.len(), 1);
        }
        other => panic!("expected SearchResult, got {other:?}"),
    }

    assert_eq!(harness.backend.definition_calls.load(Ordering::SeqCst), 1);
    assert_eq!(harness.backend.image_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn one_failed_leg_fails_the_whole_search() {
    let harness = spawn_loop(StubBackend {
        fail_image: true,
        ..StubBackend::default()
    })
    .await;

    harness
        .tx
        .send(AppEvent::Search("gato".to_string()))
        .await
        .unwrap();

    assert!(matches!(harness.next_event().await, AppEvent::SearchLoading));
    match harness.next_event().await {
        AppEvent::SearchFailed(message) => assert_eq!(message, GENERIC_SEARCH_ERROR),
        other => panic!("expected SearchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn whitespace_search_is_a_complete_no_op() {
    let harness = spawn_loop(StubBackend::default()).await;

    harness
        .tx
        .send(AppEvent::Search("   ".to_string()))
        .await
        .unwrap();

    harness.expect_silence().await;
    assert_eq!(harness.backend.definition_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.backend.image_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn story_on_empty_notebook_never_reaches_the_backend() {
    let harness = spawn_loop(StubBackend::default()).await;

    harness.tx.send(AppEvent::MakeStory).await.unwrap();

    assert!(matches!(harness.next_event().await, AppEvent::StoryFailed(_)));
    assert_eq!(harness.backend.story_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn toggle_save_persists_and_second_toggle_removes() {
    let harness = spawn_loop(StubBackend::default()).await;

    let card = entry("mar", "sea");
    harness
        .tx
        .send(AppEvent::ToggleSave(Box::new(card.clone())))
        .await
        .unwrap();

    match harness.next_event().await {
        AppEvent::NotebookChanged(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].term, "mar");
        }
        other => panic!("expected NotebookChanged, got {other:?}"),
    }

    let path = harness._dir.path().join("notebook.json");
    assert_eq!(lexi_notebook::load(&path).len(), 1);

    // Same (term, definition), different id: treated as already saved.
    let duplicate = entry("mar", "sea");
    assert_ne!(duplicate.id, card.id);
    harness
        .tx
        .send(AppEvent::ToggleSave(Box::new(duplicate)))
        .await
        .unwrap();

    match harness.next_event().await {
        AppEvent::NotebookChanged(entries) => assert!(entries.is_empty()),
        other => panic!("expected NotebookChanged, got {other:?}"),
    }
    assert!(lexi_notebook::load(&path).is_empty());
}

#[tokio::test]
async fn saved_notebook_feeds_the_story() {
    let harness = spawn_loop(StubBackend::default()).await;

    harness
        .tx
        .send(AppEvent::ToggleSave(Box::new(entry("sol", "sun"))))
        .await
        .unwrap();
    harness.next_event().await;

    harness.tx.send(AppEvent::MakeStory).await.unwrap();
    match harness.next_event().await {
        AppEvent::StoryReady(story) => assert!(story.contains("sol")),
        other => panic!("expected StoryReady, got {other:?}"),
    }
    assert_eq!(harness.backend.story_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn speech_is_fetched_once_per_distinct_text() {
    let harness = spawn_loop(StubBackend {
        speech_clip: Some(vec![1, 2, 3]),
        ..StubBackend::default()
    })
    .await;

    for _ in 0..2 {
        harness
            .tx
            .send(AppEvent::PlaySpeech("El gato duerme.".to_string()))
            .await
            .unwrap();
        match harness.next_event().await {
            AppEvent::SpeechReady { audio, .. } => assert_eq!(audio, Some(vec![1, 2, 3])),
            other => panic!("expected SpeechReady, got {other:?}"),
        }
    }

    assert_eq!(harness.backend.speech_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn quick_answer_round_trips() {
    let harness = spawn_loop(StubBackend::default()).await;

    harness
        .tx
        .send(AppEvent::QuickAnswer {
            term: "gato".to_string(),
            category: QuickCategory::Funfact,
        })
        .await
        .unwrap();

    match harness.next_event().await {
        AppEvent::QuickReady { category, answer } => {
            assert_eq!(category, QuickCategory::Funfact);
            assert!(answer.contains("gato"));
        }
        other => panic!("expected QuickReady, got {other:?}"),
    }
}
