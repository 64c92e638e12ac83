use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages the app can pair, rendered by display name in prompts and
/// backend requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    Chinese,
    Hindi,
    Arabic,
    Portuguese,
    Bengali,
    Russian,
    Japanese,
    French,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Chinese => "Chinese (Mandarin)",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Portuguese => "Portuguese",
            Language::Bengali => "Bengali",
            Language::Russian => "Russian",
            Language::Japanese => "Japanese",
            Language::French => "French",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Language::English),
            "spanish" => Ok(Language::Spanish),
            "chinese" | "mandarin" => Ok(Language::Chinese),
            "hindi" => Ok(Language::Hindi),
            "arabic" => Ok(Language::Arabic),
            "portuguese" => Ok(Language::Portuguese),
            "bengali" => Ok(Language::Bengali),
            "russian" => Ok(Language::Russian),
            "japanese" => Ok(Language::Japanese),
            "french" => Ok(Language::French),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

/// One example sentence pair; `target` first, display order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub target: String,
    pub native: String,
}

/// A fetched or saved vocabulary record. Never mutated in place; a fresh
/// search always synthesizes a new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    /// Removal handle, unique per process lifetime. Not the dedup key.
    pub id: Uuid,
    /// The searched word as typed, never normalized or case-folded.
    pub term: String,
    pub definition: String,
    pub examples: Vec<ExampleSentence>,
    pub usage_note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl DictionaryEntry {
    pub fn new(
        term: String,
        definition: String,
        examples: Vec<ExampleSentence>,
        usage_note: String,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            term,
            definition,
            examples,
            usage_note,
            image_url,
            timestamp: now_millis(),
        }
    }

    /// Notebook identity: two entries are "the same card" when both term
    /// and definition match, regardless of `id`.
    pub fn same_key(&self, other: &DictionaryEntry) -> bool {
        self.term == other.term && self.definition == other.definition
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Quick-answer prompt categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickCategory {
    Natural,
    Mistake,
    Funfact,
}

impl QuickCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickCategory::Natural => "natural",
            QuickCategory::Mistake => "mistake",
            QuickCategory::Funfact => "funfact",
        }
    }
}

impl fmt::Display for QuickCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown quick-answer category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for QuickCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natural" => Ok(QuickCategory::Natural),
            "mistake" => Ok(QuickCategory::Mistake),
            "funfact" => Ok(QuickCategory::Funfact),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Which of the three views is active. Presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Search,
    Notebook,
    Study,
}

/// Events exchanged between the UI loop and the app event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    Search(String),
    ToggleSave(Box<DictionaryEntry>),
    RemoveEntry(Uuid),
    MakeStory,
    QuickAnswer {
        term: String,
        category: QuickCategory,
    },
    PlaySpeech(String),
    Shutdown,

    // In-flight search tasks -> app. Stale tickets are dropped.
    SearchFinished {
        ticket: u64,
        outcome: Result<Box<DictionaryEntry>, String>,
    },

    // app -> UI
    SearchLoading,
    SearchResult(Box<DictionaryEntry>),
    SearchFailed(String),
    NotebookChanged(Vec<DictionaryEntry>),
    StoryReady(String),
    StoryFailed(String),
    QuickReady {
        category: QuickCategory,
        answer: String,
    },
    QuickFailed(String),
    SpeechReady {
        text: String,
        audio: Option<Vec<u8>>,
    },
    SpeechFailed(String),
}
