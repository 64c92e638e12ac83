use crate::types::DictionaryEntry;

/// Lifecycle of the single tracked search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Result(Box<DictionaryEntry>),
    Failed(String),
}

/// Tracks the current search with a monotonic ticket. Starting a new search
/// abandons tracking of the previous one: its network calls keep running,
/// but their completion arrives with a stale ticket and is dropped, so the
/// displayed result is always last-write-wins.
#[derive(Debug, Default)]
pub struct SearchTracker {
    ticket: u64,
    phase: SearchPhase,
}

impl Default for SearchPhase {
    fn default() -> Self {
        SearchPhase::Idle
    }
}

impl SearchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Begin tracking a new search: clears any previous result and hands
    /// out the ticket its completion must present.
    pub fn begin(&mut self) -> u64 {
        self.ticket += 1;
        self.phase = SearchPhase::Loading;
        self.ticket
    }

    /// Record a completion. Returns `false` (and leaves the phase alone)
    /// when the ticket belongs to an abandoned search.
    pub fn finish(&mut self, ticket: u64, outcome: Result<Box<DictionaryEntry>, String>) -> bool {
        if ticket != self.ticket {
            return false;
        }
        self.phase = match outcome {
            Ok(entry) => SearchPhase::Result(entry),
            Err(message) => SearchPhase::Failed(message),
        };
        true
    }
}
