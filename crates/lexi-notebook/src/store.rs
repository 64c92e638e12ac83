use lexi_core::types::DictionaryEntry;
use uuid::Uuid;

/// The saved-entry collection, most-recent-first. Sole owner of the saved
/// data; a displayed search result is a transient copy until toggled in.
///
/// Identity for save/unsave is the `(term, definition)` pair, not `id`.
/// Re-saving the same term with a differently phrased definition is a
/// distinct card on purpose; `id` is only the removal handle.
#[derive(Debug, Default)]
pub struct Notebook {
    entries: Vec<DictionaryEntry>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn terms(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.term.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save or unsave in a single step: an entry matching the dedup key is
    /// removed (by its existing `id`), otherwise the given entry is
    /// prepended. Returns `true` when the entry was saved.
    pub fn toggle_save(&mut self, entry: DictionaryEntry) -> bool {
        if let Some(existing) = self.entries.iter().find(|e| e.same_key(&entry)) {
            let id = existing.id;
            self.entries.retain(|e| e.id != id);
            false
        } else {
            self.entries.insert(0, entry);
            true
        }
    }

    /// Remove by id. Unknown ids are a no-op, not an error.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_saved(&self, entry: &DictionaryEntry) -> bool {
        self.entries.iter().any(|e| e.same_key(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(term: &str, definition: &str) -> DictionaryEntry {
        DictionaryEntry::new(
            term.to_string(),
            definition.to_string(),
            vec![],
            String::new(),
            None,
        )
    }

    #[test]
    fn toggle_twice_restores_original_collection() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("sol", "sun"));
        let snapshot: Vec<_> = notebook.entries().to_vec();

        let card = entry("luna", "moon");
        assert!(notebook.toggle_save(card.clone()));
        assert!(!notebook.toggle_save(card));
        assert_eq!(notebook.entries(), snapshot.as_slice());
    }

    #[test]
    fn same_key_different_id_toggles_off_instead_of_duplicating() {
        let mut notebook = Notebook::new();
        let first = entry("mar", "sea");
        let second = entry("mar", "sea");
        assert_ne!(first.id, second.id);

        assert!(notebook.toggle_save(first));
        assert!(!notebook.toggle_save(second));
        assert!(notebook.is_empty());
    }

    #[test]
    fn different_definition_is_a_distinct_card() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("banco", "bank (money)"));
        notebook.toggle_save(entry("banco", "bench"));
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn newest_entry_goes_to_the_front() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("uno", "one"));
        notebook.toggle_save(entry("dos", "two"));
        assert_eq!(notebook.entries()[0].term, "dos");
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("pan", "bread"));
        let snapshot: Vec<_> = notebook.entries().to_vec();

        assert!(!notebook.remove(Uuid::new_v4()));
        assert_eq!(notebook.entries(), snapshot.as_slice());
    }

    #[test]
    fn remove_by_id_targets_one_entry() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("agua", "water"));
        notebook.toggle_save(entry("fuego", "fire"));
        let id = notebook.entries()[1].id;

        assert!(notebook.remove(id));
        assert_eq!(notebook.len(), 1);
        assert_eq!(notebook.entries()[0].term, "fuego");
    }

    #[test]
    fn is_saved_uses_the_dedup_key_not_id() {
        let mut notebook = Notebook::new();
        notebook.toggle_save(entry("flor", "flower"));

        let probe = entry("flor", "flower");
        assert!(notebook.is_saved(&probe));
        assert!(!notebook.is_saved(&entry("flor", "blossom")));
    }
}
