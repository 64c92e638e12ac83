use std::path::Path;
use std::{fs, io};

use lexi_core::types::DictionaryEntry;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("notebook io: {0}")]
    Io(#[from] io::Error),

    #[error("notebook serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Restore the collection from its JSON file slot. An absent file is an
/// empty notebook; unreadable or corrupt content is discarded with a
/// warning. Startup never fails on storage.
pub fn load(path: &Path) -> Vec<DictionaryEntry> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!("failed to read notebook at {}: {e}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&data) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("discarding corrupt notebook content: {e}");
            Vec::new()
        }
    }
}

/// Rewrite the whole collection, no deltas. Callers log and continue on
/// failure; a persist error never rolls back the in-memory change.
pub fn save(path: &Path, entries: &[DictionaryEntry]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_core::types::ExampleSentence;

    fn entry(term: &str) -> DictionaryEntry {
        DictionaryEntry::new(
            term.to_string(),
            format!("definition of {term}"),
            vec![ExampleSentence {
                target: format!("Uso {term}."),
                native: format!("I use {term}."),
            }],
            "note".to_string(),
            Some("data:image/png;base64,aGk=".to_string()),
        )
    }

    #[test]
    fn round_trips_store_produced_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.json");

        let entries = vec![entry("gato"), entry("perro")];
        save(&path, &entries).unwrap();

        assert_eq!(load(&path), entries);
    }

    #[test]
    fn absent_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("missing.json")).is_empty());
    }

    #[test]
    fn corrupt_content_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.json");

        for garbage in ["not json at all", "{\"an\":\"object\"}", "42"] {
            fs::write(&path, garbage).unwrap();
            assert!(load(&path).is_empty(), "accepted: {garbage}");
        }
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("notebook.json");

        save(&path, &[entry("sol")]).unwrap();
        assert_eq!(load(&path).len(), 1);
    }
}
