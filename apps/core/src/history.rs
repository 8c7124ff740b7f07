use std::fmt::{Display, Formatter};

use crate::config::Config;
use crate::contract::{decode_history, encode_history};
use crate::kv_store::{KeyValueStore, StoreError};
use crate::logging;
use crate::model::Candidate;

pub const DEFAULT_HISTORY_KEY: &str = "search-history";
pub const MAX_HISTORY_ENTRIES: usize = 5;

#[derive(Debug)]
pub enum HistoryError {
    Store(StoreError),
    Malformed(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(error) => write!(f, "history store error: {error}"),
            Self::Malformed(error) => write!(f, "malformed history: {error}"),
            Self::Encode(error) => write!(f, "failed to encode history: {error}"),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StoreError> for HistoryError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Bounded most-recent-first list of committed candidates.
///
/// Every failure is recovered here: reads degrade to an empty history and
/// writes leave the persisted history as it was.
pub struct HistoryStore<S> {
    store: S,
    key: String,
    max_entries: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, DEFAULT_HISTORY_KEY, MAX_HISTORY_ENTRIES)
    }

    pub fn with_options(store: S, key: &str, max_entries: usize) -> Self {
        Self {
            store,
            key: key.to_string(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn from_config(store: S, cfg: &Config) -> Self {
        Self::with_options(store, &cfg.history_key, cfg.max_history_entries)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load(&self) -> Vec<Candidate> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(error) => {
                logging::warn("history.load_failed", &[("key", &self.key), ("error", &error)]);
                Vec::new()
            }
        }
    }

    pub fn record(&mut self, item: &Candidate) {
        if let Err(error) = self.try_record(item) {
            logging::warn("history.record_failed", &[("key", &self.key), ("error", &error)]);
        }
    }

    pub fn clear(&mut self) {
        if let Err(error) = self.store.remove(&self.key) {
            logging::warn("history.clear_failed", &[("key", &self.key), ("error", &error)]);
        }
    }

    fn try_load(&self) -> Result<Vec<Candidate>, HistoryError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let entries = decode_history(&raw).map_err(HistoryError::Malformed)?;
        Ok(normalize(entries, self.max_entries))
    }

    fn try_record(&mut self, item: &Candidate) -> Result<(), HistoryError> {
        // A store that cannot be read must not be overwritten; unparseable data can be.
        let mut entries = match self.try_load() {
            Ok(entries) => entries,
            Err(HistoryError::Malformed(error)) => {
                logging::warn(
                    "history.malformed_replaced",
                    &[("key", &self.key), ("error", &error)],
                );
                Vec::new()
            }
            Err(error) => return Err(error),
        };

        entries.retain(|entry| !entry.same_identity(item));
        entries.insert(0, item.clone());
        entries.truncate(self.max_entries);

        let encoded = encode_history(&entries).map_err(HistoryError::Encode)?;
        self.store.set(&self.key, &encoded)?;
        Ok(())
    }
}

fn normalize(entries: Vec<Candidate>, max_entries: usize) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(entries.len().min(max_entries));
    for entry in entries {
        if out.len() == max_entries {
            break;
        }
        if out.iter().any(|kept| kept.same_identity(&entry)) {
            continue;
        }
        out.push(entry);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::model::{Candidate, NoteRef, TagRef};

    #[test]
    fn normalize_drops_later_duplicates_and_caps_length() {
        let entries = vec![
            Candidate::from(NoteRef::new(1, "first")),
            Candidate::from(TagRef::new(1, "same id, other kind")),
            Candidate::from(NoteRef::new(1, "older copy")),
            Candidate::from(NoteRef::new(2, "second")),
            Candidate::from(NoteRef::new(3, "third")),
        ];

        let normalized = normalize(entries, 3);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].title(), "first");
        assert!(normalized[1].is_tag());
        assert_eq!(normalized[2].title(), "second");
    }
}
