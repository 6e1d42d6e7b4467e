//! Best-score persistence
//!
//! The session core never touches storage directly; it records through an
//! injected [`ScoreStore`]. Browser embedders use [`LocalStorageStore`],
//! native shells and tests use [`MemoryStore`]. The payload is the
//! [`BestScore`] serialized as JSON.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// LocalStorage key for the persisted best score
pub const STORAGE_KEY: &str = "quizJumpHighScore";

/// Where the serialized best score lives between sessions.
pub trait ScoreStore {
    /// Previously saved payload, if any
    fn load(&self) -> Option<String>;
    /// Persist a serialized payload
    fn save(&self, raw: &str);
}

/// In-memory store for native shells and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    fn save(&self, raw: &str) {
        *self.raw.borrow_mut() = Some(raw.to_owned());
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(STORAGE_KEY).ok().flatten()
    }

    fn save(&self, raw: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(STORAGE_KEY, raw);
            log::info!("best score saved");
        }
    }
}

/// Best score across sessions.
///
/// Loaded once at startup, written back only when beaten at the end of a
/// session (game over or completion).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub best: u64,
}

impl BestScore {
    /// Load the saved best, defaulting to zero.
    pub fn load(store: &dyn ScoreStore) -> Self {
        if let Some(json) = store.load() {
            match serde_json::from_str(&json) {
                Ok(best) => return best,
                Err(_) => log::warn!("ignoring unparseable best score {:?}", json),
            }
        }
        Self::default()
    }

    /// Record a finished session's score. Persists and returns true only
    /// when it beats the previous best.
    pub fn record(&mut self, score: u64, store: &dyn ScoreStore) -> bool {
        if score > self.best {
            self.best = score;
            if let Ok(json) = serde_json::to_string(self) {
                store.save(&json);
            }
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_zero() {
        let store = MemoryStore::new();
        let best = BestScore::load(&store);
        assert_eq!(best.best, 0);
    }

    #[test]
    fn record_persists_only_improvements() {
        let store = MemoryStore::new();
        let mut best = BestScore::load(&store);

        assert!(best.record(120, &store));
        assert_eq!(BestScore::load(&store).best, 120);

        assert!(!best.record(90, &store));
        assert_eq!(BestScore::load(&store).best, 120);

        assert!(best.record(150, &store));
        assert_eq!(BestScore::load(&store).best, 150);
    }

    #[test]
    fn equal_score_is_not_an_improvement() {
        let store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        best.record(50, &store);
        assert!(!best.record(50, &store));
    }

    #[test]
    fn saved_payload_round_trips_as_json() {
        let store = MemoryStore::new();
        let mut best = BestScore::load(&store);
        best.record(200, &store);

        assert_eq!(store.load().as_deref(), Some(r#"{"best":200}"#));
        let reloaded = BestScore::load(&store);
        assert_eq!(reloaded.best, 200);
    }

    #[test]
    fn garbage_payload_falls_back_to_zero() {
        let store = MemoryStore::new();
        store.save("not json");
        let best = BestScore::load(&store);
        assert_eq!(best.best, 0);
    }
}
