//! High score tracking
//!
//! A single best score persisted under `highScore`.

use crate::persistence::{Store, keys, read_u64, write_or_warn};

/// Best score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from the store (corrupt values heal to zero)
    pub fn load(store: &mut dyn Store) -> Self {
        let best = read_u64(store, keys::HIGH_SCORE, 0);
        log::info!("High score: {}", best);
        Self { best }
    }

    pub fn save(&self, store: &mut dyn Store) {
        write_or_warn(store, keys::HIGH_SCORE, &self.best.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_record_only_improvements() {
        let mut hs = HighScore::new();
        assert!(!hs.record(0));
        assert!(hs.record(120));
        assert!(!hs.record(120));
        assert!(!hs.record(90));
        assert!(hs.record(121));
        assert_eq!(hs.best, 121);
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut store = MemoryStore::new();
        let hs = HighScore { best: 340 };
        hs.save(&mut store);
        assert_eq!(store.get(keys::HIGH_SCORE).as_deref(), Some("340"));
        assert_eq!(HighScore::load(&mut store), hs);
    }

    #[test]
    fn test_corrupt_value_heals() {
        let mut store = MemoryStore::new().with(keys::HIGH_SCORE, "NaN");
        assert_eq!(HighScore::load(&mut store).best, 0);
        assert_eq!(store.get(keys::HIGH_SCORE).as_deref(), Some("0"));
    }
}
