//! Best score persistence
//!
//! A single number stored under a fixed key. Missing or unreadable values
//! count as zero; the stored value only ever goes up.

use crate::consts::BEST_SCORE_KEY;
use crate::platform::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Read the stored best score
    pub fn load(store: &impl KeyValueStore) -> Self {
        let value = match store.get(BEST_SCORE_KEY) {
            Some(raw) => match raw.trim().parse::<f64>() {
                // May have been written as a float
                Ok(v) if v.is_finite() && v > 0.0 => v as u64,
                Ok(_) => 0,
                Err(_) => {
                    log::warn!("Ignoring unreadable best score {raw:?}");
                    0
                }
            },
            None => 0,
        };
        log::info!("Best score: {value}");
        Self { value }
    }

    /// Store `score` if it beats the current best; returns whether it did
    pub fn record(
        &mut self,
        store: &mut impl KeyValueStore,
        score: u64,
    ) -> Result<bool, StorageError> {
        if score <= self.value {
            return Ok(false);
        }
        self.value = score;
        store.set(BEST_SCORE_KEY, &score.to_string())?;
        log::info!("Best score saved ({score})");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_missing_or_garbage_is_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value(), 0);
        store.set(BEST_SCORE_KEY, "roast").unwrap();
        assert_eq!(BestScore::load(&store).value(), 0);
        store.set(BEST_SCORE_KEY, "-4").unwrap();
        assert_eq!(BestScore::load(&store).value(), 0);
    }

    #[test]
    fn test_load_stored_value() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "128").unwrap();
        assert_eq!(BestScore::load(&store).value(), 128);
    }

    #[test]
    fn test_record_only_when_beaten() {
        let mut store = MemoryStore::new();
        let mut best = BestScore::load(&store);

        assert_eq!(best.record(&mut store, 40), Ok(true));
        assert_eq!(best.record(&mut store, 40), Ok(false));
        assert_eq!(best.record(&mut store, 12), Ok(false));
        assert_eq!(best.value(), 40);
        assert_eq!(store.writes, 1);
        assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("40"));

        assert_eq!(BestScore::load(&store).value(), 40);
    }
}
