//! On-disk cache for exchange rates
//!
//! Rates are cached to `~/.config/smartconvert/rates.json` (or platform
//! equivalent). A cache older than one hour is ignored so fresh rates get
//! fetched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{RateBook, Rates};
use crate::clock::now_secs;
use crate::storage;

/// Cache expiry time in seconds (1 hour)
const CACHE_EXPIRY_SECS: u64 = 3600;

/// Cached rates file format
#[derive(Serialize, Deserialize)]
struct CachedRates {
    /// Unix timestamp when rates were fetched
    timestamp: u64,
    /// Rates as code -> units per USD (e.g. "EUR" -> 0.92)
    rates: Rates,
}

/// Default cache location
pub fn default_path() -> Option<PathBuf> {
    storage::config_file("rates.json")
}

fn read(path: &Path) -> Option<CachedRates> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn is_fresh(cached: &CachedRates, now: u64) -> bool {
    now.saturating_sub(cached.timestamp) <= CACHE_EXPIRY_SECS
}

/// Load a rate book from the cache file if it exists and is not expired
pub fn load(path: &Path) -> Option<RateBook> {
    let cached = read(path)?;
    if !is_fresh(&cached, now_secs()) {
        debug!(path = %path.display(), "rate cache expired");
        return None;
    }
    let mut book = RateBook::new();
    book.resolve_at(cached.rates, cached.timestamp);
    Some(book)
}

/// Save the rates of a resolved book; unresolved books are skipped
pub fn save(path: &Path, book: &RateBook) {
    let (Some(rates), Some(timestamp)) = (book.rates(), book.fetched_at()) else {
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let cached = CachedRates {
        timestamp,
        rates: (*rates).clone(),
    };
    match serde_json::to_string_pretty(&cached) {
        Ok(content) => {
            if let Err(e) = fs::write(path, content) {
                warn!(path = %path.display(), error = %e, "failed to write rate cache");
            }
        }
        Err(e) => warn!(error = %e, "failed to serialize rate cache"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateStatus;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("smartconvert-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = temp_path("rates.json");
        let book = RateBook::with_defaults();
        save(&path, &book);

        let loaded = load(&path).expect("fresh cache should load");
        assert_eq!(loaded.status(), RateStatus::Ready);
        assert_eq!(loaded.rate("EUR"), Some(0.92));
        assert_eq!(loaded.fetched_at(), book.fetched_at());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_expired_cache_ignored() {
        let path = temp_path("stale.json");
        let stale = CachedRates {
            timestamp: now_secs() - CACHE_EXPIRY_SECS - 10,
            rates: Rates::from([("EUR".to_string(), 0.9)]),
        };
        fs::write(&path, serde_json::to_string(&stale).unwrap()).unwrap();
        assert!(load(&path).is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_pending_book_not_saved() {
        let path = temp_path("pending.json");
        save(&path, &RateBook::new());
        assert!(!path.exists());
    }
}
