//! Conversion history
//!
//! The orchestration layer hands finished conversions to a [`HistorySink`].
//! Recording is best-effort: sinks log their own failures and never report
//! them back to the caller.

use serde::{Deserialize, Serialize};

use crate::types::Dimension;

/// Most entries a [`FileHistory`] keeps
pub const MAX_ENTRIES: usize = 50;

/// One recorded conversion, values as displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub dimension: Dimension,
    pub from_unit: String,
    pub to_unit: String,
    pub from_value: String,
    pub to_value: String,
    /// Unix timestamp of the conversion
    pub timestamp: u64,
}

/// Receiver for successful user-triggered conversions
pub trait HistorySink {
    fn record(&self, entry: &HistoryEntry);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistorySink for NoHistory {
    fn record(&self, _entry: &HistoryEntry) {}
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileHistory;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tracing::{debug, warn};

    use super::{HistoryEntry, HistorySink, MAX_ENTRIES};
    use crate::storage;

    /// History kept as a JSON array, most recent first
    #[derive(Debug, Clone)]
    pub struct FileHistory {
        path: PathBuf,
    }

    impl FileHistory {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// History file in the smartconvert config directory
        pub fn open_default() -> Option<Self> {
            storage::config_file("history.json").map(Self::new)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Stored entries, most recent first. A missing or unreadable file
        /// reads as empty.
        pub fn entries(&self) -> Vec<HistoryEntry> {
            let Ok(content) = fs::read_to_string(&self.path) else {
                return Vec::new();
            };
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt history file");
                Vec::new()
            })
        }

        pub fn clear(&self) {
            if let Err(e) = fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "failed to clear history");
                }
            }
        }

        fn write(&self, entries: &[HistoryEntry]) {
            if let Some(parent) = self.path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let result = serde_json::to_string_pretty(entries)
                .map_err(|e| e.to_string())
                .and_then(|content| fs::write(&self.path, content).map_err(|e| e.to_string()));
            if let Err(error) = result {
                warn!(path = %self.path.display(), %error, "failed to write history");
            }
        }
    }

    impl HistorySink for FileHistory {
        fn record(&self, entry: &HistoryEntry) {
            let mut entries = self.entries();
            entries.insert(0, entry.clone());
            entries.truncate(MAX_ENTRIES);
            debug!(count = entries.len(), "recording history entry");
            self.write(&entries);
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(n: u64) -> HistoryEntry {
        HistoryEntry {
            dimension: Dimension::Distance,
            from_unit: "km".into(),
            to_unit: "mi".into(),
            from_value: n.to_string(),
            to_value: "0.6214".into(),
            timestamp: n,
        }
    }

    fn temp_history(name: &str) -> FileHistory {
        let path = std::env::temp_dir().join(format!(
            "smartconvert-history-{}-{name}.json",
            std::process::id()
        ));
        let history = FileHistory::new(path);
        history.clear();
        history
    }

    #[test]
    fn test_most_recent_first() {
        let history = temp_history("order");
        history.record(&entry(1));
        history.record(&entry(2));
        let stamps: Vec<u64> = history.entries().iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![2, 1]);
        history.clear();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn test_capped() {
        let history = temp_history("cap");
        for n in 0..(MAX_ENTRIES as u64 + 5) {
            history.record(&entry(n));
        }
        let entries = history.entries();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].timestamp, MAX_ENTRIES as u64 + 4);
        history.clear();
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let history = temp_history("corrupt");
        std::fs::write(history.path(), "not json").unwrap();
        assert!(history.entries().is_empty());
        history.clear();
    }
}
