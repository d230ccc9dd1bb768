//! User preferences passed explicitly into each converter session

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::format::{clamp_precision, DEFAULT_PRECISION};
use crate::types::Dimension;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Preferred "from" unit per dimension
    pub preferred_units: HashMap<Dimension, String>,
    /// Decimal places shown in results (2..=8)
    pub result_precision: u32,
    /// Record user-triggered conversions to history
    pub save_history: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            preferred_units: HashMap::new(),
            result_precision: DEFAULT_PRECISION,
            save_history: true,
        }
    }
}

impl Preferences {
    /// Precision clamped into the supported range
    pub fn precision(&self) -> u32 {
        clamp_precision(self.result_precision)
    }

    pub fn set_precision(&mut self, precision: u32) {
        self.result_precision = clamp_precision(precision);
    }

    pub fn preferred_unit(&self, dimension: Dimension) -> Option<&str> {
        self.preferred_units.get(&dimension).map(String::as_str)
    }

    pub fn set_preferred_unit(&mut self, dimension: Dimension, unit: impl Into<String>) {
        self.preferred_units.insert(dimension, unit.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tracing::{debug, warn};

    use super::Preferences;
    use crate::storage;

    impl Preferences {
        /// Preferences file in the smartconvert config directory
        pub fn default_path() -> Option<PathBuf> {
            storage::config_file("preferences.json")
        }

        /// Load from `path`, falling back to defaults when the file is
        /// missing or unreadable
        pub fn load(path: &Path) -> Self {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "no preferences file, using defaults");
                    return Self::default();
                }
            };
            match serde_json::from_str::<Preferences>(&content) {
                Ok(mut prefs) => {
                    prefs.result_precision = prefs.precision();
                    prefs
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid preferences file, using defaults");
                    Self::default()
                }
            }
        }

        pub fn save(&self, path: &Path) {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match serde_json::to_string_pretty(self) {
                Ok(content) => {
                    if let Err(e) = fs::write(path, content) {
                        warn!(path = %path.display(), error = %e, "failed to write preferences");
                    }
                }
                Err(e) => warn!(error = %e, "failed to serialize preferences"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"save_history": false}"#).unwrap();
        assert_eq!(prefs.result_precision, 4);
        assert!(!prefs.save_history);
        assert!(prefs.preferred_units.is_empty());
    }

    #[test]
    fn test_preferred_units_keyed_by_dimension() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"preferred_units": {"distance": "mi", "currency": "EUR"}}"#)
                .unwrap();
        assert_eq!(prefs.preferred_unit(Dimension::Distance), Some("mi"));
        assert_eq!(prefs.preferred_unit(Dimension::Currency), Some("EUR"));
        assert_eq!(prefs.preferred_unit(Dimension::Weight), None);
    }

    #[test]
    fn test_precision_clamped() {
        let mut prefs = Preferences {
            result_precision: 20,
            ..Preferences::default()
        };
        assert_eq!(prefs.precision(), 8);
        prefs.set_precision(1);
        assert_eq!(prefs.result_precision, 2);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "smartconvert-prefs-{}.json",
            std::process::id()
        ));
        let mut prefs = Preferences::default();
        prefs.set_preferred_unit(Dimension::Temperature, "K");
        prefs.set_precision(6);
        prefs.save(&path);

        assert_eq!(Preferences::load(&path), prefs);
        let _ = std::fs::remove_file(&path);
        assert_eq!(Preferences::load(&path), Preferences::default());
    }
}
