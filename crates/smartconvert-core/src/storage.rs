//! Platform config directory shared by the rate cache, preferences and
//! history files

use std::path::PathBuf;

use directories::ProjectDirs;

/// Path of a file inside the smartconvert config directory
pub fn config_file(name: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", "smartconvert").map(|dirs| dirs.config_dir().join(name))
}
