/// Session settings persisted between runs
///
/// The last filter choice and slider values are written as JSON to the
/// user's data directory, so the app reopens the way it was left. Losing
/// or corrupting the file is harmless; loading falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::FilterKind;
use crate::state::params::FilterParams;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub filter: FilterKind,
    pub params: FilterParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter: FilterKind::SepiaTone,
            params: FilterParams::default(),
        }
    }
}

impl Settings {
    /// Where the settings file lives:
    /// - Linux: ~/.local/share/snap-filter/settings.json
    /// - macOS: ~/Library/Application Support/snap-filter/settings.json
    /// - Windows: %APPDATA%\snap-filter\settings.json
    fn path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("snap-filter");
        path.push("settings.json");
        path
    }

    /// Load the saved settings, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                eprintln!("⚠️  Ignoring unreadable settings file: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Write the settings out, best-effort; a failure only costs the user
    /// their remembered slider positions
    pub fn store(&self) {
        if let Err(e) = self.store_to(&Self::path()) {
            eprintln!("⚠️  Could not write settings: {}", e);
        }
    }

    fn store_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }
}
