//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever `--config` points).
//! Game rules are not configurable; see `consts`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Card file to play with
    pub deck_path: PathBuf,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Wall-clock milliseconds per countdown tick in the terminal front end.
    /// A debugging/testing knob: each tick still takes one second off the
    /// game clock, so shortening it only speeds the game up.
    pub tick_interval_ms: u64,

    // === Terminal front end ===
    /// Print a text frame after every change
    pub show_frames: bool,
    /// Print the end-of-game summary as JSON
    pub json_summary: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            deck_path: PathBuf::from("data/pg23.txt"),
            seed: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            show_frames: true,
            json_summary: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "dobble.json";

    /// Load settings from `path`, falling back to defaults if it is missing
    /// or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Tick interval clamped to at least 1 ms
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.max(1)
    }
}
