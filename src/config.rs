//! Startup configuration, read once from an optional JSON file

use std::path::PathBuf;

use serde::Deserialize;

pub const CONFIG_FILE: &str = "cubert.json";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route the app opens on, the environment's "current location".
    pub start_path: String,
    /// Directory scanned for audio files to seed the playlist.
    pub music_dir: Option<PathBuf>,
    /// Initial player volume in `[0, 1]`.
    pub volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_path: "/".to_string(),
            music_dir: None,
            volume: 0.75,
        }
    }
}

impl Config {
    /// Read `cubert.json` from the working directory. A missing or broken
    /// file falls back to defaults; this never aborts startup.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match serde_json::from_str::<Config>(&content) {
                Ok(config) => {
                    tracing::info!(file = CONFIG_FILE, "Configuration loaded");
                    config
                }
                Err(e) => {
                    tracing::warn!(file = CONFIG_FILE, error = %e, "Ignoring malformed config");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        };
        config.volume = config.volume.clamp(0.0, 1.0);
        config
    }
}
