//! Application state management

use anyhow::Context;
use export::ExportSession;
use std::path::{Path, PathBuf};
use store::{KvStore, PreferencesManager};

/// Directory name under the platform data directory
pub const APP_DIR: &str = "markdown-preview";

/// Text shown before anything has been edited
pub const DEFAULT_INPUT: &str = include_str!("default_input.md");

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Persisted state shared by every command
pub struct AppState {
    pub session: ExportSession,
    pub kv: KvStore,
    preferences: PreferencesManager,
}

impl AppState {
    /// Load preferences and the key-value store from `data_dir`
    pub fn open(data_dir: PathBuf) -> anyhow::Result<Self> {
        tracing::debug!("Data directory: {:?}", data_dir);

        let mut preferences = PreferencesManager::new(&data_dir);
        let preferences_path = preferences.preferences_path().to_path_buf();
        let loaded = preferences
            .load()
            .with_context(|| format!("Failed to load {}", preferences_path.display()))?
            .clone();
        let kv = KvStore::open(&data_dir).context("Failed to open key-value store")?;

        Ok(Self {
            session: ExportSession::from_preferences(loaded),
            kv,
            preferences,
        })
    }

    /// Write the session's settings and page setups back to disk
    pub fn save_session(&mut self) -> anyhow::Result<()> {
        self.preferences
            .update(self.session.to_preferences())
            .context("Failed to save preferences")
    }

    /// Text to export: the input file when given, else the last saved text,
    /// else the default document
    pub fn source_text(&self, input: Option<&Path>) -> anyhow::Result<String> {
        match input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => Ok(self
                .kv
                .last_state()
                .unwrap_or_else(|| DEFAULT_INPUT.to_string())),
        }
    }

    pub fn remember_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.kv.save_last_state(text).context("Failed to save editor text")
    }
}
