//! Export preferences management
//!
//! Persists the visual settings and both per-target page setups so the
//! next session starts where the last one ended.

use crate::Result;
use doc_model::{PageSetup, Settings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the preferences file inside the data directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Everything the user configures for exports
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportPreferences {
    /// Visual settings applied to the preview
    pub settings: Settings,
    /// Page setup of the image and PDF targets
    pub raster_setup: PageSetup,
    /// Page setup of the DOCX target
    pub document_setup: PageSetup,
}

/// Preferences manager for loading, saving, and updating export preferences
pub struct PreferencesManager {
    preferences_path: PathBuf,
    current: ExportPreferences,
}

impl PreferencesManager {
    /// Create a new preferences manager with the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            preferences_path: data_dir.as_ref().join(PREFERENCES_FILE),
            current: ExportPreferences::default(),
        }
    }

    pub fn preferences_path(&self) -> &Path {
        &self.preferences_path
    }

    /// Load preferences from disk, or return defaults if the file doesn't exist
    pub fn load(&mut self) -> Result<&ExportPreferences> {
        self.current = if self.preferences_path.exists() {
            let content = std::fs::read_to_string(&self.preferences_path)?;
            parse_or_default(&content)
        } else {
            ExportPreferences::default()
        };
        Ok(&self.current)
    }

    /// Replace preferences and save to disk
    pub fn update(&mut self, preferences: ExportPreferences) -> Result<()> {
        self.current = preferences;
        if let Some(parent) = self.preferences_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.preferences_path, content)?;
        tracing::debug!(path = %self.preferences_path.display(), "Saved preferences");
        Ok(())
    }
}

fn parse_or_default(content: &str) -> ExportPreferences {
    match serde_json::from_str::<ExportPreferences>(content) {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::warn!("Failed to parse preferences file, using defaults: {}", e);
            ExportPreferences::default()
        }
    }
}
