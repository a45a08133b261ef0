//! Export session state
//!
//! The session owns the current settings and both page setups. Each export
//! works from an [`ExportSnapshot`] cloned at its start, so later changes to
//! the session never reach an export already in flight.

use doc_model::{PageSetup, Settings, StyleEngine};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use store::ExportPreferences;

/// Which export target a page setup belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTarget {
    /// Image and PDF exports
    Raster,
    /// DOCX export
    Document,
}

impl PageTarget {
    pub fn name(&self) -> &'static str {
        match self {
            PageTarget::Raster => "raster",
            PageTarget::Document => "document",
        }
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raster" | "pdf" | "image" => Ok(PageTarget::Raster),
            "document" | "docx" => Ok(PageTarget::Document),
            other => Err(format!("Unknown export target: {}", other)),
        }
    }
}

/// Immutable copy of the session taken when an export starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSnapshot {
    pub settings: Settings,
    pub raster_setup: PageSetup,
    pub document_setup: PageSetup,
}

#[derive(Debug, Clone, Default)]
pub struct ExportSession {
    settings: Settings,
    raster_setup: PageSetup,
    document_setup: PageSetup,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preferences(preferences: ExportPreferences) -> Self {
        Self {
            settings: preferences.settings,
            raster_setup: preferences.raster_setup,
            document_setup: preferences.document_setup,
        }
    }

    pub fn to_preferences(&self) -> ExportPreferences {
        ExportPreferences {
            settings: self.settings.clone(),
            raster_setup: self.raster_setup.clone(),
            document_setup: self.document_setup.clone(),
        }
    }

    pub fn snapshot(&self) -> ExportSnapshot {
        ExportSnapshot {
            settings: self.settings.clone(),
            raster_setup: self.raster_setup.clone(),
            document_setup: self.document_setup.clone(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings from a form submission
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Switch to the named preset. Returns false, changing nothing, for an
    /// unknown name.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let known = Settings::preset(name).is_some();
        let current = std::mem::take(&mut self.settings);
        self.settings = StyleEngine::new().apply_preset(current, name);
        known
    }

    pub fn reset_settings(&mut self) {
        self.settings = Settings::default();
    }

    pub fn page_setup(&self, target: PageTarget) -> &PageSetup {
        match target {
            PageTarget::Raster => &self.raster_setup,
            PageTarget::Document => &self.document_setup,
        }
    }

    pub fn update_page_setup(&mut self, target: PageTarget, setup: PageSetup) {
        tracing::debug!(%target, page_size = %setup.page_size, "Updating page setup");
        match target {
            PageTarget::Raster => self.raster_setup = setup,
            PageTarget::Document => self.document_setup = setup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Orientation, ThemePreset};

    #[test]
    fn test_target_parsing() {
        assert_eq!("PDF".parse::<PageTarget>().unwrap(), PageTarget::Raster);
        assert_eq!("document".parse::<PageTarget>().unwrap(), PageTarget::Document);
        assert!("slides".parse::<PageTarget>().is_err());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut session = ExportSession::new();
        let snapshot = session.snapshot();

        session.apply_preset("dark");
        session.update_page_setup(
            PageTarget::Raster,
            PageSetup {
                orientation: Orientation::Landscape,
                ..PageSetup::default()
            },
        );

        assert_eq!(snapshot.settings, Settings::default());
        assert_eq!(snapshot.raster_setup.orientation, Orientation::Portrait);
        assert_eq!(session.snapshot().settings, ThemePreset::Dark.settings());
    }

    #[test]
    fn test_preset_selection() {
        let mut session = ExportSession::new();
        assert!(session.apply_preset("dark"));
        let dark = session.settings().clone();
        assert!(session.apply_preset("dark"));
        assert_eq!(session.settings(), &dark);

        assert!(!session.apply_preset("neon"));
        assert_eq!(session.settings(), &dark);

        session.reset_settings();
        assert_eq!(session.settings(), &Settings::default());
    }

    #[test]
    fn test_targets_are_independent() {
        let mut session = ExportSession::new();
        let setup = PageSetup {
            table_of_contents: true,
            ..PageSetup::default()
        };
        session.update_page_setup(PageTarget::Document, setup.clone());
        assert_eq!(session.page_setup(PageTarget::Document), &setup);
        assert!(!session.page_setup(PageTarget::Raster).table_of_contents);
    }

    #[test]
    fn test_preferences_round_trip() {
        let mut session = ExportSession::new();
        session.apply_preset("ocean");
        let restored = ExportSession::from_preferences(session.to_preferences());
        assert_eq!(restored.snapshot(), session.snapshot());
    }
}
