//! Visual settings and the built-in theme presets
//!
//! [`Settings`] is an immutable value. Changing the look of an export means
//! producing a new value, either from a form submission or by selecting one
//! of the named presets, which replace every field at once.

use serde::{Deserialize, Serialize};

/// Visual properties applied to the preview before image export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Heading size multipliers in `em`
    pub h1_size: f64,
    pub h2_size: f64,
    pub h3_size: f64,
    pub heading_color: String,
    pub body_color: String,
    /// Body font size in pixels
    pub body_size: f64,
    pub heading_font: String,
    pub body_font: String,
    pub background1: String,
    pub background2: String,
    /// Code font size in pixels
    pub code_size: f64,
    pub code_bg: String,
    pub code_text: String,
    pub code_font: String,
    /// Table font size in pixels
    pub table_size: f64,
    pub border_color: String,
    pub header_bg: String,
    pub header_text: String,
    pub cell_bg: String,
    pub cell_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            h1_size: 1.8,
            h2_size: 1.5,
            h3_size: 1.25,
            heading_color: "#333333".to_string(),
            body_color: "#333333".to_string(),
            body_size: 15.0,
            heading_font: "PingFang SC".to_string(),
            body_font: "PingFang SC".to_string(),
            background1: "#f8f9fa".to_string(),
            background2: "#ffffff".to_string(),
            code_size: 14.0,
            code_bg: "#f6f8fa".to_string(),
            code_text: "#24292e".to_string(),
            code_font: "Monaco".to_string(),
            table_size: 14.0,
            border_color: "#d0d7de".to_string(),
            header_bg: "#f6f8fa".to_string(),
            header_text: "#24292e".to_string(),
            cell_bg: "#ffffff".to_string(),
            cell_text: "#24292e".to_string(),
        }
    }
}

impl Settings {
    /// Heading size multiplier for a heading level.
    ///
    /// Levels 4 to 6 scale down from the `h3` size; anything else uses it as is.
    pub fn heading_scale(&self, level: u8) -> f64 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            3 => self.h3_size,
            4 => self.h3_size * 0.9,
            5 => self.h3_size * 0.8,
            6 => self.h3_size * 0.7,
            _ => self.h3_size,
        }
    }

    /// The settings of a named preset, if it exists
    pub fn preset(name: &str) -> Option<Settings> {
        ThemePreset::find(name).map(ThemePreset::settings)
    }
}

/// Colors and fonts that differ between presets
struct Palette {
    heading_color: &'static str,
    body_color: &'static str,
    font: &'static str,
    background1: &'static str,
    background2: &'static str,
    code_bg: &'static str,
    code_text: &'static str,
    code_font: &'static str,
    border_color: &'static str,
    header_bg: &'static str,
    header_text: &'static str,
    cell_bg: &'static str,
    cell_text: &'static str,
}

impl Palette {
    fn into_settings(self) -> Settings {
        Settings {
            heading_color: self.heading_color.to_string(),
            body_color: self.body_color.to_string(),
            heading_font: self.font.to_string(),
            body_font: self.font.to_string(),
            background1: self.background1.to_string(),
            background2: self.background2.to_string(),
            code_bg: self.code_bg.to_string(),
            code_text: self.code_text.to_string(),
            code_font: self.code_font.to_string(),
            border_color: self.border_color.to_string(),
            header_bg: self.header_bg.to_string(),
            header_text: self.header_text.to_string(),
            cell_bg: self.cell_bg.to_string(),
            cell_text: self.cell_text.to_string(),
            ..Settings::default()
        }
    }
}

/// Built-in named themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    Light,
    Warm,
    Elegant,
    Dark,
    Gradient,
    Nature,
    Sunset,
    Ocean,
    Mint,
    Tiffany,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 10] = [
        ThemePreset::Light,
        ThemePreset::Warm,
        ThemePreset::Elegant,
        ThemePreset::Dark,
        ThemePreset::Gradient,
        ThemePreset::Nature,
        ThemePreset::Sunset,
        ThemePreset::Ocean,
        ThemePreset::Mint,
        ThemePreset::Tiffany,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Light => "light",
            ThemePreset::Warm => "warm",
            ThemePreset::Elegant => "elegant",
            ThemePreset::Dark => "dark",
            ThemePreset::Gradient => "gradient",
            ThemePreset::Nature => "nature",
            ThemePreset::Sunset => "sunset",
            ThemePreset::Ocean => "ocean",
            ThemePreset::Mint => "mint",
            ThemePreset::Tiffany => "tiffany",
        }
    }

    /// Look up a preset by its exact name
    pub fn find(name: &str) -> Option<ThemePreset> {
        ThemePreset::ALL.into_iter().find(|preset| preset.name() == name)
    }

    pub fn settings(self) -> Settings {
        match self {
            ThemePreset::Light => Palette {
                heading_color: "#333333",
                body_color: "#333333",
                font: "Arial",
                background1: "#ffffff",
                background2: "#f8f9fa",
                code_bg: "#f6f8fa",
                code_text: "#24292e",
                code_font: "Monaco",
                border_color: "#d0d7de",
                header_bg: "#f6f8fa",
                header_text: "#24292e",
                cell_bg: "#ffffff",
                cell_text: "#24292e",
            }
            .into_settings(),
            ThemePreset::Warm => Palette {
                heading_color: "#8B4513",
                body_color: "#5D4037",
                font: "Georgia",
                background1: "#FFF8DC",
                background2: "#F5F5DC",
                code_bg: "#F0E68C",
                code_text: "#8B4513",
                code_font: "Courier New",
                border_color: "#D2B48C",
                header_bg: "#F0E68C",
                header_text: "#8B4513",
                cell_bg: "#FFF8DC",
                cell_text: "#5D4037",
            }
            .into_settings(),
            ThemePreset::Elegant => Settings {
                h1_size: 2.0,
                h2_size: 1.6,
                h3_size: 1.3,
                body_size: 16.0,
                ..Palette {
                    heading_color: "#2C3E50",
                    body_color: "#34495E",
                    font: "Times New Roman",
                    background1: "#FDFDFD",
                    background2: "#F8F9FA",
                    code_bg: "#ECF0F1",
                    code_text: "#2C3E50",
                    code_font: "Consolas",
                    border_color: "#BDC3C7",
                    header_bg: "#ECF0F1",
                    header_text: "#2C3E50",
                    cell_bg: "#FDFDFD",
                    cell_text: "#34495E",
                }
                .into_settings()
            },
            ThemePreset::Dark => Palette {
                heading_color: "#E8E8E8",
                body_color: "#D0D0D0",
                font: "Arial",
                background1: "#2D2D2D",
                background2: "#1E1E1E",
                code_bg: "#3C3C3C",
                code_text: "#E8E8E8",
                code_font: "Monaco",
                border_color: "#555555",
                header_bg: "#3C3C3C",
                header_text: "#E8E8E8",
                cell_bg: "#2D2D2D",
                cell_text: "#D0D0D0",
            }
            .into_settings(),
            ThemePreset::Gradient => Palette {
                heading_color: "#4A90E2",
                body_color: "#333333",
                font: "Arial",
                background1: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
                background2: "#ffffff",
                code_bg: "#F0F4F8",
                code_text: "#2D3748",
                code_font: "Monaco",
                border_color: "#E2E8F0",
                header_bg: "#F0F4F8",
                header_text: "#2D3748",
                cell_bg: "#ffffff",
                cell_text: "#333333",
            }
            .into_settings(),
            ThemePreset::Nature => Palette {
                heading_color: "#2D5016",
                body_color: "#3E5C2A",
                font: "Georgia",
                background1: "#F0F8F0",
                background2: "#E8F5E8",
                code_bg: "#D4E6D4",
                code_text: "#2D5016",
                code_font: "Courier New",
                border_color: "#A8C8A8",
                header_bg: "#D4E6D4",
                header_text: "#2D5016",
                cell_bg: "#F0F8F0",
                cell_text: "#3E5C2A",
            }
            .into_settings(),
            ThemePreset::Sunset => Palette {
                heading_color: "#D2691E",
                body_color: "#8B4513",
                font: "Georgia",
                background1: "#FFF5EE",
                background2: "#FFE4B5",
                code_bg: "#FFE4B5",
                code_text: "#8B4513",
                code_font: "Courier New",
                border_color: "#DEB887",
                header_bg: "#FFE4B5",
                header_text: "#8B4513",
                cell_bg: "#FFF5EE",
                cell_text: "#8B4513",
            }
            .into_settings(),
            ThemePreset::Ocean => Palette {
                heading_color: "#0066CC",
                body_color: "#003366",
                font: "Arial",
                background1: "#F0F8FF",
                background2: "#E6F3FF",
                code_bg: "#CCE6FF",
                code_text: "#003366",
                code_font: "Monaco",
                border_color: "#99CCFF",
                header_bg: "#CCE6FF",
                header_text: "#003366",
                cell_bg: "#F0F8FF",
                cell_text: "#003366",
            }
            .into_settings(),
            ThemePreset::Mint => Palette {
                heading_color: "#006B6B",
                body_color: "#004D4D",
                font: "Arial",
                background1: "#F0FFFF",
                background2: "#E0FFFF",
                code_bg: "#B0E0E6",
                code_text: "#004D4D",
                code_font: "Monaco",
                border_color: "#87CEEB",
                header_bg: "#B0E0E6",
                header_text: "#004D4D",
                cell_bg: "#F0FFFF",
                cell_text: "#004D4D",
            }
            .into_settings(),
            ThemePreset::Tiffany => Palette {
                heading_color: "#0ABAB5",
                body_color: "#333333",
                font: "PingFang SC",
                background1: "#F0FDFC",
                background2: "#E6FFFE",
                code_bg: "#CCFBF1",
                code_text: "#0F766E",
                code_font: "Monaco",
                border_color: "#5EEAD4",
                header_bg: "#CCFBF1",
                header_text: "#0F766E",
                cell_bg: "#F0FDFC",
                cell_text: "#333333",
            }
            .into_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.h1_size, 1.8);
        assert_eq!(settings.body_size, 15.0);
        assert_eq!(settings.body_font, "PingFang SC");
        assert_eq!(settings.background1, "#f8f9fa");
        assert_eq!(settings.code_font, "Monaco");
    }

    #[test]
    fn test_heading_scale() {
        let settings = Settings::default();
        assert_eq!(settings.heading_scale(1), 1.8);
        assert_eq!(settings.heading_scale(3), 1.25);
        assert_eq!(settings.heading_scale(4), 1.25 * 0.9);
        assert_eq!(settings.heading_scale(6), 1.25 * 0.7);
        assert_eq!(settings.heading_scale(9), 1.25);
    }

    #[test]
    fn test_every_preset_is_findable() {
        for preset in ThemePreset::ALL {
            assert_eq!(ThemePreset::find(preset.name()), Some(preset));
            assert!(Settings::preset(preset.name()).is_some());
        }
        assert_eq!(ThemePreset::find("Dark"), None);
    }

    #[test]
    fn test_elegant_overrides_sizes() {
        let elegant = ThemePreset::Elegant.settings();
        assert_eq!(elegant.h1_size, 2.0);
        assert_eq!(elegant.h3_size, 1.3);
        assert_eq!(elegant.body_size, 16.0);
        assert_eq!(elegant.heading_font, "Times New Roman");
        assert_eq!(elegant.code_size, 14.0);
    }

    #[test]
    fn test_settings_json_uses_camel_case_and_fills_missing_fields() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"h1Size\":1.8"));
        assert!(json.contains("\"codeBg\":\"#f6f8fa\""));

        let partial: Settings = serde_json::from_str(r#"{"bodySize":18}"#).unwrap();
        assert_eq!(partial.body_size, 18.0);
        assert_eq!(partial.cell_text, "#24292e");
    }
}
