//! Page Setup - Named page sizes, orientation, margins and the derived geometry
//!
//! Every export target carries its own [`PageSetup`]. The geometry of a page
//! (outer size and the content area inside the margins) is never stored; it
//! is resolved from the setup at the start of each export.

use crate::units::Millimeters;
use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Page Size Presets
// =============================================================================

/// Standard page size presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizePreset {
    /// A4 (210mm x 297mm)
    #[default]
    A4,
    /// A3 (297mm x 420mm)
    A3,
    /// A5 (148mm x 210mm)
    A5,
    /// US Letter (8.5" x 11")
    Letter,
    /// Legal (8.5" x 14")
    Legal,
    /// Tabloid (11" x 17")
    Tabloid,
}

impl PageSizePreset {
    pub const ALL: [PageSizePreset; 6] = [
        PageSizePreset::A4,
        PageSizePreset::A3,
        PageSizePreset::A5,
        PageSizePreset::Letter,
        PageSizePreset::Legal,
        PageSizePreset::Tabloid,
    ];

    /// Portrait dimensions (width, height) in millimeters
    pub fn dimensions(&self) -> (Millimeters, Millimeters) {
        let (w, h) = match self {
            PageSizePreset::A4 => (210.0, 297.0),
            PageSizePreset::A3 => (297.0, 420.0),
            PageSizePreset::A5 => (148.0, 210.0),
            PageSizePreset::Letter => (215.9, 279.4),
            PageSizePreset::Legal => (215.9, 355.6),
            PageSizePreset::Tabloid => (279.4, 431.8),
        };
        (Millimeters(w), Millimeters(h))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageSizePreset::A4 => "a4",
            PageSizePreset::A3 => "a3",
            PageSizePreset::A5 => "a5",
            PageSizePreset::Letter => "letter",
            PageSizePreset::Legal => "legal",
            PageSizePreset::Tabloid => "tabloid",
        }
    }
}

impl fmt::Display for PageSizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageSizePreset {
    type Err = DocModelError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        PageSizePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == lowered)
            .ok_or_else(|| DocModelError::UnknownPageSize(s.to_string()))
    }
}

// =============================================================================
// Orientation
// =============================================================================

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply orientation to portrait dimensions. Landscape swaps them.
    pub fn apply(&self, width: Millimeters, height: Millimeters) -> (Millimeters, Millimeters) {
        match self {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = DocModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(DocModelError::UnknownOrientation(s.to_string())),
        }
    }
}

// =============================================================================
// Page Margins
// =============================================================================

/// Page margin configuration in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top: Millimeters,
    pub bottom: Millimeters,
    pub left: Millimeters,
    pub right: Millimeters,
}

impl PageMargins {
    /// The same margin on all four sides
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: Millimeters(margin),
            bottom: Millimeters(margin),
            left: Millimeters(margin),
            right: Millimeters(margin),
        }
    }

    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top: Millimeters(top),
            bottom: Millimeters(bottom),
            left: Millimeters(left),
            right: Millimeters(right),
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

// =============================================================================
// Page Setup
// =============================================================================

/// Per-target page configuration, as submitted through the page setup form.
///
/// The font, line height and table of contents fields only affect the
/// structured document target; the raster targets ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub page_size: PageSizePreset,
    pub orientation: Orientation,
    pub margins: PageMargins,
    pub page_numbers: bool,
    pub font_family: String,
    /// Body font size in points
    pub font_size: f64,
    pub line_height: f64,
    pub table_of_contents: bool,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            page_size: PageSizePreset::A4,
            orientation: Orientation::Portrait,
            margins: PageMargins::default(),
            page_numbers: false,
            font_family: "Arial".to_string(),
            font_size: 12.0,
            line_height: 1.5,
            table_of_contents: false,
        }
    }
}

impl PageSetup {
    /// Resolve the page geometry for this setup
    pub fn geometry(&self) -> Result<PageGeometry> {
        PageGeometry::resolve(self.page_size, self.orientation, &self.margins)
    }
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Resolved page geometry in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: Millimeters,
    pub height: Millimeters,
    pub content_width: Millimeters,
    pub content_height: Millimeters,
    /// Margins the content area was derived from
    pub margins: PageMargins,
}

impl PageGeometry {
    /// Resolve a named page size, orientation and margins into a geometry.
    ///
    /// Orientation is applied before the margins are subtracted. A content
    /// area with a non-positive (or NaN) side is rejected.
    pub fn resolve(
        page_size: PageSizePreset,
        orientation: Orientation,
        margins: &PageMargins,
    ) -> Result<PageGeometry> {
        let (base_width, base_height) = page_size.dimensions();
        let (width, height) = orientation.apply(base_width, base_height);

        let content_width = width - margins.left - margins.right;
        let content_height = height - margins.top - margins.bottom;

        if !(content_width.get() > 0.0 && content_height.get() > 0.0) {
            return Err(DocModelError::InvalidGeometry {
                content_width: content_width.get(),
                content_height: content_height.get(),
            });
        }

        Ok(PageGeometry {
            width,
            height,
            content_width,
            content_height,
            margins: *margins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_a4_portrait_geometry() {
        let geometry =
            PageGeometry::resolve(PageSizePreset::A4, Orientation::Portrait, &PageMargins::uniform(20.0))
                .unwrap();
        assert_eq!(geometry.width, Millimeters(210.0));
        assert_eq!(geometry.height, Millimeters(297.0));
        assert_eq!(geometry.content_width, Millimeters(170.0));
        assert_eq!(geometry.content_height, Millimeters(257.0));
    }

    #[test]
    fn test_letter_landscape_geometry() {
        let margins = PageMargins::new(10.0, 10.0, 15.0, 15.0);
        let geometry =
            PageGeometry::resolve(PageSizePreset::Letter, Orientation::Landscape, &margins).unwrap();
        assert_eq!(geometry.width, Millimeters(279.4));
        assert_eq!(geometry.height, Millimeters(215.9));
        assert!((geometry.content_width.get() - 249.4).abs() < 1e-9);
        assert!((geometry.content_height.get() - 195.9).abs() < 1e-9);
    }

    #[test]
    fn test_margins_consuming_page_are_rejected() {
        let margins = PageMargins::new(150.0, 150.0, 20.0, 20.0);
        let result = PageGeometry::resolve(PageSizePreset::A4, Orientation::Portrait, &margins);
        assert!(matches!(result, Err(DocModelError::InvalidGeometry { .. })));

        let margins = PageMargins::new(20.0, 20.0, 105.0, 105.0);
        let result = PageGeometry::resolve(PageSizePreset::A4, Orientation::Portrait, &margins);
        assert!(matches!(result, Err(DocModelError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_nan_margin_is_rejected() {
        let margins = PageMargins::new(f64::NAN, 20.0, 20.0, 20.0);
        let result = PageGeometry::resolve(PageSizePreset::A5, Orientation::Portrait, &margins);
        assert!(result.is_err());
    }

    #[test]
    fn test_all_preset_dimensions() {
        let expected = [
            (PageSizePreset::A4, 210.0, 297.0),
            (PageSizePreset::A3, 297.0, 420.0),
            (PageSizePreset::A5, 148.0, 210.0),
            (PageSizePreset::Letter, 215.9, 279.4),
            (PageSizePreset::Legal, 215.9, 355.6),
            (PageSizePreset::Tabloid, 279.4, 431.8),
        ];
        for (preset, w, h) in expected {
            assert_eq!(preset.dimensions(), (Millimeters(w), Millimeters(h)));
        }
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!("A4".parse::<PageSizePreset>().unwrap(), PageSizePreset::A4);
        assert_eq!(" tabloid ".parse::<PageSizePreset>().unwrap(), PageSizePreset::Tabloid);
        assert!("b5".parse::<PageSizePreset>().is_err());
        assert_eq!("Landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert!("sideways".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_page_setup_serialization() {
        let setup = PageSetup::default();
        let json = serde_json::to_string(&setup).unwrap();
        assert!(json.contains("\"pageSize\":\"a4\""));
        assert!(json.contains("\"tableOfContents\":false"));

        let partial: PageSetup =
            serde_json::from_str(r#"{"pageSize":"legal","orientation":"landscape"}"#).unwrap();
        assert_eq!(partial.page_size, PageSizePreset::Legal);
        assert_eq!(partial.orientation, Orientation::Landscape);
        assert_eq!(partial.margins, PageMargins::default());
        assert_eq!(partial.font_size, 12.0);
    }

    fn any_preset() -> impl Strategy<Value = PageSizePreset> {
        prop::sample::select(PageSizePreset::ALL.to_vec())
    }

    fn any_orientation() -> impl Strategy<Value = Orientation> {
        prop::sample::select(vec![Orientation::Portrait, Orientation::Landscape])
    }

    proptest! {
        #[test]
        fn geometry_content_area_matches_margins(
            preset in any_preset(),
            orientation in any_orientation(),
            top in 0.0f64..60.0,
            bottom in 0.0f64..60.0,
            left in 0.0f64..60.0,
            right in 0.0f64..60.0,
        ) {
            let margins = PageMargins::new(top, bottom, left, right);
            let geometry = PageGeometry::resolve(preset, orientation, &margins).unwrap();
            prop_assert!((geometry.content_width.get() - (geometry.width.get() - left - right)).abs() < 1e-9);
            prop_assert!((geometry.content_height.get() - (geometry.height.get() - top - bottom)).abs() < 1e-9);
            prop_assert!(geometry.content_width.get() > 0.0);
            prop_assert!(geometry.content_height.get() > 0.0);
        }

        #[test]
        fn landscape_is_portrait_transposed(preset in any_preset()) {
            let margins = PageMargins::uniform(0.0);
            let portrait = PageGeometry::resolve(preset, Orientation::Portrait, &margins).unwrap();
            let landscape = PageGeometry::resolve(preset, Orientation::Landscape, &margins).unwrap();
            prop_assert_eq!(portrait.width, landscape.height);
            prop_assert_eq!(portrait.height, landscape.width);
        }
    }
}
