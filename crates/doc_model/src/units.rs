//! Measurement units used across the export pipeline
//!
//! Each unit is a distinct type so a millimeter value can never be handed to
//! code expecting points. Conversions happen in exactly one place each.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Structured-document page units per millimeter.
pub const POINTS_PER_MM: f64 = 28.35;

/// PDF user space units (1/72 inch) per millimeter.
pub const PDF_UNITS_PER_MM: f64 = 72.0 / 25.4;

/// Length in device pixels of a rasterized bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Pixels(pub u32);

impl Pixels {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Physical length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl Millimeters {
    pub const ZERO: Millimeters = Millimeters(0.0);

    pub fn get(self) -> f64 {
        self.0
    }

    /// Convert to the structured-document page unit (`mm * 28.35`)
    pub fn to_points(self) -> Points {
        Points(self.0 * POINTS_PER_MM)
    }

    /// Convert to PDF user space units
    pub fn to_pdf_units(self) -> f64 {
        self.0 * PDF_UNITS_PER_MM
    }
}

impl Add for Millimeters {
    type Output = Millimeters;

    fn add(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Millimeters;

    fn sub(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 - rhs.0)
    }
}

impl Mul<f64> for Millimeters {
    type Output = Millimeters;

    fn mul(self, rhs: f64) -> Millimeters {
        Millimeters(self.0 * rhs)
    }
}

/// Length in points, used for the structured document's page setup and font sizes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(pub f64);

impl Points {
    pub fn get(self) -> f64 {
        self.0
    }

    /// Font sizes in the structured document are expressed in half-points
    pub fn to_half_points(self) -> HalfPoints {
        HalfPoints(self.0 * 2.0)
    }

    /// Nearest whole value, as written into document attributes
    pub fn rounded(self) -> i64 {
        self.0.round() as i64
    }
}

/// Run size in half-points
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HalfPoints(pub f64);

impl HalfPoints {
    pub fn get(self) -> f64 {
        self.0
    }

    pub fn rounded(self) -> u32 {
        self.0.round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeters_to_points() {
        assert!((Millimeters(170.0).to_points().get() - 4819.5).abs() < 1e-9);
        assert_eq!(Millimeters(0.0).to_points(), Points(0.0));
    }

    #[test]
    fn test_points_to_half_points() {
        assert_eq!(Points(12.0).to_half_points(), HalfPoints(24.0));
        assert_eq!(Points(10.5).to_half_points().rounded(), 21);
    }

    #[test]
    fn test_pdf_units() {
        assert!((Millimeters(25.4).to_pdf_units() - 72.0).abs() < 1e-9);
        assert!((Millimeters(210.0).to_pdf_units() - 595.2756).abs() < 1e-3);
    }

    #[test]
    fn test_millimeter_arithmetic() {
        let width = Millimeters(210.0) - Millimeters(20.0) - Millimeters(20.0);
        assert_eq!(width, Millimeters(170.0));
        assert_eq!(Millimeters(2.0) * 1.5, Millimeters(3.0));
        assert_eq!(Millimeters(1.0) + Millimeters(2.0), Millimeters(3.0));
    }
}
