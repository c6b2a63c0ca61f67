//! The fixed table of color variants.

use crate::error::{Error, Result};
use crate::hue::HueShift;

/// One named color derivative of the base icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorVariant {
    /// Directory name and identifier, e.g. `"indigo"`.
    pub name: &'static str,
    /// Hue rotation relative to the base icon, which counts as zero.
    pub degrees: i32,
    /// Title bar accent color paired with this variant in the desktop app.
    pub accent: [u8; 3],
}

/// Every variant, in generation order.
///
/// The base icon is green, so green carries no rotation.
pub static COLOR_VARIANTS: [ColorVariant; 7] = [
    ColorVariant::new("red", -120, [0xe5, 0x3e, 0x3e]),
    ColorVariant::new("orange", -90, [0xed, 0x89, 0x36]),
    ColorVariant::new("yellow", -60, [0xec, 0xc9, 0x4b]),
    ColorVariant::new("green", 0, [0x38, 0xa1, 0x69]),
    ColorVariant::new("blue", 120, [0x31, 0x82, 0xce]),
    ColorVariant::new("indigo", 155, [0x5a, 0x67, 0xd8]),
    ColorVariant::new("violet", 180, [0x9f, 0x7a, 0xea]),
];

impl ColorVariant {
    const fn new(name: &'static str, degrees: i32, accent: [u8; 3]) -> Self {
        Self {
            name,
            degrees,
            accent,
        }
    }

    /// Looks up a variant by name.
    pub fn from_name(name: &str) -> Option<&'static ColorVariant> {
        COLOR_VARIANTS.iter().find(|v| v.name == name)
    }

    pub fn hue_shift(&self) -> HueShift {
        HueShift::new(self.degrees)
    }

    /// Returns the accent color with channels in the 0.0-1.0 range.
    pub fn accent_rgb_f64(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.accent;
        (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

/// Like [`ColorVariant::from_name`], but unknown names are an error.
pub fn validate_variant_name(name: &str) -> Result<&'static ColorVariant> {
    ColorVariant::from_name(name).ok_or_else(|| Error::UnknownVariant(name.to_string()))
}
