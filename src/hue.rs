//! Hue rotation of RGBA images.

use image::{DynamicImage, RgbaImage};
use palette::{Hsv, IntoColor, Srgb};

// ============================================================================
// HueShift
// ============================================================================

/// A signed hue rotation in degrees.
///
/// Any integer is accepted; rotations are applied modulo 360.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HueShift {
    pub degrees: i32,
}

impl HueShift {
    pub fn new(degrees: i32) -> Self {
        Self { degrees }
    }

    /// Returns the rotation reduced to the 0-360 range.
    pub fn normalized(&self) -> i32 {
        self.degrees.rem_euclid(360)
    }

    /// Returns true if this rotation leaves every hue where it is.
    pub fn is_identity(&self) -> bool {
        self.normalized() == 0
    }

    /// Applies this rotation to an image. See [`shift_hue`].
    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        shift_hue(image, self.degrees)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Converts any decoded image to RGBA.
///
/// Images without transparency get a fully opaque alpha channel.
pub fn to_rgba(image: DynamicImage) -> RgbaImage {
    image.into_rgba8()
}

/// Rotates the hue of every pixel by `degrees`.
///
/// Saturation and value are carried through the HSV round trip unchanged and
/// the alpha byte of each pixel is copied as-is. A zero rotation returns an
/// untouched copy of the input.
pub fn shift_hue(image: &RgbaImage, degrees: i32) -> RgbaImage {
    if degrees == 0 {
        return image.clone();
    }

    let rotation = degrees.rem_euclid(360) as f32;
    let mut result = image.clone();

    for pixel in result.pixels_mut() {
        let [r, g, b, a] = pixel.0;

        let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let mut hsv: Hsv = rgb.into_color();
        hsv.hue += rotation;
        let rotated: Srgb = hsv.into_color();

        pixel.0 = [
            to_channel(rotated.red),
            to_channel(rotated.green),
            to_channel(rotated.blue),
            a,
        ];
    }

    result
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ============================================================================
// Tests
// ============================================================================
