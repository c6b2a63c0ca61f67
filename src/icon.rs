//! Icon files on disk and the renditions written from them.
//!
//! A variant directory always holds the full-resolution source
//! ([`SOURCE_ICON_FILE`]). The packaging tool adds the platform icon set next
//! to it; when it cannot, [`write_fallback_renditions`] writes the minimal
//! three-size set described by [`FALLBACK_RENDITIONS`].

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::hue::to_rgba;

/// File name of the full-resolution icon, both for the base and each variant.
pub const SOURCE_ICON_FILE: &str = "icon.png";

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a size with equal width and height.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Returns the size of an image.
    pub fn of(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// A single square PNG written into a variant directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendition {
    /// Edge length in pixels.
    pub size: u32,
    /// File name inside the variant directory.
    pub file_name: &'static str,
}

impl Rendition {
    pub const fn new(size: u32, file_name: &'static str) -> Self {
        Self { size, file_name }
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::square(self.size)
    }
}

/// Renditions written when the packaging tool fails.
///
/// The `@2x` file is the 256px image, matching the retina naming of the
/// 128px slot.
pub const FALLBACK_RENDITIONS: [Rendition; 3] = [
    Rendition::new(32, "32x32.png"),
    Rendition::new(128, "128x128.png"),
    Rendition::new(256, "128x128@2x.png"),
];

/// Decodes an icon file as RGBA.
pub fn load_icon(path: &Path) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|e| Error::image(path, e))?;
    Ok(to_rgba(decoded))
}

/// Encodes an image as PNG, replacing any existing file.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::image(path, e))
}

/// Resamples an image to `size x size` with a Lanczos filter.
pub fn resize_square(image: &RgbaImage, size: u32) -> RgbaImage {
    imageops::resize(image, size, size, FilterType::Lanczos3)
}

/// Writes every [`FALLBACK_RENDITIONS`] entry into `dir`.
///
/// Existing files with the same names are overwritten. Returns the written
/// paths in table order.
pub fn write_fallback_renditions(image: &RgbaImage, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(FALLBACK_RENDITIONS.len());
    for rendition in &FALLBACK_RENDITIONS {
        let path = dir.join(rendition.file_name);
        save_png(&resize_square(image, rendition.size), &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Resolves the icon the desktop app loads for a variant's dock icon.
///
/// Returns `None` when the variant has not been generated yet.
pub fn variant_icon_path(colors_dir: &Path, variant: &str) -> Option<PathBuf> {
    Some(colors_dir.join(variant).join(FALLBACK_RENDITIONS[2].file_name)).filter(|p| p.exists())
}
