//! icon-variants: Color variants of an application icon
//!
//! This crate rotates the hue of a base icon to produce a fixed set of
//! color variants, then hands each one to an external packaging tool
//! (`cargo tauri icon` by default) to emit the platform icon sizes. When
//! the tool fails, a minimal set of PNG renditions is written locally.
//!
//! # Example
//!
//! ```
//! use icon_variants::{shift_hue, ColorVariant};
//! use image::{Rgba, RgbaImage};
//!
//! let base = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 128]));
//! let blue = ColorVariant::from_name("blue").unwrap();
//!
//! let shifted = shift_hue(&base, blue.degrees);
//! assert_eq!(shifted.get_pixel(0, 0).0, [0, 255, 0, 128]);
//! ```
//!
//! # Running the pipeline
//!
//! ```no_run
//! use std::path::Path;
//! use icon_variants::{GeneratorConfig, VariantPipeline};
//!
//! let root = Path::new(".");
//! let config = GeneratorConfig::new();
//!
//! let pipeline = VariantPipeline::new(config.paths(root));
//! let report = pipeline.generate_all(&config.packager(root))?;
//! print!("{}", report);
//! # Ok::<(), icon_variants::Error>(())
//! ```

mod config;
mod error;
mod hue;
mod icon;
mod packager;
mod pipeline;
mod variant;

pub use config::{GeneratorConfig, PackagerSettings};
pub use error::{Error, Result};
pub use hue::{HueShift, shift_hue, to_rgba};
pub use icon::{
    FALLBACK_RENDITIONS, Rendition, SOURCE_ICON_FILE, SizePx, load_icon, resize_square, save_png,
    variant_icon_path, write_fallback_renditions,
};
pub use packager::{CommandPackager, Packager, PackagerOutput};
pub use pipeline::{GenerationReport, PipelinePaths, VariantOutcome, VariantPipeline, VariantReport};
pub use variant::{COLOR_VARIANTS, ColorVariant, validate_variant_name};
