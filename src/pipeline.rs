//! Variant generation pipeline.
//!
//! For each entry of [`COLOR_VARIANTS`] the pipeline:
//!
//! 1. Creates `<colors>/<name>/`
//! 2. Rotates the base icon's hue and saves it as `icon.png`
//! 3. Asks the [`Packager`] for the platform icon set
//! 4. Writes the fallback renditions if the packager failed
//!
//! Variants are processed one at a time. A packager failure is recovered
//! locally and never stops the batch; any other error ends the run.

use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::hue::shift_hue;
use crate::icon::{self, SOURCE_ICON_FILE};
use crate::packager::{Packager, PackagerOutput};
use crate::variant::{COLOR_VARIANTS, ColorVariant};

/// Number of file names shown per variant in the summary.
const SUMMARY_FILE_LIMIT: usize = 5;

// ============================================================================
// Paths
// ============================================================================

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    /// The base icon every variant is derived from.
    pub base_icon: PathBuf,
    /// Parent of the per-variant directories.
    pub colors_dir: PathBuf,
}

impl PipelinePaths {
    /// Lays out `<root>/<icons_dir>/icon.png` and `<root>/<icons_dir>/colors`.
    pub fn new(root: &Path, icons_dir: &Path) -> Self {
        let icons = root.join(icons_dir);
        Self {
            base_icon: icons.join(SOURCE_ICON_FILE),
            colors_dir: icons.join("colors"),
        }
    }

    /// Output directory of one variant.
    pub fn variant_dir(&self, variant: &ColorVariant) -> PathBuf {
        self.colors_dir.join(variant.name)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// How a variant's platform icons were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantOutcome {
    /// The packaging tool succeeded.
    Packaged,
    /// The packaging tool failed and the fallback renditions were written.
    FellBack { output: PackagerOutput },
}

impl VariantOutcome {
    pub fn fell_back(&self) -> bool {
        matches!(self, Self::FellBack { .. })
    }
}

/// Result of generating one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub variant: &'static ColorVariant,
    pub dir: PathBuf,
    pub outcome: VariantOutcome,
}

impl VariantReport {
    /// Names of the files in the variant directory, sorted.
    pub fn listing(&self) -> Result<Vec<String>> {
        list_files(&self.dir)
    }
}

/// Result of a full run, in table order.
///
/// The `Display` impl renders the closing summary: one line per variant with
/// the first few file names found in its directory, or the error that kept
/// the directory from being read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    pub variants: Vec<VariantReport>,
}

impl GenerationReport {
    pub fn get(&self, name: &str) -> Option<&VariantReport> {
        self.variants.iter().find(|r| r.variant.name == name)
    }

    /// Variants that had to use the fallback renditions.
    pub fn fallbacks(&self) -> impl Iterator<Item = &VariantReport> {
        self.variants.iter().filter(|r| r.outcome.fell_back())
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated icon variants:")?;
        for report in &self.variants {
            let files = match report.listing() {
                Ok(files) => files,
                Err(e) => {
                    writeln!(f, "  {}/: <{}>", report.variant.name, e)?;
                    continue;
                }
            };
            let more = if files.len() > SUMMARY_FILE_LIMIT { "..." } else { "" };
            let shown: Vec<_> = files.iter().take(SUMMARY_FILE_LIMIT).map(String::as_str).collect();
            writeln!(f, "  {}/: {}{}", report.variant.name, shown.join(", "), more)?;
        }
        Ok(())
    }
}

// ============================================================================
// VariantPipeline
// ============================================================================

/// Generates every color variant of a base icon.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use icon_variants::{CommandPackager, PipelinePaths, VariantPipeline};
///
/// let root = Path::new(".");
/// let paths = PipelinePaths::new(root, Path::new("src-tauri/icons"));
/// let packager = CommandPackager::tauri(root.join("src-tauri"));
///
/// let report = VariantPipeline::new(paths).generate_all(&packager)?;
/// println!("{}", report);
/// # Ok::<(), icon_variants::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VariantPipeline {
    paths: PipelinePaths,
}

impl VariantPipeline {
    pub fn new(paths: PipelinePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PipelinePaths {
        &self.paths
    }

    /// Generates all variants.
    ///
    /// Fails with [`Error::BaseIconMissing`] before touching the output
    /// directory if the base icon does not exist.
    pub fn generate_all<P: Packager + ?Sized>(&self, packager: &P) -> Result<GenerationReport> {
        let base_path = &self.paths.base_icon;
        if !base_path.exists() {
            return Err(Error::BaseIconMissing(base_path.clone()));
        }

        // Decoded once; `shift_hue` never mutates its input.
        let base = icon::load_icon(base_path)?;
        debug!("loaded base icon {}x{}", base.width(), base.height());

        let mut report = GenerationReport::default();
        for variant in &COLOR_VARIANTS {
            report
                .variants
                .push(self.generate_variant(&base, variant, packager)?);
        }
        Ok(report)
    }

    /// Generates a single variant from an already decoded base icon.
    pub fn generate_variant<P: Packager + ?Sized>(
        &self,
        base: &RgbaImage,
        variant: &'static ColorVariant,
        packager: &P,
    ) -> Result<VariantReport> {
        let dir = self.paths.variant_dir(variant);
        std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

        info!("  Generating {} (shift: {:+} deg)...", variant.name, variant.degrees);

        let shifted = shift_hue(base, variant.degrees);
        let source = dir.join(SOURCE_ICON_FILE);
        icon::save_png(&shifted, &source)?;

        let output = packager.package(&source, &dir);
        let outcome = if output.success() {
            info!("    OK");
            debug!("{}", output.stdout.trim());
            VariantOutcome::Packaged
        } else {
            warn!("    Packaging failed for {}:", variant.name);
            warn!("    {}", output.diagnostics());
            warn!("    Falling back to manual resize...");
            icon::write_fallback_renditions(&shifted, &dir)?;
            VariantOutcome::FellBack { output }
        };

        Ok(VariantReport {
            variant,
            dir,
            outcome,
        })
    }
}

/// Lists the regular files in `dir` by name, sorted.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| Error::io(entry.path(), e))?
            .is_file();
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{FALLBACK_RENDITIONS, SizePx, load_icon, save_png};
    use image::Rgba;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Fails every run, like a machine without the Tauri CLI.
    struct AlwaysFails;

    impl Packager for AlwaysFails {
        fn package(&self, _source: &Path, _output_dir: &Path) -> PackagerOutput {
            PackagerOutput::exited(1, "", "error: no such command: `tauri`")
        }
    }

    /// Fails for one variant and writes a stub icon set for the rest.
    struct FailsFor {
        name: &'static str,
        calls: RefCell<Vec<PathBuf>>,
    }

    impl FailsFor {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Packager for FailsFor {
        fn package(&self, source: &Path, output_dir: &Path) -> PackagerOutput {
            assert!(source.exists(), "source must be written before packaging");
            self.calls.borrow_mut().push(output_dir.to_path_buf());

            if output_dir.ends_with(self.name) {
                return PackagerOutput::exited(101, "", "packaging exploded");
            }
            std::fs::write(output_dir.join("icon.icns"), b"icns").unwrap();
            std::fs::write(output_dir.join("icon.ico"), b"ico").unwrap();
            PackagerOutput::exited(0, "done", "")
        }
    }

    /// A project with a 64x64 green base icon.
    fn project() -> (TempDir, PipelinePaths) {
        let root = tempfile::tempdir().unwrap();
        let paths = project_in(root.path());
        (root, paths)
    }

    fn project_in(root: &Path) -> PipelinePaths {
        let paths = PipelinePaths::new(root, Path::new("src-tauri/icons"));
        std::fs::create_dir_all(paths.base_icon.parent().unwrap()).unwrap();

        let base = RgbaImage::from_fn(64, 64, |x, y| {
            let alpha = if x < 4 || y < 4 { 0 } else { 255 };
            Rgba([56, 161, (x * 2) as u8, alpha])
        });
        save_png(&base, &paths.base_icon).unwrap();
        paths
    }

    fn listing(dir: &Path) -> Vec<String> {
        list_files(dir).unwrap()
    }

    #[test]
    fn paths_layout() {
        let paths = PipelinePaths::new(Path::new("/app"), Path::new("src-tauri/icons"));
        assert_eq!(paths.base_icon, PathBuf::from("/app/src-tauri/icons/icon.png"));
        assert_eq!(
            paths.variant_dir(&COLOR_VARIANTS[0]),
            PathBuf::from("/app/src-tauri/icons/colors/red")
        );
    }

    #[test]
    fn missing_base_icon_is_fatal_and_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let paths = PipelinePaths::new(root.path(), Path::new("icons"));
        let packager = FailsFor::new("none");

        let result = VariantPipeline::new(paths.clone()).generate_all(&packager);

        match result {
            Err(Error::BaseIconMissing(path)) => assert_eq!(path, paths.base_icon),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(packager.calls.borrow().is_empty());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn failing_packager_falls_back_for_every_variant() {
        let (_root, paths) = project();
        let report = VariantPipeline::new(paths.clone())
            .generate_all(&AlwaysFails)
            .unwrap();

        assert_eq!(report.variants.len(), 7);
        assert_eq!(report.fallbacks().count(), 7);

        for variant in &COLOR_VARIANTS {
            let dir = paths.variant_dir(variant);
            assert_eq!(
                listing(&dir),
                ["128x128.png", "128x128@2x.png", "32x32.png", "icon.png"]
            );
            for rendition in &FALLBACK_RENDITIONS {
                let image = load_icon(&dir.join(rendition.file_name)).unwrap();
                assert_eq!(SizePx::of(&image), rendition.dimensions());
            }
        }

        let red = report.get("red").unwrap();
        match &red.outcome {
            VariantOutcome::FellBack { output } => {
                assert_eq!(output.exit_code, Some(1));
                assert!(output.diagnostics().contains("tauri"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn fallback_replaces_stale_output() {
        let (_root, paths) = project();
        let red = paths.variant_dir(&COLOR_VARIANTS[0]);
        std::fs::create_dir_all(&red).unwrap();
        std::fs::write(red.join("32x32.png"), b"truncated").unwrap();
        std::fs::write(red.join("128x128@2x.png"), b"").unwrap();

        VariantPipeline::new(paths).generate_all(&AlwaysFails).unwrap();

        assert_eq!(SizePx::of(&load_icon(&red.join("32x32.png")).unwrap()), SizePx::square(32));
        assert_eq!(
            SizePx::of(&load_icon(&red.join("128x128@2x.png")).unwrap()),
            SizePx::square(256)
        );
    }

    #[test]
    fn one_failure_does_not_abort_the_batch() {
        let (_root, paths) = project();
        let packager = FailsFor::new("indigo");

        let report = VariantPipeline::new(paths.clone())
            .generate_all(&packager)
            .unwrap();

        let called: Vec<_> = packager.calls.borrow().clone();
        let expected: Vec<_> = COLOR_VARIANTS.iter().map(|v| paths.variant_dir(v)).collect();
        assert_eq!(called, expected);

        let fell_back: Vec<_> = report.fallbacks().map(|r| r.variant.name).collect();
        assert_eq!(fell_back, ["indigo"]);

        assert_eq!(
            listing(&paths.colors_dir.join("indigo")),
            ["128x128.png", "128x128@2x.png", "32x32.png", "icon.png"]
        );
        for name in ["red", "orange", "yellow", "green", "blue", "violet"] {
            assert_eq!(
                listing(&paths.colors_dir.join(name)),
                ["icon.icns", "icon.ico", "icon.png"],
                "{} should hold the packager's output",
                name
            );
        }
    }

    #[test]
    fn variant_sources_are_hue_shifted_with_alpha_kept() {
        let (_root, paths) = project();
        VariantPipeline::new(paths.clone())
            .generate_all(&FailsFor::new("none"))
            .unwrap();

        let base = load_icon(&paths.base_icon).unwrap();
        let green = load_icon(&paths.colors_dir.join("green/icon.png")).unwrap();
        assert_eq!(green, base);

        let violet = load_icon(&paths.colors_dir.join("violet/icon.png")).unwrap();
        assert_eq!(violet, shift_hue(&base, 180));
        assert_ne!(violet.get_pixel(10, 10), base.get_pixel(10, 10));
        for (p, q) in base.pixels().zip(violet.pixels()) {
            assert_eq!(p[3], q[3]);
        }
    }

    #[test]
    fn rerunning_reuses_existing_directories() {
        let (_root, paths) = project();
        let pipeline = VariantPipeline::new(paths);

        pipeline.generate_all(&AlwaysFails).unwrap();
        let second = pipeline.generate_all(&AlwaysFails).unwrap();
        assert_eq!(second.variants.len(), 7);
    }

    #[test]
    fn summary_lists_sorted_and_truncated() {
        let (_root, paths) = project();
        let report = VariantPipeline::new(paths.clone())
            .generate_all(&FailsFor::new("red"))
            .unwrap();

        let blue = paths.colors_dir.join("blue");
        for name in ["a.png", "b.png", "c.png"] {
            std::fs::write(blue.join(name), b"").unwrap();
        }
        std::fs::create_dir_all(blue.join("nested")).unwrap();

        let summary = report.to_string();
        assert!(summary.starts_with("Generated icon variants:\n"));
        assert!(summary.contains("  red/: 128x128.png, 128x128@2x.png, 32x32.png, icon.png\n"));
        assert!(summary.contains("  blue/: a.png, b.png, c.png, icon.icns, icon.ico...\n"));
        assert!(summary.contains("  green/: icon.icns, icon.ico, icon.png\n"));
    }

    #[cfg(unix)]
    #[test]
    fn command_packager_finds_files_under_a_relative_root() {
        // A root relative to the test's working directory, like the default `--root .`.
        let root = tempfile::Builder::new().tempdir_in(".").unwrap();
        let relative = Path::new(".").join(root.path().file_name().unwrap());
        assert!(relative.is_relative());

        let paths = project_in(&relative);
        let config = crate::GeneratorConfig::new();
        let mut packager = config.packager(&relative);
        packager.program = "sh".into();
        packager.args = vec![
            "-c".into(),
            r#"test -f "$1" && test -d "$3" || { echo "missing $1 from $(pwd)" >&2; exit 1; }"#.into(),
            "packager".into(),
        ];

        let report = VariantPipeline::new(paths).generate_all(&packager).unwrap();

        let fell_back: Vec<_> = report
            .fallbacks()
            .map(|r| match &r.outcome {
                VariantOutcome::FellBack { output } => (r.variant.name, output.diagnostics().to_string()),
                VariantOutcome::Packaged => unreachable!(),
            })
            .collect();
        assert!(fell_back.is_empty(), "{:?}", fell_back);
    }

    #[test]
    fn summary_shows_unreadable_directories() {
        let (_root, paths) = project();
        let report = VariantPipeline::new(paths.clone())
            .generate_all(&AlwaysFails)
            .unwrap();

        std::fs::remove_dir_all(paths.colors_dir.join("yellow")).unwrap();

        let summary = report.to_string();
        let yellow = summary
            .lines()
            .find(|line| line.starts_with("  yellow/: "))
            .unwrap();
        assert!(yellow.contains("I/O error at"), "{}", yellow);
        assert!(summary.contains("  red/: 128x128.png, 128x128@2x.png, 32x32.png, icon.png\n"));
    }
}
