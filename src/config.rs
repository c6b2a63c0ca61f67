//! Serializable generator configuration.
//!
//! A [`GeneratorConfig`] describes where the icons live and which packaging
//! tool to run. It can be read from a JSON file; every field is optional and
//! falls back to the layout of a Tauri project:
//!
//! ```json
//! {
//!   "iconsDir": "src-tauri/icons",
//!   "toolingDir": "src-tauri",
//!   "packager": { "program": "cargo", "args": ["tauri", "icon"] }
//! }
//! ```
//!
//! The color variant table is not part of the configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::packager::CommandPackager;
use crate::pipeline::PipelinePaths;

/// The packaging tool command, minus the per-variant arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagerSettings {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PackagerSettings {
    fn default() -> Self {
        Self {
            program: "cargo".into(),
            args: vec!["tauri".into(), "icon".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Directory holding the base `icon.png`, relative to the project root.
    pub icons_dir: PathBuf,

    /// Working directory of the packaging tool, relative to the project root.
    pub tooling_dir: PathBuf,

    pub packager: PackagerSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            icons_dir: PathBuf::from("src-tauri/icons"),
            tooling_dir: PathBuf::from("src-tauri"),
            packager: PackagerSettings::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the config to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Resolves the icon paths against a project root.
    pub fn paths(&self, root: &Path) -> PipelinePaths {
        PipelinePaths::new(root, &self.icons_dir)
    }

    /// Builds the packager, resolving its working directory against `root`.
    pub fn packager(&self, root: &Path) -> CommandPackager {
        CommandPackager::new(
            self.packager.program.clone(),
            self.packager.args.clone(),
            root.join(&self.tooling_dir),
        )
    }
}
