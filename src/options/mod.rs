//! Extraction and loading options with TOML preset support.
//!
//! Options serialize to/from TOML so a host can keep named presets (for
//! example a tight 2 Å contact patch next to the default 4 Å one) in a
//! directory of `.toml` files.

mod loader;
mod patch;

use std::path::Path;

pub use loader::LoaderOptions;
pub use patch::{NearestSearch, PatchOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SurfpatchError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[patch]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Patch extraction parameters.
    pub patch: PatchOptions,
    /// Mesh loader parameters.
    pub loader: LoaderOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SurfpatchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SurfpatchError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| SurfpatchError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SurfpatchError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SurfpatchError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SurfpatchError::io(parent, e))?;
        }
        std::fs::write(path, content).map_err(|e| SurfpatchError::io(path, e))
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
