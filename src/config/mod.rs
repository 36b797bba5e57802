//! Configuration loading
//!
//! Settings come from `.smalisift.toml` / `.smalisift.yml` (or an explicit
//! `--config` path) and are then overridden by command-line flags.

use crate::error::{Result, SiftError};
use crate::filter::PrefixMatch;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_LOCATIONS: &[&str] = &[".smalisift.toml", ".smalisift.yml", ".smalisift.yaml"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Name prefix identifying disassembly roots (`smali`, `smali_classes2`, ...)
    pub disassembly_prefix: String,

    /// Extension of disassembly units, without the dot
    pub source_extension: String,

    /// Third-party library prefixes, one per line
    pub libraries: PathBuf,

    /// System library prefixes, one per line
    pub system_libraries: PathBuf,

    /// Decompiler executable
    pub decompiler: String,

    /// How class names are compared against prefixes
    pub prefix_match: PrefixMatch,

    /// Extract methods on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disassembly_prefix: "smali".to_string(),
            source_extension: "smali".to_string(),
            libraries: PathBuf::from("Libraries/AndroidLibraries.txt"),
            system_libraries: PathBuf::from("Libraries/SystemLibraries.txt"),
            decompiler: "apktool".to_string(),
            prefix_match: PrefixMatch::Plain,
            parallel: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SiftError::filesystem(path, e))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| SiftError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| SiftError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Look for a config file in `dir`, falling back to defaults
    pub fn from_default_locations(dir: &Path) -> Result<Self> {
        for name in DEFAULT_LOCATIONS {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }
}
