//! Error types shared by the pipeline stages

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiftError>;

/// Everything that can go wrong while sifting a decompiled app.
///
/// Text that fails to match a class directive or a method block is not an
/// error; those cases surface as `None` or empty results.
#[derive(Debug, Error, Diagnostic)]
pub enum SiftError {
    /// An expected file or directory is absent
    #[error("missing {what}: {}", .path.display())]
    #[diagnostic(code(smalisift::missing_resource))]
    MissingResource { what: &'static str, path: PathBuf },

    /// The decompiler could not be started or exited unsuccessfully
    #[error("{tool} failed: {reason}")]
    #[diagnostic(
        code(smalisift::external_tool),
        help("check that apktool is installed and on PATH, or set `decompiler` in the config")
    )]
    ExternalToolFailure { tool: String, reason: String },

    /// Read or delete failure on a specific path
    #[error("I/O error for {}: {source}", .path.display())]
    #[diagnostic(code(smalisift::filesystem))]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid config {}: {message}", .path.display())]
    #[diagnostic(code(smalisift::config))]
    Config { path: PathBuf, message: String },

    #[error("failed to write JSON output: {0}")]
    #[diagnostic(code(smalisift::json))]
    Json(#[from] serde_json::Error),
}

impl SiftError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiftError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn missing(what: &'static str, path: impl Into<PathBuf>) -> Self {
        SiftError::MissingResource {
            what,
            path: path.into(),
        }
    }
}
