//! apktool integration

use crate::error::{Result, SiftError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Where the decompiled tree for `apk` lives: the archive path with its
/// `.apk` extension stripped (`app.apk` -> `app/`). Paths without that
/// extension get a `.out` suffix so the tree never collides with the archive.
pub fn output_dir_for(apk: &Path) -> PathBuf {
    let is_apk = apk
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("apk"));

    if is_apk {
        apk.with_extension("")
    } else {
        let mut name = apk.as_os_str().to_os_string();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// Runs the external decompiler
pub struct Decompiler {
    binary: String,
}

impl Decompiler {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Arguments for `apktool d`: force overwrite, output dir, quiet, archive
    fn args(apk: &Path, out: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "d".into(),
            "-f".into(),
            "-o".into(),
            out.as_os_str().to_os_string(),
            "-q".into(),
            apk.as_os_str().to_os_string(),
        ]
    }

    /// Decompile `apk` into [`output_dir_for`] and return that directory.
    ///
    /// A decompiler that cannot be started, exits unsuccessfully, or leaves
    /// no output behind is an error: nothing downstream can run without it.
    pub fn decompile(&self, apk: &Path) -> Result<PathBuf> {
        if !apk.is_file() {
            return Err(SiftError::missing("APK", apk));
        }

        let out = output_dir_for(apk);
        info!("Decompiling {} with {}", apk.display(), self.binary);
        debug!("Output directory: {}", out.display());

        let status = Command::new(&self.binary)
            .args(Self::args(apk, &out))
            .status()
            .map_err(|e| SiftError::ExternalToolFailure {
                tool: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(SiftError::ExternalToolFailure {
                tool: self.binary.clone(),
                reason: format!("exited with {}", status),
            });
        }

        if !out.is_dir() {
            return Err(SiftError::missing("decompiler output", out));
        }

        Ok(out)
    }
}

impl Default for Decompiler {
    fn default() -> Self {
        Self::new("apktool")
    }
}
