//! Namespace prefix lists and matching

use crate::error::SiftError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// How a class name is tested against a namespace prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// Plain string prefix: `com.appx.Evil` matches `com.app`
    #[default]
    Plain,
    /// Whole dot-separated segments: `com.appx.Evil` does not match `com.app`
    Segment,
}

impl PrefixMatch {
    pub fn matches(&self, class_name: &str, prefix: &str) -> bool {
        match self {
            PrefixMatch::Plain => class_name.starts_with(prefix),
            PrefixMatch::Segment => {
                let prefix = prefix.trim_end_matches('.');
                let mut names = class_name.split('.');
                prefix
                    .split('.')
                    .all(|segment| names.next() == Some(segment))
            }
        }
    }
}

/// Ordered list of namespace prefixes loaded from a line-oriented file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixList {
    prefixes: Vec<String>,
}

impl PrefixList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::parse_lines(prefixes.into_iter().map(Into::into))
    }

    /// One prefix per line. Lines are trimmed and blank lines dropped, since
    /// an empty prefix would match every class.
    pub fn parse(text: &str) -> Self {
        Self::parse_lines(text.lines().map(str::to_string))
    }

    fn parse_lines(lines: impl Iterator<Item = String>) -> Self {
        let prefixes = lines
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { prefixes }
    }

    /// Load a list file. A missing or unreadable file is reported and treated
    /// as an empty list.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            warn!("{}", SiftError::missing("prefix list", path));
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::parse(&text);
                debug!("Loaded {} prefixes from {}", list.len(), path.display());
                list
            }
            Err(e) => {
                warn!("{}", SiftError::filesystem(path, e));
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// True if any prefix matches `class_name`
    pub fn matches_any(&self, class_name: &str, mode: PrefixMatch) -> bool {
        self.iter().any(|prefix| mode.matches(class_name, prefix))
    }
}
