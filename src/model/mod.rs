//! Records flowing through the pipeline

use serde::Serialize;
use std::path::PathBuf;

/// One disassembly unit as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Bare file name, used as the grouping sort key
    pub file_name: String,
    pub content: String,
    /// Where the file was read from (diagnostics only)
    pub path: PathBuf,
}

impl RawFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            path: PathBuf::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// A class assembled from every fragment declaring the same identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRecord {
    /// Dot-separated canonical name, e.g. `com.example.Foo`
    pub class_name: String,
    /// Newline-joined fragments in file-name order
    pub content: String,
}

impl ClassRecord {
    pub fn new(class_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.class_name
    }
}

/// Path of the unit declaring `class_name`, relative to a disassembly root:
/// `com.example.Foo` -> `com/example/Foo.smali`
pub fn source_path_for(class_name: &str, extension: &str) -> PathBuf {
    let mut path: PathBuf = class_name.split('.').collect();
    path.set_extension(extension);
    path
}

/// A single `.method` ... `.end method` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    /// Owning class, always present in the class list the method came from
    pub class_name: String,
    /// First line of the block, trimmed
    pub method_signature: String,
    /// The whole block, trimmed
    pub content: String,
}
