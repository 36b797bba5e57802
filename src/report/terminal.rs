//! Terminal listings: filtered unit paths and method dumps

use crate::model::MethodRecord;
use crate::report::colors::{BoxChars, StructureColors};
use std::path::{Path, PathBuf};

pub struct TerminalReporter {
    /// Base path to strip from file paths for shorter display
    base_path: Option<PathBuf>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { base_path: None }
    }

    pub fn with_base_path(mut self, base: PathBuf) -> Self {
        self.base_path = Some(base);
        self
    }

    fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        match &self.base_path {
            Some(base) => path
                .strip_prefix(base)
                .unwrap_or(path)
                .to_string_lossy(),
            None => path.to_string_lossy(),
        }
    }

    pub fn print_files(&self, files: &[PathBuf]) {
        self.print_file_list("Filtered smali files", files);
    }

    /// Paths under a titled header, relative to the base path when set
    pub fn print_file_list(&self, title: &str, files: &[PathBuf]) {
        println!();
        println!(
            "{} ({})",
            StructureColors::header(title),
            StructureColors::count(&files.len().to_string())
        );
        for file in files {
            println!("  {}", StructureColors::file_path(&self.display_path(file)));
        }
    }

    pub fn print_methods(&self, methods: &[MethodRecord]) {
        for method in methods {
            self.print_method(method);
        }
    }

    pub fn print_method(&self, method: &MethodRecord) {
        println!();
        println!(
            "  {} {}",
            StructureColors::label("Class ID :"),
            StructureColors::class_name(&method.class_name)
        );
        println!(
            "  {} {}",
            StructureColors::label("Method ID:"),
            StructureColors::signature(&method.method_signature)
        );
        println!("{}", BoxChars::light_line(40));
        println!("{}", method.content.trim());
        println!("{}", BoxChars::light_line(40));
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
