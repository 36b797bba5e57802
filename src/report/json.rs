//! JSON reporter

use crate::app::{App, AppSummary};
use crate::error::{Result, SiftError};
use crate::filter::FilterReport;
use crate::model::{ClassRecord, MethodRecord};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub summary: AppSummary,
    pub filter: &'a FilterReport,
    pub files: &'a [PathBuf],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<&'a [MethodRecord]>,
}

pub struct JsonReporter {
    output_path: Option<PathBuf>,
    include_methods: bool,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            include_methods: false,
        }
    }

    pub fn with_methods(mut self, include: bool) -> Self {
        self.include_methods = include;
        self
    }

    pub fn build<'a>(
        &self,
        app: &'a App,
        filter: &'a FilterReport,
        files: &'a [PathBuf],
    ) -> JsonReport<'a> {
        JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            summary: app.summary(),
            filter,
            files,
            classes: Some(app.classes().iter().map(ClassRecord::name).collect()),
            methods: self.include_methods.then(|| app.methods()),
        }
    }

    pub fn report(&self, app: &App, filter: &FilterReport, files: &[PathBuf]) -> Result<()> {
        let report = self.build(app, filter, files);
        let json = serde_json::to_string_pretty(&report)?;

        match &self.output_path {
            Some(path) => {
                std::fs::write(path, json).map_err(|e| SiftError::filesystem(path, e))?;
                eprintln!("Report written to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}
