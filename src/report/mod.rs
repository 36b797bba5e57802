mod colors;
mod json;
mod summary;
mod terminal;

pub use json::{JsonReport, JsonReporter};
pub use summary::{filter_rows, SummaryReporter};
pub use terminal::TerminalReporter;

use crate::app::App;
use crate::error::Result;
use crate::filter::FilterReport;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Colored terminal output
    #[default]
    Terminal,
    /// JSON machine-readable format
    Json,
}

/// Options for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output file path (JSON only)
    pub output_path: Option<PathBuf>,
    /// Base path to strip from file paths for shorter display
    pub base_path: Option<PathBuf>,
    /// List the on-disk units of the surviving classes
    pub show_files: bool,
    /// Dump every surviving method
    pub show_methods: bool,
}

/// Reporter for the sifted app
pub struct Reporter {
    format: ReportFormat,
    options: ReportOptions,
}

impl Reporter {
    pub fn with_options(format: ReportFormat, options: ReportOptions) -> Self {
        Self { format, options }
    }

    /// Report the app after filtering. `files` are the located units of the
    /// surviving classes.
    pub fn report(&self, app: &App, filter: &FilterReport, files: &[PathBuf]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                let mut terminal = TerminalReporter::new();
                if let Some(base) = &self.options.base_path {
                    terminal = terminal.with_base_path(base.clone());
                }
                if self.options.show_methods {
                    terminal.print_methods(app.methods());
                }
                if self.options.show_files {
                    terminal.print_files(files);
                }
                SummaryReporter::new().report(app, filter);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.options.output_path.clone())
                .with_methods(self.options.show_methods)
                .report(app, filter, files),
        }
    }
}
