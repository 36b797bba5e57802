//! Summary reporter - app counts and the filter pass table

use crate::app::App;
use crate::filter::FilterReport;
use crate::report::colors::{BoxChars, ChartChars, StructureColors};
use colored::Colorize;

/// Rows of the filter table: label and class count after that pass
pub fn filter_rows(report: &FilterReport) -> Vec<(&'static str, usize)> {
    let mut rows = vec![("Start", report.start)];
    if let Some(n) = report.after_package {
        rows.push(("Application package", n));
    }
    if let Some(n) = report.after_system {
        rows.push(("System libraries", n));
    }
    if let Some(n) = report.after_libraries {
        rows.push(("Third-party libraries", n));
    }
    rows
}

pub struct SummaryReporter {
    /// Width of bar charts
    bar_width: usize,
}

impl SummaryReporter {
    pub fn new() -> Self {
        Self { bar_width: 20 }
    }

    pub fn report(&self, app: &App, filter: &FilterReport) {
        println!();
        println!("{}", StructureColors::header("smalisift Summary"));
        println!("{}", BoxChars::heavy_line(50));

        self.print_app(app);
        println!();
        self.print_filter(filter);
    }

    fn print_app(&self, app: &App) {
        let summary = app.summary();
        let label_width = 24;
        for (label, value) in [
            ("Classes:", summary.classes),
            ("Methods:", summary.methods),
            ("Avg methods per class:", summary.avg_methods_per_class),
        ] {
            println!(
                "{:>width$}  {}",
                StructureColors::label(label),
                StructureColors::count(&value.to_string()),
                width = label_width
            );
        }
    }

    fn print_filter(&self, filter: &FilterReport) {
        println!("{}", StructureColors::header("Class filtering"));
        println!("{}", BoxChars::light_line(50));

        match &filter.package {
            Some(package) => println!("  Package: {}", StructureColors::class_name(package)),
            None => {
                println!(
                    "  {}",
                    "No application package found; classes were not filtered".yellow()
                );
                return;
            }
        }

        for (label, count) in filter_rows(filter) {
            println!(
                "  {:<22} {} {:>6}",
                label,
                ChartChars::ratio_bar(count, filter.start, self.bar_width).cyan(),
                count
            );
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}
