//! Namespace filtering
//!
//! Narrows the class list to application code in three passes, always in this
//! order:
//!
//! 1. keep only classes under the application package
//! 2. drop classes under a system library prefix
//! 3. drop classes under a third-party library prefix
//!
//! Each pass produces a new list; records are never edited in place.

mod prefix;

pub use prefix::{PrefixList, PrefixMatch};

use crate::model::ClassRecord;
use serde::Serialize;
use tracing::info;

/// Class counts observed around each pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    /// Normalized application package, if one was known
    pub package: Option<String>,
    pub start: usize,
    pub after_package: Option<usize>,
    /// `None` when the system list was empty and the pass did not run
    pub after_system: Option<usize>,
    /// `None` when the library list was empty and the pass did not run
    pub after_libraries: Option<usize>,
}

impl FilterReport {
    /// Filtering did nothing because no application package was available
    pub fn skipped(&self) -> bool {
        self.package.is_none()
    }

    pub fn final_count(&self) -> usize {
        self.after_libraries
            .or(self.after_system)
            .or(self.after_package)
            .unwrap_or(self.start)
    }
}

/// Result of running the filter over a class list
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub classes: Vec<ClassRecord>,
    pub report: FilterReport,
}

/// `my-app.core` -> `my_app.core`; smali identifiers cannot contain dashes
pub fn normalize_package(package: &str) -> String {
    package.replace('-', "_")
}

/// Pass 1: classes under `package`
pub fn retain_package(
    classes: Vec<ClassRecord>,
    package: &str,
    mode: PrefixMatch,
) -> Vec<ClassRecord> {
    classes
        .into_iter()
        .filter(|class| mode.matches(&class.class_name, package))
        .collect()
}

/// Passes 2 and 3: classes not under any listed prefix
pub fn exclude_prefixes(
    classes: Vec<ClassRecord>,
    prefixes: &PrefixList,
    mode: PrefixMatch,
) -> Vec<ClassRecord> {
    classes
        .into_iter()
        .filter(|class| !prefixes.matches_any(&class.class_name, mode))
        .collect()
}

/// The three-pass namespace filter
#[derive(Debug, Clone, Default)]
pub struct NamespaceFilter {
    system_libraries: PrefixList,
    libraries: PrefixList,
    mode: PrefixMatch,
}

impl NamespaceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_libraries(mut self, list: PrefixList) -> Self {
        self.system_libraries = list;
        self
    }

    pub fn with_libraries(mut self, list: PrefixList) -> Self {
        self.libraries = list;
        self
    }

    pub fn with_mode(mut self, mode: PrefixMatch) -> Self {
        self.mode = mode;
        self
    }

    /// Run all passes. Without a package (or with a blank one) nothing is
    /// filtered and the list is returned as-is.
    pub fn apply(&self, classes: Vec<ClassRecord>, package: Option<&str>) -> FilterOutcome {
        let mut report = FilterReport {
            start: classes.len(),
            ..Default::default()
        };
        info!("Classes before filtering: {}", report.start);

        let Some(package) = package.map(str::trim).filter(|p| !p.is_empty()) else {
            info!("No application package; skipping namespace filtering");
            return FilterOutcome { classes, report };
        };

        let package = normalize_package(package);
        let mut classes = retain_package(classes, &package, self.mode);
        report.after_package = Some(classes.len());
        info!("After application package '{}': {}", package, classes.len());
        report.package = Some(package);

        if !self.system_libraries.is_empty() {
            classes = exclude_prefixes(classes, &self.system_libraries, self.mode);
            report.after_system = Some(classes.len());
            info!("After system libraries: {}", classes.len());
        }

        if !self.libraries.is_empty() {
            classes = exclude_prefixes(classes, &self.libraries, self.mode);
            report.after_libraries = Some(classes.len());
            info!("After third-party libraries: {}", classes.len());
        }

        FilterOutcome { classes, report }
    }
}
