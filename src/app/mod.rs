//! The analyzed application
//!
//! `App` owns the class list and the method list derived from it. Counts are
//! read off the lists, and the method list is rebuilt from scratch whenever
//! the class list is replaced.

use crate::aggregate::ClassAggregator;
use crate::collect::SourceCollector;
use crate::decompile::{output_dir_for, Decompiler};
use crate::error::Result;
use crate::extract::MethodExtractor;
use crate::filter::{FilterReport, NamespaceFilter};
use crate::manifest;
use crate::model::{ClassRecord, MethodRecord};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Counts shown in the app summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppSummary {
    pub classes: usize,
    pub methods: usize,
    pub avg_methods_per_class: usize,
}

#[derive(Debug, Clone)]
pub struct App {
    apk_path: Option<PathBuf>,
    output_dir: PathBuf,
    classes: Vec<ClassRecord>,
    methods: Vec<MethodRecord>,
    extracted: bool,
    extractor: MethodExtractor,
}

impl App {
    /// An app that still has to be decompiled from `apk_path`
    pub fn new(apk_path: impl Into<PathBuf>) -> Self {
        let apk_path = apk_path.into();
        let output_dir = output_dir_for(&apk_path);
        Self {
            apk_path: Some(apk_path),
            ..Self::from_decompiled(output_dir)
        }
    }

    /// An app whose decompiled tree already exists at `dir`
    pub fn from_decompiled(dir: impl Into<PathBuf>) -> Self {
        Self {
            apk_path: None,
            output_dir: dir.into(),
            classes: Vec::new(),
            methods: Vec::new(),
            extracted: false,
            extractor: MethodExtractor::new(),
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.extractor = MethodExtractor::new().with_parallel(parallel);
        self
    }

    pub fn apk_path(&self) -> Option<&Path> {
        self.apk_path.as_deref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    /// `None` until extraction has run
    pub fn num_classes(&self) -> Option<usize> {
        self.extracted.then_some(self.classes.len())
    }

    /// `None` until extraction has run
    pub fn num_methods(&self) -> Option<usize> {
        self.extracted.then_some(self.methods.len())
    }

    pub fn summary(&self) -> AppSummary {
        let classes = self.classes.len();
        let methods = self.methods.len();
        AppSummary {
            classes,
            methods,
            avg_methods_per_class: if classes > 0 { methods / classes } else { 0 },
        }
    }

    /// Run the decompiler if this app was created from an archive
    pub fn decompile(&mut self, decompiler: &Decompiler) -> Result<()> {
        if let Some(apk) = &self.apk_path {
            self.output_dir = decompiler.decompile(apk)?;
        }
        Ok(())
    }

    /// Collect, aggregate and extract from the decompiled tree
    pub fn load(&mut self, collector: &SourceCollector) {
        let files = collector.collect(&self.output_dir);
        info!("Files: {}", files.len());

        self.set_classes(ClassAggregator::new().aggregate(files));
        self.extracted = true;
    }

    /// Full extraction: decompile, then load
    pub fn extract(&mut self, decompiler: &Decompiler, collector: &SourceCollector) -> Result<()> {
        self.decompile(decompiler)?;
        self.load(collector);
        Ok(())
    }

    /// Application package from the decompiled manifest
    pub fn package_name(&self) -> Option<String> {
        manifest::read_package(&self.output_dir)
    }

    /// Apply the namespace filter. When no package is known the class and
    /// method lists are left untouched.
    pub fn filter(&mut self, filter: &NamespaceFilter, package: Option<&str>) -> FilterReport {
        let classes = std::mem::take(&mut self.classes);
        let outcome = filter.apply(classes, package);

        if outcome.report.skipped() {
            self.classes = outcome.classes;
        } else {
            self.set_classes(outcome.classes);
        }

        outcome.report
    }

    /// On-disk units for the current classes; classes whose file cannot be
    /// found are left out
    pub fn source_files(&self, collector: &SourceCollector) -> Vec<PathBuf> {
        collector.locate_class_files(
            &self.output_dir,
            self.classes.iter().map(|class| class.class_name.as_str()),
        )
    }

    /// Remove the archive. Failures are logged only.
    pub fn delete_apk(&self) {
        let Some(apk) = &self.apk_path else {
            return;
        };
        info!("Deleting {}", apk.display());
        if let Err(e) = std::fs::remove_file(apk) {
            warn!("Failed to delete {}: {}", apk.display(), e);
        }
    }

    /// Remove the decompiled tree. Failures are logged only.
    pub fn delete_all(&self) {
        info!("Deleting {}", self.output_dir.display());
        if let Err(e) = std::fs::remove_dir_all(&self.output_dir) {
            warn!("Failed to delete {}: {}", self.output_dir.display(), e);
        }
    }

    fn set_classes(&mut self, classes: Vec<ClassRecord>) {
        self.classes = classes;
        self.methods = self.extractor.extract(&self.classes);
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |n: Option<usize>| n.map_or_else(|| "-".to_string(), |n| n.to_string());
        let summary = self.summary();
        writeln!(f, "App Summary")?;
        writeln!(f, "  Classes                 : {}", count(self.num_classes()))?;
        writeln!(f, "  Methods                 : {}", count(self.num_methods()))?;
        write!(
            f,
            "  Avg methods per class   : {}",
            summary.avg_methods_per_class
        )
    }
}
