//! Class aggregation
//!
//! Groups disassembly units by the class they declare. A class split across
//! several units (the decompiler emits one file per class, but multidex builds
//! and repackaged apps can repeat a declaration) ends up as a single record.

use crate::model::{ClassRecord, RawFile};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// `.class [modifiers...] Lcom/example/Foo;`
const CLASS_DIRECTIVE: &str = r"\.class(?:\s+[\w\s]+)*\s+L([^;]+)";

fn class_directive() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CLASS_DIRECTIVE).expect("class directive pattern is valid"))
}

/// Internal (slash-separated) class name declared in `content`, if any
pub fn extract_class_name(content: &str) -> Option<&str> {
    class_directive()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `com/example/Foo` -> `com.example.Foo`
pub fn canonical_name(internal: &str) -> String {
    internal.replace('/', ".")
}

pub struct ClassAggregator;

impl ClassAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Build the sorted class list from raw units.
    ///
    /// Units are ordered by file name first so grouping does not depend on
    /// traversal order. Identically named units from different roots are
    /// ordered by path. Units without a class directive are dropped.
    pub fn aggregate(&self, mut files: Vec<RawFile>) -> Vec<ClassRecord> {
        files.sort_by(|a, b| {
            a.file_name
                .cmp(&b.file_name)
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        let mut skipped = 0usize;

        for file in files {
            let Some(internal) = extract_class_name(&file.content) else {
                debug!("No class directive in {}", file.path.display());
                skipped += 1;
                continue;
            };
            let internal = internal.to_string();

            match groups.get_mut(&internal) {
                Some(parts) => parts.push(file.content),
                None => {
                    order.push(internal.clone());
                    groups.insert(internal, vec![file.content]);
                }
            }
        }

        let mut classes: Vec<ClassRecord> = order
            .into_iter()
            .filter_map(|internal| {
                let parts = groups.remove(&internal)?;
                Some(ClassRecord::new(canonical_name(&internal), parts.join("\n")))
            })
            .collect();

        classes.sort_by(|a, b| a.class_name.cmp(&b.class_name));

        if skipped > 0 {
            info!("Skipped {} files without a class directive", skipped);
        }
        info!("Classes: {}", classes.len());
        if classes.is_empty() {
            warn!("No classes found");
        }

        classes
    }
}

impl Default for ClassAggregator {
    fn default() -> Self {
        Self::new()
    }
}
