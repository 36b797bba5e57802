//! Method extraction
//!
//! A small line scanner over smali text. A line beginning with `.method`
//! opens a block and the next line beginning with `.end method` closes it;
//! blocks never nest, so a second `.method` inside an open block is just body
//! text. A block left open at end of input is discarded.

use crate::model::{ClassRecord, MethodRecord};
use rayon::prelude::*;
use tracing::info;

const METHOD_START: &str = ".method";
const METHOD_END: &str = ".end method";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InMethod { start: usize },
}

/// Raw method blocks in `content`, in order of appearance
pub fn method_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut state = ScanState::Outside;
    let mut offset = 0usize;

    for line in content.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        state = match state {
            ScanState::Outside if line.starts_with(METHOD_START) => {
                ScanState::InMethod { start: line_start }
            }
            ScanState::InMethod { start } if line.starts_with(METHOD_END) => {
                blocks.push(&content[start..line_start + METHOD_END.len()]);
                ScanState::Outside
            }
            other => other,
        };
    }

    blocks
}

/// Methods declared in a single class. A class without blocks yields an
/// empty list.
pub fn extract_methods(class: &ClassRecord) -> Vec<MethodRecord> {
    method_blocks(&class.content)
        .into_iter()
        .filter_map(|block| {
            let block = block.trim();
            let signature = block.lines().next()?.trim();
            Some(MethodRecord {
                class_name: class.class_name.clone(),
                method_signature: signature.to_string(),
                content: block.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MethodExtractor {
    parallel: bool,
}

impl MethodExtractor {
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Extract classes on the rayon pool. Output order is identical to the
    /// sequential run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn extract(&self, classes: &[ClassRecord]) -> Vec<MethodRecord> {
        let methods: Vec<MethodRecord> = if self.parallel {
            classes
                .par_iter()
                .flat_map_iter(extract_methods)
                .collect()
        } else {
            classes.iter().flat_map(extract_methods).collect()
        };

        info!("Methods: {}", methods.len());
        methods
    }
}

impl Default for MethodExtractor {
    fn default() -> Self {
        Self::new()
    }
}
