//! Centralized color scheme for consistent output formatting

use colored::{ColoredString, Colorize};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// Section headers
    pub fn header(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// File paths
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Canonical class names
    pub fn class_name(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Method signature lines
    pub fn signature(text: &str) -> ColoredString {
        text.magenta()
    }

    /// Count/statistics numbers
    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }

    /// Labels next to numbers
    pub fn label(text: &str) -> ColoredString {
        text.dimmed()
    }
}

/// Bar chart characters for the filter pass table
pub struct ChartChars;

impl ChartChars {
    pub const FILLED: char = '█';
    pub const EMPTY: char = '░';

    /// Bar for `part` out of `whole`; an empty whole renders an empty bar
    pub fn ratio_bar(part: usize, whole: usize, width: usize) -> String {
        let percentage = if whole == 0 {
            0.0
        } else {
            part as f64 * 100.0 / whole as f64
        };
        Self::bar(percentage, width)
    }

    /// Create a progress bar string
    pub fn bar(percentage: f64, width: usize) -> String {
        let filled = ((percentage / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        let empty = width - filled;
        format!(
            "{}{}",
            Self::FILLED.to_string().repeat(filled),
            Self::EMPTY.to_string().repeat(empty)
        )
    }
}

/// Box drawing characters
pub struct BoxChars;

impl BoxChars {
    /// Heavy separator line
    pub fn heavy_line(width: usize) -> String {
        "━".repeat(width)
    }

    /// Light separator line
    pub fn light_line(width: usize) -> String {
        "─".repeat(width)
    }
}
