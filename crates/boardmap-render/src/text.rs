//! Label height estimation.
//!
//! draw.io wraps labels at render time, so layout has to guess how many lines a title needs.
//! The estimate only has to be deterministic and monotonic in text length; the same measurer is
//! used for row sizing and box placement, which keeps boxes inside their rows.

use serde::{Deserialize, Serialize};

/// Average glyph width of the 9pt bold feature label font.
pub const DEFAULT_AVG_CHAR_WIDTH: f64 = 5.5;
pub const MIN_CHARS_PER_LINE: f64 = 10.0;

pub trait TextMeasurer {
    /// Number of lines `text` wraps to inside a box `inner_width` units wide. Never zero.
    fn line_count(&self, text: &str, inner_width: f64) -> usize;
}

/// `ceil(chars / max(inner_width / avg_char_width, min_chars_per_line))`, at least one line.
pub fn estimate_lines_with_min(
    text: &str,
    box_inner_width: f64,
    avg_char_width: f64,
    min_chars_per_line: f64,
) -> usize {
    let chars_per_line = (box_inner_width / avg_char_width.max(f64::EPSILON))
        .max(min_chars_per_line)
        .max(1.0);
    let len = text.chars().count() as f64;
    ((len / chars_per_line).ceil() as usize).max(1)
}

pub fn estimate_lines(text: &str, box_inner_width: f64, avg_char_width: f64) -> usize {
    estimate_lines_with_min(text, box_inner_width, avg_char_width, MIN_CHARS_PER_LINE)
}

/// `label_padding * 2 + lines * line_height`.
pub fn estimate_box_height(
    measurer: &dyn TextMeasurer,
    text: &str,
    box_inner_width: f64,
    line_height: i64,
    label_padding: i64,
) -> i64 {
    let lines = measurer.line_count(text, box_inner_width) as i64;
    label_padding * 2 + lines * line_height
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageCharWidthMeasurer {
    pub avg_char_width: f64,
    pub min_chars_per_line: f64,
}

impl Default for AverageCharWidthMeasurer {
    fn default() -> Self {
        Self {
            avg_char_width: DEFAULT_AVG_CHAR_WIDTH,
            min_chars_per_line: MIN_CHARS_PER_LINE,
        }
    }
}

impl TextMeasurer for AverageCharWidthMeasurer {
    fn line_count(&self, text: &str, inner_width: f64) -> usize {
        estimate_lines_with_min(
            text,
            inner_width,
            self.avg_char_width,
            self.min_chars_per_line,
        )
    }
}
