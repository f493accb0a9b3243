//! Vertical stacking of region plans and page sizing.

use crate::config::PageConfig;
use crate::model::RegionLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedRegions {
    pub regions: Vec<RegionLayout>,
    /// First free y coordinate below the last region.
    pub next_y: i64,
}

/// Assigns `y_offset`s top to bottom starting at `top`, `gap` apart.
///
/// Regions without columns draw nothing and are dropped before offsets are assigned.
pub fn stack_regions(regions: Vec<RegionLayout>, top: i64, gap: i64) -> StackedRegions {
    let mut cursor = top;
    let regions: Vec<RegionLayout> = regions
        .into_iter()
        .filter(|r| !r.plan.columns.is_empty())
        .map(|mut r| {
            r.y_offset = cursor;
            cursor += r.plan.total_height + gap;
            r
        })
        .collect();
    StackedRegions {
        regions,
        next_y: cursor,
    }
}

/// Page extent covering `content_right`/`content_bottom` plus margins, floored at the minimums.
pub fn page_size(content_right: i64, content_bottom: i64, page: &PageConfig) -> (i64, i64) {
    (
        (content_right + page.right_margin).max(page.min_width),
        (content_bottom + page.bottom_margin).max(page.min_height),
    )
}
