//! Layout constants.
//!
//! Every value is in draw.io document units. Config files may override any subset of fields;
//! omitted fields keep the defaults below.

use serde::{Deserialize, Serialize};

use crate::sizing::{CellMetrics, LabelMetrics};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub hierarchy: HierarchyConfig,
    pub timeline: TimelineConfig,
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Page chrome shared by both views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub min_width: i64,
    pub min_height: i64,
    pub right_margin: i64,
    pub bottom_margin: i64,
    pub legend_width: i64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            min_width: 1200,
            min_height: 800,
            right_margin: 100,
            bottom_margin: 50,
            legend_width: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub column_width: i64,
    pub column_gap: i64,
    pub row_gap: i64,
    /// Left edge of the first column; everything left of it is reserved for row labels.
    pub grid_start_x: i64,
    pub item_height: i64,
    pub item_gap: i64,
    pub item_inset: i64,
    pub feature_label_line_height: i64,
    pub feature_label_padding: i64,
    pub feature_bottom_pad: i64,
    pub feature_gap: i64,
    pub feature_inset: i64,
    /// draw.io pads labels internally; subtracted from the feature box width before wrapping.
    pub feature_label_inner_padding: i64,
    /// Orphan boxes sit this far below their slot top (inside their bottom pad).
    pub orphan_top_offset: i64,
    pub cell_pad_top: i64,
    pub cell_pad_bottom: i64,
    pub min_row_height: i64,
    pub row_label_x: i64,
    pub row_label_width: i64,
    pub row_label_height: i64,
    pub lane_extend_h: i64,
    pub lane_extend_v: i64,
    pub initiative_bar_height: i64,
    pub epic_header_y: i64,
    pub epic_header_height: i64,
    pub grid_y: i64,
    pub region_gap: i64,
    pub title_area_height: i64,
    pub legend_height: i64,
    pub page: PageConfig,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        let initiative_bar_height = 30;
        Self {
            column_width: 195,
            column_gap: 25,
            row_gap: 20,
            grid_start_x: 270,
            item_height: 28,
            item_gap: 6,
            item_inset: 8,
            feature_label_line_height: 14,
            feature_label_padding: 6,
            feature_bottom_pad: 8,
            feature_gap: 10,
            feature_inset: 5,
            feature_label_inner_padding: 16,
            orphan_top_offset: 5,
            cell_pad_top: 12,
            cell_pad_bottom: 12,
            min_row_height: 90,
            row_label_x: 100,
            row_label_width: 140,
            row_label_height: 40,
            lane_extend_h: 30,
            lane_extend_v: 23,
            initiative_bar_height,
            epic_header_y: initiative_bar_height + 5,
            epic_header_height: 38,
            grid_y: initiative_bar_height + 5 + 48,
            region_gap: 50,
            title_area_height: 75,
            legend_height: 130,
            page: PageConfig::default(),
        }
    }
}

impl HierarchyConfig {
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            item_height: self.item_height,
            item_gap: self.item_gap,
            feature_bottom_pad: self.feature_bottom_pad,
            entry_gap: self.feature_gap,
            orphan_bottom_pad: self.feature_bottom_pad,
            orphan_top_offset: self.orphan_top_offset,
        }
    }

    pub fn label_metrics(&self) -> LabelMetrics {
        LabelMetrics {
            inner_width: (self.column_width
                - self.feature_inset * 2
                - self.feature_label_inner_padding) as f64,
            line_height: self.feature_label_line_height,
            padding: self.feature_label_padding,
        }
    }
}

/// Row key ordering for the timeline view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    /// Order of first appearance while walking the hierarchy.
    #[default]
    FirstSeen,
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub column_width: i64,
    pub column_gap: i64,
    pub row_gap: i64,
    pub grid_start_x: i64,
    pub item_height: i64,
    pub item_gap: i64,
    pub item_inset: i64,
    pub label_line_height: i64,
    pub label_padding: i64,
    pub cell_pad_top: i64,
    pub cell_pad_bottom: i64,
    pub min_row_height: i64,
    pub row_label_x: i64,
    pub row_label_width: i64,
    pub row_label_height: i64,
    pub lane_extend_h: i64,
    pub lane_extend_v: i64,
    pub axis_caption_y: i64,
    pub header_y: i64,
    pub header_height: i64,
    pub grid_y: i64,
    /// Space between the bottom lane edge and the legend.
    pub legend_gap: i64,
    pub legend_height: i64,
    pub row_order: RowOrder,
    pub page: PageConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            column_width: 230,
            column_gap: 20,
            row_gap: 20,
            grid_start_x: 270,
            item_height: 28,
            item_gap: 6,
            item_inset: 8,
            label_line_height: 14,
            label_padding: 6,
            cell_pad_top: 12,
            cell_pad_bottom: 12,
            min_row_height: 60,
            row_label_x: 100,
            row_label_width: 140,
            row_label_height: 40,
            lane_extend_h: 30,
            lane_extend_v: 23,
            axis_caption_y: 80,
            header_y: 105,
            header_height: 50,
            grid_y: 180,
            legend_gap: 22,
            legend_height: 100,
            row_order: RowOrder::FirstSeen,
            page: PageConfig::default(),
        }
    }
}

impl TimelineConfig {
    /// Timeline cells hold bare items stacked with the plain item gap.
    pub fn cell_metrics(&self) -> CellMetrics {
        CellMetrics {
            item_height: self.item_height,
            item_gap: self.item_gap,
            feature_bottom_pad: 0,
            entry_gap: self.item_gap,
            orphan_bottom_pad: 0,
            orphan_top_offset: 0,
        }
    }

    pub fn label_metrics(&self) -> LabelMetrics {
        LabelMetrics {
            inner_width: (self.column_width - self.item_inset * 2) as f64,
            line_height: self.label_line_height,
            padding: self.label_padding,
        }
    }
}
