//! Vertical sizing of grid cells.
//!
//! [`ContentSizer::stack`] is the only place that decides where an entry sits inside a cell;
//! row heights and box placement both go through it.

use boardmap_core::{Feature, Item};
use serde::{Deserialize, Serialize};

use crate::text::{TextMeasurer, estimate_box_height};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub item_height: i64,
    /// Gap between items inside one feature box.
    pub item_gap: i64,
    pub feature_bottom_pad: i64,
    /// Gap between consecutive entries (features or orphan items) of a cell.
    pub entry_gap: i64,
    pub orphan_bottom_pad: i64,
    pub orphan_top_offset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    /// Width available to a feature title once insets are removed.
    pub inner_width: f64,
    pub line_height: i64,
    pub padding: i64,
}

/// Features (in discovery order) followed by orphan items sharing one grid cell.
#[derive(Debug, Clone, Default)]
pub struct Cell<'a> {
    pub features: Vec<&'a Feature>,
    pub items: Vec<&'a Item>,
}

impl Cell<'_> {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind<'a> {
    Feature {
        feature: &'a Feature,
        label_height: i64,
    },
    Item(&'a Item),
}

/// One entry of a cell, relative to the top of the cell content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedEntry<'a> {
    pub kind: EntryKind<'a>,
    pub top: i64,
    /// Vertical slot reserved for the entry, including trailing padding.
    pub height: i64,
}

pub struct ContentSizer<'a> {
    measurer: &'a dyn TextMeasurer,
    metrics: CellMetrics,
    label: LabelMetrics,
}

impl<'a> ContentSizer<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, metrics: CellMetrics, label: LabelMetrics) -> Self {
        Self {
            measurer,
            metrics,
            label,
        }
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    pub fn feature_label_height(&self, feature: &Feature) -> i64 {
        estimate_box_height(
            self.measurer,
            &feature.label(),
            self.label.inner_width,
            self.label.line_height,
            self.label.padding,
        )
    }

    /// `label_height + n * (item_height + item_gap) - item_gap + bottom_pad`.
    pub fn feature_height(&self, label_height: i64, item_count: usize) -> i64 {
        let m = &self.metrics;
        label_height + item_count as i64 * (m.item_height + m.item_gap) - m.item_gap
            + m.feature_bottom_pad
    }

    pub fn orphan_height(&self) -> i64 {
        self.metrics.item_height + self.metrics.orphan_bottom_pad
    }

    pub fn stack<'c>(&self, cell: &Cell<'c>) -> Vec<StackedEntry<'c>> {
        let mut out = Vec::with_capacity(cell.features.len() + cell.items.len());
        let mut cursor = 0;
        let mut push = |kind: EntryKind<'c>, height: i64, out: &mut Vec<StackedEntry<'c>>| {
            if !out.is_empty() {
                cursor += self.metrics.entry_gap;
            }
            out.push(StackedEntry {
                kind,
                top: cursor,
                height,
            });
            cursor += height;
        };

        for &feature in &cell.features {
            let label_height = self.feature_label_height(feature);
            let height = self.feature_height(label_height, feature.pbis.len());
            push(
                EntryKind::Feature {
                    feature,
                    label_height,
                },
                height,
                &mut out,
            );
        }
        for &item in &cell.items {
            push(EntryKind::Item(item), self.orphan_height(), &mut out);
        }
        out
    }

    /// Content height of a cell; `0` when empty. Row minimums are applied by callers.
    pub fn cell_height(&self, cell: &Cell<'_>) -> i64 {
        self.stack(cell)
            .last()
            .map(|e| e.top + e.height)
            .unwrap_or(0)
    }
}
