//! Grid primitives shared by the hierarchy and timeline planners.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::model::{BoxGeometry, BoxKind, LayoutBox};
use crate::sizing::{Cell, ContentSizer, EntryKind};

/// Row key used when a region has no areas at all.
pub const PLACEHOLDER_ROW: &str = "(No area)";

/// Distinct row keys in first-seen order, or the placeholder row when there are none.
pub fn discover_row_keys<'a>(tags: impl IntoIterator<Item = &'a str>) -> IndexSet<&'a str> {
    let mut keys: IndexSet<&str> = tags.into_iter().collect();
    if keys.is_empty() {
        keys.insert(PLACEHOLDER_ROW);
    }
    keys
}

/// Stable id fragment for an area (`Web Apps\Ui` -> `web_apps_ui`).
pub fn area_key(area: &str) -> String {
    area.to_lowercase().replace([' ', '\\'], "_")
}

/// Sparse `(row, column) -> Cell` map.
#[derive(Debug, Clone, Default)]
pub struct CellGrid<'a> {
    rows: usize,
    columns: usize,
    cells: FxHashMap<(usize, usize), Cell<'a>>,
}

impl<'a> CellGrid<'a> {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: FxHashMap::default(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> &mut Cell<'a> {
        debug_assert!(row < self.rows && column < self.columns);
        self.cells.entry((row, column)).or_default()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Cell<'a>> {
        self.cells.get(&(row, column))
    }

    pub fn occupied(&self) -> usize {
        self.cells.values().filter(|c| !c.is_empty()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSizing {
    pub pad_top: i64,
    pub pad_bottom: i64,
    pub min_row_height: i64,
}

/// Per row: the tallest cell content, and the padded row height floored at the minimum.
pub fn row_heights(
    grid: &CellGrid<'_>,
    sizer: &ContentSizer<'_>,
    sizing: RowSizing,
) -> (Vec<i64>, Vec<i64>) {
    let mut content = Vec::with_capacity(grid.rows());
    let mut heights = Vec::with_capacity(grid.rows());
    for row in 0..grid.rows() {
        let tallest = (0..grid.columns())
            .filter_map(|col| grid.get(row, col))
            .map(|cell| sizer.cell_height(cell))
            .max()
            .unwrap_or(0);
        content.push(tallest);
        heights.push((tallest + sizing.pad_top + sizing.pad_bottom).max(sizing.min_row_height));
    }
    (content, heights)
}

/// Start coordinate of each span laid end to end from `start` with `gap` between spans.
pub fn axis_positions(sizes: &[i64], gap: i64, start: i64) -> Vec<i64> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut cursor = start;
    for size in sizes {
        out.push(cursor);
        cursor += size + gap;
    }
    out
}

/// Total extent of spans laid end to end with `gap` between them.
pub fn axis_extent(sizes: &[i64], gap: i64) -> i64 {
    if sizes.is_empty() {
        return 0;
    }
    sizes.iter().sum::<i64>() + gap * (sizes.len() as i64 - 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellInsets {
    /// Horizontal inset of feature boxes from the column edge.
    pub feature: i64,
    /// Horizontal inset of item boxes from their container (feature box or column).
    pub item: i64,
}

/// Emits feature/item boxes for one cell whose content area starts at `content_top`.
pub fn place_cell(
    sizer: &ContentSizer<'_>,
    cell: &Cell<'_>,
    column_x: i64,
    column_width: i64,
    content_top: i64,
    insets: CellInsets,
    out: &mut Vec<LayoutBox>,
) {
    let m = *sizer.metrics();
    for entry in sizer.stack(cell) {
        let top = content_top + entry.top;
        match entry.kind {
            EntryKind::Feature {
                feature,
                label_height,
            } => {
                let fx = column_x + insets.feature;
                let fw = column_width - insets.feature * 2;
                out.push(LayoutBox {
                    kind: BoxKind::Feature,
                    key: feature.id.to_string(),
                    label: feature.label(),
                    detail: None,
                    geometry: BoxGeometry::new(fx, top, fw, entry.height),
                });
                for (i, item) in feature.pbis.iter().enumerate() {
                    out.push(LayoutBox {
                        kind: BoxKind::Item,
                        key: item.id.to_string(),
                        label: item.label(),
                        detail: None,
                        geometry: BoxGeometry::new(
                            fx + insets.item,
                            top + label_height + i as i64 * (m.item_height + m.item_gap),
                            fw - insets.item * 2,
                            m.item_height,
                        ),
                    });
                }
            }
            EntryKind::Item(item) => {
                let inset = insets.feature + insets.item;
                out.push(LayoutBox {
                    kind: BoxKind::Item,
                    key: item.id.to_string(),
                    label: item.label(),
                    detail: None,
                    geometry: BoxGeometry::new(
                        column_x + inset,
                        top + m.orphan_top_offset,
                        column_width - inset * 2,
                        m.item_height,
                    ),
                });
            }
        }
    }
}
