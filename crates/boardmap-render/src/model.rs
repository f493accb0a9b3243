use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BoxGeometry {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }

    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// `true` when `other` lies entirely inside `self` (edges may touch).
    pub fn contains(&self, other: &BoxGeometry) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// `true` when the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &BoxGeometry) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// What a laid-out box represents. Styles and cell ids are derived from this in the emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoxKind {
    Initiative,
    Epic,
    /// Vertical background lane behind an epic column.
    EpicLane,
    /// Row label on the left of the grid.
    Area,
    /// Horizontal background lane behind an area row.
    AreaLane,
    Feature,
    Item,
    IterationHeader { track: usize },
    IterationLane,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBox {
    pub kind: BoxKind,
    /// Identifier of the source entity (work item id, area key or column index).
    pub key: String,
    pub label: String,
    /// Secondary label line (iteration date range).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub geometry: BoxGeometry,
}

/// One grid column: an epic (hierarchy view) or a dated iteration (timeline view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColumn {
    pub key: String,
    pub label: String,
}

/// Contiguous columns owned by one initiative, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    pub initiative: String,
    pub first_column: usize,
    pub last_column: usize,
}

/// Geometry of one region, relative to the region's top edge (`y = 0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub row_keys: Vec<String>,
    /// Tallest cell content per row, before padding and the row minimum.
    pub row_content_heights: Vec<i64>,
    pub row_heights: Vec<i64>,
    pub rows_y: Vec<i64>,
    pub columns: Vec<GridColumn>,
    pub columns_x: Vec<i64>,
    pub column_spans: Vec<ColumnSpan>,
    pub grid_top: i64,
    pub grid_width: i64,
    pub grid_height: i64,
    pub total_height: i64,
    pub boxes: Vec<LayoutBox>,
}

impl LayoutPlan {
    pub fn boxes_of<'a>(&'a self, kind: &'a BoxKind) -> impl Iterator<Item = &'a LayoutBox> + 'a {
        self.boxes.iter().filter(move |b| &b.kind == kind)
    }

    pub fn find_box(&self, kind: &BoxKind, key: &str) -> Option<&LayoutBox> {
        self.boxes.iter().find(|b| &b.kind == kind && b.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLayout {
    pub initiatives: Vec<String>,
    pub initiative_titles: Vec<String>,
    pub plan: LayoutPlan,
    pub y_offset: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    pub page_width: i64,
    pub page_height: i64,
    pub regions: usize,
    pub initiatives: usize,
    pub epics: usize,
    pub areas: usize,
    pub features: usize,
    pub items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLayout {
    pub project: String,
    pub extracted: String,
    pub page_width: i64,
    pub page_height: i64,
    pub max_grid_width: i64,
    /// Top of the first region; the title block sits above it.
    pub content_top: i64,
    pub content_height: i64,
    pub legend_y: i64,
    pub regions: Vec<RegionLayout>,
    pub stats: HierarchyStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStats {
    pub page_width: i64,
    pub page_height: i64,
    pub iterations: usize,
    pub areas: usize,
    pub items: usize,
    pub grid_height: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub project: String,
    pub extracted: String,
    pub page_width: i64,
    pub page_height: i64,
    pub legend_y: i64,
    /// Plan in page coordinates (the grid top is fixed, there is a single region).
    pub plan: LayoutPlan,
    pub stats: TimelineStats,
}
