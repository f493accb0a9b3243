//! draw.io (`mxfile`) emitter.
//!
//! Every box becomes one `mxCell` vertex parented to the default layer cell `1`. Cell ids are
//! derived from the source entity so regenerated files diff cleanly.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::config::{HierarchyConfig, TimelineConfig};
use crate::model::{BoxGeometry, BoxKind, HierarchyLayout, LayoutBox, TimelineLayout};
use crate::style::{self, LegendEntry};

const INDENT: &str = "    ";

const LEGEND_TITLE_OFFSET: (i64, i64) = (15, 8);
const LEGEND_FIRST_ROW: i64 = 38;
const LEGEND_ROW_PITCH: i64 = 18;
const LEGEND_SWATCH: i64 = 14;
const LEGEND_TEXT_X: i64 = 38;
const LEGEND_TEXT_WIDTH: i64 = 420;

const ROTATED_HEADER_X: i64 = 15;
const ROTATED_HEADER_SIZE: i64 = 80;

pub const HIERARCHY_HOST: &str = "gen-hierarchy";
pub const TIMELINE_HOST: &str = "gen-timeline";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawioCell {
    pub id: String,
    pub value: String,
    pub style: String,
    pub geometry: BoxGeometry,
}

#[derive(Debug, Clone)]
pub struct DrawioPage {
    pub name: String,
    pub id: String,
    pub width: i64,
    pub height: i64,
    cells: Vec<DrawioCell>,
    ids: FxHashMap<String, usize>,
}

impl DrawioPage {
    pub fn new(name: impl Into<String>, id: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            width,
            height,
            cells: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    /// Appends a vertex. A repeated id (the same work item listed twice) gets a `_{n}` suffix.
    pub fn push(
        &mut self,
        id: impl Into<String>,
        value: impl Into<String>,
        style: impl Into<String>,
        geometry: BoxGeometry,
    ) {
        let mut id = id.into();
        let seen = self.ids.entry(id.clone()).or_insert(0);
        *seen += 1;
        if *seen > 1 {
            tracing::warn!(id = %id, "duplicate cell id");
            id = format!("{id}_{}", *seen - 1);
        }
        self.cells.push(DrawioCell {
            id,
            value: value.into(),
            style: style.into(),
            geometry,
        });
    }

    pub fn cells(&self) -> &[DrawioCell] {
        &self.cells
    }

    fn push_legend(&mut self, x: i64, y: i64, width: i64, height: i64, entries: &[LegendEntry]) {
        self.push(
            "legend_bg",
            "",
            style::LEGEND_BG,
            BoxGeometry::new(x, y, width, height),
        );
        self.push(
            "legend_title",
            "Legend",
            style::LEGEND_TITLE,
            BoxGeometry::new(
                x + LEGEND_TITLE_OFFSET.0,
                y + LEGEND_TITLE_OFFSET.1,
                100,
                25,
            ),
        );
        for (i, entry) in entries.iter().enumerate() {
            let row_y = y + LEGEND_FIRST_ROW + i as i64 * LEGEND_ROW_PITCH;
            self.push(
                format!("leg{i}"),
                "",
                style::swatch_style(entry),
                BoxGeometry::new(
                    x + LEGEND_TITLE_OFFSET.0,
                    row_y,
                    LEGEND_SWATCH,
                    LEGEND_SWATCH,
                ),
            );
            self.push(
                format!("leg{i}t"),
                entry.text,
                style::TEXT,
                BoxGeometry::new(x + LEGEND_TEXT_X, row_y, LEGEND_TEXT_WIDTH, LEGEND_SWATCH),
            );
        }
    }

    fn push_title(&mut self, title: String, subtitle: String, grid_width: i64) {
        self.push(
            "title",
            title,
            style::TITLE,
            BoxGeometry::new(300, 15, (grid_width + 100).max(900), 35),
        );
        self.push(
            "subtitle",
            subtitle,
            style::SUBTITLE,
            BoxGeometry::new(250, 48, (grid_width + 100).max(1000), 25),
        );
    }

    fn push_area_header(&mut self, content_top: i64, content_height: i64) {
        self.push(
            "area_hdr",
            "Area Paths\n(Systems)",
            style::ROTATED_HEADER,
            BoxGeometry::new(
                ROTATED_HEADER_X,
                content_top + content_height / 2 - ROTATED_HEADER_SIZE / 2,
                ROTATED_HEADER_SIZE,
                ROTATED_HEADER_SIZE,
            ),
        );
    }
}

#[derive(Debug, Clone)]
pub struct DrawioDocument {
    pub host: String,
    pub page: DrawioPage,
}

impl DrawioDocument {
    /// Serializes with four-space indentation and no XML declaration.
    pub fn to_xml(&self) -> String {
        let page = &self.page;
        let mut out = String::with_capacity(256 + page.cells.len() * 320);
        let _ = writeln!(
            &mut out,
            r#"<mxfile host="{}" pages="1">"#,
            escape_attr(&self.host)
        );
        let _ = writeln!(
            &mut out,
            r#"{INDENT}<diagram name="{}" id="{}">"#,
            escape_attr(&page.name),
            escape_attr(&page.id)
        );
        let _ = writeln!(
            &mut out,
            r#"{INDENT}{INDENT}<mxGraphModel dx="0" dy="0" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="{}" pageHeight="{}" background="light-dark(#FFFFFF,#FFFFFF)" math="0" shadow="0">"#,
            page.width, page.height
        );
        let cell_indent = INDENT.repeat(4);
        let _ = writeln!(&mut out, "{INDENT}{INDENT}{INDENT}<root>");
        let _ = writeln!(&mut out, r#"{cell_indent}<mxCell id="0" />"#);
        let _ = writeln!(&mut out, r#"{cell_indent}<mxCell id="1" parent="0" />"#);
        for cell in &page.cells {
            let g = &cell.geometry;
            let _ = writeln!(
                &mut out,
                r#"{cell_indent}<mxCell id="{}" value="{}" style="{}" parent="1" vertex="1">"#,
                escape_attr(&cell.id),
                escape_attr(&cell.value),
                escape_attr(&cell.style)
            );
            let _ = writeln!(
                &mut out,
                r#"{cell_indent}{INDENT}<mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry" />"#,
                g.x, g.y, g.width, g.height
            );
            let _ = writeln!(&mut out, "{cell_indent}</mxCell>");
        }
        let _ = writeln!(&mut out, "{INDENT}{INDENT}{INDENT}</root>");
        let _ = writeln!(&mut out, "{INDENT}{INDENT}</mxGraphModel>");
        let _ = writeln!(&mut out, "{INDENT}</diagram>");
        out.push_str("</mxfile>");
        out
    }
}

/// XML attribute escaping; line breaks survive as character references.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#09;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Cell id for a planned box. `region` scopes area ids in the hierarchy view.
pub fn cell_id(b: &LayoutBox, region: Option<usize>) -> String {
    match (&b.kind, region) {
        (BoxKind::Initiative, _) => format!("init_{}", b.key),
        (BoxKind::Epic, _) => format!("epic_{}", b.key),
        (BoxKind::EpicLane, _) => format!("elane_{}", b.key),
        (BoxKind::Feature, _) => format!("feat_{}", b.key),
        (BoxKind::Item, _) => format!("pbi_{}", b.key),
        (BoxKind::Area, Some(si)) => format!("s{si}_area_{}", b.key),
        (BoxKind::Area, None) => format!("area_{}", b.key),
        (BoxKind::AreaLane, Some(si)) => format!("s{si}_lane_{}", b.key),
        (BoxKind::AreaLane, None) => format!("lane_{}", b.key),
        (BoxKind::IterationHeader { .. }, _) => format!("iter_{}", b.key),
        (BoxKind::IterationLane, _) => format!("ilane_{}", b.key),
    }
}

fn cell_value(b: &LayoutBox) -> String {
    match &b.detail {
        Some(detail) if !detail.is_empty() => format!(
            r#"{}<br><font style="font-size:8px;font-weight:normal">{detail}</font>"#,
            b.label
        ),
        _ => b.label.clone(),
    }
}

pub fn hierarchy_document(layout: &HierarchyLayout, config: &HierarchyConfig) -> DrawioDocument {
    let mut page = DrawioPage::new(
        layout.project.clone(),
        "page_0",
        layout.page_width,
        layout.page_height,
    );
    page.push_title(
        format!(
            "{}: Work Item Hierarchy \u{2014} Area Paths x Business Domains",
            layout.project
        ),
        format!(
            "Area paths (rows) = system/component  |  Epics (columns) = ownership domain  |  Features = aggregation of PBIs  |  {}",
            layout.extracted
        ),
        layout.max_grid_width,
    );
    page.push_area_header(layout.content_top, layout.content_height);

    for (si, region) in layout.regions.iter().enumerate() {
        for b in &region.plan.boxes {
            page.push(
                cell_id(b, Some(si)),
                cell_value(b),
                style::box_style(&b.kind),
                b.geometry.translated(0, region.y_offset),
            );
        }
    }

    page.push_legend(
        config.grid_start_x,
        layout.legend_y,
        config.page.legend_width,
        config.legend_height,
        &style::HIERARCHY_LEGEND,
    );

    DrawioDocument {
        host: HIERARCHY_HOST.to_string(),
        page,
    }
}

pub fn timeline_document(layout: &TimelineLayout, config: &TimelineConfig) -> DrawioDocument {
    let plan = &layout.plan;
    let mut page = DrawioPage::new(
        format!("{} Timeline", layout.project),
        "timeline_page",
        layout.page_width,
        layout.page_height,
    );
    page.push_title(
        format!(
            "{}: Timeline View \u{2014} Area Paths x Iterations",
            layout.project
        ),
        format!(
            "Area paths (rows) = system/component  |  Iterations (columns) = scheduled time period  |  Only PBIs in dated iterations shown  |  {}",
            layout.extracted
        ),
        plan.grid_width,
    );
    page.push(
        "iter_hdr",
        "Iterations (Scheduled Work)",
        style::HEADER,
        BoxGeometry::new(
            config.grid_start_x,
            config.axis_caption_y,
            plan.grid_width,
            20,
        ),
    );
    page.push_area_header(plan.grid_top, plan.grid_height);

    for b in &plan.boxes {
        page.push(
            cell_id(b, None),
            cell_value(b),
            style::box_style(&b.kind),
            b.geometry,
        );
    }

    page.push_legend(
        config.grid_start_x,
        layout.legend_y,
        config.page.legend_width,
        config.legend_height,
        &style::TIMELINE_LEGEND,
    );

    DrawioDocument {
        host: TIMELINE_HOST.to_string(),
        page,
    }
}
