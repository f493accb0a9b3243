//! draw.io style strings and legend content.

use crate::model::BoxKind;

pub const TITLE: &str = "text;html=1;fontSize=18;fontStyle=1;align=center;verticalAlign=middle;";
pub const SUBTITLE: &str =
    "text;html=1;fontSize=11;fontStyle=2;align=center;verticalAlign=middle;fontColor=#666666;";
pub const INITIATIVE: &str = "rounded=1;whiteSpace=wrap;html=1;fontSize=13;fontStyle=1;fillColor=#e1d5e7;strokeColor=#9673a6;verticalAlign=middle;";
pub const EPIC: &str = "rounded=1;whiteSpace=wrap;html=1;fontSize=11;fontStyle=1;fillColor=#dae8fc;strokeColor=#6c8ebf;verticalAlign=middle;";
pub const AREA: &str = "rounded=1;whiteSpace=wrap;html=1;fontSize=12;fontStyle=1;fillColor=#d5e8d4;strokeColor=#82b366;verticalAlign=middle;";
pub const AREA_LANE: &str = "rounded=0;whiteSpace=wrap;html=1;fillColor=#d5e8d4;strokeColor=#82b366;opacity=40;dashed=1;dashPattern=12 6;strokeWidth=2;";
/// Shared by epic lanes and iteration lanes.
pub const COLUMN_LANE: &str = "rounded=0;whiteSpace=wrap;html=1;fillColor=#dae8fc;strokeColor=#6c8ebf;opacity=40;dashed=1;dashPattern=12 6;strokeWidth=2;";
pub const FEATURE: &str = "rounded=1;whiteSpace=wrap;html=1;fontSize=9;fontStyle=1;fillColor=#fff2cc;strokeColor=#d6b656;verticalAlign=top;dashed=1;strokeWidth=2;opacity=60;";
pub const ITEM: &str = "rounded=0;whiteSpace=wrap;html=1;fontSize=8;fillColor=#f8cecc;strokeColor=#b85450;verticalAlign=middle;";
pub const HEADER: &str =
    "text;html=1;fontSize=12;fontStyle=5;align=center;verticalAlign=middle;fontColor=#333333;";
pub const ROTATED_HEADER: &str = "text;html=1;fontSize=12;fontStyle=5;align=center;verticalAlign=middle;fontColor=#333333;rotation=-90;";
pub const LEGEND_BG: &str = "rounded=1;whiteSpace=wrap;html=1;fillColor=#ffffff;strokeColor=#cccccc;";
pub const LEGEND_TITLE: &str = "text;html=1;fontSize=12;fontStyle=1;align=left;verticalAlign=middle;";
pub const TEXT: &str = "text;html=1;fontSize=10;align=left;verticalAlign=middle;";

/// Fill/stroke pairs cycled by iteration track.
pub const TRACK_COLOURS: [(&str, &str); 4] = [
    ("#dae8fc", "#6c8ebf"),
    ("#e1d5e7", "#9673a6"),
    ("#fff2cc", "#d6b656"),
    ("#d5e8d4", "#82b366"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub shape: &'static str,
    pub text: &'static str,
}

pub const HIERARCHY_LEGEND: [LegendEntry; 5] = [
    LegendEntry {
        fill: "#e1d5e7",
        stroke: "#9673a6",
        shape: "rounded=1",
        text: "Initiative \u{2014} the top-level strategic goal",
    },
    LegendEntry {
        fill: "#dae8fc",
        stroke: "#6c8ebf",
        shape: "rounded=1",
        text: "Epic \u{2014} ownership domain (who is responsible)",
    },
    LegendEntry {
        fill: "#d5e8d4",
        stroke: "#82b366",
        shape: "rounded=1",
        text: "Area Path \u{2014} the system or component (where code runs)",
    },
    LegendEntry {
        fill: "#fff2cc",
        stroke: "#d6b656",
        shape: "rounded=1;dashed=1;strokeWidth=2;opacity=60",
        text: "Feature \u{2014} aggregation of related PBIs under an Epic",
    },
    LegendEntry {
        fill: "#f8cecc",
        stroke: "#b85450",
        shape: "rounded=0",
        text: "PBI \u{2014} deliverable work item, area path = who does the work",
    },
];

pub const TIMELINE_LEGEND: [LegendEntry; 2] = [
    LegendEntry {
        fill: "#d5e8d4",
        stroke: "#82b366",
        shape: "rounded=1",
        text: "Area Path \u{2014} the system or component",
    },
    LegendEntry {
        fill: "#f8cecc",
        stroke: "#b85450",
        shape: "rounded=0",
        text: "PBI \u{2014} deliverable work item",
    },
];

pub fn swatch_style(entry: &LegendEntry) -> String {
    format!(
        "whiteSpace=wrap;html=1;fillColor={};strokeColor={};{};",
        entry.fill, entry.stroke, entry.shape
    )
}

pub fn iteration_header_style(track: usize) -> String {
    let (fill, stroke) = TRACK_COLOURS[track % TRACK_COLOURS.len()];
    format!(
        "rounded=1;whiteSpace=wrap;html=1;fontSize=10;fontStyle=1;fillColor={fill};strokeColor={stroke};verticalAlign=middle;"
    )
}

pub fn box_style(kind: &BoxKind) -> String {
    match kind {
        BoxKind::Initiative => INITIATIVE.to_string(),
        BoxKind::Epic => EPIC.to_string(),
        BoxKind::EpicLane | BoxKind::IterationLane => COLUMN_LANE.to_string(),
        BoxKind::Area => AREA.to_string(),
        BoxKind::AreaLane => AREA_LANE.to_string(),
        BoxKind::Feature => FEATURE.to_string(),
        BoxKind::Item => ITEM.to_string(),
        BoxKind::IterationHeader { track } => iteration_header_style(*track),
    }
}
