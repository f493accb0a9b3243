//! Hierarchy view: areas as rows, epics as columns, one plan per region.

use boardmap_core::{Dataset, Epic, Initiative};
use indexmap::IndexSet;

use crate::config::HierarchyConfig;
use crate::grid::{
    CellGrid, CellInsets, RowSizing, area_key, axis_extent, axis_positions, discover_row_keys,
    place_cell, row_heights,
};
use crate::grouping::{Region, group_initiatives};
use crate::model::{
    BoxGeometry, BoxKind, ColumnSpan, GridColumn, HierarchyLayout, HierarchyStats, LayoutBox,
    LayoutPlan, RegionLayout,
};
use crate::sizing::ContentSizer;
use crate::stack::{page_size, stack_regions};
use crate::{Error, LayoutOptions, Result};

/// Lays out one region with its top edge at `y = 0`.
pub fn plan_region(
    region: &Region<'_>,
    config: &HierarchyConfig,
    sizer: &ContentSizer<'_>,
) -> Result<LayoutPlan> {
    let mut tags = Vec::new();
    for initiative in &region.initiatives {
        for epic in &initiative.epics {
            tags.extend(epic.features.iter().map(|f| f.area.as_str()));
            for item in &epic.orphan_pbis {
                tags.push(item.area()?);
            }
        }
    }
    let row_keys = discover_row_keys(tags);

    let mut epics: Vec<(&Initiative, &Epic)> = Vec::new();
    let mut column_spans = Vec::new();
    for &initiative in &region.initiatives {
        let first_column = epics.len();
        epics.extend(
            initiative
                .epics
                .iter()
                .filter(|e| e.has_content())
                .map(|e| (initiative, e)),
        );
        if epics.len() > first_column {
            column_spans.push(ColumnSpan {
                initiative: initiative.id.to_string(),
                first_column,
                last_column: epics.len() - 1,
            });
        }
    }

    let mut grid = CellGrid::new(row_keys.len(), epics.len());
    for (col, (_, epic)) in epics.iter().enumerate() {
        for feature in &epic.features {
            if let Some(row) = row_keys.get_index_of(feature.area.as_str()) {
                grid.cell_mut(row, col).features.push(feature);
            }
        }
        for item in &epic.orphan_pbis {
            if let Some(row) = row_keys.get_index_of(item.area()?) {
                grid.cell_mut(row, col).items.push(item);
            }
        }
    }

    let (row_content_heights, row_heights) = row_heights(
        &grid,
        sizer,
        RowSizing {
            pad_top: config.cell_pad_top,
            pad_bottom: config.cell_pad_bottom,
            min_row_height: config.min_row_height,
        },
    );
    let rows_y = axis_positions(&row_heights, config.row_gap, config.grid_y);
    let grid_height = axis_extent(&row_heights, config.row_gap);

    let column_sizes = vec![config.column_width; epics.len()];
    let columns_x = axis_positions(&column_sizes, config.column_gap, config.grid_start_x);
    let grid_width = axis_extent(
        &vec![config.column_width; epics.len().max(1)],
        config.column_gap,
    );
    let column_pitch = config.column_width + config.column_gap;

    let mut boxes = Vec::new();

    for span in &column_spans {
        let (initiative, _) = epics[span.first_column];
        let columns = (span.last_column - span.first_column + 1) as i64;
        boxes.push(LayoutBox {
            kind: BoxKind::Initiative,
            key: span.initiative.clone(),
            label: initiative.label(),
            detail: None,
            geometry: BoxGeometry::new(
                columns_x[span.first_column],
                0,
                columns * column_pitch - config.column_gap,
                config.initiative_bar_height,
            ),
        });
    }

    for (col, (_, epic)) in epics.iter().enumerate() {
        boxes.push(LayoutBox {
            kind: BoxKind::Epic,
            key: epic.id.to_string(),
            label: epic.label(),
            detail: None,
            geometry: BoxGeometry::new(
                columns_x[col],
                config.epic_header_y,
                config.column_width,
                config.epic_header_height,
            ),
        });
    }

    for (row, &area) in row_keys.iter().enumerate() {
        let (y, h) = (rows_y[row], row_heights[row]);
        boxes.push(LayoutBox {
            kind: BoxKind::Area,
            key: area_key(area),
            label: area.to_string(),
            detail: None,
            geometry: BoxGeometry::new(
                config.row_label_x,
                y + h / 2 - config.row_label_height / 2,
                config.row_label_width,
                config.row_label_height,
            ),
        });
        boxes.push(LayoutBox {
            kind: BoxKind::AreaLane,
            key: area_key(area),
            label: String::new(),
            detail: None,
            geometry: BoxGeometry::new(
                config.grid_start_x - config.lane_extend_h,
                y,
                grid_width + config.lane_extend_h * 2,
                h,
            ),
        });
    }

    for (col, (_, epic)) in epics.iter().enumerate() {
        boxes.push(LayoutBox {
            kind: BoxKind::EpicLane,
            key: epic.id.to_string(),
            label: String::new(),
            detail: None,
            geometry: BoxGeometry::new(
                columns_x[col],
                config.grid_y - config.lane_extend_v,
                config.column_width,
                grid_height + config.lane_extend_v * 2,
            ),
        });
    }

    let insets = CellInsets {
        feature: config.feature_inset,
        item: config.item_inset,
    };
    for col in 0..epics.len() {
        for row in 0..row_keys.len() {
            if let Some(cell) = grid.get(row, col) {
                place_cell(
                    sizer,
                    cell,
                    columns_x[col],
                    config.column_width,
                    rows_y[row] + config.cell_pad_top,
                    insets,
                    &mut boxes,
                );
            }
        }
    }

    tracing::debug!(
        initiatives = region.initiatives.len(),
        columns = epics.len(),
        rows = row_keys.len(),
        occupied = grid.occupied(),
        grid_width,
        grid_height,
        "planned hierarchy region"
    );

    Ok(LayoutPlan {
        row_keys: row_keys.iter().map(|k| k.to_string()).collect(),
        row_content_heights,
        row_heights,
        rows_y,
        columns: epics
            .iter()
            .map(|(_, e)| GridColumn {
                key: e.id.to_string(),
                label: e.label(),
            })
            .collect(),
        columns_x,
        column_spans,
        grid_top: config.grid_y,
        grid_width,
        grid_height,
        total_height: config.grid_y + grid_height,
        boxes,
    })
}

pub fn layout_hierarchy(dataset: &Dataset, options: &LayoutOptions) -> Result<HierarchyLayout> {
    let config = &options.config.hierarchy;
    let sizer = ContentSizer::new(
        options.text_measurer.as_ref(),
        config.cell_metrics(),
        config.label_metrics(),
    );

    let mut planned = Vec::new();
    for region in group_initiatives(&dataset.initiatives)? {
        let plan = plan_region(&region, config, &sizer)?;
        planned.push(RegionLayout {
            initiatives: region
                .initiatives
                .iter()
                .map(|i| i.id.to_string())
                .collect(),
            initiative_titles: region.initiatives.iter().map(|i| i.title.clone()).collect(),
            plan,
            y_offset: 0,
        });
    }

    let stacked = stack_regions(planned, config.title_area_height, config.region_gap);
    if stacked.regions.is_empty() {
        return Err(Error::EmptyHierarchy);
    }

    let max_grid_width = stacked
        .regions
        .iter()
        .map(|r| r.plan.grid_width)
        .max()
        .unwrap_or(config.column_width);
    let legend_y = stacked.next_y;
    let (page_width, page_height) = page_size(
        config.grid_start_x + max_grid_width,
        legend_y + config.legend_height,
        &config.page,
    );

    let stats = HierarchyStats {
        page_width,
        page_height,
        regions: stacked.regions.len(),
        initiatives: stacked.regions.iter().map(|r| r.initiatives.len()).sum(),
        epics: dataset.epics().filter(|e| e.has_content()).count(),
        areas: stacked
            .regions
            .iter()
            .flat_map(|r| r.plan.row_keys.iter().map(String::as_str))
            .collect::<IndexSet<_>>()
            .len(),
        features: dataset.epics().map(|e| e.features.len()).sum(),
        items: dataset.items().count(),
    };

    tracing::info!(
        regions = stats.regions,
        epics = stats.epics,
        items = stats.items,
        page_width,
        page_height,
        "hierarchy layout complete"
    );

    Ok(HierarchyLayout {
        project: dataset.project.clone(),
        extracted: dataset.extracted.clone(),
        page_width,
        page_height,
        max_grid_width,
        content_top: config.title_area_height,
        content_height: legend_y - config.title_area_height,
        legend_y,
        regions: stacked.regions,
        stats,
    })
}
