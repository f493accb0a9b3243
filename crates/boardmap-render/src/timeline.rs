//! Timeline view: areas as rows, dated iterations as columns.

use boardmap_core::iterations::{
    format_short_date, iteration_label, iteration_sort_key, iteration_track,
};
use boardmap_core::{Dataset, Item, IterationInfo};
use indexmap::{IndexMap, IndexSet};

use crate::config::{RowOrder, TimelineConfig};
use crate::grid::{
    CellGrid, CellInsets, RowSizing, area_key, axis_extent, axis_positions, discover_row_keys,
    place_cell, row_heights,
};
use crate::model::{
    BoxGeometry, BoxKind, GridColumn, LayoutBox, LayoutPlan, TimelineLayout, TimelineStats,
};
use crate::sizing::ContentSizer;
use crate::stack::page_size;
use crate::{Error, LayoutOptions, Result};

/// Dated iterations ordered by `(start, finish, path)`.
pub fn dated_iterations(dataset: &Dataset) -> Vec<(&str, &IterationInfo)> {
    let mut dated: Vec<(&str, &IterationInfo)> = dataset
        .iterations
        .iter()
        .filter(|(_, info)| info.is_dated())
        .map(|(path, info)| (path.as_str(), info))
        .collect();
    dated.sort_by(|a, b| iteration_sort_key(a.0, a.1).cmp(&iteration_sort_key(b.0, b.1)));
    dated
}

/// Items assigned to one of `dated` paths, in hierarchy order.
pub fn scheduled_items<'a>(dataset: &'a Dataset, dated: &IndexSet<&str>) -> Vec<&'a Item> {
    dataset
        .items()
        .filter(|item| {
            item.iteration
                .as_deref()
                .is_some_and(|path| dated.contains(path))
        })
        .collect()
}

/// Track index per column: tracks are numbered in order of first appearance.
fn track_indices(paths: &[&str]) -> Vec<usize> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    paths
        .iter()
        .map(|path| seen.insert_full(iteration_track(path)).0)
        .collect()
}

fn date_range(path: &str, info: &IterationInfo) -> Result<String> {
    let start = match info.start.as_deref() {
        Some(start) => format_short_date(path, start)?,
        None => return Ok(String::new()),
    };
    Ok(match info.finish.as_deref() {
        Some(finish) => format!("{start} \u{2013} {}", format_short_date(path, finish)?),
        None => start,
    })
}

fn plan_timeline(
    columns: &[(&str, &IterationInfo)],
    items: &[&Item],
    config: &TimelineConfig,
    sizer: &ContentSizer<'_>,
) -> Result<LayoutPlan> {
    let mut tags = Vec::with_capacity(items.len());
    for item in items {
        tags.push(item.area()?);
    }
    if config.row_order == RowOrder::Alphabetical {
        tags.sort_unstable();
    }
    let row_keys = discover_row_keys(tags);

    let column_of: IndexMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (path, _))| (*path, i))
        .collect();

    let mut grid = CellGrid::new(row_keys.len(), columns.len());
    for &item in items {
        let column = item
            .iteration
            .as_deref()
            .and_then(|path| column_of.get(path).copied());
        let row = row_keys.get_index_of(item.area()?);
        if let (Some(row), Some(column)) = (row, column) {
            grid.cell_mut(row, column).items.push(item);
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

    let column_sizes = vec![config.column_width; columns.len()];
    let columns_x = axis_positions(&column_sizes, config.column_gap, config.grid_start_x);
    let grid_width = axis_extent(&column_sizes, config.column_gap);

    let paths: Vec<&str> = columns.iter().map(|(path, _)| *path).collect();
    let tracks = track_indices(&paths);

    let mut boxes = Vec::new();

    for (i, &(path, info)) in columns.iter().enumerate() {
        boxes.push(LayoutBox {
            kind: BoxKind::IterationHeader { track: tracks[i] },
            key: i.to_string(),
            label: iteration_label(path).to_string(),
            detail: Some(date_range(path, info)?),
            geometry: BoxGeometry::new(
                columns_x[i],
                config.header_y,
                config.column_width,
                config.header_height,
            ),
        });
    }

    for (i, x) in columns_x.iter().enumerate() {
        boxes.push(LayoutBox {
            kind: BoxKind::IterationLane,
            key: i.to_string(),
            label: String::new(),
            detail: None,
            geometry: BoxGeometry::new(
                *x,
                config.grid_y - config.lane_extend_v,
                config.column_width,
                grid_height + config.lane_extend_v * 2,
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

    let insets = CellInsets {
        feature: 0,
        item: config.item_inset,
    };
    for column in 0..columns.len() {
        for row in 0..row_keys.len() {
            if let Some(cell) = grid.get(row, column) {
                place_cell(
                    sizer,
                    cell,
                    columns_x[column],
                    config.column_width,
                    rows_y[row] + config.cell_pad_top,
                    insets,
                    &mut boxes,
                );
            }
        }
    }

    Ok(LayoutPlan {
        row_keys: row_keys.iter().map(|k| k.to_string()).collect(),
        row_content_heights,
        row_heights,
        rows_y,
        columns: columns
            .iter()
            .map(|(path, _)| GridColumn {
                key: path.to_string(),
                label: iteration_label(path).to_string(),
            })
            .collect(),
        columns_x,
        column_spans: Vec::new(),
        grid_top: config.grid_y,
        grid_width,
        grid_height,
        total_height: config.grid_y + grid_height,
        boxes,
    })
}

pub fn layout_timeline(dataset: &Dataset, options: &LayoutOptions) -> Result<TimelineLayout> {
    let config = &options.config.timeline;
    let sizer = ContentSizer::new(
        options.text_measurer.as_ref(),
        config.cell_metrics(),
        config.label_metrics(),
    );

    let columns = dated_iterations(dataset);
    let dated: IndexSet<&str> = columns.iter().map(|(path, _)| *path).collect();
    let items = scheduled_items(dataset, &dated);
    if items.is_empty() {
        return Err(Error::NoScheduledItems);
    }

    let plan = plan_timeline(&columns, &items, config, &sizer)?;
    let legend_y = config.grid_y + plan.grid_height + config.lane_extend_v + config.legend_gap;
    let (page_width, page_height) = page_size(
        config.grid_start_x + plan.grid_width,
        legend_y + config.legend_height,
        &config.page,
    );

    let stats = TimelineStats {
        page_width,
        page_height,
        iterations: plan.columns.len(),
        areas: plan.row_keys.len(),
        items: items.len(),
        grid_height: plan.grid_height,
    };

    tracing::info!(
        iterations = stats.iterations,
        areas = stats.areas,
        items = stats.items,
        page_width,
        page_height,
        "timeline layout complete"
    );

    Ok(TimelineLayout {
        project: dataset.project.clone(),
        extracted: dataset.extracted.clone(),
        page_width,
        page_height,
        legend_y,
        plan,
        stats,
    })
}
