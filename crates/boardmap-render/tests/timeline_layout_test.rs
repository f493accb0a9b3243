use boardmap_core::{Dataset, load_dataset};
use boardmap_render::config::RowOrder;
use boardmap_render::model::{BoxGeometry, BoxKind};
use boardmap_render::{Error, LayoutOptions, layout_timeline};
use serde_json::{Value, json};

fn dataset(v: Value) -> Dataset {
    load_dataset(&v.to_string()).expect("dataset")
}

fn scheduled(id: u64, area: &str, iteration: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Item {id}"),
        "area": format!("Flightrac\\{area}"),
        "iteration": format!("Flightrac\\{iteration}")
    })
}

fn doc(pbis: Vec<Value>, orphans: Vec<Value>) -> Value {
    json!({
        "project": "Flightrac",
        "extracted": "2026-02-14",
        "iterations": {
            "Delivery\\Sprint 2": { "path": "Delivery\\Sprint 2", "start": "2026-02-02", "finish": "2026-02-15" },
            "Backlog": { "path": "Backlog" },
            "Delivery\\Sprint 1": { "path": "Delivery\\Sprint 1", "start": "2026-01-05", "finish": "2026-01-18" }
        },
        "initiatives": [{
            "id": 1,
            "title": "Ops",
            "epics": [{
                "id": 10,
                "title": "Tooling",
                "features": [{ "id": 11, "title": "Scheduler", "area": "Flightrac\\Web", "pbis": pbis }],
                "orphan_pbis": orphans
            }]
        }]
    })
}

#[test]
fn dated_iterations_become_sorted_columns() {
    let ds = dataset(doc(
        vec![
            scheduled(20, "Web", "Delivery\\Sprint 2"),
            scheduled(21, "Api", "Delivery\\Sprint 1"),
            scheduled(22, "Web", "Backlog"),
        ],
        vec![],
    ));
    let out = layout_timeline(&ds, &LayoutOptions::default()).unwrap();
    let plan = &out.plan;

    let columns: Vec<&str> = plan.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(columns, vec!["Delivery\\Sprint 1", "Delivery\\Sprint 2"]);
    assert_eq!(plan.columns_x, vec![270, 520]);
    assert_eq!(plan.grid_width, 480);

    // First-seen row order over scheduled items; the backlog item is not placed.
    assert_eq!(plan.row_keys, vec!["Web".to_string(), "Api".to_string()]);
    assert_eq!(plan.row_heights, vec![60, 60]);
    assert_eq!(plan.rows_y, vec![180, 260]);
    assert_eq!(plan.grid_height, 140);
    assert!(plan.find_box(&BoxKind::Item, "22").is_none());

    let web_item = plan.find_box(&BoxKind::Item, "20").unwrap();
    assert_eq!(web_item.geometry, BoxGeometry::new(528, 192, 214, 28));
    let api_item = plan.find_box(&BoxKind::Item, "21").unwrap();
    assert_eq!(api_item.geometry, BoxGeometry::new(278, 272, 214, 28));

    let header = plan
        .boxes
        .iter()
        .find(|b| matches!(b.kind, BoxKind::IterationHeader { .. }) && b.key == "0")
        .unwrap();
    assert_eq!(header.label, "Sprint 1");
    assert_eq!(header.detail.as_deref(), Some("Jan 5 \u{2013} Jan 18"));
    assert_eq!(header.geometry, BoxGeometry::new(270, 105, 230, 50));

    let lane = plan.find_box(&BoxKind::IterationLane, "1").unwrap();
    assert_eq!(lane.geometry, BoxGeometry::new(520, 157, 230, 186));

    assert_eq!(out.legend_y, 180 + 140 + 23 + 22);
    assert_eq!((out.page_width, out.page_height), (1200, 800));
    assert_eq!(out.stats.items, 2);
    assert_eq!(out.stats.iterations, 2);
}

#[test]
fn items_in_one_cell_stack_with_item_gap() {
    let ds = dataset(doc(
        vec![
            scheduled(20, "Web", "Delivery\\Sprint 1"),
            scheduled(21, "Web", "Delivery\\Sprint 1"),
            scheduled(22, "Web", "Delivery\\Sprint 1"),
        ],
        vec![],
    ));
    let out = layout_timeline(&ds, &LayoutOptions::default()).unwrap();
    let plan = &out.plan;

    // 12 + 3 * 34 - 6 + 12
    assert_eq!(plan.row_heights, vec![120]);
    let ys: Vec<i64> = plan
        .boxes_of(&BoxKind::Item)
        .map(|b| b.geometry.y)
        .collect();
    assert_eq!(ys, vec![192, 226, 260]);
}

#[test]
fn alphabetical_row_order_is_configurable() {
    let ds = dataset(doc(
        vec![
            scheduled(20, "Web", "Delivery\\Sprint 1"),
            scheduled(21, "Api", "Delivery\\Sprint 2"),
        ],
        vec![],
    ));
    let mut options = LayoutOptions::default();
    options.config.timeline.row_order = RowOrder::Alphabetical;
    let out = layout_timeline(&ds, &options).unwrap();
    assert_eq!(out.plan.row_keys, vec!["Api".to_string(), "Web".to_string()]);
}

#[test]
fn orphans_are_scheduled_too() {
    let ds = dataset(doc(vec![], vec![scheduled(30, "Data", "Delivery\\Sprint 2")]));
    let out = layout_timeline(&ds, &LayoutOptions::default()).unwrap();
    assert_eq!(out.plan.row_keys, vec!["Data".to_string()]);
    let item = out.plan.find_box(&BoxKind::Item, "30").unwrap();
    assert_eq!(item.geometry.x, 528);
}

#[test]
fn tracks_follow_first_path_segment() {
    let mut v = doc(vec![scheduled(20, "Web", "Delivery\\Sprint 1")], vec![]);
    v["iterations"]["Ops\\Window 1"] =
        json!({ "path": "Ops\\Window 1", "start": "2026-01-10", "finish": "2026-01-20" });
    let out = layout_timeline(&dataset(v), &LayoutOptions::default()).unwrap();

    let tracks: Vec<usize> = out
        .plan
        .boxes
        .iter()
        .filter_map(|b| match b.kind {
            BoxKind::IterationHeader { track } => Some(track),
            _ => None,
        })
        .collect();
    // Sprint 1 (Jan 5), Window 1 (Jan 10), Sprint 2 (Feb 2)
    assert_eq!(tracks, vec![0, 1, 0]);
}

#[test]
fn nothing_scheduled_is_an_error() {
    let ds = dataset(doc(vec![scheduled(22, "Web", "Backlog")], vec![]));
    let err = layout_timeline(&ds, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoScheduledItems));
}

#[test]
fn malformed_iteration_date_is_reported() {
    let mut v = doc(vec![scheduled(20, "Web", "Delivery\\Sprint 1")], vec![]);
    v["iterations"]["Delivery\\Sprint 1"]["start"] = json!("next week");
    let err = layout_timeline(&dataset(v), &LayoutOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid date for iteration 'Delivery\\Sprint 1': next week"
    );
}

#[test]
fn full_path_iteration_keys_still_schedule_items() {
    let v = json!({
        "project": "Flightrac",
        "iterations": {
            "Flightrac\\Delivery\\Sprint 1": {
                "path": "Flightrac\\Delivery\\Sprint 1", "start": "2026-01-05", "finish": "2026-01-18"
            }
        },
        "initiatives": [{
            "id": 1, "title": "Ops",
            "epics": [{ "id": 10, "title": "Tooling", "orphan_pbis": [
                scheduled(30, "Web", "Delivery\\Sprint 1")
            ]}]
        }]
    });
    let out = layout_timeline(&dataset(v), &LayoutOptions::default()).unwrap();
    assert_eq!(out.plan.columns[0].key, "Delivery\\Sprint 1");
    assert!(out.plan.find_box(&BoxKind::Item, "30").is_some());
}

#[test]
fn equal_start_dates_break_ties_by_finish_then_path() {
    let v = json!({
        "project": "Flightrac",
        "iterations": {
            "Ops\\Long": { "path": "Ops\\Long", "start": "2026-01-05", "finish": "2026-01-25" },
            "Web\\Short": { "path": "Web\\Short", "start": "2026-01-05", "finish": "2026-01-11" },
            "Delivery\\B": { "path": "Delivery\\B", "start": "2026-02-02", "finish": "2026-02-15" },
            "Delivery\\A": { "path": "Delivery\\A", "start": "2026-02-02", "finish": "2026-02-15" }
        },
        "initiatives": [{
            "id": 1, "title": "Ops",
            "epics": [{ "id": 10, "title": "Tooling", "orphan_pbis": [
                scheduled(30, "Web", "Ops\\Long")
            ]}]
        }]
    });
    let out = layout_timeline(&dataset(v), &LayoutOptions::default()).unwrap();
    let columns: Vec<&str> = out.plan.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(columns, vec!["Web\\Short", "Ops\\Long", "Delivery\\A", "Delivery\\B"]);
}
