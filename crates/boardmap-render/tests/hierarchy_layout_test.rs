use boardmap_core::{Dataset, load_dataset};
use boardmap_render::model::{BoxGeometry, BoxKind, HierarchyLayout};
use boardmap_render::{Error, LayoutOptions, layout_hierarchy};
use serde_json::{Value, json};

fn dataset(v: Value) -> Dataset {
    load_dataset(&v.to_string()).expect("dataset")
}

fn layout(v: Value) -> HierarchyLayout {
    layout_hierarchy(&dataset(v), &LayoutOptions::default()).expect("layout ok")
}

fn pbi(id: u64, area: &str) -> Value {
    json!({ "id": id, "title": format!("Item {id}"), "area": area })
}

fn feature(id: u64, title: &str, area: &str, pbis: Vec<Value>) -> Value {
    json!({ "id": id, "title": title, "area": area, "pbis": pbis })
}

fn initiative(id: u64, epics: Vec<Value>) -> Value {
    json!({ "id": id, "title": format!("Initiative {id}"), "epics": epics })
}

fn epic(id: u64, features: Vec<Value>, orphans: Vec<Value>) -> Value {
    json!({ "id": id, "title": format!("Epic {id}"), "features": features, "orphan_pbis": orphans })
}

fn doc(initiatives: Vec<Value>) -> Value {
    json!({ "project": "Flightrac", "extracted": "2026-02-14", "initiatives": initiatives })
}

#[test]
fn single_feature_geometry() {
    let out = layout(doc(vec![initiative(
        36,
        vec![epic(
            37,
            vec![feature(
                38,
                "Scheduler",
                "Platform",
                vec![pbi(39, "Platform"), pbi(40, "Platform"), pbi(41, "Platform")],
            )],
            vec![],
        )],
    )]));

    assert_eq!(out.regions.len(), 1);
    let region = &out.regions[0];
    let plan = &region.plan;
    assert_eq!(region.y_offset, 75);
    assert_eq!(plan.row_keys, vec!["Platform".to_string()]);
    assert_eq!(plan.row_content_heights, vec![130]);
    assert_eq!(plan.row_heights, vec![154]);
    assert_eq!(plan.total_height, 83 + 154);

    let feat = plan.find_box(&BoxKind::Feature, "38").unwrap();
    assert_eq!(feat.geometry, BoxGeometry::new(275, 95, 185, 130));
    assert_eq!(feat.label, "#38 Scheduler");

    let items: Vec<BoxGeometry> = plan.boxes_of(&BoxKind::Item).map(|b| b.geometry).collect();
    assert_eq!(
        items,
        vec![
            BoxGeometry::new(283, 121, 169, 28),
            BoxGeometry::new(283, 155, 169, 28),
            BoxGeometry::new(283, 189, 169, 28),
        ]
    );

    let bar = plan.find_box(&BoxKind::Initiative, "36").unwrap();
    assert_eq!(bar.geometry, BoxGeometry::new(270, 0, 195, 30));
    assert_eq!(bar.label, "Initiative #36: Initiative 36");
    let header = plan.find_box(&BoxKind::Epic, "37").unwrap();
    assert_eq!(header.geometry, BoxGeometry::new(270, 35, 195, 38));
    let area = plan.find_box(&BoxKind::Area, "platform").unwrap();
    assert_eq!(area.geometry, BoxGeometry::new(100, 140, 140, 40));
    let lane = plan.find_box(&BoxKind::AreaLane, "platform").unwrap();
    assert_eq!(lane.geometry, BoxGeometry::new(240, 83, 255, 154));
    let elane = plan.find_box(&BoxKind::EpicLane, "37").unwrap();
    assert_eq!(elane.geometry, BoxGeometry::new(270, 60, 195, 200));

    assert_eq!(out.legend_y, 75 + 237 + 50);
    assert_eq!(out.content_height, 237 + 50);
    assert_eq!((out.page_width, out.page_height), (1200, 800));
    assert_eq!(out.stats.features, 1);
    assert_eq!(out.stats.items, 3);
}

#[test]
fn disjoint_initiatives_stack_vertically() {
    let out = layout(doc(vec![
        initiative(1, vec![epic(10, vec![feature(11, "A", "Web", vec![pbi(12, "Web")])], vec![])]),
        initiative(2, vec![epic(20, vec![feature(21, "B", "Api", vec![pbi(22, "Api")])], vec![])]),
    ]));

    assert_eq!(out.regions.len(), 2);
    let first = &out.regions[0];
    let second = &out.regions[1];
    assert_eq!(first.initiatives, vec!["1".to_string()]);
    assert_eq!(second.initiatives, vec!["2".to_string()]);

    // 26 + 34 - 6 + 8 = 62, padded to 86, floored at the 90 minimum
    assert_eq!(first.plan.row_heights, vec![90]);
    assert_eq!(first.plan.total_height, 173);
    assert_eq!(first.y_offset, 75);
    assert_eq!(second.y_offset, 75 + 173 + 50);
    assert_eq!(out.legend_y, second.y_offset + 173 + 50);
    assert_eq!(out.stats.regions, 2);
    assert_eq!(out.stats.areas, 2);
}

#[test]
fn shared_areas_group_transitively() {
    let out = layout(doc(vec![
        initiative(1, vec![epic(10, vec![feature(11, "A", "Web", vec![])], vec![])]),
        initiative(2, vec![epic(20, vec![feature(21, "B", "Api", vec![])], vec![])]),
        initiative(
            3,
            vec![epic(
                30,
                vec![feature(31, "C", "Api", vec![]), feature(32, "D", "Web", vec![])],
                vec![],
            )],
        ),
        initiative(4, vec![epic(40, vec![feature(41, "E", "Data", vec![])], vec![])]),
    ]));

    assert_eq!(out.regions.len(), 2);
    assert_eq!(
        out.regions[0].initiatives,
        vec!["1".to_string(), "2".to_string(), "3".to_string()]
    );
    assert_eq!(out.regions[1].initiatives, vec!["4".to_string()]);

    let plan = &out.regions[0].plan;
    assert_eq!(plan.row_keys, vec!["Web".to_string(), "Api".to_string()]);
    let spans: Vec<(usize, usize)> = plan
        .column_spans
        .iter()
        .map(|s| (s.first_column, s.last_column))
        .collect();
    assert_eq!(spans, vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(plan.columns_x, vec![270, 490, 710]);
    assert_eq!(plan.grid_width, 3 * 220 - 25);
}

#[test]
fn initiative_spans_cover_their_epics() {
    let out = layout(doc(vec![
        initiative(
            1,
            vec![
                epic(10, vec![feature(11, "A", "Web", vec![])], vec![]),
                epic(12, vec![], vec![]),
                epic(13, vec![], vec![pbi(14, "Web")]),
            ],
        ),
        initiative(2, vec![epic(20, vec![], vec![])]),
        initiative(3, vec![epic(30, vec![feature(31, "B", "Web", vec![])], vec![])]),
    ]));

    let plan = &out.regions[0].plan;
    // Epic 12 and initiative 2 have nothing to draw
    let columns: Vec<&str> = plan.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(columns, vec!["10", "13", "30"]);
    assert_eq!(plan.column_spans.len(), 2);
    assert_eq!(plan.column_spans[0].initiative, "1");
    assert_eq!(
        (plan.column_spans[0].first_column, plan.column_spans[0].last_column),
        (0, 1)
    );
    assert_eq!(
        (plan.column_spans[1].first_column, plan.column_spans[1].last_column),
        (2, 2)
    );
    assert!(plan.find_box(&BoxKind::Initiative, "2").is_none());

    let bar = plan.find_box(&BoxKind::Initiative, "1").unwrap();
    assert_eq!(bar.geometry.width, 2 * 220 - 25);
}

#[test]
fn orphans_stack_below_features() {
    let out = layout(doc(vec![initiative(
        1,
        vec![epic(
            10,
            vec![feature(11, "A", "Web", vec![pbi(12, "Web")])],
            vec![pbi(13, "Web")],
        )],
    )]));

    let plan = &out.regions[0].plan;
    // feature 62, gap 10, orphan slot 28 + 8
    assert_eq!(plan.row_content_heights, vec![108]);
    assert_eq!(plan.row_heights, vec![132]);
    let orphan = plan.find_box(&BoxKind::Item, "13").unwrap();
    assert_eq!(orphan.geometry, BoxGeometry::new(283, 83 + 12 + 62 + 10 + 5, 169, 28));
}

#[test]
fn boxes_stay_inside_rows_and_do_not_overlap() {
    let long = "A very long feature title that certainly needs more than one line to wrap";
    let out = layout(doc(vec![initiative(
        1,
        vec![
            epic(
                10,
                vec![
                    feature(11, long, "Web", vec![pbi(12, "Web"), pbi(13, "Web")]),
                    feature(14, "Short", "Web", vec![]),
                ],
                vec![pbi(15, "Web"), pbi(16, "Api")],
            ),
            epic(20, vec![feature(21, long, "Api", vec![pbi(22, "Api")])], vec![]),
        ],
    )]));

    let plan = &out.regions[0].plan;
    let lanes: Vec<BoxGeometry> = plan.boxes_of(&BoxKind::AreaLane).map(|b| b.geometry).collect();
    let content: Vec<_> = plan
        .boxes
        .iter()
        .filter(|b| matches!(b.kind, BoxKind::Feature | BoxKind::Item))
        .collect();

    for b in &content {
        assert!(
            lanes.iter().any(|lane| lane.contains(&b.geometry)),
            "{:?} {} escapes its row",
            b.kind,
            b.key
        );
    }

    let features: Vec<_> = plan.boxes_of(&BoxKind::Feature).collect();
    for (i, a) in features.iter().enumerate() {
        for b in &features[i + 1..] {
            assert!(!a.geometry.overlaps(&b.geometry), "{} overlaps {}", a.key, b.key);
        }
    }

    let long_feature = plan.find_box(&BoxKind::Feature, "11").unwrap();
    let short_feature = plan.find_box(&BoxKind::Feature, "14").unwrap();
    assert!(long_feature.geometry.height > 62);
    assert_eq!(
        short_feature.geometry.y,
        long_feature.geometry.bottom() + 10
    );
}

#[test]
fn layout_is_deterministic() {
    let input = doc(vec![
        initiative(1, vec![epic(10, vec![feature(11, "A", "Web", vec![pbi(12, "Web")])], vec![])]),
        initiative(2, vec![epic(20, vec![], vec![pbi(21, "Api")])]),
    ]);
    let ds = dataset(input);
    let a = layout_hierarchy(&ds, &LayoutOptions::default()).unwrap();
    let b = layout_hierarchy(&ds, &LayoutOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_hierarchy_is_an_error() {
    let ds = dataset(doc(vec![initiative(1, vec![epic(10, vec![], vec![])])]));
    let err = layout_hierarchy(&ds, &LayoutOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyHierarchy));
}

#[test]
fn orphan_without_area_is_rejected() {
    let ds = dataset(doc(vec![initiative(
        1,
        vec![epic(10, vec![], vec![json!({ "id": 99, "title": "Lost" })])],
    )]));
    let err = layout_hierarchy(&ds, &LayoutOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Work item #99 has no area path");
}

#[test]
fn config_overrides_column_width() {
    let mut options = LayoutOptions::default();
    options.config.hierarchy.column_width = 300;
    let ds = dataset(doc(vec![initiative(
        1,
        vec![
            epic(10, vec![feature(11, "A", "Web", vec![])], vec![]),
            epic(20, vec![feature(21, "B", "Web", vec![])], vec![]),
        ],
    )]));
    let out = layout_hierarchy(&ds, &options).unwrap();
    let plan = &out.regions[0].plan;
    assert_eq!(plan.columns_x, vec![270, 595]);
    assert_eq!(plan.grid_width, 625);
    assert_eq!(out.max_grid_width, 625);
}
