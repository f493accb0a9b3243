//! Construction-time cleanup of extracted datasets.
//!
//! Extractors report full area/iteration paths (`Project\Platform`). Layout works on paths
//! relative to the project root, and features filed directly on the root area borrow the area
//! their items agree on most.

use indexmap::IndexMap;

use crate::model::{Dataset, Feature, IterationInfo, Item};

/// Strips the `{project}\` prefix from a path; other paths are returned unchanged.
pub fn strip_project<'a>(path: &'a str, project: &str) -> &'a str {
    path.strip_prefix(project)
        .and_then(|rest| rest.strip_prefix('\\'))
        .unwrap_or(path)
}

/// Most common value, ties going to the value seen first.
pub fn most_common<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (v, n) in counts {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((v, n));
        }
    }
    best.map(|(v, _)| v)
}

fn strip_item(item: &mut Item, project: &str) {
    if let Some(area) = item.area.as_mut() {
        *area = strip_project(area, project).to_string();
    }
    if let Some(iteration) = item.iteration.as_mut() {
        *iteration = strip_project(iteration, project).to_string();
    }
}

fn resolve_root_area(feature: &mut Feature, project: &str) {
    if feature.area != project {
        return;
    }
    let item_areas = feature
        .pbis
        .iter()
        .filter_map(|p| p.area.as_deref())
        .filter(|a| *a != project);
    if let Some(area) = most_common(item_areas) {
        tracing::debug!(feature = %feature.id, area, "resolved root-area feature");
        feature.area = area.to_string();
    }
}

/// Re-keys the iteration map by project-relative path. On collision the first entry wins.
fn strip_iterations(
    iterations: IndexMap<String, IterationInfo>,
    project: &str,
) -> IndexMap<String, IterationInfo> {
    let mut out = IndexMap::with_capacity(iterations.len());
    for (path, mut info) in iterations {
        let key = strip_project(&path, project).to_string();
        if out.contains_key(&key) {
            tracing::debug!(path = %path, "dropping duplicate iteration");
            continue;
        }
        info.path = strip_project(&info.path, project).to_string();
        out.insert(key, info);
    }
    out
}

/// Returns the dataset with project prefixes stripped and root-area features resolved.
pub fn normalize(mut dataset: Dataset) -> Dataset {
    let project = dataset.project.clone();
    dataset.iterations = strip_iterations(std::mem::take(&mut dataset.iterations), &project);
    for epic in dataset.initiatives.iter_mut().flat_map(|i| i.epics.iter_mut()) {
        for feature in &mut epic.features {
            feature.area = strip_project(&feature.area, &project).to_string();
            for item in &mut feature.pbis {
                strip_item(item, &project);
            }
            resolve_root_area(feature, &project);
        }
        for item in &mut epic.orphan_pbis {
            strip_item(item, &project);
        }
    }
    dataset
}
