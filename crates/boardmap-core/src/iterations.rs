//! Iteration (schedule bucket) metadata helpers.
//!
//! Iteration paths use backslash separators (`Track\Sprint 3`). The first segment is the
//! iteration *track*, the last segment is the short label shown in column headers.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::{Dataset, IterationInfo};
use crate::{Error, Result};

pub const PATH_SEPARATOR: char = '\\';

/// Raw classification node as returned by the work tracking service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: Option<NodeAttributes>,
    #[serde(default)]
    pub children: Vec<ClassificationNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttributes {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub finish_date: Option<String>,
}

/// Dates attached to one node of a flattened iteration tree, as the service reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDates {
    pub start: Option<String>,
    pub finish: Option<String>,
}

/// Flattens the children of `root` into a `path -> dates` map in pre-order.
///
/// The root node itself is the project and does not contribute a path segment.
pub fn flatten_iteration_tree(root: &ClassificationNode) -> IndexMap<String, NodeDates> {
    let mut out = IndexMap::new();
    let mut stack: Vec<(&ClassificationNode, String)> = root
        .children
        .iter()
        .rev()
        .map(|child| (child, String::new()))
        .collect();

    while let Some((node, prefix)) = stack.pop() {
        let path = if prefix.is_empty() {
            node.name.clone()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{}", node.name)
        };
        let attrs = node.attributes.as_ref();
        out.insert(
            path.clone(),
            NodeDates {
                start: attrs.and_then(|a| a.start_date.clone()),
                finish: attrs.and_then(|a| a.finish_date.clone()),
            },
        );
        for child in node.children.iter().rev() {
            stack.push((child, path.clone()));
        }
    }
    out
}

fn date_part(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    // "2026-01-01T00:00:00Z" -> "2026-01-01"
    Some(raw.chars().take(10).collect())
}

/// Matches the requested iteration paths against a flattened tree.
///
/// Paths missing from the tree are kept without dates, so the timeline view will skip them.
pub fn resolve_iterations<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    nodes: &IndexMap<String, NodeDates>,
) -> IndexMap<String, IterationInfo> {
    paths
        .into_iter()
        .map(|path| {
            let node = nodes.get(path);
            let info = IterationInfo {
                path: path.to_string(),
                start: date_part(node.and_then(|n| n.start.as_deref())),
                finish: date_part(node.and_then(|n| n.finish.as_deref())),
            };
            (path.to_string(), info)
        })
        .collect()
}

/// Distinct, non-empty iteration paths referenced by any item, sorted.
pub fn collect_iteration_paths(dataset: &Dataset) -> Vec<String> {
    let mut paths: Vec<String> = dataset
        .items()
        .filter_map(|item| item.iteration.as_deref())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

/// Last path segment (`Track\Sprint 3` -> `Sprint 3`).
pub fn iteration_label(path: &str) -> &str {
    path.rsplit(PATH_SEPARATOR).next().unwrap_or(path)
}

/// First path segment (`Track\Sprint 3` -> `Track`).
pub fn iteration_track(path: &str) -> &str {
    path.split(PATH_SEPARATOR).next().unwrap_or(path)
}

/// Column ordering key: `(start, finish, path)`. ISO dates compare correctly as strings.
pub fn iteration_sort_key<'a>(
    path: &'a str,
    info: &'a IterationInfo,
) -> (&'a str, &'a str, &'a str) {
    (
        info.start.as_deref().unwrap_or(""),
        info.finish.as_deref().unwrap_or(""),
        path,
    )
}

/// Formats `2026-01-16` as `Jan 16`.
pub fn format_short_date(path: &str, iso_date: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        path: path.to_string(),
        value: iso_date.to_string(),
    })?;
    Ok(date.format("%b %-d").to_string())
}
