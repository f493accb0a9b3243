#![forbid(unsafe_code)]

//! Grid layout engine and draw.io emitter for work item hierarchies.
//!
//! Two views share one engine: the hierarchy view (areas x epics, stacked per region of
//! initiatives connected through shared areas) and the timeline view (areas x dated
//! iterations). Layout produces plain geometry ([`model`]); [`drawio`] turns it into XML.

pub mod config;
pub mod drawio;
pub mod grid;
pub mod grouping;
pub mod hierarchy;
pub mod model;
pub mod sizing;
pub mod stack;
pub mod style;
pub mod text;
pub mod timeline;

use crate::config::LayoutConfig;
use crate::model::{HierarchyLayout, TimelineLayout};
use crate::text::{AverageCharWidthMeasurer, TextMeasurer};
use boardmap_core::Dataset;
use std::sync::Arc;

pub use hierarchy::layout_hierarchy;
pub use timeline::layout_timeline;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] boardmap_core::Error),
    #[error("no initiative has an epic with features or orphan items")]
    EmptyHierarchy,
    #[error("no work items are scheduled in a dated iteration")]
    NoScheduledItems,
    #[error("layout config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: LayoutConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(AverageCharWidthMeasurer::default()),
            config: LayoutConfig::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Lays out and serializes the hierarchy view.
pub fn render_hierarchy_drawio(dataset: &Dataset, options: &LayoutOptions) -> Result<String> {
    let layout = layout_hierarchy(dataset, options)?;
    Ok(hierarchy_xml(&layout, options))
}

/// Lays out and serializes the timeline view.
pub fn render_timeline_drawio(dataset: &Dataset, options: &LayoutOptions) -> Result<String> {
    let layout = layout_timeline(dataset, options)?;
    Ok(timeline_xml(&layout, options))
}

pub fn hierarchy_xml(layout: &HierarchyLayout, options: &LayoutOptions) -> String {
    drawio::hierarchy_document(layout, &options.config.hierarchy).to_xml()
}

pub fn timeline_xml(layout: &TimelineLayout, options: &LayoutOptions) -> String {
    drawio::timeline_document(layout, &options.config.timeline).to_xml()
}
