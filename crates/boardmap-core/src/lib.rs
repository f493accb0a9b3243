#![forbid(unsafe_code)]

//! Work item hierarchy model for boardmap (headless).
//!
//! The input is the JSON document produced by the hierarchy extractor:
//! `project`, `extracted`, `iterations` and an ordered list of `initiatives`, each holding
//! epics, features and items. The schema is treated as a stable contract; only optional-field
//! absence is tolerated, anything else fails the parse.

pub mod error;
pub mod iterations;
pub mod model;
pub mod normalize;

pub use error::{Error, Result};
pub use model::{Dataset, Epic, Feature, Initiative, Item, IterationInfo, WorkItemId};

/// Parses an extractor JSON document into a [`Dataset`] without normalization.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(text)?;
    tracing::debug!(
        project = %dataset.project,
        initiatives = dataset.initiatives.len(),
        iterations = dataset.iterations.len(),
        "parsed dataset"
    );
    Ok(dataset)
}

/// Parses and normalizes an extractor JSON document.
pub fn load_dataset(text: &str) -> Result<Dataset> {
    Ok(normalize::normalize(parse_dataset(text)?))
}
