use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Work item identifier.
///
/// Extractors emit numeric ids (`36`) but some exports carry strings; both are accepted and kept
/// verbatim so emitted cell ids stay stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkItemId(String);

impl WorkItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for WorkItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for WorkItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for WorkItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Leaf work item (PBI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: WorkItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
}

impl Item {
    /// The item's area path, required wherever the item is used as a row entry.
    pub fn area(&self) -> Result<&str> {
        self.area.as_deref().ok_or_else(|| Error::MissingArea {
            id: self.id.to_string(),
        })
    }

    pub fn label(&self) -> String {
        format!("#{} {}", self.id, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: WorkItemId,
    pub title: String,
    pub area: String,
    #[serde(default)]
    pub pbis: Vec<Item>,
}

impl Feature {
    pub fn label(&self) -> String {
        format!("#{} {}", self.id, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epic {
    pub id: WorkItemId,
    pub title: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub orphan_pbis: Vec<Item>,
}

impl Epic {
    /// Epics without features or orphan items never get a grid column.
    pub fn has_content(&self) -> bool {
        !self.features.is_empty() || !self.orphan_pbis.is_empty()
    }

    pub fn label(&self) -> String {
        format!("#{} {}", self.id, self.title)
    }

    /// Every item under this epic, feature children first, then orphans.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.features
            .iter()
            .flat_map(|f| f.pbis.iter())
            .chain(self.orphan_pbis.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: WorkItemId,
    pub title: String,
    pub epics: Vec<Epic>,
}

impl Initiative {
    pub fn label(&self) -> String {
        format!("Initiative #{}: {}", self.id, self.title)
    }
}

/// Schedule bucket metadata, keyed by iteration path in [`Dataset::iterations`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationInfo {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
}

impl IterationInfo {
    /// Only buckets with a start date are placed on a time axis.
    pub fn is_dated(&self) -> bool {
        self.start.is_some()
    }
}

fn default_project() -> String {
    "Project".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default)]
    pub extracted: String,
    #[serde(default)]
    pub iterations: IndexMap<String, IterationInfo>,
    pub initiatives: Vec<Initiative>,
}

impl Dataset {
    pub fn epics(&self) -> impl Iterator<Item = &Epic> {
        self.initiatives.iter().flat_map(|i| i.epics.iter())
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.epics().flat_map(Epic::items)
    }
}
