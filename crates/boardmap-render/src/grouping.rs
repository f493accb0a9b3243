//! Clustering of initiatives into independently stacked regions.
//!
//! Two initiatives land in the same region when they share an area, directly or through a chain
//! of other initiatives. Unrelated initiatives are stacked vertically instead of being spread
//! across one very wide grid.

use boardmap_core::Initiative;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;

use crate::Result;

/// Array-backed disjoint set with path halving.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Attaches `b`'s class under `a`'s root.
    pub fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

/// A maximal set of initiatives connected through shared areas, members in input order.
#[derive(Debug, Clone)]
pub struct Region<'a> {
    pub initiatives: Vec<&'a Initiative>,
}

/// Distinct areas referenced by an initiative's features and orphan items.
pub fn initiative_areas(initiative: &Initiative) -> Result<IndexSet<&str>> {
    let mut areas = IndexSet::new();
    for epic in &initiative.epics {
        for feature in &epic.features {
            areas.insert(feature.area.as_str());
        }
        for item in &epic.orphan_pbis {
            areas.insert(item.area()?);
        }
    }
    Ok(areas)
}

/// Partitions `initiatives` into regions, ordered by each region's first member.
pub fn group_initiatives(initiatives: &[Initiative]) -> Result<Vec<Region<'_>>> {
    let mut uf = UnionFind::new(initiatives.len());
    let mut first_owner: FxHashMap<&str, usize> = FxHashMap::default();

    for (i, initiative) in initiatives.iter().enumerate() {
        for area in initiative_areas(initiative)? {
            match first_owner.get(area) {
                Some(&owner) => uf.union(i, owner),
                None => {
                    first_owner.insert(area, i);
                }
            }
        }
    }

    let mut regions: IndexMap<usize, Vec<&Initiative>> = IndexMap::new();
    for (i, initiative) in initiatives.iter().enumerate() {
        let root = uf.find(i);
        regions.entry(root).or_default().push(initiative);
    }

    tracing::debug!(
        initiatives = initiatives.len(),
        regions = regions.len(),
        "grouped initiatives by shared area"
    );

    Ok(regions
        .into_values()
        .map(|initiatives| Region { initiatives })
        .collect())
}
