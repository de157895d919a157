//! Connected components and the [`Partition`] type.
//!
//! Components are found with petgraph's [`UnionFind`] over the current edge
//! set. For directed graphs edge orientation is ignored (weakly connected
//! components), which is the connectivity notion the community decomposer
//! tracks.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{EdgeType, unionfind::UnionFind, visit::NodeIndexable};
use serde::Serialize;

use super::model::{Graph, VertexId};

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// A partition of a vertex set into disjoint, non-empty communities.
///
/// Communities are kept in a canonical order (by smallest member) so two
/// partitions of the same vertex set compare equal exactly when they group
/// vertices the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Partition<V: Ord> {
    communities: Vec<BTreeSet<V>>,
}

/// Size profile of a partition: how many communities, and the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    pub communities: usize,
    pub smallest: usize,
    pub largest: usize,
}

impl<V: Ord> Partition<V> {
    /// Build a partition from arbitrary groups. Empty groups are dropped.
    #[must_use]
    pub fn new(groups: impl IntoIterator<Item = BTreeSet<V>>) -> Self {
        let mut communities: Vec<BTreeSet<V>> =
            groups.into_iter().filter(|g| !g.is_empty()).collect();
        communities.sort_by(|a, b| a.first().cmp(&b.first()));
        Self { communities }
    }

    /// Number of communities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BTreeSet<V>> + '_ {
        self.communities.iter()
    }

    #[must_use]
    pub fn communities(&self) -> &[BTreeSet<V>] {
        &self.communities
    }

    /// Total number of vertices across all communities.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.communities.iter().map(BTreeSet::len).sum()
    }

    /// The community containing `v`, if any.
    #[must_use]
    pub fn community_of(&self, v: &V) -> Option<&BTreeSet<V>> {
        self.communities.iter().find(|c| c.contains(v))
    }

    #[must_use]
    pub fn summary(&self) -> PartitionSummary {
        PartitionSummary {
            communities: self.communities.len(),
            smallest: self.communities.iter().map(BTreeSet::len).min().unwrap_or(0),
            largest: self.communities.iter().map(BTreeSet::len).max().unwrap_or(0),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<BTreeSet<V>> {
        self.communities
    }
}

impl<'a, V: Ord> IntoIterator for &'a Partition<V> {
    type Item = &'a BTreeSet<V>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.communities.iter()
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

impl<V: VertexId, Ty: EdgeType> Graph<V, Ty> {
    /// Partition the vertex set into connected components.
    #[must_use]
    pub fn connected_components(&self) -> Partition<V> {
        let g = self.inner();
        let uf = self.union_edges();

        let mut groups: BTreeMap<usize, BTreeSet<V>> = BTreeMap::new();
        for ix in g.node_indices() {
            groups
                .entry(uf.find(ix.index()))
                .or_default()
                .insert(self.vertex(ix).clone());
        }

        Partition::new(groups.into_values())
    }

    /// Number of connected components, without materializing them.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let g = self.inner();
        let uf = self.union_edges();
        g.node_indices()
            .filter(|ix| uf.find(ix.index()) == ix.index())
            .count()
    }

    fn union_edges(&self) -> UnionFind<usize> {
        let g = self.inner();
        let mut uf = UnionFind::new(g.node_bound());
        for e in g.edge_indices() {
            if let Some((a, b)) = g.edge_endpoints(e) {
                uf.union(a.index(), b.index());
            }
        }
        uf
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
