//! Shortest-path enumeration.
//!
//! # Overview
//!
//! For a pair of vertices `(s, t)` we want **every** minimum-length path,
//! not just the distance. A breadth-first search from `s` records, for each
//! discovered vertex, the full set of predecessors at minimal distance. All
//! shortest paths to `t` are then rebuilt by backtracking through those
//! predecessor sets from `t` to `s`.
//!
//! [`PathTable`] runs one search per source and stores a [`PathSet`] for
//! every pair of distinct vertices: each unordered pair once for undirected
//! graphs (the opposite orientation is the reverse), each ordered pair for
//! directed graphs. Unreachable pairs map to an explicit empty set.
//!
//! The table is the evidence the path-enumeration betweenness engines
//! aggregate over. It is exact but can be exponential in size on graphs
//! with many equal-length routes; see [`crate::metrics::Method`] for the
//! accumulation alternative that never materializes paths.

use std::borrow::Cow;
use std::collections::{BTreeMap, VecDeque};

use petgraph::{EdgeType, stable_graph::NodeIndex, visit::NodeIndexable};
use tracing::{instrument, trace};

use crate::error::GraphError;
use crate::graph::{Graph, VertexId};

// ---------------------------------------------------------------------------
// Breadth-first search with predecessor sets
// ---------------------------------------------------------------------------

/// Result of one BFS from a single source, indexed by node index.
///
/// Shared by path enumeration and by dependency accumulation.
pub(crate) struct SearchTree {
    /// Vertices in non-decreasing distance order (discovery order).
    pub order: Vec<NodeIndex>,
    /// `preds[w]`: vertices immediately preceding `w` on shortest paths.
    pub preds: Vec<Vec<NodeIndex>>,
    /// `sigma[w]`: number of shortest paths from the source to `w`.
    pub sigma: Vec<f64>,
    /// `dist[w]`: hop distance from the source, `None` if unreachable.
    pub dist: Vec<Option<usize>>,
}

pub(crate) fn search<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>, s: NodeIndex) -> SearchTree {
    let g = graph.inner();
    let bound = g.node_bound();

    let mut order = Vec::with_capacity(g.node_count());
    let mut preds: Vec<Vec<NodeIndex>> = vec![Vec::new(); bound];
    let mut sigma = vec![0.0_f64; bound];
    let mut dist: Vec<Option<usize>> = vec![None; bound];

    sigma[s.index()] = 1.0;
    dist[s.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let dv = dist[v.index()].unwrap_or_default();

        for w in g.neighbors(v) {
            let wi = w.index();
            if dist[wi].is_none() {
                dist[wi] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[wi] == Some(dv + 1) {
                sigma[wi] += sigma[v.index()];
                preds[wi].push(v);
            }
        }
    }

    SearchTree {
        order,
        preds,
        sigma,
        dist,
    }
}

impl SearchTree {
    /// Every shortest path from the tree's source to `t`, source first.
    fn paths_to(&self, source: NodeIndex, t: NodeIndex) -> Vec<Vec<NodeIndex>> {
        let mut out = Vec::new();
        if self.dist[t.index()].is_none() {
            return out;
        }
        let mut suffix = Vec::new();
        self.backtrack(source, t, &mut suffix, &mut out);
        out
    }

    fn backtrack(
        &self,
        source: NodeIndex,
        node: NodeIndex,
        suffix: &mut Vec<NodeIndex>,
        out: &mut Vec<Vec<NodeIndex>>,
    ) {
        suffix.push(node);
        if node == source {
            out.push(suffix.iter().rev().copied().collect());
        } else {
            for &p in &self.preds[node.index()] {
                self.backtrack(source, p, suffix, out);
            }
        }
        suffix.pop();
    }
}

// ---------------------------------------------------------------------------
// PathSet
// ---------------------------------------------------------------------------

/// All distinct shortest paths between one ordered pair of vertices.
///
/// Each path starts at the source and ends at the target. An empty set
/// means the target is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Vec<NodeIndex>>,
}

impl PathSet {
    /// Number of shortest paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Hop distance between the endpoints, `None` if unreachable.
    #[must_use]
    pub fn distance(&self) -> Option<usize> {
        self.paths.first().map(|p| p.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[NodeIndex]> + '_ {
        self.paths.iter().map(Vec::as_slice)
    }

    /// The same paths walked from target to source.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            paths: self
                .paths
                .iter()
                .map(|p| p.iter().rev().copied().collect())
                .collect(),
        }
    }

    /// How many paths have `v` as an interior vertex (not an endpoint).
    #[must_use]
    pub fn through_count(&self, v: NodeIndex) -> usize {
        self.paths
            .iter()
            .filter(|p| p.len() > 2 && p[1..p.len() - 1].contains(&v))
            .count()
    }

    /// Translate node indices back to vertex identifiers.
    #[must_use]
    pub fn resolve<'g, V: VertexId, Ty: EdgeType>(&self, graph: &'g Graph<V, Ty>) -> Vec<Vec<&'g V>> {
        self.paths
            .iter()
            .map(|p| p.iter().map(|&ix| graph.vertex(ix)).collect())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PathTable
// ---------------------------------------------------------------------------

/// Shortest-path sets for every pair of distinct vertices of a graph.
#[derive(Debug, Clone, Default)]
pub struct PathTable {
    directed: bool,
    vertices: usize,
    edges: usize,
    entries: BTreeMap<(NodeIndex, NodeIndex), PathSet>,
}

impl PathTable {
    /// Enumerate all shortest paths for every pair of distinct vertices.
    ///
    /// Undirected graphs store each unordered pair once, keyed by the lower
    /// node index first.
    #[must_use]
    #[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
    pub fn build<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>) -> Self {
        let g = graph.inner();
        let directed = graph.is_directed();
        let mut entries = BTreeMap::new();

        for s in g.node_indices() {
            let tree = search(graph, s);
            let mut reached = 0_usize;

            for t in g.node_indices() {
                let wanted = if directed { t != s } else { t > s };
                if !wanted {
                    continue;
                }
                let paths = tree.paths_to(s, t);
                if !paths.is_empty() {
                    reached += 1;
                }
                entries.insert((s, t), PathSet { paths });
            }

            trace!(source = ?graph.vertex(s), reached, "paths enumerated");
        }

        Self {
            directed,
            vertices: g.node_bound(),
            edges: g.edge_count(),
            entries,
        }
    }

    /// Confirm the table describes `graph` as it is now.
    ///
    /// # Errors
    ///
    /// [`GraphError::TableMismatch`] if the table was built from a graph with
    /// a different direction, vertex count or edge count.
    pub fn check<V: VertexId, Ty: EdgeType>(&self, graph: &Graph<V, Ty>) -> Result<(), GraphError> {
        let g = graph.inner();
        let found = (graph.is_directed(), g.node_bound(), g.edge_count());
        if found == (self.directed, self.vertices, self.edges) {
            return Ok(());
        }
        Err(GraphError::TableMismatch {
            expected: describe(self.directed, self.vertices, self.edges),
            found: describe(found.0, found.1, found.2),
        })
    }

    /// Path set for the ordered pair `(s, t)`, by node index.
    ///
    /// For undirected tables the reverse orientation is derived from the
    /// stored one. Returns `None` when `s == t` or either index is unknown.
    #[must_use]
    pub fn get(&self, s: NodeIndex, t: NodeIndex) -> Option<Cow<'_, PathSet>> {
        if let Some(set) = self.entries.get(&(s, t)) {
            return Some(Cow::Borrowed(set));
        }
        if self.directed {
            return None;
        }
        self.entries
            .get(&(t, s))
            .map(|set| Cow::Owned(set.reversed()))
    }

    /// Path set for the pair `(s, t)` named by vertex identifier.
    ///
    /// # Errors
    ///
    /// [`GraphError::VertexNotFound`] if either vertex is absent from
    /// `graph`, [`GraphError::SameEndpoints`] if `s == t`.
    pub fn paths<V: VertexId, Ty: EdgeType>(
        &self,
        graph: &Graph<V, Ty>,
        s: &V,
        t: &V,
    ) -> Result<Cow<'_, PathSet>, GraphError> {
        let (si, ti) = validate_pair(graph, s, t)?;
        Ok(self.get(si, ti).unwrap_or_default())
    }

    /// Number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Stored pairs in node-index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &PathSet)> + '_ {
        self.entries.iter().map(|(&(s, t), set)| (s, t, set))
    }
}

fn describe(directed: bool, vertices: usize, edges: usize) -> String {
    let kind = if directed { "directed" } else { "undirected" };
    format!("{kind}, {vertices} vertices, {edges} edges")
}

/// Every shortest path from `s` to `t`, as vertex identifier sequences.
///
/// Returns an empty list when `t` is unreachable from `s`.
///
/// # Errors
///
/// [`GraphError::VertexNotFound`] if either vertex is absent,
/// [`GraphError::SameEndpoints`] if `s == t`.
pub fn all_shortest_paths<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    s: &V,
    t: &V,
) -> Result<Vec<Vec<V>>, GraphError> {
    let (si, ti) = validate_pair(graph, s, t)?;
    let tree = search(graph, si);
    Ok(tree
        .paths_to(si, ti)
        .into_iter()
        .map(|p| p.into_iter().map(|ix| graph.vertex(ix).clone()).collect())
        .collect())
}

fn validate_pair<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    s: &V,
    t: &V,
) -> Result<(NodeIndex, NodeIndex), GraphError> {
    let si = graph
        .index_of(s)
        .ok_or_else(|| GraphError::vertex_not_found(s))?;
    let ti = graph
        .index_of(t)
        .ok_or_else(|| GraphError::vertex_not_found(t))?;
    if si == ti {
        return Err(GraphError::same_endpoints(s));
    }
    Ok((si, ti))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
