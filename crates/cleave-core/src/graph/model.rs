//! Simple graph model backed by a petgraph [`StableGraph`].
//!
//! # Overview
//!
//! A [`Graph`] is a vertex set plus a set of edges with no self-loops and no
//! parallel edges. Vertices are opaque identifiers (integers, strings, …)
//! mapped onto petgraph node indices. Undirected graphs are the default;
//! directed graphs are a separate mode selected by the `Ty` parameter.
//!
//! `StableGraph` keeps node indices valid across edge removal, which the
//! Girvan-Newman decomposer relies on while it prunes its working copy.
//! Vertices are never removed, so node indices follow insertion order.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;

use petgraph::{
    Directed, EdgeType, Undirected,
    stable_graph::{NodeIndex, StableGraph},
};

use crate::error::GraphError;

/// Requirements on a vertex identifier.
///
/// `Ord` gives every result a stable order (score maps, canonical edge keys,
/// partitions); `Debug` is used when reporting errors.
pub trait VertexId: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> VertexId for T {}

/// An unweighted simple graph.
pub struct Graph<V, Ty = Undirected> {
    inner: StableGraph<V, (), Ty>,
    index: HashMap<V, NodeIndex>,
}

// `Ty` is a zero-sized marker; deriving would demand `Ty: Clone`.
impl<V: Clone, Ty: EdgeType> Clone for Graph<V, Ty> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            index: self.index.clone(),
        }
    }
}

impl<V: Debug, Ty: EdgeType> Debug for Graph<V, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &Ty::is_directed())
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Undirected simple graph.
pub type UnGraph<V> = Graph<V, Undirected>;

/// Directed simple graph.
pub type DiGraph<V> = Graph<V, Directed>;

impl<V: VertexId, Ty: EdgeType> Default for Graph<V, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId, Ty: EdgeType> Graph<V, Ty> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: StableGraph::default(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from an edge list. Vertices are added in order of first
    /// appearance.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] if any edge joins a vertex to itself.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Add a vertex if it is not already present. Returns its node index.
    pub fn add_vertex(&mut self, v: V) -> NodeIndex {
        if let Some(&ix) = self.index.get(&v) {
            return ix;
        }
        let ix = self.inner.add_node(v.clone());
        self.index.insert(v, ix);
        ix
    }

    /// Add an edge, inserting missing endpoints as vertices.
    ///
    /// Returns `Ok(true)` if the edge was inserted and `Ok(false)` if it was
    /// already present (parallel edges are never stored). For undirected
    /// graphs `(a, b)` and `(b, a)` are the same edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] if `a == b`.
    pub fn add_edge(&mut self, a: V, b: V) -> Result<bool, GraphError> {
        if a == b {
            return Err(GraphError::self_loop(&a));
        }
        let ia = self.add_vertex(a);
        let ib = self.add_vertex(b);
        if self.inner.find_edge(ia, ib).is_some() {
            return Ok(false);
        }
        self.inner.add_edge(ia, ib, ());
        Ok(true)
    }

    /// Remove the edge between `a` and `b`. Returns `true` if it existed.
    pub fn remove_edge(&mut self, a: &V, b: &V) -> bool {
        let (Some(ia), Some(ib)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        match self.inner.find_edge(ia, ib) {
            Some(e) => self.inner.remove_edge(e).is_some(),
            None => false,
        }
    }

    /// Return `true` if `v` is in the vertex set.
    #[must_use]
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.index.contains_key(v)
    }

    /// Return `true` if the edge exists (either orientation when undirected).
    #[must_use]
    pub fn contains_edge(&self, a: &V, b: &V) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(ia), Some(ib)) => self.inner.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.inner.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    #[must_use]
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Iterate vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.inner.node_indices().map(|ix| &self.inner[ix])
    }

    /// Iterate edges in insertion order, as stored (`source`, `target`).
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.inner.edge_indices().filter_map(|e| {
            self.inner
                .edge_endpoints(e)
                .map(|(a, b)| (&self.inner[a], &self.inner[b]))
        })
    }

    /// Neighbours of `v`: adjacent vertices when undirected, successors when
    /// directed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `v` is absent.
    pub fn neighbors(&self, v: &V) -> Result<Vec<&V>, GraphError> {
        let ix = self
            .index_of(v)
            .ok_or_else(|| GraphError::vertex_not_found(v))?;
        Ok(self.inner.neighbors(ix).map(|n| &self.inner[n]).collect())
    }

    /// Number of edges incident to `v` (in + out when directed).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `v` is absent.
    pub fn degree(&self, v: &V) -> Result<usize, GraphError> {
        let ix = self
            .index_of(v)
            .ok_or_else(|| GraphError::vertex_not_found(v))?;
        Ok(self.inner.neighbors_undirected(ix).count())
    }

    /// Induced subgraph on the first `n` vertices in insertion order.
    ///
    /// Used to carve a tractable sample out of a large edge list.
    #[must_use]
    pub fn prefix_subgraph(&self, n: usize) -> Self {
        let keep: HashSet<NodeIndex> = self.inner.node_indices().take(n).collect();
        let mut sub = Self::new();

        for ix in self.inner.node_indices().take(n) {
            sub.add_vertex(self.inner[ix].clone());
        }

        for e in self.inner.edge_indices() {
            if let Some((a, b)) = self.inner.edge_endpoints(e) {
                if keep.contains(&a) && keep.contains(&b) {
                    let ia = sub.index[&self.inner[a]];
                    let ib = sub.index[&self.inner[b]];
                    sub.inner.add_edge(ia, ib, ());
                }
            }
        }

        sub
    }

    // -----------------------------------------------------------------------
    // Index-level access for the algorithms in this crate
    // -----------------------------------------------------------------------

    pub(crate) const fn inner(&self) -> &StableGraph<V, (), Ty> {
        &self.inner
    }

    pub(crate) fn index_of(&self, v: &V) -> Option<NodeIndex> {
        self.index.get(v).copied()
    }

    pub(crate) fn vertex(&self, ix: NodeIndex) -> &V {
        &self.inner[ix]
    }

    /// Canonical key for an edge: stored orientation when directed, smaller
    /// endpoint first when undirected.
    pub(crate) fn edge_key(&self, a: NodeIndex, b: NodeIndex) -> (V, V) {
        let (va, vb) = (self.vertex(a), self.vertex(b));
        if !Ty::is_directed() && vb < va {
            (vb.clone(), va.clone())
        } else {
            (va.clone(), vb.clone())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_inserts_endpoints() {
        let mut g = UnGraph::new();
        assert_eq!(g.add_edge("a", "b"), Ok(true));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_vertex(&"a"));
        assert!(g.contains_edge(&"b", &"a"), "undirected lookup is symmetric");
    }

    #[test]
    fn parallel_edges_are_ignored() {
        let mut g = UnGraph::new();
        assert_eq!(g.add_edge(1, 2), Ok(true));
        assert_eq!(g.add_edge(1, 2), Ok(false));
        assert_eq!(g.add_edge(2, 1), Ok(false));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn directed_edges_keep_orientation() {
        let mut g = DiGraph::new();
        assert_eq!(g.add_edge(1, 2), Ok(true));
        assert_eq!(g.add_edge(2, 1), Ok(true), "reverse arc is a distinct edge");
        assert!(g.is_directed());
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = UnGraph::new();
        assert_eq!(g.add_edge(3, 3), Err(GraphError::SelfLoop("3".into())));
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn remove_edge_keeps_vertices() {
        let mut g = UnGraph::from_edges([(1, 2), (2, 3)]).expect("graph");
        assert!(g.remove_edge(&3, &2));
        assert!(!g.remove_edge(&3, &2), "already removed");
        assert!(!g.remove_edge(&1, &9), "unknown vertex");
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&3), Ok(0));
    }

    #[test]
    fn vertices_follow_insertion_order() {
        let g = UnGraph::from_edges([(5, 1), (1, 9), (9, 5)]).expect("graph");
        let order: Vec<i32> = g.vertices().copied().collect();
        assert_eq!(order, vec![5, 1, 9]);
    }

    #[test]
    fn neighbors_of_missing_vertex_is_error() {
        let g = UnGraph::from_edges([(1, 2)]).expect("graph");
        assert!(matches!(g.neighbors(&7), Err(GraphError::VertexNotFound(_))));
        let mut n: Vec<i32> = g.neighbors(&1).expect("present").into_iter().copied().collect();
        n.sort_unstable();
        assert_eq!(n, vec![2]);
    }

    #[test]
    fn prefix_subgraph_is_induced() {
        // 1-2, 2-3, 3-4, 1-4; first three vertices are 1, 2, 3.
        let g = UnGraph::from_edges([(1, 2), (2, 3), (3, 4), (1, 4)]).expect("graph");
        let sub = g.prefix_subgraph(3);
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert!(sub.contains_edge(&1, &2));
        assert!(sub.contains_edge(&2, &3));
        assert!(!sub.contains_vertex(&4));
    }

    #[test]
    fn edge_key_is_canonical_when_undirected() {
        let g = UnGraph::from_edges([("b", "a")]).expect("graph");
        let (a, b) = (g.index_of(&"a").expect("a"), g.index_of(&"b").expect("b"));
        assert_eq!(g.edge_key(b, a), ("a", "b"));
        assert_eq!(g.edge_key(a, b), ("a", "b"));

        let d = DiGraph::from_edges([("b", "a")]).expect("graph");
        let (a, b) = (d.index_of(&"a").expect("a"), d.index_of(&"b").expect("b"));
        assert_eq!(d.edge_key(b, a), ("b", "a"));
    }

    #[test]
    fn clone_is_an_independent_graph() {
        let g = DiGraph::from_edges([(1, 2), (2, 3)]).expect("graph");
        let mut copy: DiGraph<i32> = g.clone();
        assert!(copy.remove_edge(&1, &2));
        assert_eq!(copy.edge_count(), 1);
        assert_eq!(g.edge_count(), 2);
        assert!(format!("{g:?}").starts_with("Graph { directed: true"));
    }
}
