//! Girvan-Newman divisive community detection.
//!
//! # Algorithm
//!
//! Starting from a private copy of the input graph:
//!
//! 1. Compute edge betweenness for the current edge set (from scratch:
//!    removing an edge can reroute any shortest path).
//! 2. Remove the edge with the highest score. Ties go to the edge with the
//!    smallest canonical key, see [`EdgeScores::max_edge`].
//! 3. Recount connected components. If the count rose above the last
//!    recorded count, record it and emit the new partition.
//!
//! The loop ends when no edges remain, at which point every vertex is a
//! singleton; that final partition is emitted unless the count was already
//! reached. Each emitted partition refines the previous one.
//!
//! # Output
//!
//! [`GirvanNewman`] is an [`Iterator`] over [`Partition`]s. Each call to
//! `next` runs removal rounds until one emission (or exhaustion), so a
//! caller that only wants the first `k` levels pays only for those. The
//! sequence is finite (at most one emission per edge), cannot be rewound,
//! and is fused once exhausted.

use std::fmt;
use std::iter::FusedIterator;

use petgraph::{EdgeType, Undirected};
use tracing::{debug, trace};

use crate::graph::{Graph, Partition, VertexId};
use crate::metrics::{EdgeScores, Method, edge_betweenness_centrality};

/// Stateful Girvan-Newman decomposition over an owned working graph.
pub struct GirvanNewman<V, Ty = Undirected> {
    working: Graph<V, Ty>,
    method: Method,
    component_count: usize,
    steps: usize,
    removed: Vec<(V, V)>,
}

impl<V: Clone, Ty: EdgeType> Clone for GirvanNewman<V, Ty> {
    fn clone(&self) -> Self {
        Self {
            working: self.working.clone(),
            method: self.method,
            component_count: self.component_count,
            steps: self.steps,
            removed: self.removed.clone(),
        }
    }
}

impl<V: fmt::Debug, Ty: EdgeType> fmt::Debug for GirvanNewman<V, Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GirvanNewman")
            .field("working", &self.working)
            .field("method", &self.method)
            .field("component_count", &self.component_count)
            .field("steps", &self.steps)
            .field("removed", &self.removed)
            .finish()
    }
}

impl<V: VertexId, Ty: EdgeType> GirvanNewman<V, Ty> {
    /// Start a decomposition of `graph`. The caller's graph is cloned and
    /// never modified.
    #[must_use]
    pub fn new(graph: &Graph<V, Ty>) -> Self {
        Self::with_method(graph, Method::default())
    }

    /// Start a decomposition using a specific edge-betweenness method.
    #[must_use]
    pub fn with_method(graph: &Graph<V, Ty>, method: Method) -> Self {
        let working = graph.clone();
        let component_count = working.component_count();
        debug!(
            vertices = working.vertex_count(),
            edges = working.edge_count(),
            component_count,
            %method,
            "girvan-newman started"
        );
        Self {
            working,
            method,
            component_count,
            steps: 0,
            removed: Vec::new(),
        }
    }

    /// Run removal rounds until the component count increases, and return
    /// the resulting partition. `None` once no edges remain.
    pub fn next_partition(&mut self) -> Option<Partition<V>> {
        while self.working.edge_count() > 0 {
            let scores: EdgeScores<V> = edge_betweenness_centrality(&self.working, self.method);
            let (a, b, score) = scores.max_edge().map(|(a, b, s)| (a.clone(), b.clone(), s))?;

            self.working.remove_edge(&a, &b);
            self.steps += 1;
            trace!(step = self.steps, ?a, ?b, score, "edge removed");
            self.removed.push((a, b));

            let count = self.working.component_count();
            if count > self.component_count {
                self.component_count = count;
                debug!(
                    step = self.steps,
                    communities = count,
                    remaining_edges = self.working.edge_count(),
                    "community level emitted"
                );
                return Some(self.working.connected_components());
            }
        }
        None
    }

    /// Number of edges removed so far.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Component count of the working graph as of the last emission.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Removed edges in removal order.
    #[must_use]
    pub fn removed_edges(&self) -> &[(V, V)] {
        &self.removed
    }

    /// Edges still present in the working graph.
    #[must_use]
    pub fn remaining_edges(&self) -> usize {
        self.working.edge_count()
    }
}

impl<V: VertexId, Ty: EdgeType> Iterator for GirvanNewman<V, Ty> {
    type Item = Partition<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_partition()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.working.edge_count()))
    }
}

impl<V: VertexId, Ty: EdgeType> FusedIterator for GirvanNewman<V, Ty> {}

/// Decompose `graph` with the default method.
#[must_use]
pub fn girvan_newman<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>) -> GirvanNewman<V, Ty> {
    GirvanNewman::new(graph)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
