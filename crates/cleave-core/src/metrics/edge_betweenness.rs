//! Edge betweenness centrality.
//!
//! For every edge `e`:
//!
//! ```text
//! eb(e) = Σ  σ_st(e) / σ_st      over pairs s ≠ t
//! ```
//!
//! where `σ_st(e)` counts the shortest `s`–`t` paths that traverse `e`. In
//! an undirected graph a path segment `a → b` and `b → a` hit the same edge,
//! so scores do not depend on which endpoint was stored first. No
//! normalization is applied: the Girvan-Newman decomposer only compares
//! scores within one graph.

use std::collections::{BTreeMap, HashMap};

use petgraph::{EdgeType, stable_graph::EdgeIndex, visit::NodeIndexable};
use tracing::instrument;

use super::Method;
use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::paths::{PathTable, search};

/// Relative tolerance under which two scores count as tied.
const TIE_TOLERANCE: f64 = 1e-9;

/// Edge betweenness scores keyed by canonical edge.
///
/// Undirected edges are keyed smaller endpoint first; directed edges by
/// `(source, target)`. Iteration follows key order.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeScores<V: Ord> {
    directed: bool,
    scores: BTreeMap<(V, V), f64>,
}

impl<V: Ord + Clone> EdgeScores<V> {
    /// Score of the edge between `a` and `b`, in either orientation when
    /// undirected. `None` if there is no such edge.
    #[must_use]
    pub fn get(&self, a: &V, b: &V) -> Option<f64> {
        let forward = self.scores.get(&(a.clone(), b.clone())).copied();
        if forward.is_some() || self.directed {
            return forward;
        }
        self.scores.get(&(b.clone(), a.clone())).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &V, f64)> + '_ {
        self.scores.iter().map(|((a, b), &s)| (a, b, s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// The highest-scoring edge.
    ///
    /// Scores within a relative tolerance of `1e-9` are ties; among tied
    /// edges the first in key order wins, so the choice is deterministic.
    #[must_use]
    pub fn max_edge(&self) -> Option<(&V, &V, f64)> {
        let mut best: Option<(&V, &V, f64)> = None;
        for (a, b, score) in self.iter() {
            match best {
                Some((_, _, top)) if score <= top + TIE_TOLERANCE * top.abs().max(1.0) => {}
                _ => best = Some((a, b, score)),
            }
        }
        best
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<(V, V), f64> {
        self.scores
    }
}

/// Compute edge betweenness for every edge of `graph`.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn edge_betweenness_centrality<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    method: Method,
) -> EdgeScores<V> {
    match method {
        Method::PathEnumeration => {
            let table = PathTable::build(graph);
            finish(graph, &tally(graph, &table))
        }
        Method::Accumulation => {
            let acc = accumulate(graph);
            finish(graph, &acc)
        }
    }
}

/// Edge betweenness from a precomputed [`PathTable`] of `graph`.
///
/// # Errors
///
/// [`GraphError::TableMismatch`] if `table` was not built from `graph` in
/// its current state.
pub fn edge_betweenness_from_paths<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    table: &PathTable,
) -> Result<EdgeScores<V>, GraphError> {
    table.check(graph)?;
    Ok(finish(graph, &tally(graph, table)))
}

#[allow(clippy::cast_precision_loss)]
fn tally<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    table: &PathTable,
) -> HashMap<EdgeIndex, f64> {
    let g = graph.inner();
    let mut acc: HashMap<EdgeIndex, f64> = HashMap::with_capacity(g.edge_count());

    for (_, _, set) in table.iter() {
        if set.is_empty() {
            continue;
        }
        let share = 1.0 / set.len() as f64;
        for path in set.iter() {
            for hop in path.windows(2) {
                if let Some(e) = g.find_edge(hop[0], hop[1]) {
                    *acc.entry(e).or_insert(0.0) += share;
                }
            }
        }
    }

    acc
}

fn accumulate<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>) -> HashMap<EdgeIndex, f64> {
    let g = graph.inner();
    let n = g.node_bound();
    let mut acc: HashMap<EdgeIndex, f64> = HashMap::with_capacity(g.edge_count());

    for s in g.node_indices() {
        let tree = search(graph, s);
        let mut delta = vec![0.0_f64; n];

        for &w in tree.order.iter().rev() {
            let wi = w.index();
            for &v in &tree.preds[wi] {
                let vi = v.index();
                let c = (tree.sigma[vi] / tree.sigma[wi]) * (1.0 + delta[wi]);
                if let Some(e) = g.find_edge(v, w) {
                    *acc.entry(e).or_insert(0.0) += c;
                }
                delta[vi] += c;
            }
        }
    }

    if !graph.is_directed() {
        for score in acc.values_mut() {
            *score /= 2.0;
        }
    }

    acc
}

fn finish<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    acc: &HashMap<EdgeIndex, f64>,
) -> EdgeScores<V> {
    let g = graph.inner();
    let scores = g
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = g.edge_endpoints(e)?;
            Some((graph.edge_key(a, b), acc.get(&e).copied().unwrap_or(0.0)))
        })
        .collect();

    EdgeScores {
        directed: graph.is_directed(),
        scores,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
