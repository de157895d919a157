//! Vertex betweenness centrality.
//!
//! # Definition
//!
//! For every vertex `v`:
//!
//! ```text
//! bc(v) = Σ  σ_st(v) / σ_st      over pairs s ≠ v ≠ t
//! ```
//!
//! where `σ_st` is the number of shortest `s`–`t` paths and `σ_st(v)` the
//! number of those with `v` as an interior vertex. Pairs with `σ_st = 0`
//! contribute nothing.
//!
//! # Normalization
//!
//! Undirected graphs enumerate each unordered pair once and scale by
//! `2 / ((n-1)(n-2))`; directed graphs enumerate ordered pairs and scale by
//! `1 / ((n-1)(n-2))`. Both map a vertex that lies on every shortest path
//! between every other pair to 1.0. Graphs with fewer than three vertices
//! are left unscaled (all scores are zero there).

use std::collections::BTreeMap;

use petgraph::{EdgeType, visit::NodeIndexable};
use tracing::instrument;

use super::{BetweennessConfig, Method, normalization_scale};
use crate::error::GraphError;
use crate::graph::{Graph, VertexId};
use crate::paths::{PathTable, search};

/// Compute betweenness centrality for every vertex.
///
/// Every vertex of the graph appears in the result; vertices that are never
/// interior to a shortest path score 0.0. An empty graph yields an empty map.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    config: &BetweennessConfig,
) -> BTreeMap<V, f64> {
    match config.method {
        Method::PathEnumeration => {
            let table = PathTable::build(graph);
            finish(graph, tally(graph, &table), config.normalized)
        }
        Method::Accumulation => {
            let raw = accumulate(graph);
            finish(graph, raw, config.normalized)
        }
    }
}

/// Vertex betweenness from a precomputed [`PathTable`] of `graph`.
///
/// # Errors
///
/// [`GraphError::TableMismatch`] if `table` was not built from `graph` in
/// its current state.
pub fn betweenness_from_paths<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    table: &PathTable,
    normalized: bool,
) -> Result<BTreeMap<V, f64>, GraphError> {
    table.check(graph)?;
    Ok(finish(graph, tally(graph, table), normalized))
}

/// Interior-vertex shares summed over every stored path set.
#[allow(clippy::cast_precision_loss)]
fn tally<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>, table: &PathTable) -> Vec<f64> {
    let mut cb = vec![0.0_f64; graph.inner().node_bound()];

    for (_, _, set) in table.iter() {
        if set.is_empty() {
            continue;
        }
        let share = 1.0 / set.len() as f64;
        for path in set.iter() {
            if path.len() < 3 {
                continue;
            }
            for v in &path[1..path.len() - 1] {
                cb[v.index()] += share;
            }
        }
    }

    cb
}

/// Brandes dependency accumulation. Returns raw per-index sums over the
/// pairs the graph's mode counts (unordered when undirected).
fn accumulate<V: VertexId, Ty: EdgeType>(graph: &Graph<V, Ty>) -> Vec<f64> {
    let g = graph.inner();
    let n = g.node_bound();
    let mut cb = vec![0.0_f64; n];

    for s in g.node_indices() {
        let tree = search(graph, s);
        let mut delta = vec![0.0_f64; n];

        // Farthest vertices first.
        for &w in tree.order.iter().rev() {
            let wi = w.index();
            for &v in &tree.preds[wi] {
                let vi = v.index();
                delta[vi] += (tree.sigma[vi] / tree.sigma[wi]) * (1.0 + delta[wi]);
            }
            if w != s {
                cb[wi] += delta[wi];
            }
        }
    }

    // Every unordered pair was seen from both ends.
    if !graph.is_directed() {
        for score in &mut cb {
            *score /= 2.0;
        }
    }

    cb
}

fn finish<V: VertexId, Ty: EdgeType>(
    graph: &Graph<V, Ty>,
    mut cb: Vec<f64>,
    normalized: bool,
) -> BTreeMap<V, f64> {
    if normalized {
        if let Some(scale) = normalization_scale(graph.vertex_count(), graph.is_directed()) {
            for score in &mut cb {
                *score *= scale;
            }
        }
    }

    graph
        .inner()
        .node_indices()
        .map(|ix| (graph.vertex(ix).clone(), cb[ix.index()]))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
