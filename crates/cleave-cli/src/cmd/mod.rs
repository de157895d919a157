//! Subcommand implementations.
//!
//! Every command loads an edge list, runs one analysis and renders the
//! result through [`crate::output`]. Commands are generic over the graph's
//! edge type; `--directed` picks the instantiation.

pub mod bench;
pub mod centrality;
pub mod communities;
pub mod sample;

use std::path::Path;

use cleave_core::Graph;
use cleave_core::config::AnalysisConfig;
use cleave_core::graph::load_edge_list;
use cleave_core::timing;
use petgraph::EdgeType;
use tracing::info;

use crate::output::OutputMode;

/// Settings shared by every subcommand, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputMode,
    pub config: AnalysisConfig,
    pub directed: bool,
}

/// Load an edge list as a graph of the requested edge type.
pub fn load_graph<Ty: EdgeType>(path: &Path) -> anyhow::Result<Graph<String, Ty>> {
    let graph = timing::timed("graph.load", || load_edge_list::<Ty>(path))?;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph loaded"
    );
    Ok(graph)
}
