//! Graph model for centrality and community computation.
//!
//! # Overview
//!
//! [`Graph`] is a thin wrapper over a petgraph `StableGraph` that maps opaque
//! vertex identifiers onto node indices and enforces the simple-graph
//! invariants (no self-loops, no parallel edges). Everything downstream
//! (path enumeration, betweenness, Girvan-Newman) reads the graph through
//! this type; only the decomposer mutates one, and only its private copy.
//!
//! ## Pipeline
//!
//! ```text
//! edge-list file
//!        ↓  io::load_edge_list()
//! Graph<String, Ty>
//!        ↓  Graph::prefix_subgraph()      (optional sampling)
//! Graph
//!        ↓  Graph::connected_components()
//! Partition
//! ```

pub mod components;
pub mod io;
pub mod model;

pub use components::{Partition, PartitionSummary};
pub use io::{load_edge_list, read_edge_list, save_edge_list, write_edge_list};
pub use model::{DiGraph, Graph, UnGraph, VertexId};
