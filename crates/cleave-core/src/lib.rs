#![forbid(unsafe_code)]
//! cleave-core library.
//!
//! Betweenness centrality (vertex and edge) and Girvan-Newman community
//! decomposition over unweighted graphs.
//!
//! # Layout
//!
//! ```text
//! graph      Graph model, edge-list I/O, connected components
//!    ↓
//! paths      all shortest paths per vertex pair (BFS + predecessor sets)
//!    ↓
//! metrics    vertex / edge betweenness engines
//!    ↓
//! community  Girvan-Newman decomposer (iterative edge removal)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: structural misuse surfaces as [`GraphError`]; file and
//!   config handling uses `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod community;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod paths;
pub mod timing;

pub use community::{GirvanNewman, Partition, PartitionSummary};
pub use error::GraphError;
pub use graph::{DiGraph, Graph, UnGraph, VertexId};
pub use metrics::{BetweennessConfig, EdgeScores, Method};
pub use paths::{PathSet, PathTable};
