//! Edge-list text format.
//!
//! # Format
//!
//! One edge per line: two whitespace-separated vertex tokens. Anything after
//! the second token (edge data such as `{}` or a weight) is ignored, since
//! the graphs are unweighted. `#` starts a comment, either a whole line or a
//! trailing one. A line with a single token declares an isolated vertex.
//!
//! ```text
//! # karate club, first edges
//! 0 1
//! 0 2 {}
//! 17
//! ```
//!
//! Duplicate edges are skipped. Self-loops are rejected: every algorithm in
//! this crate assumes a simple graph.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use petgraph::EdgeType;
use tracing::{debug, instrument};

use super::model::Graph;

/// Parse an edge list into a graph with string vertex identifiers.
///
/// # Errors
///
/// Returns an error on I/O failure or on a self-loop; the message names the
/// offending line.
pub fn read_edge_list<Ty: EdgeType>(reader: impl Read) -> Result<Graph<String, Ty>> {
    let mut graph = Graph::new();
    let mut skipped = 0_usize;

    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.with_context(|| format!("read edge list line {}", line_no + 1))?;
        let content = line.split('#').next().unwrap_or_default();
        let mut tokens = content.split_whitespace();

        match (tokens.next(), tokens.next()) {
            (None, _) => {}
            (Some(v), None) => {
                graph.add_vertex(v.to_string());
            }
            (Some(a), Some(b)) => {
                let inserted = graph
                    .add_edge(a.to_string(), b.to_string())
                    .with_context(|| format!("edge list line {}", line_no + 1))?;
                if !inserted {
                    skipped += 1;
                    debug!(line = line_no + 1, a, b, "duplicate edge skipped");
                }
            }
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        skipped,
        "edge list parsed"
    );
    Ok(graph)
}

/// Load an edge list from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
#[instrument]
pub fn load_edge_list<Ty: EdgeType>(path: &Path) -> Result<Graph<String, Ty>> {
    if path.is_dir() {
        bail!("{} is a directory, expected an edge-list file", path.display());
    }
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_edge_list(file).with_context(|| format!("parse {}", path.display()))
}

/// Write a graph in edge-list format: edges in insertion order, followed by
/// any isolated vertices on lines of their own.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_edge_list<V, Ty>(graph: &Graph<V, Ty>, writer: impl Write) -> Result<()>
where
    V: super::VertexId + std::fmt::Display,
    Ty: EdgeType,
{
    let mut w = BufWriter::new(writer);

    for (a, b) in graph.edges() {
        writeln!(w, "{a} {b}").context("write edge")?;
    }

    for v in graph.vertices() {
        if graph.degree(v).unwrap_or(0) == 0 {
            writeln!(w, "{v}").context("write isolated vertex")?;
        }
    }

    w.flush().context("flush edge list")?;
    Ok(())
}

/// Write a graph to `path` in edge-list format, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
#[instrument(skip(graph))]
pub fn save_edge_list<V, Ty>(graph: &Graph<V, Ty>, path: &Path) -> Result<()>
where
    V: super::VertexId + std::fmt::Display,
    Ty: EdgeType,
{
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_edge_list(graph, file).with_context(|| format!("write {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
