//! `cleave sample`: carve an induced prefix subgraph out of an edge list.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use cleave_core::graph::save_edge_list;
use cleave_core::{Graph, timing};
use petgraph::{Directed, EdgeType, Undirected};
use serde::Serialize;
use tracing::info;

use super::{Context, load_graph};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `cleave sample`.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Source edge-list file.
    pub file: PathBuf,

    /// Keep the first N vertices, in order of first appearance.
    #[arg(long, short = 'n')]
    pub nodes: usize,

    /// Where to write the sampled edge list.
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SampleOutput {
    source: String,
    output: String,
    source_vertices: usize,
    source_edges: usize,
    vertices: usize,
    edges: usize,
}

/// Execute `cleave sample`.
pub fn run_sample(args: &SampleArgs, ctx: &Context) -> anyhow::Result<()> {
    if ctx.directed {
        sample::<Directed>(args, ctx)
    } else {
        sample::<Undirected>(args, ctx)
    }
}

fn sample<Ty: EdgeType>(args: &SampleArgs, ctx: &Context) -> anyhow::Result<()> {
    ensure!(args.nodes > 0, "--nodes must be at least 1");

    let graph = load_graph::<Ty>(&args.file)?;
    let sub = timing::timed("sample.subgraph", || graph.prefix_subgraph(args.nodes));
    save_edge_list(&sub, &args.output)?;
    info!(
        output = %args.output.display(),
        vertices = sub.vertex_count(),
        edges = sub.edge_count(),
        "sample written"
    );

    let payload = summarize(&graph, &sub, args);
    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn summarize<Ty: EdgeType>(
    graph: &Graph<String, Ty>,
    sub: &Graph<String, Ty>,
    args: &SampleArgs,
) -> SampleOutput {
    SampleOutput {
        source: args.file.display().to_string(),
        output: args.output.display().to_string(),
        source_vertices: graph.vertex_count(),
        source_edges: graph.edge_count(),
        vertices: sub.vertex_count(),
        edges: sub.edge_count(),
    }
}

fn render_text(payload: &SampleOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "{} vertices {} edges",
        payload.vertices, payload.edges
    )
}

fn render_pretty(payload: &SampleOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Sampled subgraph")?;
    pretty_kv(
        w,
        "source",
        format!(
            "{} ({} vertices, {} edges)",
            payload.source, payload.source_vertices, payload.source_edges
        ),
    )?;
    pretty_kv(
        w,
        "written",
        format!(
            "{} ({} vertices, {} edges)",
            payload.output, payload.vertices, payload.edges
        ),
    )
}
