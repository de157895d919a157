//! `cleave centrality`: vertex and edge betweenness for an edge list.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use cleave_core::Graph;
use cleave_core::metrics::{
    Method, betweenness_centrality, edge_betweenness_centrality, top_k,
};
use cleave_core::timing;
use petgraph::{Directed, EdgeType, Undirected};
use serde::Serialize;

use super::{Context, load_graph};
use crate::output::{fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `cleave centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Edge-list file: one `a b` pair per line, `#` starts a comment.
    pub file: PathBuf,

    /// Number of top vertices to report (default from config, else 4).
    #[arg(long, short = 'k')]
    pub top: Option<usize>,

    /// Report raw pair counts instead of normalized scores.
    #[arg(long)]
    pub raw: bool,

    /// Aggregation method: `accumulation` or `path-enumeration`.
    #[arg(long)]
    pub method: Option<Method>,

    /// Also compute edge betweenness.
    #[arg(long)]
    pub edges: bool,
}

#[derive(Debug, Serialize)]
struct VertexScore {
    vertex: String,
    score: f64,
}

#[derive(Debug, Serialize)]
struct EdgeScore {
    source: String,
    target: String,
    score: f64,
}

#[derive(Debug, Serialize)]
struct CentralityOutput {
    file: String,
    directed: bool,
    vertices: usize,
    edges: usize,
    method: Method,
    normalized: bool,
    top: Vec<VertexScore>,
    scores: Vec<VertexScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge_scores: Option<Vec<EdgeScore>>,
}

/// Execute `cleave centrality`.
pub fn run_centrality(args: &CentralityArgs, ctx: &Context) -> anyhow::Result<()> {
    if ctx.directed {
        centrality::<Directed>(args, ctx)
    } else {
        centrality::<Undirected>(args, ctx)
    }
}

fn centrality<Ty: EdgeType>(args: &CentralityArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph::<Ty>(&args.file)?;
    let payload = analyze(&graph, args, ctx);
    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn analyze<Ty: EdgeType>(
    graph: &Graph<String, Ty>,
    args: &CentralityArgs,
    ctx: &Context,
) -> CentralityOutput {
    let mut config = ctx.config.betweenness_config();
    if let Some(method) = args.method {
        config.method = method;
    }
    if args.raw {
        config.normalized = false;
    }
    let k = args.top.unwrap_or(ctx.config.report.top_k);

    let scores = timing::timed("betweenness.vertex", || {
        betweenness_centrality(graph, &config)
    });
    let top = top_k(&scores, k)
        .into_iter()
        .map(|(vertex, score)| VertexScore { vertex, score })
        .collect();

    let edge_scores = args.edges.then(|| {
        timing::timed("betweenness.edge", || {
            edge_betweenness_centrality(graph, config.method)
        })
        .iter()
        .map(|(a, b, score)| EdgeScore {
            source: a.clone(),
            target: b.clone(),
            score,
        })
        .collect()
    });

    CentralityOutput {
        file: args.file.display().to_string(),
        directed: graph.is_directed(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        method: config.method,
        normalized: config.normalized,
        top,
        scores: scores
            .into_iter()
            .map(|(vertex, score)| VertexScore { vertex, score })
            .collect(),
        edge_scores,
    }
}

fn render_text(payload: &CentralityOutput, w: &mut dyn Write) -> io::Result<()> {
    for s in &payload.top {
        writeln!(w, "vertex {} {}", s.vertex, fmt_score(s.score))?;
    }
    for e in payload.edge_scores.iter().flatten() {
        writeln!(w, "edge {} {} {}", e.source, e.target, fmt_score(e.score))?;
    }
    Ok(())
}

fn render_pretty(payload: &CentralityOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Betweenness centrality")?;
    pretty_kv(w, "file", &payload.file)?;
    pretty_kv(
        w,
        "graph",
        format!(
            "{} vertices, {} edges ({})",
            payload.vertices,
            payload.edges,
            if payload.directed { "directed" } else { "undirected" }
        ),
    )?;
    pretty_kv(
        w,
        "method",
        format!(
            "{} ({})",
            payload.method,
            if payload.normalized { "normalized" } else { "raw" }
        ),
    )?;
    writeln!(w)?;

    if payload.top.is_empty() {
        writeln!(w, "Graph has no vertices.")?;
        return Ok(());
    }

    pretty_section(w, &format!("Top {} vertices", payload.top.len()))?;
    for (rank, s) in payload.top.iter().enumerate() {
        writeln!(w, "{:>3}. {:<20} {:>12}", rank + 1, s.vertex, fmt_score(s.score))?;
    }

    if let Some(edges) = &payload.edge_scores {
        let arrow = if payload.directed { "->" } else { "--" };
        writeln!(w)?;
        pretty_section(w, "Edge betweenness")?;
        if edges.is_empty() {
            writeln!(w, "Graph has no edges.")?;
        }
        for e in edges {
            let label = format!("{} {arrow} {}", e.source, e.target);
            writeln!(w, "     {label:<20} {:>12}", fmt_score(e.score))?;
        }
    }

    Ok(())
}
