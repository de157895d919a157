//! `cleave communities`: Girvan-Newman community levels for an edge list.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use cleave_core::community::GirvanNewman;
use cleave_core::metrics::Method;
use cleave_core::{Graph, timing};
use petgraph::{Directed, EdgeType, Undirected};
use serde::Serialize;
use tracing::debug;

use super::{Context, load_graph};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `cleave communities`.
#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    /// Edge-list file: one `a b` pair per line, `#` starts a comment.
    pub file: PathBuf,

    /// Stop after this many levels (default from config, else all levels).
    #[arg(long, short = 'n')]
    pub levels: Option<usize>,

    /// Edge-betweenness method used for each removal round.
    #[arg(long)]
    pub method: Option<Method>,
}

#[derive(Debug, Serialize)]
struct LevelOutput {
    level: usize,
    /// Edges removed from the original graph when this level appeared.
    step: usize,
    communities: usize,
    smallest: usize,
    largest: usize,
    partition: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct CommunitiesOutput {
    file: String,
    directed: bool,
    vertices: usize,
    edges: usize,
    initial_components: usize,
    method: Method,
    levels: Vec<LevelOutput>,
}

/// Execute `cleave communities`.
pub fn run_communities(args: &CommunitiesArgs, ctx: &Context) -> anyhow::Result<()> {
    if ctx.directed {
        communities::<Directed>(args, ctx)
    } else {
        communities::<Undirected>(args, ctx)
    }
}

fn communities<Ty: EdgeType>(args: &CommunitiesArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph::<Ty>(&args.file)?;
    let payload = decompose(&graph, args, ctx);
    render_mode(ctx.output, &payload, render_text, render_pretty)
}

fn decompose<Ty: EdgeType>(
    graph: &Graph<String, Ty>,
    args: &CommunitiesArgs,
    ctx: &Context,
) -> CommunitiesOutput {
    let method = args.method.unwrap_or(ctx.config.betweenness.method);
    let limit = args.levels.or(ctx.config.communities.max_levels);

    let mut gn = GirvanNewman::with_method(graph, method);
    let initial_components = gn.component_count();
    let mut levels = Vec::new();

    while limit.is_none_or(|max| levels.len() < max) {
        let Some(partition) = timing::timed("communities.level", || gn.next_partition()) else {
            break;
        };
        let summary = partition.summary();
        debug!(
            level = levels.len(),
            step = gn.steps(),
            communities = summary.communities,
            "level ready"
        );
        levels.push(LevelOutput {
            level: levels.len(),
            step: gn.steps(),
            communities: summary.communities,
            smallest: summary.smallest,
            largest: summary.largest,
            partition: partition
                .into_inner()
                .into_iter()
                .map(|c| c.into_iter().collect())
                .collect(),
        });
    }

    CommunitiesOutput {
        file: args.file.display().to_string(),
        directed: graph.is_directed(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        initial_components,
        method,
        levels,
    }
}

fn render_text(payload: &CommunitiesOutput, w: &mut dyn Write) -> io::Result<()> {
    for level in &payload.levels {
        writeln!(
            w,
            "level {} step {} communities {} smallest {} largest {}",
            level.level, level.step, level.communities, level.smallest, level.largest
        )?;
        for community in &level.partition {
            writeln!(w, "  {}", community.join(" "))?;
        }
    }
    Ok(())
}

fn render_pretty(payload: &CommunitiesOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Girvan-Newman communities")?;
    pretty_kv(w, "file", &payload.file)?;
    pretty_kv(
        w,
        "graph",
        format!(
            "{} vertices, {} edges, {} component(s)",
            payload.vertices, payload.edges, payload.initial_components
        ),
    )?;
    pretty_kv(w, "method", payload.method.as_str())?;

    if payload.levels.is_empty() {
        writeln!(w)?;
        if payload.edges == 0 {
            writeln!(w, "No further split: the graph has no edges to remove.")?;
        } else {
            writeln!(w, "No levels requested.")?;
        }
        return Ok(());
    }

    for level in &payload.levels {
        writeln!(w)?;
        let heading = format!("Level {} (after {} removals)", level.level, level.step);
        pretty_section(w, &heading)?;
        pretty_kv(w, "communities", level.communities.to_string())?;
        pretty_kv(w, "smallest", level.smallest.to_string())?;
        pretty_kv(w, "largest", level.largest.to_string())?;
        for (i, community) in level.partition.iter().enumerate() {
            writeln!(w, "  [{i}] {}", community.join(", "))?;
        }
    }

    Ok(())
}
