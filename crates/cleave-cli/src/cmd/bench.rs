//! `cleave bench`: empirical running time over growing prefix subgraphs.
//!
//! For each sample size `interval, 2 * interval, ...` (plus the full graph)
//! the induced prefix subgraph is scored with both betweenness methods, and
//! the first `--levels` Girvan-Newman levels are timed one by one. The
//! decomposition uses `--method` when given, else the configured method.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use cleave_core::community::GirvanNewman;
use cleave_core::metrics::{BetweennessConfig, Method, betweenness_centrality};
use cleave_core::timing::{format_duration, measure};
use cleave_core::Graph;
use petgraph::{Directed, EdgeType, Undirected};
use serde::{Serialize, Serializer};
use tracing::info;

use super::{Context, load_graph};
use crate::output::{pretty_section, render_mode};

/// Arguments for `cleave bench`.
#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Edge-list file to sample from.
    pub file: PathBuf,

    /// Vertex-count step between samples.
    #[arg(long, short = 'i', default_value_t = 20)]
    pub interval: usize,

    /// Girvan-Newman levels to time per sample (0 skips decomposition).
    #[arg(long, short = 'n', default_value_t = 4)]
    pub levels: usize,

    /// Time only this betweenness method instead of both.
    #[arg(long)]
    pub method: Option<Method>,
}

#[derive(Debug, Serialize)]
struct MethodTiming {
    method: Method,
    #[serde(rename = "elapsed_us", serialize_with = "micros")]
    elapsed: Duration,
}

#[derive(Debug, Serialize)]
struct SampleTiming {
    vertices: usize,
    edges: usize,
    betweenness: Vec<MethodTiming>,
    #[serde(rename = "levels_us", serialize_with = "micros_list")]
    levels: Vec<Duration>,
}

#[derive(Debug, Serialize)]
struct BenchOutput {
    file: String,
    directed: bool,
    interval: usize,
    decomposition: Method,
    samples: Vec<SampleTiming>,
}

/// Execute `cleave bench`.
pub fn run_bench(args: &BenchArgs, ctx: &Context) -> anyhow::Result<()> {
    if ctx.directed {
        bench::<Directed>(args, ctx)
    } else {
        bench::<Undirected>(args, ctx)
    }
}

fn bench<Ty: EdgeType>(args: &BenchArgs, ctx: &Context) -> anyhow::Result<()> {
    ensure!(args.interval > 0, "--interval must be at least 1");

    let graph = load_graph::<Ty>(&args.file)?;
    let methods = args
        .method
        .map_or_else(|| vec![Method::PathEnumeration, Method::Accumulation], |m| vec![m]);
    let normalized = ctx.config.betweenness.normalized;
    let decomposition = args.method.unwrap_or(ctx.config.betweenness.method);

    let samples = sample_sizes(graph.vertex_count(), args.interval)
        .into_iter()
        .map(|n| {
            let sub = graph.prefix_subgraph(n);
            let timing = time_sample(&sub, &methods, normalized, decomposition, args.levels);
            info!(
                vertices = timing.vertices,
                edges = timing.edges,
                "sample timed"
            );
            timing
        })
        .collect();

    let payload = BenchOutput {
        file: args.file.display().to_string(),
        directed: graph.is_directed(),
        interval: args.interval,
        decomposition,
        samples,
    };
    render_mode(ctx.output, &payload, render_text, render_pretty)
}

/// `interval, 2 * interval, ...` up to `total`, always ending with `total`.
fn sample_sizes(total: usize, interval: usize) -> Vec<usize> {
    let mut sizes: Vec<usize> = (interval..total).step_by(interval.max(1)).collect();
    if total > 0 {
        sizes.push(total);
    }
    sizes
}

fn time_sample<Ty: EdgeType>(
    graph: &Graph<String, Ty>,
    methods: &[Method],
    normalized: bool,
    decomposition: Method,
    levels: usize,
) -> SampleTiming {
    let betweenness = methods
        .iter()
        .map(|&method| {
            let config = BetweennessConfig { normalized, method };
            let (_, elapsed) = measure(|| betweenness_centrality(graph, &config));
            MethodTiming { method, elapsed }
        })
        .collect();

    let mut gn = GirvanNewman::with_method(graph, decomposition);
    let mut level_times = Vec::with_capacity(levels);
    while level_times.len() < levels {
        let (partition, elapsed) = measure(|| gn.next_partition());
        if partition.is_none() {
            break;
        }
        level_times.push(elapsed);
    }

    SampleTiming {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        betweenness,
        levels: level_times,
    }
}

fn render_text(payload: &BenchOutput, w: &mut dyn Write) -> io::Result<()> {
    for sample in &payload.samples {
        write!(w, "{} {}", sample.vertices, sample.edges)?;
        for t in &sample.betweenness {
            write!(w, " {}={}", t.method, t.elapsed.as_micros())?;
        }
        for (i, level) in sample.levels.iter().enumerate() {
            write!(w, " level{i}={}", level.as_micros())?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn render_pretty(payload: &BenchOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Empirical timing: {} (step {})", payload.file, payload.interval),
    )?;
    writeln!(w, "levels decomposed with {}", payload.decomposition)?;
    writeln!(w, "{:>8} {:>8}  timings", "vertices", "edges")?;

    for sample in &payload.samples {
        let mut cells: Vec<String> = sample
            .betweenness
            .iter()
            .map(|t| format!("{} {}", t.method, format_duration(t.elapsed)))
            .collect();
        cells.extend(
            sample
                .levels
                .iter()
                .enumerate()
                .map(|(i, d)| format!("level {i} {}", format_duration(*d))),
        );
        writeln!(
            w,
            "{:>8} {:>8}  {}",
            sample.vertices,
            sample.edges,
            cells.join(", ")
        )?;
    }

    Ok(())
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn micros<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_micros())
}

fn micros_list<S: Serializer>(ds: &[Duration], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(ds.iter().map(Duration::as_micros))
}
