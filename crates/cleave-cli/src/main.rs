#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cleave_core::config::load_config;
use cleave_core::timing;
use output::OutputMode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cleave: betweenness centrality and Girvan-Newman communities",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit command timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (defaults to pretty on a terminal, text otherwise).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Configuration file (defaults to ./cleave.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat each edge-list line `a b` as an arc from `a` to `b`.
    #[arg(long, global = true)]
    directed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Rank vertices by betweenness centrality",
        long_about = "Compute betweenness centrality for every vertex of an edge-list graph and report the highest-scoring ones. With --edges, edge betweenness is reported too.",
        after_help = "EXAMPLES:\n    # Top 4 vertices, normalized\n    cleave centrality graph.txt\n\n    # Raw scores, top 10, with edge scores\n    cleave centrality graph.txt --raw --top 10 --edges\n\n    # Directed graph, machine-readable output\n    cleave --directed centrality graph.txt --json"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        about = "Detect communities with Girvan-Newman",
        long_about = "Repeatedly remove the edge with the highest betweenness and report the connected components each time the graph splits further.",
        after_help = "EXAMPLES:\n    # First four levels\n    cleave communities graph.txt --levels 4\n\n    # Full hierarchy as JSON\n    cleave communities graph.txt --format json"
    )]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        about = "Write an induced subgraph on the first N vertices",
        long_about = "Load an edge list, keep the first N vertices in order of appearance with the edges among them, and write the result as a new edge list.",
        after_help = "EXAMPLES:\n    # Keep 200 vertices\n    cleave sample big.txt --nodes 200 --output small.txt"
    )]
    Sample(cmd::sample::SampleArgs),

    #[command(
        about = "Time the algorithms on growing samples",
        long_about = "Time both betweenness methods and the first Girvan-Newman levels on prefix subgraphs of increasing size.",
        after_help = "EXAMPLES:\n    # Samples of 20, 40, ... vertices\n    cleave bench graph.txt --interval 20 --levels 4"
    )]
    Bench(cmd::bench::BenchArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLEAVE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "cleave=debug,cleave_core=debug,cleave_cli=debug,info"
        } else {
            "cleave=info,cleave_core=info,cleave_cli=info,warn"
        })
    });

    let format = env::var("CLEAVE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let cwd = env::current_dir().context("resolve working directory")?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    debug!(?config, "configuration loaded");

    let ctx = cmd::Context {
        output: output::resolve_output_mode(cli.format, cli.json),
        config,
        directed: cli.directed,
    };

    let command_result = match cli.command {
        Commands::Centrality(ref args) => timing::timed("cmd.centrality", || {
            cmd::centrality::run_centrality(args, &ctx)
        }),
        Commands::Communities(ref args) => timing::timed("cmd.communities", || {
            cmd::communities::run_communities(args, &ctx)
        }),
        Commands::Sample(ref args) => {
            timing::timed("cmd.sample", || cmd::sample::run_sample(args, &ctx))
        }
        Commands::Bench(ref args) => {
            timing::timed("cmd.bench", || cmd::bench::run_bench(args, &ctx))
        }
    };

    if timing_enabled {
        let report = timing::collect_report();
        if report.is_empty() {
            eprintln!("timing report: no samples recorded");
        } else {
            eprintln!("timing report:");
            eprintln!("{}", report.display_table());
            if ctx.output.is_json() {
                eprintln!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }

    command_result
}
