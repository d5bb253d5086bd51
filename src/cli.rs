use crate::config::load_config;
use crate::ir::SankeyGraph;
use crate::layout::compute_sankey_layout;
use crate::layout_dump::{LayoutSnapshot, apply_snapshot, read_layout_dump, write_layout_dump};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sankey-layout", version, about = "Layered Sankey diagram layout")]
pub struct Args {
    /// Input graph JSON ({"nodes": [...], "links": [...]}) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "format", value_enum, default_value = "placements")]
    pub format: OutputFormat,

    /// Layout config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Previously written snapshot; its coordinates are pinned before layout
    #[arg(short = 's', long = "snapshot")]
    pub snapshot: Option<PathBuf>,

    /// Width, overrides the config file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height, overrides the config file
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Placements,
    Snapshot,
}

pub fn run() -> Result<()> {
    init_logging();
    execute(Args::parse())
}

fn execute(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let input = read_input(args.input.as_deref())?;
    let mut graph = parse_graph(&input)?;
    if let Some(path) = args.snapshot.as_deref() {
        let snapshot = read_layout_dump(path)?;
        let pinned = apply_snapshot(&mut graph, &snapshot);
        tracing::info!(pinned, "applied snapshot");
    }

    let layout = compute_sankey_layout(&graph, &config)?;
    match (args.format, args.output.as_deref()) {
        (OutputFormat::Snapshot, Some(path)) => write_layout_dump(path, &layout, &graph),
        (OutputFormat::Snapshot, None) => {
            let snapshot = LayoutSnapshot::from_layout(&layout, &graph);
            write_output(&serde_json::to_string_pretty(&snapshot)?, None)
        }
        (OutputFormat::Placements, output) => {
            write_output(&serde_json::to_string_pretty(&layout)?, output)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn parse_graph(input: &str) -> Result<SankeyGraph> {
    if input.trim().is_empty() {
        return Err(anyhow::anyhow!("Empty graph input"));
    }
    let graph: SankeyGraph = serde_json::from_str(input)?;
    Ok(graph)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
