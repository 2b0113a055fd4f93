//! lsif: build and check LSIF dumps.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lsif_builder::{index, FixtureModel, IndexerConfig, JsonLinesEmitter};
use lsif_dom::Mode;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "lsif", about = "Build and check LSIF dumps")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a recorded semantic model
    Index {
        /// Semantic model as JSON
        #[arg(short, long)]
        model: PathBuf,

        /// Indexer config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Decode and load a dump, printing element counts
    Validate {
        /// Dump in JSON lines
        dump: PathBuf,

        /// Park edges until their targets arrive instead of failing
        #[arg(long)]
        buffered: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // stdout carries the dump
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("lsif=info".parse()?),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Commands::Index { model, config, out } => {
            cmd_index(&model, config.as_deref(), out.as_deref())
        }
        Commands::Validate { dump, buffered } => cmd_validate(&dump, buffered),
    }
}

fn cmd_index(model: &Path, config: Option<&Path>, out: Option<&Path>) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => IndexerConfig::load(path)?,
        None => IndexerConfig::default(),
    };
    let model = FixtureModel::load(model)?;

    let sink: Box<dyn Write> = match out {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let outcome = index(&model, &config, JsonLinesEmitter::new(BufWriter::new(sink)))?;
    let summary = outcome.summary;
    info!(
        ranges = summary.ranges,
        attaches = summary.attaches,
        items = summary.items,
        "wrote {} elements",
        summary.elements
    );
    Ok(())
}

fn cmd_validate(dump: &Path, buffered: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(dump)
        .with_context(|| format!("failed to read {}", dump.display()))?;
    let parse = lsif_parser::parse(&text);
    if !parse.is_ok() {
        info!(errors = parse.errors.len(), "dump has invalid lines");
    }
    let entries = parse
        .into_result()
        .with_context(|| format!("{} is not a valid dump", dump.display()))?;

    let mode = if buffered { Mode::Buffered } else { Mode::Strict };
    let graph = lsif_dom::load(entries, mode)
        .with_context(|| format!("{} does not load", dump.display()))?;

    let mut stdout = io::stdout().lock();
    for (label, count) in graph.label_counts() {
        writeln!(stdout, "{:<32} {}", label, count)?;
    }
    writeln!(stdout, "{:<32} {}", "total", graph.len())?;
    Ok(())
}
