// SPDX-License-Identifier: MIT OR Apache-2.0

//! meshgo CLI - Command-line interface for the rules engine
//!
//! Reads one command per line from stdin and writes engine events as JSON
//! lines to stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use meshgo_cli::{load_config, render, Overrides, Session};
use meshgo_core::Engine;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "meshgo-cli", about = "Go on arbitrary board graphs", version)]
struct Args {
    /// Side length of a square grid board
    #[arg(short, long)]
    size: Option<usize>,

    /// Adjacency table file to play on instead of a grid
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Points added to White's score
    #[arg(short, long)]
    komi: Option<f32>,

    /// Allow moves that leave the placed group without liberties
    #[arg(long)]
    allow_suicide: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory where finished games are archived
    #[arg(long)]
    archive_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut config = load_config(args.config.as_deref())?;
    config.apply(Overrides {
        size: args.size,
        topology: args.topology,
        komi: args.komi,
        allow_suicide: args.allow_suicide,
        archive_dir: args.archive_dir,
    });

    let topology = config.board.build_topology()?;
    tracing::info!(
        points = topology.len(),
        komi = config.engine.komi,
        allow_suicide = config.engine.allow_suicide,
        "Starting game"
    );

    let mut session = Session::new(Engine::new(topology, config.engine), config.archive.dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render::render(session.engine()))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        let reply = session.handle_line(&line);
        for text in &reply.lines {
            writeln!(out, "{}", text)?;
        }
        out.flush()?;
        if reply.quit {
            break;
        }
    }

    Ok(())
}
