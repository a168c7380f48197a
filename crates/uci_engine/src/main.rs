use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uci_engine::{Tier, UciServer};

/// UCI engine backed by the internal playing tiers.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Starting tier (1 = heuristic, 2 = greedy, 3 = minimax)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=3))]
    tier: u8,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let tier = Tier::try_from(args.tier).map_err(anyhow::Error::msg)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    UciServer::new(tier)
        .run(stdin.lock(), &mut stdout)
        .context("UCI session failed")
}
