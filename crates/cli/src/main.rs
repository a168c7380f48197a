mod app;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use chess_core::Position;
use chess_session::{GameSession, SessionConfig, Tier};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::render::RenderMode;

/// Play chess on the terminal against a friend or the computer.
#[derive(Debug, Parser)]
#[command(name = "chess", version, about)]
struct Args {
    /// Session settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Computer plays White
    #[arg(long)]
    ai_white: bool,

    /// Computer plays Black
    #[arg(long)]
    ai_black: bool,

    /// Computer strength: 1, 2 or 3
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    tier: Option<u8>,

    /// External UCI engine, consulted at tier 3
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Starting position
    #[arg(long)]
    fen: Option<String>,

    /// Print the display state as JSON lines
    #[arg(long)]
    json: bool,
}

impl Args {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SessionConfig::default(),
        };
        config.ai.white |= self.ai_white;
        config.ai.black |= self.ai_black;
        if let Some(level) = self.tier {
            config.ai.tier = Tier::try_from(level).map_err(anyhow::Error::msg)?;
        }
        if let Some(engine) = &self.engine {
            config.ai.engine_path = Some(engine.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.session_config()?;
    let start = match &args.fen {
        Some(fen) => Position::from_fen(fen).context("--fen")?,
        None => Position::startpos(),
    };
    let mode = if args.json {
        RenderMode::Json
    } else {
        RenderMode::Text
    };

    App::new(GameSession::from_position(config, start), mode)
        .run()
        .await
}
