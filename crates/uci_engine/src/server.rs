//! UCI front end for the internal tiers, so the workspace can stand in as
//! the external engine.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chess_core::{move_to_uci, set_position_from_uci, Engine, Position, SearchLimits};
use classical_engine::DEFAULT_DEPTH;
use tracing::{debug, warn};

use crate::tiers::{Tier, TierEngine};

const MAX_DEPTH: u8 = 4;

pub struct UciServer {
    engine: TierEngine,
    pos: Position,
    depth: u8,
}

impl UciServer {
    pub fn new(tier: Tier) -> Self {
        Self {
            engine: TierEngine::new(tier),
            pos: Position::startpos(),
            depth: DEFAULT_DEPTH,
        }
    }

    /// Serve commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if !self.handle(&line, out)? {
                break;
            }
        }
        Ok(())
    }

    /// Handle one command line. Returns false on `quit`.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return Ok(true);
        };

        match cmd {
            "uci" => {
                writeln!(out, "id name ChessCoach {}", env!("CARGO_PKG_VERSION"))?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Depth type spin default {DEFAULT_DEPTH} min 1 max {MAX_DEPTH}"
                )?;
                writeln!(
                    out,
                    "option name Tier type spin default {} min 1 max {}",
                    self.engine.tier(),
                    Tier::MAX
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.engine.new_game();
            }
            "position" => {
                if let Err(e) = set_position_from_uci(&mut self.pos, &parts[1..]) {
                    warn!(error = %e, line, "bad position command");
                }
            }
            "go" => {
                let limits = match arg_after(&parts, "movetime").and_then(|v| v.parse().ok()) {
                    Some(ms) => SearchLimits::depth_and_time(self.depth, Duration::from_millis(ms)),
                    None => SearchLimits::depth(self.depth),
                };
                let result = self.engine.search(&self.pos, limits);
                writeln!(
                    out,
                    "info depth {} score cp {} nodes {}",
                    result.depth, result.score, result.nodes
                )?;
                match result.best_move {
                    Some(mv) => writeln!(out, "bestmove {}", move_to_uci(mv))?,
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "quit" => return Ok(false),
            other => debug!(cmd = other, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(true)
    }

    // setoption name <id> value <x>
    fn set_option(&mut self, args: &[&str]) {
        let (Some(name), Some(value)) = (arg_after(args, "name"), arg_after(args, "value")) else {
            return;
        };
        if name.eq_ignore_ascii_case("depth") {
            if let Ok(d) = value.parse::<u8>() {
                self.depth = d.clamp(1, MAX_DEPTH);
            }
        } else if !self.engine.set_option(name, value) {
            debug!(name, value, "unsupported option");
        }
    }
}

fn arg_after<'a>(parts: &[&'a str], key: &str) -> Option<&'a str> {
    let i = parts.iter().position(|&p| p == key)?;
    parts.get(i + 1).copied()
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
