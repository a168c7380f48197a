//! Driving an external UCI engine for a single move.
//!
//! Each request starts a fresh process, plays the `uci` / `isready` /
//! `ucinewgame` / `position fen` / `go movetime` exchange and waits for
//! `bestmove`. The process is killed when the request ends, answered or not.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use chess_core::{parse_uci_move, Move, Position};
use tracing::{debug, trace};

use crate::error::ExternalEngineError;

pub const DEFAULT_MOVETIME: Duration = Duration::from_millis(500);
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// An engine executable plus the time budget for one move.
#[derive(Debug, Clone)]
pub struct ExternalEngine {
    path: PathBuf,
    movetime: Duration,
    reply_timeout: Duration,
}

impl ExternalEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            movetime: DEFAULT_MOVETIME,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_movetime(mut self, movetime: Duration) -> Self {
        self.movetime = movetime;
        self
    }

    /// Wall-clock limit for the whole exchange, spawn to `bestmove`.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ask the engine for a move in `pos`. The reply must be legal in `pos`.
    pub fn best_move(&self, pos: &Position) -> Result<Move, ExternalEngineError> {
        let deadline = Instant::now() + self.reply_timeout;
        let mut session = EngineProcess::spawn(&self.path)?;

        session.send("uci")?;
        session.send("isready")?;
        session.send("ucinewgame")?;
        session.send(&format!("position fen {}", pos.to_fen()))?;
        session.send(&format!("go movetime {}", self.movetime.as_millis()))?;

        let reply = session.wait_for_bestmove(deadline, self.reply_timeout)?;
        debug!(engine = %self.path.display(), reply = %reply, "external engine answered");

        if reply == "0000" || reply == "(none)" {
            return Err(ExternalEngineError::NoMove);
        }
        parse_uci_move(pos, &reply).map_err(|source| ExternalEngineError::BadReply { reply, source })
    }
}

/// Running child plus a channel fed by a stdout reader thread.
struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    lines: mpsc::Receiver<String>,
}

impl EngineProcess {
    fn spawn(path: &Path) -> Result<Self, ExternalEngineError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ExternalEngineError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExternalEngineError::NoReply);
        };

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self { child, stdin, lines })
    }

    fn send(&mut self, cmd: &str) -> Result<(), ExternalEngineError> {
        trace!(cmd, ">> engine");
        writeln!(self.stdin, "{cmd}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until `bestmove <move>`, returning the move text.
    fn wait_for_bestmove(
        &mut self,
        deadline: Instant,
        timeout: Duration,
    ) -> Result<String, ExternalEngineError> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    trace!(line = %line, "<< engine");
                    let mut parts = line.split_whitespace();
                    if parts.next() == Some("bestmove") {
                        return parts.next().map(str::to_string).ok_or(ExternalEngineError::NoMove);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(ExternalEngineError::Timeout(timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(ExternalEngineError::NoReply),
            }
        }
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "quit");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
