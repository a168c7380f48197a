//! The control loop: stdin commands, clock ticks and computer moves, one at
//! a time, against a single session.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chess_core::{parse_uci_move, Move};
use chess_session::{AiCoordinator, AiTicket, GameSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP};
use crate::render::{render, RenderMode};

const TICK: Duration = Duration::from_millis(100);

/// Result of a computer turn, tagged with the request it answers.
type AiReply = (AiTicket, Option<Move>);

pub struct App {
    session: GameSession,
    mode: RenderMode,
    ai: Arc<Mutex<AiCoordinator>>,
    /// The request currently being computed (or last answered with no move)
    pending: Option<AiTicket>,
}

impl App {
    pub fn new(session: GameSession, mode: RenderMode) -> Self {
        Self {
            session,
            mode,
            ai: Arc::new(Mutex::new(AiCoordinator::new())),
            pending: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::channel::<AiReply>(4);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(TICK);
        let mut last_tick = Instant::now();

        self.show();
        loop {
            self.maybe_start_ai(&tx);

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("reading stdin")? else {
                        break;
                    };
                    match Command::parse(&line) {
                        Ok(Command::Quit) => break,
                        Ok(cmd) => self.execute(cmd),
                        Err(e) => println!("{e}"),
                    }
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_tick).as_secs_f64();
                    last_tick = now;
                    let flagged = self.session.tick(elapsed).is_some();
                    let promoted = self.session.poll(now).is_some();
                    if flagged || promoted {
                        self.show();
                    }
                }
                Some((ticket, mv)) = rx.recv() => self.on_ai_reply(ticket, mv),
            }
        }
        info!("bye");
        Ok(())
    }

    /// Start a computer turn unless one for the current position is running.
    fn maybe_start_ai(&mut self, tx: &mpsc::Sender<AiReply>) {
        if self
            .pending
            .is_some_and(|t| t.generation == self.session.generation())
        {
            return;
        }
        let Some(req) = self.session.request_ai() else {
            return;
        };
        self.pending = Some(req.ticket);

        let ai = Arc::clone(&self.ai);
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let mv = ai.blocking_lock().choose(&req);
            if tx.blocking_send((req.ticket, mv)).is_err() {
                debug!("control loop gone, dropping computer move");
            }
        });
    }

    fn on_ai_reply(&mut self, ticket: AiTicket, mv: Option<Move>) {
        let Some(mv) = mv else {
            // Keep `pending` so the same position is not searched again
            warn!("computer found no move");
            return;
        };
        if self.pending == Some(ticket) {
            self.pending = None;
        }
        match self.session.apply_ai_move(ticket, mv) {
            Ok(()) => self.show(),
            Err(e) => debug!(error = %e, "computer move not applied"),
        }
    }

    fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::Click(sq) => {
                self.session.click(sq, Instant::now());
            }
            Command::Move(text) => {
                if self.session.is_computer_turn() {
                    println!("it is the computer's turn");
                    return;
                }
                let played = parse_uci_move(self.session.position(), &text)
                    .map_err(anyhow::Error::from)
                    .and_then(|mv| Ok(self.session.apply(mv)?));
                if let Err(e) = played {
                    println!("{e}");
                    return;
                }
            }
            Command::Promote(kind) => {
                if self.session.choose_promotion(kind).is_none() {
                    println!("no promotion pending");
                }
            }
            Command::Cancel => self.session.cancel(),
            Command::Undo => {
                // Against the computer take back its reply as well
                if self.session.undo() && self.session.is_computer_turn() {
                    self.session.undo();
                }
            }
            Command::ClaimDraw => {
                if self.session.claim_draw().is_none() {
                    println!("no draw to claim");
                    return;
                }
            }
            Command::NewGame => {
                self.session.new_game();
                if let Ok(mut ai) = self.ai.try_lock() {
                    ai.new_game();
                }
            }
            Command::Export(path) => {
                self.export(path.as_deref());
                return;
            }
            Command::ToggleCoach => {
                self.session.toggle_coach();
            }
            Command::ToggleAi(side) => {
                self.session.toggle_ai(side);
            }
            Command::CycleTier => {
                self.session.cycle_tier();
            }
            Command::AddMinute => self.session.adjust_clocks(1),
            Command::RemoveMinute => self.session.adjust_clocks(-1),
            Command::ResetClocks => self.session.reset_clocks(),
            Command::Show => {}
            Command::Help => {
                println!("{HELP}");
                return;
            }
            Command::Quit => return,
        }
        self.show();
    }

    /// Write the game to `path`, or to the configured export path.
    fn export(&self, path: Option<&Path>) {
        let written = match path {
            Some(path) => self.session.export_to_file(path),
            None => self.session.export_default(),
        };
        let shown = path.unwrap_or(self.session.config().export_path.as_path());
        match written {
            Ok(()) => println!("saved {}", shown.display()),
            Err(e) => println!("{e}"),
        }
    }

    fn show(&self) {
        println!("{}", render(&self.session, self.mode));
    }
}
