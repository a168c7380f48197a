//! The game session: one live position plus everything derived from it.

use std::path::Path;
use std::time::Instant;

use chess_core::{legal_moves, move_to_uci, sq_to_coord, write_pgn, Color, Move, PieceKind, Position};
use classical_engine::evaluate;
use tracing::{debug, info, warn};

use crate::ai::{AiCoordinator, AiRequest, AiTicket};
use crate::clock::{format_clock, Clock};
use crate::coach::{advise, coach_text, Tip};
use crate::config::SessionConfig;
use crate::display::{eval_fraction, DisplayState};
use crate::error::SessionError;
use crate::history::History;
use crate::selection::{ClickAction, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    /// 75 moves each without a capture or pawn move
    SeventyFiveMoves,
    /// Same position a fifth time
    FivefoldRepetition,
    /// Claimed under the fifty-move rule
    FiftyMoves,
    /// Claimed on a third occurrence of the position
    ThreefoldRepetition,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    Timeout { loser: Color },
}

impl Outcome {
    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self {
            Outcome::Checkmate { winner: Color::White }
            | Outcome::Timeout { loser: Color::Black } => "1-0",
            Outcome::Checkmate { winner: Color::Black }
            | Outcome::Timeout { loser: Color::White } => "0-1",
            Outcome::Stalemate | Outcome::Draw(_) => "1/2-1/2",
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::Draw(_) => "draw",
            Outcome::Timeout { loser: Color::White } => "white flag fell",
            Outcome::Timeout { loser: Color::Black } => "black flag fell",
        }
    }
}

pub struct GameSession {
    config: SessionConfig,
    initial: Position,
    initial_hash: u64,
    position: Position,
    history: History,
    clock: Clock,
    selection: Selection,
    running: bool,
    outcome: Option<Outcome>,
    /// Bumped whenever the position changes, so outstanding AI tickets expire
    generation: u64,
    evaluation: i32,
    tips: Vec<Tip>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::from_position(config, Position::startpos())
    }

    /// A session whose games start from `initial`.
    pub fn from_position(config: SessionConfig, initial: Position) -> Self {
        let mut session = Self {
            clock: Clock::new(config.clock_secs),
            config,
            initial_hash: initial.position_hash(),
            position: initial.clone(),
            initial,
            history: History::new(),
            selection: Selection::Idle,
            running: true,
            outcome: None,
            generation: 0,
            evaluation: 0,
            tips: Vec::new(),
        };
        session.refresh();
        session.check_game_end();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn evaluation(&self) -> i32 {
        self.evaluation
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|e| e.mv)
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn is_computer_turn(&self) -> bool {
        self.config.ai.plays(self.position.side_to_move)
    }

    // ---------------------------------------------------------------------
    // Human input
    // ---------------------------------------------------------------------

    /// Handle a click on `sq` (0 = a1 … 63 = h8). Returns the move played,
    /// if the click completed one.
    pub fn click(&mut self, sq: u8, now: Instant) -> Option<Move> {
        if sq > 63 || !self.running || self.is_computer_turn() {
            return None;
        }
        match self.selection.on_click(&self.position, sq) {
            ClickAction::Ignore => None,
            ClickAction::Clear => {
                self.selection = Selection::Idle;
                None
            }
            ClickAction::Select {
                origin,
                destinations,
            } => {
                self.selection = Selection::Selected {
                    origin,
                    destinations,
                };
                None
            }
            ClickAction::AskPromotion {
                origin,
                destination,
            } => {
                self.selection = Selection::awaiting_promotion(
                    origin,
                    destination,
                    now,
                    self.config.promotion_timeout(),
                );
                None
            }
            ClickAction::Play(mv) => self.play_selected(mv),
        }
    }

    /// Drop any selection or pending promotion.
    pub fn cancel(&mut self) {
        if self.selection != Selection::GameOver {
            self.selection = Selection::Idle;
        }
    }

    /// Answer a pending promotion. Ignored unless one is pending.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Option<Move> {
        let Selection::AwaitingPromotion {
            origin,
            destination,
            ..
        } = self.selection
        else {
            return None;
        };
        if !PieceKind::PROMOTIONS.contains(&kind) {
            return None;
        }
        self.play_selected(Move::with_promo(origin, destination, kind))
    }

    /// Resolve a promotion whose deadline has passed (as a queen).
    pub fn poll(&mut self, now: Instant) -> Option<Move> {
        let mv = self.selection.expired_promotion(now)?;
        debug!(mv = %mv, "promotion choice timed out");
        self.play_selected(mv)
    }

    fn play_selected(&mut self, mv: Move) -> Option<Move> {
        match self.apply(mv) {
            Ok(()) => Some(mv),
            Err(_) => {
                self.selection = Selection::Idle;
                None
            }
        }
    }

    // ---------------------------------------------------------------------
    // Move pipeline
    // ---------------------------------------------------------------------

    /// Play `mv` if it is legal and the game is running. On error nothing
    /// changes.
    pub fn apply(&mut self, mv: Move) -> Result<(), SessionError> {
        if !self.running {
            debug!(mv = %mv, "move rejected, game not running");
            return Err(SessionError::NotRunning);
        }
        if !legal_moves(&self.position).contains(&mv) {
            debug!(mv = %mv, fen = %self.position.to_fen(), "illegal move rejected");
            return Err(SessionError::IllegalMove(move_to_uci(mv)));
        }

        let undo = self.position.make_move(mv);
        self.history.push(mv, undo, self.position.position_hash());
        self.generation += 1;
        self.selection = Selection::Idle;
        self.refresh();
        self.check_game_end();
        Ok(())
    }

    /// Take back the last move. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        self.position.unmake_move(entry.mv, entry.undo);
        self.running = true;
        self.outcome = None;
        self.selection = Selection::Idle;
        self.generation += 1;
        self.refresh();
        debug!(mv = %entry.mv, "move taken back");
        true
    }

    /// Back to the starting position with fresh clocks.
    pub fn new_game(&mut self) {
        self.position = self.initial.clone();
        self.history.clear();
        self.clock.reset(self.config.clock_secs);
        self.running = true;
        self.outcome = None;
        self.selection = Selection::Idle;
        self.generation += 1;
        self.refresh();
        self.check_game_end();
        info!("new game");
    }

    /// Advance the side-to-move clock by `elapsed` seconds.
    pub fn tick(&mut self, elapsed: f64) -> Option<Color> {
        if !self.running {
            return None;
        }
        let flagged = self.clock.tick(self.position.side_to_move, elapsed)?;
        self.finish(Outcome::Timeout { loser: flagged });
        Some(flagged)
    }

    fn check_game_end(&mut self) {
        if let Some(outcome) = self.detect_outcome() {
            self.finish(outcome);
        }
    }

    fn detect_outcome(&self) -> Option<Outcome> {
        let pos = &self.position;
        if pos.is_checkmate() {
            return Some(Outcome::Checkmate {
                winner: pos.side_to_move.other(),
            });
        }
        if pos.is_stalemate() {
            return Some(Outcome::Stalemate);
        }
        if pos.is_insufficient_material() {
            return Some(Outcome::Draw(DrawReason::InsufficientMaterial));
        }
        if pos.is_seventy_five_move_draw() {
            return Some(Outcome::Draw(DrawReason::SeventyFiveMoves));
        }
        if self.repetitions() >= 5 {
            return Some(Outcome::Draw(DrawReason::FivefoldRepetition));
        }
        None
    }

    /// Times the current position has occurred, counting the start.
    fn repetitions(&self) -> usize {
        self.history
            .occurrences(self.initial_hash, self.position.position_hash())
    }

    /// The draw the player to move could claim right now, if any. Claimable
    /// draws never end the game on their own.
    pub fn claimable_draw(&self) -> Option<DrawReason> {
        if !self.running {
            None
        } else if self.position.is_fifty_move_draw() {
            Some(DrawReason::FiftyMoves)
        } else if self.repetitions() >= 3 {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// End the game as a draw if one can be claimed.
    pub fn claim_draw(&mut self) -> Option<DrawReason> {
        let reason = self.claimable_draw()?;
        self.finish(Outcome::Draw(reason));
        Some(reason)
    }

    fn finish(&mut self, outcome: Outcome) {
        self.running = false;
        self.outcome = Some(outcome);
        self.selection = Selection::GameOver;
        self.generation += 1;
        info!(result = outcome.result_token(), status = outcome.status(), "game over");
    }

    fn refresh(&mut self) {
        self.evaluation = evaluate(&self.position);
        self.tips = if self.config.coach {
            advise(&self.position)
        } else {
            Vec::new()
        };
    }

    // ---------------------------------------------------------------------
    // Settings toggled during play
    // ---------------------------------------------------------------------

    pub fn toggle_coach(&mut self) -> bool {
        self.config.coach = !self.config.coach;
        self.refresh();
        self.config.coach
    }

    /// Switch the computer on or off for `side`.
    pub fn toggle_ai(&mut self, side: Color) -> bool {
        let slot = match side {
            Color::White => &mut self.config.ai.white,
            Color::Black => &mut self.config.ai.black,
        };
        *slot = !*slot;
        let now_on = *slot;
        // A human move in progress belongs to a side the computer may now own
        self.cancel();
        self.generation += 1;
        now_on
    }

    pub fn cycle_tier(&mut self) -> uci_engine::Tier {
        self.config.ai.tier = self.config.ai.tier.next();
        self.config.ai.tier
    }

    pub fn adjust_clocks(&mut self, minutes: i32) {
        self.clock.adjust_both(minutes);
    }

    /// Restore both clocks. A game lost on time resumes.
    pub fn reset_clocks(&mut self) {
        self.clock.reset(self.config.clock_secs);
        if matches!(self.outcome, Some(Outcome::Timeout { .. })) {
            self.outcome = None;
            self.running = true;
            self.selection = Selection::Idle;
            self.generation += 1;
        }
    }

    // ---------------------------------------------------------------------
    // Computer turns
    // ---------------------------------------------------------------------

    /// A request for the computer's move, if it is the computer's turn.
    pub fn request_ai(&self) -> Option<AiRequest> {
        if !self.running || !self.is_computer_turn() {
            return None;
        }
        Some(AiRequest {
            ticket: AiTicket {
                generation: self.generation,
                hash: self.position.position_hash(),
            },
            position: self.position.clone(),
            tier: self.config.ai.tier,
            external: self.config.ai.external_engine(),
        })
    }

    /// Play a computed move, unless the session has moved on since the
    /// ticket was issued.
    pub fn apply_ai_move(&mut self, ticket: AiTicket, mv: Move) -> Result<(), SessionError> {
        if ticket.generation != self.generation || ticket.hash != self.position.position_hash() {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale computer move"
            );
            return Err(SessionError::StaleAiResult {
                ticket: ticket.generation,
                current: self.generation,
            });
        }
        self.apply(mv)
    }

    /// Compute and play the computer's move in place. Returns the move, or
    /// `None` when it is not the computer's turn or no move exists.
    pub fn play_ai_turn(&mut self, ai: &mut AiCoordinator) -> Result<Option<Move>, SessionError> {
        let Some(req) = self.request_ai() else {
            return Ok(None);
        };
        let Some(mv) = ai.choose(&req) else {
            warn!("computer turn skipped");
            return Ok(None);
        };
        self.apply_ai_move(req.ticket, mv)?;
        Ok(Some(mv))
    }

    // ---------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------

    pub fn result_token(&self) -> &'static str {
        self.outcome.map_or("*", Outcome::result_token)
    }

    fn player_name(&self, side: Color) -> String {
        if self.config.ai.plays(side) {
            format!("Computer (tier {})", self.config.ai.tier)
        } else {
            "Human".to_string()
        }
    }

    /// The game so far as PGN.
    pub fn export_pgn(&self) -> Result<String, SessionError> {
        let tags = [
            ("Event", "Casual Game".to_string()),
            ("Date", "????.??.??".to_string()),
            ("Round", "-".to_string()),
            ("White", self.player_name(Color::White)),
            ("Black", self.player_name(Color::Black)),
        ];
        Ok(write_pgn(
            &self.initial,
            &self.history.moves(),
            &tags,
            self.result_token(),
        )?)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<(), SessionError> {
        let pgn = self.export_pgn()?;
        std::fs::write(path, pgn).map_err(|source| SessionError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), plies = self.history.len(), "game exported");
        Ok(())
    }

    /// Export to the configured path.
    pub fn export_default(&self) -> Result<(), SessionError> {
        self.export_to_file(&self.config.export_path)
    }

    pub fn status(&self) -> &'static str {
        match self.outcome {
            Some(outcome) => outcome.status(),
            None if self.position.is_check() => "check",
            None => "",
        }
    }

    pub fn display(&self) -> DisplayState {
        let (selected, targets) = match self.selection.highlighted() {
            Some((origin, dests)) => (
                Some(sq_to_coord(origin)),
                dests.iter().map(|&d| sq_to_coord(d)).collect(),
            ),
            None => (None, Vec::new()),
        };
        DisplayState {
            active_side: self.position.side_to_move.to_string(),
            status: self.status().to_string(),
            white_clock: format_clock(self.clock.remaining(Color::White)),
            black_clock: format_clock(self.clock.remaining(Color::Black)),
            last_move: self.last_move().map(move_to_uci),
            evaluation: self.evaluation,
            eval_fraction: eval_fraction(self.evaluation),
            coach_text: coach_text(&self.tips),
            ai_tier: self.config.ai.tier.level(),
            ai_white: self.config.ai.white,
            ai_black: self.config.ai.black,
            selected,
            targets,
            awaiting_promotion: matches!(self.selection, Selection::AwaitingPromotion { .. }),
            draw_claimable: self.claimable_draw().is_some(),
            fen: self.position.to_fen(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
