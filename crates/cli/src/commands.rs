//! One line of input, parsed.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chess_core::{coord_to_sq, Color, PieceKind};

pub const HELP: &str = "\
commands:
  e2 | click e2     click a square (select, move, reselect)
  move e2e4         play a move directly
  promote q|r|b|n   answer a promotion prompt
  cancel            drop the current selection
  undo              take back one move
  new               start a new game
  claim             claim a draw (fifty moves or threefold repetition)
  export [path]     write the game as PGN
  coach             toggle coach tips
  ai white|black    toggle the computer for a side
  tier              cycle computer strength 1 -> 2 -> 3
  + | -             add / remove a minute on both clocks
  r                 reset both clocks
  show              print the current state
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(u8),
    Move(String),
    Promote(PieceKind),
    Cancel,
    Undo,
    NewGame,
    ClaimDraw,
    Export(Option<PathBuf>),
    ToggleCoach,
    ToggleAi(Color),
    CycleTier,
    AddMinute,
    RemoveMinute,
    ResetClocks,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Show);
        };
        let arg = words.next();

        let cmd = match head.to_ascii_lowercase().as_str() {
            "click" => Command::Click(square(arg.ok_or_else(|| anyhow!("click needs a square"))?)?),
            "move" | "m" => Command::Move(
                arg.ok_or_else(|| anyhow!("move needs a move like e2e4"))?
                    .to_string(),
            ),
            "promote" => {
                let letter = arg
                    .and_then(|a| a.chars().next())
                    .ok_or_else(|| anyhow!("promote needs q, r, b or n"))?;
                match PieceKind::from_letter(letter) {
                    Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Command::Promote(kind),
                    _ => bail!("cannot promote to '{letter}'"),
                }
            }
            "cancel" | "esc" => Command::Cancel,
            "undo" | "backspace" => Command::Undo,
            "new" | "n" => Command::NewGame,
            "claim" | "draw" => Command::ClaimDraw,
            "export" | "p" => Command::Export(arg.map(PathBuf::from)),
            "coach" | "a" => Command::ToggleCoach,
            "ai" => match arg.map(str::to_ascii_lowercase).as_deref() {
                Some("white" | "w") => Command::ToggleAi(Color::White),
                Some("black" | "b") | None => Command::ToggleAi(Color::Black),
                Some(other) => bail!("unknown side '{other}'"),
            },
            "f1" => Command::ToggleAi(Color::Black),
            "tier" | "f2" => Command::CycleTier,
            "+" => Command::AddMinute,
            "-" => Command::RemoveMinute,
            "r" => Command::ResetClocks,
            "show" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Click(square(other)?),
        };
        Ok(cmd)
    }
}

fn square(text: &str) -> Result<u8> {
    coord_to_sq(&text.to_ascii_lowercase()).ok_or_else(|| anyhow!("unknown command or square '{text}'"))
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
