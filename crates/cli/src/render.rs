//! Text and JSON views of a session.

use chess_core::{sq, sq_to_coord};
use chess_session::{DisplayState, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Text,
    Json,
}

pub fn render(session: &GameSession, mode: RenderMode) -> String {
    let display = session.display();
    match mode {
        RenderMode::Json => serde_json::to_string(&display)
            .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
        RenderMode::Text => render_text(session, &display),
    }
}

fn render_text(session: &GameSession, d: &DisplayState) -> String {
    let pos = session.position();
    let mut out = String::new();

    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let Some(s) = sq(file, rank) else { continue };
            let coord = sq_to_coord(s);
            let ch = pos.piece_at(s).map_or('.', |p| p.fen_char());
            let marked = d.selected.as_deref() == Some(coord.as_str()) || d.targets.contains(&coord);
            if marked {
                out.push_str(&format!("[{ch}]"));
            } else {
                out.push_str(&format!(" {ch} "));
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");

    out.push_str(&format!(
        "{} to move  |  White {}  Black {}",
        d.active_side, d.white_clock, d.black_clock
    ));
    if !d.status.is_empty() {
        out.push_str(&format!("  |  {}", d.status));
    }
    out.push('\n');

    let bar_len = 20;
    let filled = (d.eval_fraction * bar_len as f64).round() as usize;
    out.push_str(&format!(
        "eval {:+} [{}{}]  last {}  |  AI level {}  white {}  black {}\n",
        d.evaluation,
        "#".repeat(filled),
        "-".repeat(bar_len - filled.min(bar_len)),
        d.last_move.as_deref().unwrap_or("-"),
        d.ai_tier,
        on_off(d.ai_white),
        on_off(d.ai_black),
    ));
    if d.draw_claimable {
        out.push_str("a draw can be claimed (claim)\n");
    }
    if d.awaiting_promotion {
        out.push_str("promote to? (promote q|r|b|n)\n");
    }
    if !d.coach_text.is_empty() {
        out.push_str(&format!("coach: {}\n", d.coach_text));
    }
    out
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
