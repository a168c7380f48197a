//! Long algebraic ("compact coordinate") move text as spoken by UCI engines,
//! and the `position` command's argument list.

use crate::{board::Position, error::ChessError, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter().to_ascii_lowercase());
    }
    s
}

/// Parse `e2e4` / `e7e8q` and match it against the legal moves of `pos`.
///
/// A promotion without a piece letter is read as a queen promotion.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, ChessError> {
    let txt = txt.trim();
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(ChessError::InvalidMoveText(txt.to_string()));
    }
    let from =
        coord_to_sq(&txt[0..2]).ok_or_else(|| ChessError::InvalidSquare(txt[0..2].into()))?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(|| ChessError::InvalidSquare(txt[2..4].into()))?;
    let promo = match txt.chars().nth(4) {
        None => None,
        Some(ch) => match PieceKind::from_letter(ch) {
            Some(pk) if PieceKind::PROMOTIONS.contains(&pk) => Some(pk),
            _ => return Err(ChessError::InvalidMoveText(txt.to_string())),
        },
    };

    let mut mv = Move { from, to, promo };
    if mv.promo.is_none() && pos.is_promotion(mv) {
        mv.promo = Some(PieceKind::Queen);
    }
    if legal_moves(pos).contains(&mv) {
        Ok(mv)
    } else {
        Err(ChessError::IllegalMove(txt.to_string()))
    }
}

/// Apply a UCI `position` argument list: `startpos [moves ...]` or
/// `fen <6 fields> [moves ...]`. On any bad field or move `pos` is left as
/// it was.
pub fn set_position_from_uci(pos: &mut Position, args: &[&str]) -> Result<(), ChessError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let (setup, moves) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &[][..]),
    };

    let mut next = match setup.first() {
        Some(&"fen") => Position::from_fen(&setup[1..].join(" "))?,
        _ => Position::startpos(),
    };
    for txt in moves {
        let mv = parse_uci_move(&next, txt)?;
        next.make_move(mv);
    }
    *pos = next;
    Ok(())
}
