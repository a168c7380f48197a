//! Portable Game Notation: SAN for single moves, full game records out, and
//! a reader for the records this module (or any plain PGN writer) produces.
//!
//! The writer replays the move list from the initial position, so every move
//! is re-validated against the rules on the way out. Movetext is wrapped at
//! 80 columns as the export format asks.

use crate::{board::Position, board::STARTPOS_FEN, error::ChessError, movegen::legal_moves, types::*};

/// Headers emitted in this order before any others (the Seven Tag Roster).
pub const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

const LINE_WIDTH: usize = 80;

/// A parsed game record.
#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: Vec<(String, String)>,
    pub initial: Position,
    pub moves: Vec<Move>,
    pub result: String,
}

impl PgnGame {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Standard Algebraic Notation for `mv` played from `pos`, including the
/// `+` / `#` suffix.
pub fn move_to_san(pos: &Position, mv: Move) -> String {
    let mut san = san_body(pos, mv);
    let mut after = pos.clone();
    after.make_move(mv);
    if after.is_check() {
        san.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
    }
    san
}

fn san_body(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return crate::uci::move_to_uci(mv);
    };

    if pos.is_castle(mv) {
        return if mv.to > mv.from { "O-O" } else { "O-O-O" }.to_string();
    }

    let mut san = String::new();
    let capture = pos.is_capture(mv);

    if piece.kind == PieceKind::Pawn {
        if capture {
            san.push((b'a' + (mv.from % 8)) as char);
        }
    } else {
        san.push(piece.kind.letter());
        // Disambiguate against other pieces of the same kind reaching `to`.
        let rivals: Vec<u8> = legal_moves(pos)
            .into_iter()
            .filter(|m| {
                m.to == mv.to
                    && m.from != mv.from
                    && pos.piece_at(m.from).map(|p| p.kind) == Some(piece.kind)
            })
            .map(|m| m.from)
            .collect();
        if !rivals.is_empty() {
            let same_file = rivals.iter().any(|&s| file_of(s) == file_of(mv.from));
            let same_rank = rivals.iter().any(|&s| rank_of(s) == rank_of(mv.from));
            let coord = sq_to_coord(mv.from);
            if !same_file {
                san.push_str(&coord[..1]);
            } else if !same_rank {
                san.push_str(&coord[1..]);
            } else {
                san.push_str(&coord);
            }
        }
    }

    if capture {
        san.push('x');
    }
    san.push_str(&sq_to_coord(mv.to));

    if let Some(promo) = mv.promo {
        san.push('=');
        san.push(promo.letter());
    }
    san
}

/// Resolve a SAN token (annotations such as `+`, `#`, `!`, `?` ignored)
/// against the legal moves of `pos`.
pub fn san_to_move(pos: &Position, token: &str) -> Result<Move, ChessError> {
    let wanted = trim_annotation_suffix(token).replace('0', "O");
    legal_moves(pos)
        .into_iter()
        .find(|&mv| san_body(pos, mv) == wanted)
        .ok_or_else(|| ChessError::InvalidSan {
            token: token.to_string(),
            reason: "no legal move matches".into(),
        })
}

/// Write a complete game record. `tags` are emitted after the Seven Tag
/// Roster (missing roster entries are filled with `?`); `SetUp`/`FEN` are
/// added automatically when `initial` is not the standard start.
pub fn write_pgn(
    initial: &Position,
    moves: &[Move],
    tags: &[(&str, String)],
    result: &str,
) -> Result<String, ChessError> {
    let result = normalize_result(result);
    let mut out = String::new();

    for key in SEVEN_TAG_ROSTER {
        let value = if key == "Result" {
            result.to_string()
        } else {
            tags.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| "?".to_string())
        };
        push_tag(&mut out, key, &value);
    }
    for (key, value) in tags {
        if !SEVEN_TAG_ROSTER.contains(key) && *key != "SetUp" && *key != "FEN" {
            push_tag(&mut out, key, value);
        }
    }
    let fen = initial.to_fen();
    if fen != STARTPOS_FEN {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", &fen);
    }
    out.push('\n');

    let mut tokens = Vec::with_capacity(moves.len() * 3 / 2 + 1);
    let mut pos = initial.clone();
    for (ply, &mv) in moves.iter().enumerate() {
        if !legal_moves(&pos).contains(&mv) {
            return Err(ChessError::IllegalMove(crate::uci::move_to_uci(mv)));
        }
        if pos.side_to_move == Color::White {
            tokens.push(format!("{}.", pos.fullmove_number));
        } else if ply == 0 {
            tokens.push(format!("{}...", pos.fullmove_number));
        }
        tokens.push(move_to_san(&pos, mv));
        pos.make_move(mv);
    }
    tokens.push(result.to_string());

    let mut line_len = 0;
    for tok in tokens {
        if line_len > 0 && line_len + 1 + tok.len() > LINE_WIDTH {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += tok.len();
        out.push_str(&tok);
    }
    out.push('\n');
    Ok(out)
}

/// Read one game record: headers, movetext (comments, variations, NAGs and
/// move numbers skipped) and the result token.
pub fn read_pgn(text: &str) -> Result<PgnGame, ChessError> {
    let mut headers = Vec::new();
    let mut movetext = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            headers.push(parse_tag(line)?);
        } else {
            movetext.push_str(line);
            movetext.push(' ');
        }
    }

    let initial = match headers.iter().find(|(k, _)| k == "FEN") {
        Some((_, fen)) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };

    let (moves, result) = parse_tokens(&initial, &movetext)?;

    Ok(PgnGame {
        headers,
        initial,
        moves,
        result,
    })
}

/// Read SAN movetext (no headers) played from `initial`. Stops at a result
/// token if one is present.
pub fn parse_movetext(initial: &Position, text: &str) -> Result<Vec<Move>, ChessError> {
    parse_tokens(initial, text).map(|(moves, _)| moves)
}

fn parse_tokens(initial: &Position, text: &str) -> Result<(Vec<Move>, String), ChessError> {
    let mut pos = initial.clone();
    let mut moves = Vec::new();
    let mut result = "*".to_string();
    for token in strip_comments_and_variations(text).split_whitespace() {
        if is_move_number(token) || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            result = token.to_string();
            break;
        }
        // "1.e4" style, number glued to the move
        let token = token.rsplit('.').next().unwrap_or(token);
        let mv = san_to_move(&pos, token)?;
        pos.make_move(mv);
        moves.push(mv);
    }
    Ok((moves, result))
}

fn push_tag(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("[{key} \"{}\"]\n", value.replace('\\', "\\\\").replace('"', "\\\"")));
}

fn parse_tag(line: &str) -> Result<(String, String), ChessError> {
    let bad = || ChessError::InvalidSan {
        token: line.to_string(),
        reason: "malformed tag pair".into(),
    };
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or_else(bad)?;
    let (key, value) = inner.split_once(' ').ok_or_else(bad)?;
    let value = value
        .trim()
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(bad)?;
    Ok((
        key.to_string(),
        value.replace("\\\"", "\"").replace("\\\\", "\\"),
    ))
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut braces = 0usize;
    let mut parens = 0usize;
    for ch in text.chars() {
        match ch {
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            '(' if braces == 0 => parens += 1,
            ')' if braces == 0 => parens = parens.saturating_sub(1),
            _ if braces == 0 && parens == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

fn is_move_number(token: &str) -> bool {
    let digits = token.trim_end_matches('.');
    digits.len() < token.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) { result } else { "*" }
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
