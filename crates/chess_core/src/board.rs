use crate::{attacks, error::ChessError, movegen::legal_moves, types::*, zobrist::ZOBRIST};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    /// True if `c` may still castle on at least one side.
    pub fn any(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk || self.wq,
            Color::Black => self.bk || self.bq,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights {
                wk: true,
                wq: true,
                bk: true,
                bq: true,
            },
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        // Pawns
        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parse Forsyth-Edwards Notation. The halfmove and fullmove fields are
    /// optional and default to `0` and `1`.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(ChessError::fen(fen, "expected at least 4 fields"));
        }

        let board_part = parts[0];
        let stm_part = parts[1];
        let castle_part = parts[2];
        let ep_part = parts[3];
        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");

        let mut board = [None; 64];
        let ranks: Vec<&str> = board_part.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessError::fen(fen, "board section needs 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file: i8 = 0;
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| ChessError::fen(fen, format!("bad piece char '{ch}'")))?;
                    let s = sq(file, rank)
                        .ok_or_else(|| ChessError::fen(fen, "too many files in rank"))?;
                    board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::fen(fen, "too many files in rank"));
                }
            }
            if file != 8 {
                return Err(ChessError::fen(fen, "not enough files in rank"));
            }
        }

        let side_to_move = match stm_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(fen, format!("bad side to move '{other}'"))),
        };

        let mut castling = CastlingRights::none();
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(ChessError::fen(fen, format!("bad castling char '{c}'"))),
                }
            }
        }

        let en_passant = if ep_part == "-" {
            None
        } else {
            Some(coord_to_sq(ep_part).ok_or_else(|| ChessError::InvalidSquare(ep_part.into()))?)
        };

        let halfmove_clock: u32 = halfmove_part
            .parse()
            .map_err(|_| ChessError::fen(fen, "bad halfmove clock"))?;
        let fullmove_number: u32 = fullmove_part
            .parse()
            .map_err(|_| ChessError::fen(fen, "bad fullmove number"))?;

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Canonical FEN of this position. Used for persistence and for handing
    /// the position to an external engine.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        if self.castling.wk {
            out.push('K');
        }
        if self.castling.wq {
            out.push('Q');
        }
        if self.castling.bk {
            out.push('k');
        }
        if self.castling.bq {
            out.push('q');
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&i| self.board[i as usize] == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Number of pieces of both colors on the board, kings included.
    pub fn piece_count(&self) -> usize {
        self.board.iter().filter(|s| s.is_some()).count()
    }

    pub fn in_check(&self, c: Color) -> bool {
        let ksq = match self.king_sq(c) {
            Some(s) => s,
            None => return false,
        };
        self.is_square_attacked(ksq, c.other())
    }

    /// True if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        attacks::is_square_attacked(self, target, by)
    }

    /// Number of `by` pieces attacking (or defending) `target`.
    pub fn attackers(&self, target: u8, by: Color) -> usize {
        attacks::attacker_count(self, target, by)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && legal_moves(self).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && legal_moves(self).is_empty()
    }

    /// A draw either player may claim: 50 moves each without a capture or
    /// pawn move. The game goes on unless someone claims it.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// 75 moves each without a capture or pawn move. Ends the game outright.
    pub fn is_seventy_five_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        let mut bishops = 0;
        for (i, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => knights += 1,
                PieceKind::Bishop => {
                    bishops += 1;
                    let s = i as u8;
                    bishop_colors[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        match (knights, bishops) {
            (0, 0) => true,
            (1, 0) | (0, 1) => true,
            (0, _) => !(bishop_colors[0] && bishop_colors[1]),
            _ => false,
        }
    }

    /// True for a move that takes a piece, en-passant included.
    pub fn is_capture(&self, mv: Move) -> bool {
        self.piece_at(mv.to).is_some() || self.is_en_passant(mv)
    }

    pub fn is_en_passant(&self, mv: Move) -> bool {
        matches!(self.piece_at(mv.from), Some(pc) if pc.kind == PieceKind::Pawn)
            && self.en_passant == Some(mv.to)
            && file_of(mv.from) != file_of(mv.to)
            && self.piece_at(mv.to).is_none()
    }

    pub fn is_castle(&self, mv: Move) -> bool {
        matches!(self.piece_at(mv.from), Some(pc) if pc.kind == PieceKind::King)
            && (file_of(mv.from) - file_of(mv.to)).abs() == 2
    }

    /// True when `mv` moves a pawn onto its last rank.
    pub fn is_promotion(&self, mv: Move) -> bool {
        match self.piece_at(mv.from) {
            Some(pc) if pc.kind == PieceKind::Pawn => {
                let last = if pc.color == Color::White { 7 } else { 0 };
                rank_of(mv.to) == last
            }
            _ => false,
        }
    }

    /// Zobrist hash over placement, side to move, castling rights and the
    /// en-passant file.
    pub fn position_hash(&self) -> u64 {
        ZOBRIST.hash(self)
    }

    /// Play `mv`, which must be at least pseudo-legal (a piece of the side to
    /// move stands on `mv.from`). Returns what `unmake_move` needs to revert it.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = match self.piece_at(from) {
            Some(pc) => pc,
            None => panic!("make_move: no piece on {}", sq_to_coord(from)),
        };
        let is_en_passant = self.is_en_passant(mv);
        let is_castle = self.is_castle(mv);
        let mut captured = self.piece_at(to);
        let prev_castling = self.castling.clone();
        let prev_ep = self.en_passant;
        let prev_hmc = self.halfmove_clock;
        let prev_fmn = self.fullmove_number;

        self.en_passant = None;

        // Halfmove clock reset on capture or pawn move
        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        // The pawn taken en passant sits beside the destination, not on it.
        let mut ep_captured_sq = None;
        if is_en_passant {
            let dir = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        if moved.kind == PieceKind::Pawn {
            let r = rank_of(to);
            if (moved.color == Color::White && r == 7) || (moved.color == Color::Black && r == 0) {
                let promo = mv.promo.unwrap_or(PieceKind::Queen);
                self.set_piece(to, Some(Piece::new(moved.color, promo)));
            }
        }

        // White: e1->g1 rook h1->f1, e1->c1 rook a1->d1
        // Black: e8->g8 rook h8->f8, e8->c8 rook a8->d8
        let mut rook_move = None;
        if is_castle {
            let rook_squares = match (moved.color, from, to) {
                (Color::White, 4, 6) => Some((7, 5)),
                (Color::White, 4, 2) => Some((0, 3)),
                (Color::Black, 60, 62) => Some((63, 61)),
                (Color::Black, 60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        // Castling rights go with a king or rook leaving home, or a rook
        // being captured on its home square.
        for s in [from, to] {
            match s {
                0 => self.castling.wq = false,
                7 => self.castling.wk = false,
                56 => self.castling.bq = false,
                63 => self.castling.bk = false,
                _ => {}
            }
        }
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }

        // Double pawn push sets en-passant square
        if moved.kind == PieceKind::Pawn {
            let fr = rank_of(from);
            let tr = rank_of(to);
            if (moved.color == Color::White && fr == 1 && tr == 3)
                || (moved.color == Color::Black && fr == 6 && tr == 4)
            {
                self.en_passant = sq(file_of(from), (fr + tr) / 2);
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        Undo {
            captured,
            castling: prev_castling,
            en_passant: prev_ep,
            halfmove_clock: prev_hmc,
            fullmove_number: prev_fmn,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        let from = mv.from;
        let to = mv.to;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, which also undoes a promotion.
        self.set_piece(to, None);
        self.set_piece(from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(to, undo.captured),
        }
    }
}
