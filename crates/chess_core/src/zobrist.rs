//! Zobrist keys for repetition detection.
//!
//! A position's key is the XOR of one random value per (piece, square), one
//! for Black to move, one per castling right still held and one for the
//! en-passant file. Keys are generated at compile time from a fixed seed, so
//! hashes are stable across runs and can be compared between sessions.

use crate::{board::Position, types::*};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            state = xorshift64(state);
            pieces[i / 384][(i / 64) % 6][i % 64] = state;
            i += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];
        let mut j = 0;
        while j < 12 {
            state = xorshift64(state);
            if j < 4 {
                castling[j] = state;
            } else {
                en_passant[j - 4] = state;
            }
            j += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// 0=wk, 1=wq, 2=bk, 3=bq
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    pub fn hash(&self, pos: &Position) -> u64 {
        let mut h = 0u64;
        for (i, pc) in pos.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= self.piece_key(*pc, i as u8);
            }
        }
        if pos.side_to_move == Color::Black {
            h ^= self.side_to_move;
        }
        let rights = [
            pos.castling.wk,
            pos.castling.wq,
            pos.castling.bk,
            pos.castling.bq,
        ];
        for (i, &held) in rights.iter().enumerate() {
            if held {
                h ^= self.castling_key(i);
            }
        }
        if let Some(ep) = pos.en_passant {
            h ^= self.ep_key(file_of(ep) as u8);
        }
        h
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x123456789ABCDEF0);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
