use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shakmaty::{Board, Color, Role};

use crate::position::GameState;
use crate::types::DEFAULT_ZOBRIST_SEED;

/// Fingerprint of a position, used as the cache key.
pub type Fingerprint = u64;

/// Random keys, drawn once and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    /// [role][color][square]
    piece: [[[u64; 64]; 2]; 6],
    /// XORed in when black is to move
    side: u64,
    /// per rook square still holding castling rights
    castling: [u64; 64],
    /// en passant file (0-7), only when a legal capture exists
    ep: [u64; 8],
}

impl ZobristTable {
    /// Table from the fixed default seed. Every engine built this way hashes identically.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_ZOBRIST_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::generate(&mut StdRng::from_entropy())
    }

    fn generate(rng: &mut StdRng) -> Self {
        let mut piece = [[[0u64; 64]; 2]; 6];
        for role_keys in &mut piece {
            for color_keys in role_keys {
                for key in color_keys {
                    *key = rng.r#gen();
                }
            }
        }

        let side = rng.r#gen();

        let mut castling = [0u64; 64];
        for key in &mut castling {
            *key = rng.r#gen();
        }

        let mut ep = [0u64; 8];
        for key in &mut ep {
            *key = rng.r#gen();
        }

        Self {
            piece,
            side,
            castling,
            ep,
        }
    }

    #[inline]
    pub fn piece_key(&self, role: Role, color: Color, square: usize) -> u64 {
        self.piece[role_index(role)][color_index(color)][square]
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes fingerprints from a `ZobristTable`. Read-only over both table and position.
#[derive(Clone, Debug, Default)]
pub struct PositionHasher {
    table: ZobristTable,
}

impl PositionHasher {
    pub fn new(table: ZobristTable) -> Self {
        Self { table }
    }

    /// XOR of the piece keys of every occupied square. Empty board is 0.
    pub fn hash_board(&self, board: &Board) -> Fingerprint {
        let mut hash = 0;
        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                hash ^= self.table.piece_key(piece.role, piece.color, square as usize);
            }
        }
        hash
    }

    /// Full key: placement plus side to move, castling rights and en passant file.
    pub fn hash<G: GameState>(&self, position: &G) -> Fingerprint {
        let mut hash = self.hash_board(position.board());

        if position.turn() == Color::Black {
            hash ^= self.table.side;
        }
        for rook in position.castling_rights() {
            hash ^= self.table.castling[rook as usize];
        }
        if let Some(ep) = position.ep_square() {
            hash ^= self.table.ep[ep.file() as usize];
        }

        hash
    }
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}


// Keys are drawn per (role, color, square) triple plus side-to-move, castling rook squares and
// en passant file. A fingerprint is the XOR of every applicable key, so square order doesn't
// matter and an empty board w/ white to move and no rights is 0.
// Side/castling/ep are part of the key -> same placement w/ different rights is a different entry.

// Seeded generation -> every engine built w/ the same seed produces the same keys, so searches
// are reproducible run to run.
