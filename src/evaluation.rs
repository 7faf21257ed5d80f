use shakmaty::{Board, Color, Role};

use crate::types::Score;

/// Static material count. No positional terms.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn piece_value(role: Role) -> Score {
        match role {
            Role::Pawn => 1,
            Role::Knight => 3,
            Role::Bishop => 3,
            Role::Rook => 5,
            Role::Queen => 9,
            Role::King => 0,
        }
    }

    /// Material balance from White's point of view. This is the value the cache stores.
    pub fn material(&self, board: &Board) -> Score {
        let mut score = 0;
        for square in board.occupied() {
            if let Some(piece) = board.piece_at(square) {
                let value = Self::piece_value(piece.role);
                score += match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                };
            }
        }
        score
    }

    /// Material balance, positive when `perspective` is ahead.
    pub fn evaluate(&self, board: &Board, perspective: Color) -> Score {
        orient(self.material(board), perspective)
    }
}

/// Turn a White-relative score into one relative to `perspective`.
#[inline]
pub fn orient(white_score: Score, perspective: Color) -> Score {
    match perspective {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}
