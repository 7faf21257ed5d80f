use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position, Square};

use crate::error::{EngineError, EngineResult};

/// What the search needs from the rules engine.
///
/// `push` and `pop` must nest strictly: every `pop` undoes the most recent unmatched `push`.
pub trait GameState {
    fn legal_moves(&self) -> MoveList;
    fn push(&mut self, mv: &Move);
    fn pop(&mut self) -> Option<Move>;
    fn last_move(&self) -> Option<&Move>;
    fn is_game_over(&self) -> bool;
    fn is_checkmate(&self) -> bool;

    fn board(&self) -> &Board;
    fn turn(&self) -> Color;
    /// Rook squares that still carry castling rights.
    fn castling_rights(&self) -> Bitboard;
    /// En passant target, only when a legal capture onto it exists.
    fn ep_square(&self) -> Option<Square>;
}

/// `shakmaty::Chess` with an undo stack.
#[derive(Clone, Debug, Default)]
pub struct Game {
    position: Chess,
    history: Vec<(Chess, Move)>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let invalid = |reason: String| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    pub fn from_position(position: Chess) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of moves currently on the undo stack.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Parse a move in UCI notation and play it if legal.
    pub fn play_uci(&mut self, uci: &str) -> EngineResult<Move> {
        let illegal = || EngineError::IllegalMove {
            uci: uci.to_string(),
        };
        let parsed: UciMove = uci.parse().map_err(|_| illegal())?;
        let mv = parsed.to_move(&self.position).map_err(|_| illegal())?;
        self.push(&mv);
        Ok(mv)
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }
}

impl GameState for Game {
    fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    fn push(&mut self, mv: &Move) {
        let previous = self.position.clone();
        self.position.play_unchecked(mv);
        self.history.push((previous, mv.clone()));
    }

    fn pop(&mut self) -> Option<Move> {
        let (previous, mv) = self.history.pop()?;
        self.position = previous;
        Some(mv)
    }

    fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|(_, mv)| mv)
    }

    fn is_game_over(&self) -> bool {
        self.position.is_game_over()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn board(&self) -> &Board {
        self.position.board()
    }

    fn turn(&self) -> Color {
        self.position.turn()
    }

    fn castling_rights(&self) -> Bitboard {
        self.position.castles().castling_rights()
    }

    fn ep_square(&self) -> Option<Square> {
        self.position.ep_square(EnPassantMode::Legal)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())
    }
}

/// UCI string for a move, e.g. `e2e4` or `e7e8q`.
pub fn move_to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}
