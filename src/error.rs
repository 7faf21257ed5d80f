//! Error types for engine setup and the driver-facing position helpers.
//!
//! The search itself cannot fail; these cover configuration and input parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Search depth must be between one ply and `MAX_DEPTH`
    #[error("Invalid search depth: {depth} (must be between 1 and {})", crate::types::MAX_DEPTH)]
    InvalidDepth { depth: u8 },

    #[error("Unknown search mode '{mode}' (expected minimax or alphabeta)")]
    InvalidMode { mode: String },

    /// FEN could not be parsed or describes an illegal position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move string is malformed or not legal in the current position
    #[error("Illegal move: {uci}")]
    IllegalMove { uci: String },
}

pub type EngineResult<T> = Result<T, EngineError>;
