use shakmaty::Move;

use crate::error::{EngineError, EngineResult};

pub type Score = i32;

/// Magnitude used for checkmate and as the open search window. Larger than any material sum.
pub const SCORE_INFINITY: Score = 30_000;
pub const DEFAULT_DEPTH: u8 = 4;
/// Deepest search a config accepts. Also the UCI `Depth` option's max.
pub const MAX_DEPTH: u8 = 16;
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x3243F6A8885A308D;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    Minimax,
    AlphaBeta,
}

impl std::str::FromStr for SearchMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchMode::Minimax),
            "alphabeta" | "alpha-beta" => Ok(SearchMode::AlphaBeta),
            _ => Err(EngineError::InvalidMode { mode: s.to_string() }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    max_depth: u8,
    mode: SearchMode,
    iterative_deepening: bool,
}

impl SearchConfig {
    /// Validated constructor. Depths outside `1..=MAX_DEPTH` are rejected.
    pub fn new(max_depth: u8, mode: SearchMode, iterative_deepening: bool) -> EngineResult<Self> {
        if !(1..=MAX_DEPTH).contains(&max_depth) {
            return Err(EngineError::InvalidDepth { depth: max_depth });
        }
        Ok(Self {
            max_depth,
            mode,
            iterative_deepening,
        })
    }

    pub fn with_depth(self, max_depth: u8) -> EngineResult<Self> {
        Self::new(max_depth, self.mode, self.iterative_deepening)
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_iterative_deepening(mut self, enabled: bool) -> Self {
        self.iterative_deepening = enabled;
        self
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn iterative_deepening(&self) -> bool {
        self.iterative_deepening
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            mode: SearchMode::AlphaBeta,
            iterative_deepening: false,
        }
    }
}

/// Driver-level settings, adjusted through UCI `setoption`.
pub struct EngineConfig {
    pub search: SearchConfig,
    /// `None` draws the Zobrist keys from OS entropy
    pub zobrist_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            zobrist_seed: Some(DEFAULT_ZOBRIST_SEED),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    /// `None` only when the root has no legal moves.
    pub best_move: Option<Move>,
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}
