pub mod error;
pub mod evaluation;
pub mod ordering;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use error::{EngineError, EngineResult};
pub use position::{Game, GameState};
pub use search::SearchEngine;
pub use types::{SearchConfig, SearchMode, SearchResult};
