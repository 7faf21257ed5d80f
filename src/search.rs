use arrayvec::ArrayVec;
use log::{debug, info, trace};
use shakmaty::{Color, Move, MoveList};

use crate::evaluation::{orient, Evaluator};
use crate::ordering::{order_moves, NodeKind, ScoredMove};
use crate::position::{move_to_uci, GameState};
use crate::tt::TranspositionCache;
use crate::types::{Score, SearchConfig, SearchMode, SearchResult, SCORE_INFINITY};
use crate::zobrist::{PositionHasher, ZobristTable};

/// Best line found below one node.
struct Line {
    score: Score,
    best_move: Option<Move>,
}

/// Minimax / alpha-beta searcher. Owns its own key table and cache, so two engines in the
/// same process never share state.
pub struct SearchEngine {
    config: SearchConfig,
    hasher: PositionHasher,
    evaluator: Evaluator,
    cache: TranspositionCache,
    nodes: u64,
    /// Depth limit of the search currently running (differs from config under iterative deepening)
    depth_limit: u8,
    /// Side to move at the root; utilities are positive when it is ahead
    perspective: Color,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_table(config, ZobristTable::new())
    }

    pub fn with_table(config: SearchConfig, table: ZobristTable) -> Self {
        debug!(
            "search engine: depth {} mode {:?} iterative {}",
            config.max_depth(),
            config.mode(),
            config.iterative_deepening()
        );
        Self {
            depth_limit: config.max_depth(),
            config,
            hasher: PositionHasher::new(table),
            evaluator: Evaluator,
            cache: TranspositionCache::new(),
            nodes: 0,
            perspective: Color::White,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Configured maximum depth.
    pub fn depth(&self) -> u8 {
        self.config.max_depth()
    }

    /// Nodes visited by the last `choose_move`.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    pub fn hasher(&self) -> &PositionHasher {
        &self.hasher
    }

    /// Cached scores stay valid across config changes, so the cache is kept.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Pick a move for the side to move. The position is left exactly as it was given.
    pub fn choose_move<G: GameState>(&mut self, position: &mut G) -> SearchResult {
        self.nodes = 0;
        self.perspective = position.turn();
        let hits_before = self.cache.hits();

        let (line, depth) = if self.config.iterative_deepening() {
            self.iterative_deepening(position)
        } else {
            let depth = self.config.max_depth();
            (self.search_to(position, depth), depth)
        };

        info!(
            "{:?} depth {} score {} nodes {} move {}",
            self.config.mode(),
            depth,
            line.score,
            self.nodes,
            line.best_move.as_ref().map_or_else(|| "none".to_string(), move_to_uci)
        );
        trace!(
            "cache: {} hits this search, {} entries, {} hits / {} misses total",
            self.cache.hits() - hits_before,
            self.cache.len(),
            self.cache.hits(),
            self.cache.misses()
        );

        SearchResult {
            best_move: line.best_move,
            score: line.score,
            depth,
            nodes: self.nodes,
        }
    }

    /// Depths 1..=max. A deeper result replaces the kept one only if its score is strictly higher.
    fn iterative_deepening<G: GameState>(&mut self, position: &mut G) -> (Line, u8) {
        let mut best = (self.search_to(position, 1), 1);
        info!("iteration depth 1 score {} nodes {}", best.0.score, self.nodes);

        for depth in 2..=self.config.max_depth() {
            let line = self.search_to(position, depth);
            info!("iteration depth {} score {} nodes {}", depth, line.score, self.nodes);

            if line.best_move.is_some() && (best.0.best_move.is_none() || line.score > best.0.score) {
                best = (line, depth);
            }
        }

        best
    }

    fn search_to<G: GameState>(&mut self, position: &mut G, depth_limit: u8) -> Line {
        self.depth_limit = depth_limit;
        self.search_node(position, 0, NodeKind::Max, -SCORE_INFINITY, SCORE_INFINITY)
    }

    /// One node of the tree. `depth` is the caller's depth; the root is called with 0.
    ///
    /// In minimax mode `alpha`/`beta` are threaded through untouched and never cut.
    fn search_node<G: GameState>(
        &mut self,
        position: &mut G,
        depth: u8,
        node: NodeKind,
        mut alpha: Score,
        mut beta: Score,
    ) -> Line {
        self.nodes += 1;
        let depth = depth + 1;

        // The root is searched whenever it has moves, even if the rules call the game over.
        if depth > 1 && self.cutoff_test(position, depth) {
            return Line {
                score: self.terminal_score(position, node),
                best_move: position.last_move().cloned(),
            };
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Line {
                score: self.terminal_score(position, node),
                best_move: None,
            };
        }

        let pruning = self.config.mode() == SearchMode::AlphaBeta;
        let moves: MoveList = if pruning {
            self.order(position, moves, node).into_iter().map(|s| s.mv).collect()
        } else {
            moves
        };

        let mut best = Line {
            score: match node {
                NodeKind::Max => -SCORE_INFINITY,
                NodeKind::Min => SCORE_INFINITY,
            },
            best_move: None,
        };

        for mv in moves {
            position.push(&mv);
            let child = self.search_node(position, depth, node.flip(), alpha, beta);
            position.pop();

            if best.best_move.is_none() || node.prefers(child.score, best.score) {
                best.score = child.score;
                best.best_move = Some(mv);
            }

            if pruning {
                match node {
                    NodeKind::Max => {
                        if best.score >= beta {
                            trace!("beta cutoff at depth {depth}");
                            return best;
                        }
                        alpha = alpha.max(best.score);
                    }
                    NodeKind::Min => {
                        if best.score <= alpha {
                            trace!("alpha cutoff at depth {depth}");
                            return best;
                        }
                        beta = beta.min(best.score);
                    }
                }
            }
        }

        best
    }

    fn cutoff_test<G: GameState>(&self, position: &G, depth: u8) -> bool {
        depth > self.depth_limit || position.is_game_over()
    }

    /// Mate scores override material: the side to move at a mated node has lost.
    fn terminal_score<G: GameState>(&mut self, position: &G, node: NodeKind) -> Score {
        if position.is_checkmate() {
            return match node {
                NodeKind::Max => -SCORE_INFINITY,
                NodeKind::Min => SCORE_INFINITY,
            };
        }
        utility(&self.hasher, &self.evaluator, &mut self.cache, position, self.perspective)
    }

    fn order<G: GameState>(&mut self, position: &mut G, moves: MoveList, node: NodeKind) -> ArrayVec<ScoredMove, 256> {
        let hasher = &self.hasher;
        let evaluator = &self.evaluator;
        let cache = &mut self.cache;
        let perspective = self.perspective;
        order_moves(position, moves, node, |p| utility(hasher, evaluator, cache, p, perspective))
    }
}

/// Material score of `position` for `perspective`, memoized by fingerprint.
fn utility<G: GameState>(
    hasher: &PositionHasher,
    evaluator: &Evaluator,
    cache: &mut TranspositionCache,
    position: &G,
    perspective: Color,
) -> Score {
    let fp = hasher.hash(position);
    let material = cache.get_or_insert_with(fp, || evaluator.material(position.board()));
    orient(material, perspective)
}


// Single recursive function for both MAX and MIN nodes, tagged w/ NodeKind. Depth starts at 0 and
// is bumped on entry, so the root runs at depth 1 and a node is cut off once depth > limit.

// Alpha-beta: alpha = best MAX can force on this path, beta = best MIN can force. MAX returns as
// soon as its best reaches beta, MIN as soon as its best drops to alpha. Moves are always popped
// before the early return, so the caller's position is intact on every path.

// Iterative deepening re-runs the whole search at 1, 2, .. max. Each run starts w/ a fresh window;
// only the evaluation cache carries over, which changes nothing but speed.
