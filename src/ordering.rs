use arrayvec::ArrayVec;
use shakmaty::{Move, MoveList};

use crate::position::GameState;
use crate::types::Score;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root side to move, seeks the highest utility
    Max,
    /// Opponent to move, seeks the lowest utility
    Min,
}

impl NodeKind {
    pub fn flip(self) -> Self {
        match self {
            NodeKind::Max => NodeKind::Min,
            NodeKind::Min => NodeKind::Max,
        }
    }

    /// True if `candidate` is strictly better than `current` for this node.
    #[inline]
    pub fn prefers(self, candidate: Score, current: Score) -> bool {
        match self {
            NodeKind::Max => candidate > current,
            NodeKind::Min => candidate < current,
        }
    }
}

pub struct ScoredMove {
    pub mv: Move,
    pub score: Score,
}

/// Orders `moves` by the static utility of the position each one leads to.
///
/// Every move is pushed, scored with `utility`, and popped again, so this costs one
/// evaluation per legal move at every interior node. The cache absorbs most of it since the
/// same successors are scored again when they become leaves, and the better-ordered list
/// lets alpha-beta cut earlier. MAX nodes see the best-for-root move first, MIN nodes the
/// worst. Equal utilities keep the rules engine's order.
pub fn order_moves<G, F>(position: &mut G, moves: MoveList, node: NodeKind, mut utility: F) -> ArrayVec<ScoredMove, 256>
where
    G: GameState,
    F: FnMut(&G) -> Score,
{
    let mut scored: ArrayVec<ScoredMove, 256> = ArrayVec::new();

    for mv in moves {
        position.push(&mv);
        let score = utility(position);
        position.pop();
        scored.push(ScoredMove { mv, score });
    }

    match node {
        NodeKind::Max => scored.sort_by(|a, b| b.score.cmp(&a.score)),
        NodeKind::Min => scored.sort_by(|a, b| a.score.cmp(&b.score)),
    }
    scored
}
