use gametree::position::move_to_uci;
use gametree::types::{Score, SCORE_INFINITY};
use gametree::zobrist::{PositionHasher, ZobristTable};
use gametree::{Game, GameState, SearchConfig, SearchEngine, SearchMode};
use proptest::prelude::*;
use proptest::sample::Index;

const MATE_IN_ONE: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
const HANGING_QUEEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/3qP3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 4";

fn engine(depth: u8, mode: SearchMode, iterative: bool) -> SearchEngine {
    SearchEngine::new(SearchConfig::new(depth, mode, iterative).unwrap())
}

/// FEN, undo-stack height and sorted legal moves.
fn snapshot(game: &Game) -> (String, usize, Vec<String>) {
    let mut moves: Vec<String> = game.legal_moves().iter().map(move_to_uci).collect();
    moves.sort();
    (game.fen(), game.ply(), moves)
}

fn playout(choices: &[Index]) -> Game {
    let mut game = Game::new();
    for choice in choices {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice.index(moves.len())].clone();
        game.push(&mv);
    }
    game
}

#[test]
fn test_start_position_node_counts() {
    let mut game = Game::new();
    assert_eq!(engine(1, SearchMode::Minimax, false).choose_move(&mut game).nodes, 21);
    assert_eq!(engine(2, SearchMode::Minimax, false).choose_move(&mut game).nodes, 421);
    assert_eq!(engine(1, SearchMode::AlphaBeta, false).choose_move(&mut game).nodes, 21);
}

#[test]
fn test_alphabeta_matches_minimax() {
    for fen in [MIDDLEGAME, HANGING_QUEEN, MATE_IN_ONE] {
        for depth in 1..=3 {
            let mut game = Game::from_fen(fen).unwrap();
            let minimax = engine(depth, SearchMode::Minimax, false).choose_move(&mut game);
            let alphabeta = engine(depth, SearchMode::AlphaBeta, false).choose_move(&mut game);
            assert_eq!(minimax.score, alphabeta.score, "{fen} at depth {depth}");
            assert!(alphabeta.nodes <= minimax.nodes);
        }
    }
}

#[test]
fn test_hanging_queen_taken() {
    let mut game = Game::from_fen(HANGING_QUEEN).unwrap();
    let result = engine(2, SearchMode::AlphaBeta, false).choose_move(&mut game);
    // Nxd4 exd4 nets queen for knight
    assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "f3d4");
    assert_eq!(result.score, 6);
}

#[test]
fn test_repeat_search_is_deterministic() {
    let mut game = Game::from_fen(MIDDLEGAME).unwrap();
    let mut searcher = engine(3, SearchMode::AlphaBeta, false);

    let first = searcher.choose_move(&mut game);
    let second = searcher.choose_move(&mut game);
    let fresh = engine(3, SearchMode::AlphaBeta, false).choose_move(&mut game);

    for other in [&second, &fresh] {
        assert_eq!(first.best_move, other.best_move);
        assert_eq!(first.score, other.score);
        assert_eq!(first.nodes, other.nodes);
    }
}

#[test]
fn test_seed_does_not_change_choice() {
    let mut game = Game::from_fen(MIDDLEGAME).unwrap();
    let config = SearchConfig::new(3, SearchMode::AlphaBeta, false).unwrap();

    let a = SearchEngine::with_table(config, ZobristTable::with_seed(1)).choose_move(&mut game);
    let b = SearchEngine::with_table(config, ZobristTable::with_seed(2)).choose_move(&mut game);

    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.score, b.score);
}

#[test]
fn test_position_restored() {
    let mut game = Game::new();
    for uci in ["e2e4", "e7e5", "g1f3"] {
        game.play_uci(uci).unwrap();
    }
    let before = snapshot(&game);

    for mode in [SearchMode::Minimax, SearchMode::AlphaBeta] {
        for iterative in [false, true] {
            engine(3, mode, iterative).choose_move(&mut game);
            assert_eq!(snapshot(&game), before, "{mode:?} iterative {iterative}");
        }
    }
}

#[test]
fn test_mate_in_one_found_at_every_depth() {
    for depth in 1..=2 {
        for mode in [SearchMode::Minimax, SearchMode::AlphaBeta] {
            let mut game = Game::from_fen(MATE_IN_ONE).unwrap();
            let result = engine(depth, mode, false).choose_move(&mut game);
            assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "h5f7");
            assert_eq!(result.score, SCORE_INFINITY);
        }
    }

    let mut game = Game::from_fen(MATE_IN_ONE).unwrap();
    assert_eq!(engine(3, SearchMode::AlphaBeta, false).choose_move(&mut game).score, SCORE_INFINITY);
}

#[test]
fn test_black_mates_in_one() {
    // fool's mate, black to play Qh4#
    let mut game = Game::from_fen("rnbqkbnr/pppp1ppp/4p3/8/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2").unwrap();
    let result = engine(2, SearchMode::AlphaBeta, false).choose_move(&mut game);
    assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "d8h4");
    assert_eq!(result.score, SCORE_INFINITY);
}

#[test]
fn test_single_legal_move() {
    // Kxb2 is forced; white keeps the rook
    for depth in 1..=3 {
        for mode in [SearchMode::Minimax, SearchMode::AlphaBeta] {
            let mut game = Game::from_fen("k7/8/8/8/8/8/1q6/K6R w - - 0 1").unwrap();
            let result = engine(depth, mode, false).choose_move(&mut game);
            assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "a1b2");
            assert_eq!(result.score, 5);
        }
    }

    // Kxb2 leaves bare kings, so the game ends there at any depth
    for depth in 1..=3 {
        let mut game = Game::from_fen("k7/8/8/8/8/8/1q6/K7 w - - 0 1").unwrap();
        let result = engine(depth, SearchMode::AlphaBeta, false).choose_move(&mut game);
        assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "a1b2");
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 2);
    }
}

#[test]
fn test_lost_position_still_reports_move() {
    // Kg1 is forced, then Rb1#
    let fen = "6k1/8/8/8/8/1r6/r7/7K w - - 0 1";

    for mode in [SearchMode::Minimax, SearchMode::AlphaBeta] {
        let mut game = Game::from_fen(fen).unwrap();
        let result = engine(2, mode, false).choose_move(&mut game);
        assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "h1g1", "{mode:?}");
        assert_eq!(result.score, -SCORE_INFINITY, "{mode:?}");
    }

    // depth 2 finds the mate but -inf is not strictly better than the depth 1 material score
    let mut game = Game::from_fen(fen).unwrap();
    let result = engine(2, SearchMode::AlphaBeta, true).choose_move(&mut game);
    assert_eq!(move_to_uci(result.best_move.as_ref().unwrap()), "h1g1");
    assert_eq!(result.score, -10);
    assert_eq!(result.depth, 1);
}

#[test]
fn test_iterative_deepening_keeps_strict_improvements() {
    let max_depth = 3;
    let mut game = Game::from_fen(MIDDLEGAME).unwrap();

    let mut expected: Option<(Score, u8)> = None;
    for depth in 1..=max_depth {
        let score = engine(depth, SearchMode::AlphaBeta, false).choose_move(&mut game).score;
        if expected.is_none_or(|(kept, _)| score > kept) {
            expected = Some((score, depth));
        }
    }

    let result = engine(max_depth, SearchMode::AlphaBeta, true).choose_move(&mut game);
    let (score, depth) = expected.unwrap();
    assert_eq!(result.score, score);
    assert_eq!(result.depth, depth);
    assert!(result.best_move.is_some());
}

#[test]
fn test_engines_keep_separate_caches() {
    let mut game = Game::new();
    let mut searched = engine(2, SearchMode::AlphaBeta, false);
    let idle = engine(2, SearchMode::AlphaBeta, false);

    searched.choose_move(&mut game);

    assert!(!searched.cache().is_empty());
    assert!(idle.cache().is_empty());
    assert_eq!(idle.nodes(), 0);
}

#[test]
fn test_cached_scores_match_evaluator() {
    let mut game = Game::from_fen(HANGING_QUEEN).unwrap();
    let mut searcher = engine(2, SearchMode::AlphaBeta, false);
    searcher.choose_move(&mut game);

    // every successor of the root was scored during ordering
    let evaluator = gametree::evaluation::Evaluator;
    for mv in game.legal_moves() {
        game.push(&mv);
        let fp = searcher.hasher().hash(&game);
        assert_eq!(searcher.cache().get(fp), Some(evaluator.material(game.board())));
        game.pop();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn alphabeta_value_equals_minimax(choices in prop::collection::vec(any::<Index>(), 0..12), depth in 1u8..=2) {
        let mut game = playout(&choices);
        let minimax = engine(depth, SearchMode::Minimax, false).choose_move(&mut game);
        let alphabeta = engine(depth, SearchMode::AlphaBeta, false).choose_move(&mut game);

        prop_assert_eq!(minimax.score, alphabeta.score);
        prop_assert_eq!(minimax.best_move.is_some(), alphabeta.best_move.is_some());

        // the alpha-beta move must itself be worth the minimax value
        if let (Some(mv), 2) = (alphabeta.best_move.as_ref(), depth) {
            game.push(mv);
            if !game.is_game_over() {
                let reply = engine(1, SearchMode::Minimax, false).choose_move(&mut game);
                prop_assert_eq!(-reply.score, minimax.score);
            }
            game.pop();
        }
    }

    #[test]
    fn search_restores_position(choices in prop::collection::vec(any::<Index>(), 0..16), iterative in any::<bool>()) {
        let mut game = playout(&choices);
        let before = snapshot(&game);
        engine(2, SearchMode::AlphaBeta, iterative).choose_move(&mut game);
        prop_assert_eq!(snapshot(&game), before);
    }

    #[test]
    fn hash_depends_only_on_position(choices in prop::collection::vec(any::<Index>(), 0..16)) {
        let hasher = PositionHasher::default();
        let played = playout(&choices);
        let parsed = Game::from_fen(&played.fen()).unwrap();
        prop_assert_eq!(hasher.hash(&played), hasher.hash(&parsed));
    }
}
