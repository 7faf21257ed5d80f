use criterion::{criterion_group, criterion_main, Criterion};
use gametree::{Game, SearchConfig, SearchEngine, SearchMode};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_search(c: &mut Criterion) {
    let cases = [
        ("minimax_depth_2_startpos", Game::new(), 2, SearchMode::Minimax),
        ("alphabeta_depth_2_startpos", Game::new(), 2, SearchMode::AlphaBeta),
        ("alphabeta_depth_3_startpos", Game::new(), 3, SearchMode::AlphaBeta),
        ("alphabeta_depth_2_kiwipete", Game::from_fen(KIWIPETE).unwrap(), 2, SearchMode::AlphaBeta),
    ];

    for (name, game, depth, mode) in cases {
        let config = SearchConfig::new(depth, mode, false).unwrap();
        let mut game = game;
        c.bench_function(name, |b| {
            b.iter(|| SearchEngine::new(config).choose_move(&mut game))
        });
    }

    // warm cache: same engine reused across iterations
    let config = SearchConfig::new(3, SearchMode::AlphaBeta, false).unwrap();
    let mut engine = SearchEngine::new(config);
    let mut game = Game::new();
    c.bench_function("alphabeta_depth_3_startpos_warm_cache", |b| {
        b.iter(|| engine.choose_move(&mut game))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
