use std::io::{self, BufRead};

use log::{debug, warn};

use crate::position::{move_to_uci, Game};
use crate::search::SearchEngine;
use crate::types::{EngineConfig, SearchMode, SearchResult, DEFAULT_ZOBRIST_SEED, MAX_DEPTH, SCORE_INFINITY};
use crate::zobrist::ZobristTable;

pub fn run() {
    let stdin = io::stdin();

    let mut game = Game::new();
    let mut config = EngineConfig::default();
    let mut engine = build_engine(&config);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "uci" => {
                println!("id name gametree");
                println!("id author gametree developers");
                println!(
                    "option name Depth type spin default {} min 1 max {}",
                    config.search.max_depth(),
                    MAX_DEPTH
                );
                println!("option name Mode type combo default alphabeta var minimax var alphabeta");
                println!("option name IterativeDeepening type check default false");
                println!("option name Seed type string default {}", DEFAULT_ZOBRIST_SEED);
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => {
                game = Game::new();
                engine.clear_cache();
            }
            "position" => {
                if let Some(parsed) = parse_position(&tokens) {
                    game = parsed;
                }
            }
            "go" => {
                let search = match parse_go_depth(&tokens) {
                    Some(depth) => match config.search.with_depth(depth) {
                        Ok(search) => search,
                        Err(e) => {
                            warn!("{e}");
                            config.search
                        }
                    },
                    None => config.search,
                };
                engine.set_config(search);

                let result = engine.choose_move(&mut game);
                println!("{}", format_info(&result));
                match result.best_move {
                    Some(mv) => println!("bestmove {}", move_to_uci(&mv)),
                    None => println!("bestmove 0000"),
                }
                engine.set_config(config.search);
            }
            "setoption" => {
                let reseed = parse_setoption(&tokens, &mut config);
                if reseed {
                    engine = build_engine(&config);
                } else {
                    engine.set_config(config.search);
                }
            }
            "d" | "print" => println!("{}", game),
            "quit" => break,
            other => debug!("ignoring unknown command '{other}'"),
        }
    }
}

fn build_engine(config: &EngineConfig) -> SearchEngine {
    let table = match config.zobrist_seed {
        Some(seed) => ZobristTable::with_seed(seed),
        None => ZobristTable::from_entropy(),
    };
    SearchEngine::with_table(config.search, table)
}

/// `info` line for a finished search.
fn format_info(result: &SearchResult) -> String {
    format!(
        "info depth {} score {} nodes {}",
        result.depth,
        format_score(result),
        result.nodes
    )
}

/// Material in centipawns, or `mate N` for a forced mate. The search doesn't track mate
/// distance, so N is the bound implied by the search depth (moves, negative when getting mated).
fn format_score(result: &SearchResult) -> String {
    if result.score.abs() >= SCORE_INFINITY {
        let moves = (i32::from(result.depth) + 1) / 2;
        format!("mate {}", moves * result.score.signum())
    } else {
        format!("cp {}", result.score * 100)
    }
}

fn parse_go_depth(tokens: &[&str]) -> Option<u8> {
    let idx = tokens.iter().position(|&t| t == "depth")?;
    tokens.get(idx + 1)?.parse().ok()
}

/// `position startpos|fen <fen> [moves ...]`. Returns `None` if the FEN or any move is bad.
fn parse_position(tokens: &[&str]) -> Option<Game> {
    let moves_idx = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());

    let mut game = match tokens.get(1).copied() {
        Some("startpos") => Game::new(),
        Some("fen") => {
            let fen = tokens[2..moves_idx].join(" ");
            match Game::from_fen(&fen) {
                Ok(game) => game,
                Err(e) => {
                    warn!("{e}");
                    return None;
                }
            }
        }
        _ => return None,
    };

    for uci in tokens.iter().skip(moves_idx + 1) {
        if let Err(e) = game.play_uci(uci) {
            warn!("{e}");
            return None;
        }
    }

    Some(game)
}

/// Applies a `setoption` command. Returns true when the Zobrist table must be rebuilt.
fn parse_setoption(tokens: &[&str], config: &mut EngineConfig) -> bool {
    let name_idx = tokens.iter().position(|&t| t == "name");
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (Some(ni), Some(vi)) = (name_idx, value_idx) else {
        return false;
    };
    if vi <= ni {
        return false;
    }
    let name = tokens[ni + 1..vi].join(" ");
    let value = tokens[vi + 1..].join(" ");

    match name.to_lowercase().as_str() {
        "depth" => match value.parse::<u8>().map(|d| config.search.with_depth(d)) {
            Ok(Ok(search)) => config.search = search,
            Ok(Err(e)) => warn!("{e}"),
            Err(_) => warn!("Depth expects a number, got '{value}'"),
        },
        "mode" => match value.parse::<SearchMode>() {
            Ok(mode) => config.search = config.search.with_mode(mode),
            Err(e) => warn!("{e}"),
        },
        "iterativedeepening" => {
            config.search = config.search.with_iterative_deepening(value.eq_ignore_ascii_case("true"));
        }
        "seed" => {
            if value.eq_ignore_ascii_case("random") {
                config.zobrist_seed = None;
                return true;
            }
            match value.parse::<u64>() {
                Ok(seed) => {
                    config.zobrist_seed = Some(seed);
                    return true;
                }
                Err(_) => warn!("Seed expects a number or 'random', got '{value}'"),
            }
        }
        _ => debug!("ignoring unknown option '{name}'"),
    }
    false
}
