// SPDX-License-Identifier: MIT OR Apache-2.0

use meshgo_core::scoring::calculate_area_score;
use meshgo_core::{Color, Engine, EngineConfig, Stone, Topology};

fn wall_board(size: usize, black_col: usize, white_col: usize) -> Vec<Stone> {
    let mut stones = vec![Stone::Empty; size * size];
    for row in 0..size {
        stones[black_col + row * size] = Stone::Black;
        stones[white_col + row * size] = Stone::White;
    }
    stones
}

#[test]
fn test_empty_board_goes_to_komi() {
    let topo = Topology::grid(19, 19);
    let score = calculate_area_score(&topo, &[Stone::Empty; 361], 7.5);

    assert_eq!(score.black_score, 0.0);
    assert_eq!(score.white_score, 7.5);
    assert_eq!(score.neutral, 361);
    assert_eq!(score.winner, Some(Color::White));
}

#[test]
fn test_walls_split_the_board() {
    let topo = Topology::grid(19, 19);
    let stones = wall_board(19, 3, 4);
    let score = calculate_area_score(&topo, &stones, 7.5);

    assert_eq!(score.black_stones, 19);
    assert_eq!(score.black_territory, 57);
    assert_eq!(score.black_score, 76.0);
    assert_eq!(score.white_stones, 19);
    assert_eq!(score.white_territory, 266);
    assert_eq!(score.white_score, 285.0 + 7.5);
    assert_eq!(score.neutral, 0);
    assert_eq!(score.winner, Some(Color::White));
}

#[test]
fn test_gap_between_walls_is_neutral() {
    let topo = Topology::grid(9, 9);
    let stones = wall_board(9, 3, 5);
    let score = calculate_area_score(&topo, &stones, 0.0);

    assert_eq!(score.black_territory, 27);
    assert_eq!(score.white_territory, 27);
    assert_eq!(score.neutral, 9);
    assert_eq!(score.winner, None);
}

#[test]
fn test_engine_score_matches_direct_call() {
    let mut engine = Engine::new(Topology::grid(5, 5), EngineConfig::default());
    engine.place_stone(6, Color::Black).unwrap();
    engine.place_stone(18, Color::White).unwrap();

    let direct = calculate_area_score(engine.topology(), engine.board().stones(), 0.5);
    assert_eq!(engine.calculate_area_score(0.5), direct);
    assert_eq!(direct.black_stones + direct.white_stones, 2);
}
