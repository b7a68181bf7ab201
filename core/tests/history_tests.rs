// SPDX-License-Identifier: MIT OR Apache-2.0

use meshgo_core::{CanonicalState, Captures, Color, Engine, EngineConfig, EngineError, Topology};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Everything a rejected move must leave untouched
type Observed = (CanonicalState, usize, usize, u32, Color, Captures);

fn snapshot(engine: &Engine) -> Observed {
    (
        engine.canonical_state(),
        engine.history_depth(),
        engine.superko_history_len(),
        engine.move_number(),
        engine.turn(),
        engine.captures(),
    )
}

/// Play random legal moves without ever ending the game
fn random_playout(engine: &mut Engine, rng: &mut StdRng, moves: usize) -> Vec<CanonicalState> {
    let mut seen = vec![engine.canonical_state()];
    for _ in 0..moves {
        let color = engine.turn();
        let legal = engine.legal_points(color);
        let may_pass = engine.consecutive_passes() == 0;
        if legal.is_empty() || (may_pass && rng.gen_bool(0.05)) {
            if !may_pass {
                break;
            }
            engine.pass(color).unwrap();
        } else {
            let point = legal[rng.gen_range(0..legal.len())];
            engine.place_stone(point, color).unwrap();
        }
        seen.push(engine.canonical_state());
    }
    seen
}

#[test]
fn undo_everything_restores_empty_board() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = Engine::new(Topology::grid(7, 7), EngineConfig::default());
        let states = random_playout(&mut engine, &mut rng, 120);

        // Walk back one action at a time
        for expected in states.iter().rev().skip(1) {
            engine.undo().unwrap();
            assert_eq!(&engine.canonical_state(), expected, "seed {}", seed);
        }

        assert_eq!(engine.canonical_state().as_str(), "0".repeat(49));
        assert_eq!(engine.move_number(), 0);
        assert_eq!(engine.turn(), Color::Black);
        assert_eq!(engine.captures(), Captures::default());
        assert_eq!(engine.history_depth(), 1);
        assert_eq!(engine.superko_history_len(), 1);
        assert!(engine.moves().is_empty());
        assert_eq!(engine.undo(), Err(EngineError::NothingToUndo));
    }
}

#[test]
fn undo_pass_restores_turn() {
    let mut engine = Engine::new(Topology::grid(9, 9), EngineConfig::default());
    engine.place_stone(10, Color::Black).unwrap();
    engine.pass(Color::White).unwrap();
    assert_eq!(engine.superko_history_len(), 2);

    let status = engine.undo().unwrap();
    assert_eq!(status.turn, Color::White);
    assert_eq!(status.move_number, 1);
    assert_eq!(engine.consecutive_passes(), 0);
    assert_eq!(engine.superko_history_len(), 2);
}

#[test]
fn undo_forgets_superko_entries() {
    let mut engine = Engine::new(Topology::grid(3, 1), EngineConfig::default());
    engine.place_stone(0, Color::Black).unwrap();
    engine.place_stone(2, Color::White).unwrap();
    assert_eq!(engine.superko_history_len(), 3);

    // White captures at 1 and the position "022" enters the set
    engine.pass(Color::Black).unwrap();
    let outcome = engine.place_stone(1, Color::White).unwrap();
    assert_eq!(outcome.captured, vec![0]);
    assert_eq!(engine.superko_history_len(), 4);
    assert_eq!(engine.captures().white, 1);

    engine.undo().unwrap();
    assert_eq!(engine.superko_history_len(), 3);
    assert_eq!(engine.canonical_state().as_str(), "102");
    assert_eq!(engine.captures().white, 0);

    // The same capture is legal again on the new timeline
    let outcome = engine.place_stone(1, Color::White).unwrap();
    assert_eq!(outcome.captured, vec![0]);
}

#[test]
fn superko_set_grows_by_one_per_new_position() {
    let mut engine = Engine::new(Topology::grid(5, 5), EngineConfig::default());
    for (i, point) in [0usize, 24, 6, 18].iter().enumerate() {
        let color = engine.turn();
        engine.place_stone(*point, color).unwrap();
        assert_eq!(engine.superko_history_len(), i + 2);
        assert_eq!(engine.history_depth(), i + 2);
    }
}

#[test]
fn rejected_moves_leave_no_trace() {
    let mut rejected = 0;
    for seed in 0..16u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = Engine::new(Topology::grid(4, 4), EngineConfig::default());

        for step in 0..300 {
            assert!(!engine.is_game_over());
            let color = engine.turn();
            if engine.consecutive_passes() == 0 && rng.gen_bool(0.05) {
                engine.pass(color).unwrap();
                continue;
            }

            // Any point, legal or not
            let point = rng.gen_range(0..16);
            let checked = engine.check_move(point, color);
            let before = snapshot(&engine);
            match engine.place_stone(point, color) {
                Ok(_) => assert!(checked.is_ok(), "seed {} step {}", seed, step),
                Err(EngineError::Illegal(reason)) => {
                    assert_eq!(checked, Err(EngineError::Illegal(reason)));
                    assert_eq!(snapshot(&engine), before, "seed {} step {}", seed, step);
                    rejected += 1;
                }
                Err(other) => panic!("seed {} step {}: unexpected {:?}", seed, step, other),
            }
        }
    }
    assert!(rejected > 0);
}
