use defuse_core::deduction::{KnownCounts, candidates_for_slot};
use defuse_core::game::setup::{ColoredWireRule, GameSetup};
use defuse_core::game::state::GameState;
use defuse_core::model::candidate::Candidate;
use defuse_core::model::wire::WireId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn table_with_public_wires(seed: u64, players: usize) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let setup = GameSetup::all_ai(players)
        .with_yellow(ColoredWireRule::new(3, 2))
        .with_red(ColoredWireRule::new(2, 1));
    let mut state = GameState::setup(&setup, &mut rng).expect("valid setup");

    // Give every seat a handful of info tokens on random blue wires.
    for seat in 0..state.player_count() {
        let blue: Vec<WireId> = state.players()[seat]
            .hand
            .iter()
            .filter(|tile| tile.color.is_blue())
            .map(|tile| tile.id)
            .collect();
        for _ in 0..3 {
            let wire = blue[rng.gen_range(0..blue.len())];
            let _ = state.place_info_token(seat, wire);
        }
    }
    state
}

#[test]
fn true_value_is_always_a_candidate() {
    for seed in 0..20u64 {
        let players = 3 + (seed as usize % 3);
        let state = table_with_public_wires(seed, players);
        for seat in 0..state.player_count() {
            for hint in [None, Some((seat + 1) % players)] {
                for (idx, tile) in state.players()[seat].hand.iter().enumerate() {
                    let result = candidates_for_slot(&state, seat, idx, hint).expect("slot exists");
                    assert!(
                        result.possibilities.contains(tile.value()),
                        "seed {seed} seat {seat} slot {idx}: {} missing from {:?}",
                        tile,
                        result.possibilities
                    );
                    assert!(result.most_probable.is_some());
                }
            }
        }
    }
}

#[test]
fn exhausted_blue_numbers_never_appear() {
    for seed in 0..10u64 {
        let state = table_with_public_wires(seed, 4);
        for seat in 0..state.player_count() {
            for (idx, tile) in state.players()[seat].hand.iter().enumerate() {
                if tile.is_known() {
                    continue;
                }
                let counts = KnownCounts::observe(&state, Some((seat, idx)), None);
                let result = candidates_for_slot(&state, seat, idx, None).unwrap();
                for value in result.possibilities.iter() {
                    if let Candidate::Blue(n) = value {
                        assert!(counts.blue_remaining(n) > 0);
                    }
                }
            }
        }
    }
}

#[test]
fn probabilities_of_most_probable_are_normalised() {
    let state = table_with_public_wires(77, 5);
    for seat in 0..state.player_count() {
        for idx in 0..state.players()[seat].hand.len() {
            let top = candidates_for_slot(&state, seat, idx, None)
                .unwrap()
                .most_probable
                .unwrap();
            assert!(top.probability > 0.0 && top.probability <= 1.0);
        }
    }
}
