use defuse_bot::{BotContext, BotParams, PickPlanner, PlayPlanner, Strategy};
use defuse_core::game::setup::GameSetup;
use defuse_core::game::state::GameState;
use defuse_core::model::hand::Hand;
use defuse_core::model::player::{Player, PlayerKind};
use defuse_core::model::wire::{WireId, WireTile};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seat(id: usize, kind: PlayerKind, tiles: Vec<WireTile>) -> Player {
    Player::new(id, format!("seat{id}"), kind, Hand::with_tiles(tiles))
}

#[test]
fn completed_pair_is_self_cut() {
    // Two hidden sevens, the other two already cut: no third party can hold one.
    let state = GameState::from_hands(
        vec![
            seat(
                0,
                PlayerKind::Ai,
                vec![
                    WireTile::blue(1, 7),
                    WireTile::blue(2, 7),
                    WireTile::blue(3, 7).with_revealed(),
                ],
            ),
            seat(1, PlayerKind::Human, vec![WireTile::blue(7, 7).with_revealed()]),
        ],
        Vec::new(),
        Vec::new(),
    );
    let params = BotParams::default();
    let ctx = BotContext::new(&state, 0, &params).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let decision = PlayPlanner::decide(&ctx, &mut rng).expect("a play");

    assert_eq!(decision.strategy, Strategy::TwoOfAKind);
    let play = decision.play;
    assert_eq!(play.source_player_idx, 0);
    assert_eq!(play.target_player_idx, Some(0));
    let pair = [WireId(1), WireId(2)];
    assert!(pair.contains(&play.source_card_id));
    assert!(pair.contains(&play.target_card_id.unwrap()));
    assert_ne!(Some(play.source_card_id), play.target_card_id);
}

#[test]
fn pick_prefers_the_triple() {
    let state = GameState::from_hands(
        vec![
            seat(
                0,
                PlayerKind::Ai,
                vec![
                    WireTile::blue(0, 11),
                    WireTile::blue(1, 11),
                    WireTile::blue(2, 11),
                    WireTile::blue(3, 12),
                    WireTile::blue(4, 12),
                ],
            ),
            seat(1, PlayerKind::Ai, vec![WireTile::blue(5, 1), WireTile::blue(6, 4)]),
            seat(2, PlayerKind::Ai, vec![WireTile::blue(7, 2), WireTile::blue(8, 9)]),
        ],
        Vec::new(),
        Vec::new(),
    );
    let params = BotParams::default();
    let ctx = BotContext::new(&state, 0, &params).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let pick = PickPlanner::choose(&ctx, &mut rng).expect("a pick");
    assert!(pick.index < 3);
    assert_eq!(state.tile(0, pick.wire).unwrap().number.base(), 11);
}

/// Seat 0 holds a hidden 5 and the detector; seat 1 has two hidden wires between `low` and `high`.
fn detector_table(own: Vec<WireTile>, low: u8, hidden: [u8; 2], high: u8) -> GameState {
    GameState::from_hands(
        vec![
            seat(0, PlayerKind::Ai, own).with_double_detector(true),
            seat(
                1,
                PlayerKind::Human,
                vec![
                    WireTile::blue(10, low).with_revealed(),
                    WireTile::blue(11, hidden[0]),
                    WireTile::blue(12, hidden[1]),
                    WireTile::blue(13, high).with_revealed(),
                ],
            ),
        ],
        Vec::new(),
        Vec::new(),
    )
}

#[test]
fn double_detector_is_used_when_the_pair_clearly_wins() {
    // Both slots are 5 or 6 with even odds: 0.5 alone, 0.75 for either of the pair.
    let state = detector_table(
        vec![
            WireTile::blue(0, 5),
            WireTile::blue(1, 6).with_revealed(),
            WireTile::blue(2, 12),
        ],
        5,
        [5, 6],
        6,
    );
    let params = BotParams::default();
    let ctx = BotContext::new(&state, 0, &params).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let decision = PlayPlanner::decide(&ctx, &mut rng).expect("a play");

    assert_eq!(decision.strategy, Strategy::DoubleDetector);
    let play = decision.play;
    assert!(play.double_detector);
    assert_eq!(play.source_card_id, WireId(0));
    assert_eq!(play.target_player_idx, Some(1));
    let mut targets = [play.target_card_id.unwrap(), play.second_target_card_id.unwrap()];
    targets.sort();
    assert_eq!(targets, [WireId(11), WireId(12)]);
    let joint = decision.probability.unwrap();
    assert!(joint > 0.5 + params.dd_min_gain, "joint {joint}");
}

#[test]
fn double_detector_is_held_back_when_the_gain_is_small() {
    // Seven values per slot: about 0.14 alone and 0.27 for the pair, a gain under 0.15.
    let state = detector_table(vec![WireTile::blue(0, 5), WireTile::blue(1, 12)], 5, [7, 9], 11);
    let params = BotParams::default().with_iterations(4000);
    let ctx = BotContext::new(&state, 0, &params).unwrap();
    assert!(ctx.player().has_double_detector);
    let mut rng = StdRng::seed_from_u64(5);
    let decision = PlayPlanner::decide(&ctx, &mut rng).expect("a play");

    assert_eq!(decision.strategy, Strategy::BestProbability);
    assert!(!decision.play.double_detector);
    assert_eq!(decision.play.second_target_card_id, None);
    assert_eq!(decision.play.source_card_id, WireId(0));
    assert!([Some(WireId(11)), Some(WireId(12))].contains(&decision.play.target_card_id));
}

#[test]
fn raising_the_gain_floor_keeps_a_single_cut() {
    let state = detector_table(
        vec![
            WireTile::blue(0, 5),
            WireTile::blue(1, 6).with_revealed(),
            WireTile::blue(2, 12),
        ],
        5,
        [5, 6],
        6,
    );
    let params = BotParams {
        dd_min_gain: 0.4,
        ..BotParams::default()
    };
    let ctx = BotContext::new(&state, 0, &params).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let decision = PlayPlanner::decide(&ctx, &mut rng).expect("a play");
    assert_eq!(decision.strategy, Strategy::BestProbability);
    assert!(!decision.play.double_detector);
}

#[test]
fn without_detector_no_double_play_is_made() {
    let mut rng = StdRng::seed_from_u64(99);
    let params = BotParams::default().with_iterations(300);
    let setup = GameSetup {
        double_detectors: false,
        ..GameSetup::all_ai(4)
    };
    let mut state = GameState::setup(&setup, &mut rng).unwrap();
    state.begin_play();
    for seat in 0..state.player_count() {
        let ctx = BotContext::new(&state, seat, &params).unwrap();
        if let Some(play) = PlayPlanner::choose(&ctx, &mut rng) {
            assert!(!play.double_detector);
            assert_eq!(play.second_target_card_id, None);
        }
    }
}

#[test]
fn self_play_game_runs_to_an_end() {
    let mut rng = StdRng::seed_from_u64(31);
    let params = BotParams::default().with_iterations(200);
    let mut state = GameState::setup(&GameSetup::all_ai(4), &mut rng).unwrap();
    for seat in 0..state.player_count() {
        PickPlanner::apply(&mut state, seat, &params, &mut rng).unwrap();
    }
    state.begin_play();

    for _ in 0..400 {
        if state.status().is_over() {
            break;
        }
        let seat = state.turn();
        let play = {
            let ctx = BotContext::new(&state, seat, &params).unwrap();
            PlayPlanner::choose(&ctx, &mut rng)
        };
        let Some(play) = play else {
            break;
        };
        state.apply_play(&play).expect("planner moves are legal");
        state.advance_turn();
    }
    assert!(state.status().is_over() || state.history().len() > 4);
}
