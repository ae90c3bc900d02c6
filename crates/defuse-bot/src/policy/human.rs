use super::{Policy, PolicyContext};
use crate::bot::PickDecision;
use defuse_core::game::actions::PlayMove;
use rand::RngCore;
use std::collections::VecDeque;

/// Replays decisions supplied from outside, such as a UI or a scripted scenario.
#[derive(Debug, Default, Clone)]
pub struct HumanPolicy {
    picks: VecDeque<PickDecision>,
    plays: VecDeque<PlayMove>,
}

impl HumanPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_pick(&mut self, pick: PickDecision) {
        self.picks.push_back(pick);
    }

    pub fn submit_play(&mut self, play: PlayMove) {
        self.plays.push_back(play);
    }

    pub fn pending(&self) -> usize {
        self.picks.len() + self.plays.len()
    }
}

impl Policy for HumanPolicy {
    fn decide_pick(&mut self, _ctx: &PolicyContext, _rng: &mut dyn RngCore) -> Option<PickDecision> {
        self.picks.pop_front()
    }

    fn decide_play_cards(&mut self, ctx: &PolicyContext, _rng: &mut dyn RngCore) -> Option<PlayMove> {
        // Moves queued for another seat are left for the caller to sort out.
        match self.plays.front() {
            Some(play) if play.source_player_idx == ctx.seat => self.plays.pop_front(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::fixtures::{ai, other, table};
    use defuse_core::model::wire::{WireId, WireTile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn queued_decisions_come_back_in_order() {
        let state = table(vec![
            ai(vec![WireTile::blue(0, 2), WireTile::blue(1, 5)]),
            other(1, vec![WireTile::blue(10, 5)]),
        ]);
        let ctx = PolicyContext::new(&state, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut policy = HumanPolicy::new();
        assert_eq!(policy.decide_pick(&ctx, &mut rng), None);

        policy.submit_pick(PickDecision {
            index: 1,
            wire: WireId(1),
        });
        policy.submit_play(PlayMove::cut(0, WireId(1), 1, WireId(10)));
        policy.submit_play(PlayMove::cut(0, WireId(0), 1, WireId(10)));
        assert_eq!(policy.pending(), 3);

        assert_eq!(policy.decide_pick(&ctx, &mut rng).unwrap().wire, WireId(1));
        assert_eq!(
            policy.decide_play_cards(&ctx, &mut rng).unwrap().source_card_id,
            WireId(1)
        );
        assert_eq!(
            policy.decide_play_cards(&ctx, &mut rng).unwrap().source_card_id,
            WireId(0)
        );
        assert_eq!(policy.decide_play_cards(&ctx, &mut rng), None);
    }

    #[test]
    fn plays_for_another_seat_stay_queued() {
        let state = table(vec![
            ai(vec![WireTile::blue(0, 2)]),
            other(1, vec![WireTile::blue(10, 5)]),
        ]);
        let ctx = PolicyContext::new(&state, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut policy = HumanPolicy::new();
        policy.submit_play(PlayMove::cut(0, WireId(0), 1, WireId(10)));
        assert_eq!(policy.decide_play_cards(&ctx, &mut rng), None);
        assert_eq!(policy.pending(), 1);
    }
}
