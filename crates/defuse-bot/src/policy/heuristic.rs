use super::{Policy, PolicyContext};
use crate::bot::{BotContext, BotParams, PickDecision, PickPlanner, PlayDecision, PlayPlanner};
use defuse_core::game::actions::PlayMove;
use rand::RngCore;
use tracing::{Level, event};

/// Adapter that wraps PickPlanner/PlayPlanner to implement the Policy trait
#[derive(Debug, Clone, Default)]
pub struct HeuristicPolicy {
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new(params: BotParams) -> Self {
        Self { params }
    }

    pub fn from_env() -> Self {
        Self::new(BotParams::from_env())
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    /// Play decision with the strategy that produced it.
    pub fn decide_play(
        &self,
        ctx: &PolicyContext,
        rng: &mut dyn RngCore,
    ) -> Option<PlayDecision> {
        let bot_ctx = BotContext::new(ctx.state, ctx.seat, &self.params).ok()?;
        let decision = PlayPlanner::decide(&bot_ctx, rng);
        log_play_decision(ctx, decision.as_ref());
        decision
    }
}

impl Policy for HeuristicPolicy {
    fn decide_pick(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PickDecision> {
        let bot_ctx = BotContext::new(ctx.state, ctx.seat, &self.params).ok()?;
        let decision = PickPlanner::choose(&bot_ctx, rng);
        log_pick_decision(ctx, decision.as_ref());
        decision
    }

    fn decide_play_cards(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PlayMove> {
        self.decide_play(ctx, rng).map(|decision| decision.play)
    }
}

fn log_pick_decision(ctx: &PolicyContext, decision: Option<&PickDecision>) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let chosen = decision.map_or_else(|| "none".to_string(), |pick| pick.wire.to_string());
    event!(
        target: "defuse_bot::pick",
        Level::INFO,
        seat = ctx.seat,
        hand_size = ctx.state.players()[ctx.seat].hand.len(),
        chosen = %chosen
    );
}

fn log_play_decision(ctx: &PolicyContext, decision: Option<&PlayDecision>) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let player = &ctx.state.players()[ctx.seat];
    match decision {
        Some(decision) => event!(
            target: "defuse_bot::play",
            Level::INFO,
            seat = ctx.seat,
            hidden = player.hand.unrevealed_count(),
            strategy = decision.strategy.as_str(),
            chosen = %decision.play,
            probability = decision.probability.unwrap_or(f64::NAN),
            dial = ctx.state.detonator_dial()
        ),
        None => event!(
            target: "defuse_bot::play",
            Level::INFO,
            seat = ctx.seat,
            hidden = player.hand.unrevealed_count(),
            strategy = "none"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::Strategy;
    use crate::bot::fixtures::{ai, other, table};
    use defuse_core::model::wire::{WireId, WireTile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn heuristic_policy_reports_the_strategy() {
        let state = table(vec![
            ai(vec![WireTile::red(0, 4)]),
            other(1, vec![WireTile::blue(10, 5)]),
        ]);
        let ctx = PolicyContext::new(&state, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let policy = HeuristicPolicy::default();
        let decision = policy.decide_play(&ctx, &mut rng).unwrap();
        assert_eq!(decision.strategy, Strategy::AllRedDisposal);
        assert_eq!(decision.play, PlayMove::solo(0, WireId(0)));
    }

    #[test]
    fn heuristic_pick_marks_a_blue_wire() {
        let state = table(vec![
            ai(vec![WireTile::yellow(0, 3), WireTile::blue(1, 8)]),
            other(1, vec![WireTile::blue(10, 5)]),
        ]);
        let ctx = PolicyContext::new(&state, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut policy = HeuristicPolicy::default();
        let pick = policy.decide_pick(&ctx, &mut rng).unwrap();
        assert_eq!(pick.wire, WireId(1));
    }
}
