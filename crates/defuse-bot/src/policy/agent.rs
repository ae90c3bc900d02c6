use super::{HeuristicPolicy, HumanPolicy, Policy, PolicyContext};
use crate::bot::{BotParams, PickDecision};
use defuse_core::game::actions::PlayMove;
use defuse_core::model::player::PlayerKind;
use rand::RngCore;

/// A seat's decision maker, tagged by who sits there.
#[derive(Debug, Clone)]
pub enum Agent {
    Human(HumanPolicy),
    Ai(HeuristicPolicy),
}

impl Agent {
    pub fn for_kind(kind: PlayerKind, params: BotParams) -> Self {
        match kind {
            PlayerKind::Human => Agent::Human(HumanPolicy::new()),
            PlayerKind::Ai => Agent::Ai(HeuristicPolicy::new(params)),
        }
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            Agent::Human(_) => PlayerKind::Human,
            Agent::Ai(_) => PlayerKind::Ai,
        }
    }

    pub fn as_human_mut(&mut self) -> Option<&mut HumanPolicy> {
        match self {
            Agent::Human(policy) => Some(policy),
            Agent::Ai(_) => None,
        }
    }
}

impl Policy for Agent {
    fn decide_pick(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PickDecision> {
        match self {
            Agent::Human(policy) => policy.decide_pick(ctx, rng),
            Agent::Ai(policy) => policy.decide_pick(ctx, rng),
        }
    }

    fn decide_play_cards(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PlayMove> {
        match self {
            Agent::Human(policy) => policy.decide_play_cards(ctx, rng),
            Agent::Ai(policy) => policy.decide_play_cards(ctx, rng),
        }
    }
}
