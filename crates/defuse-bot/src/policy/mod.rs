mod agent;
mod heuristic;
mod human;

pub use agent::Agent;
pub use heuristic::HeuristicPolicy;
pub use human::HumanPolicy;

use crate::bot::{ContextError, PickDecision};
use defuse_core::game::actions::PlayMove;
use defuse_core::game::state::GameState;
use rand::RngCore;

/// Context provided to policies for decision-making
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: usize,
    pub state: &'a GameState,
}

impl<'a> PolicyContext<'a> {
    pub fn new(state: &'a GameState, seat: usize) -> Result<Self, ContextError> {
        if seat >= state.player_count() {
            return Err(ContextError::UnknownSeat {
                seat,
                players: state.player_count(),
            });
        }
        Ok(Self { seat, state })
    }
}

/// One seat's decision maker, whether a heuristic or a person at the table.
///
/// `None` means the seat has nothing to do right now; callers treat it as a no-op.
pub trait Policy: Send {
    /// Choose the wire to mark with an info token (called during the pick phase)
    fn decide_pick(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PickDecision>;

    /// Choose the next cut (called during the play phase)
    fn decide_play_cards(&mut self, ctx: &PolicyContext, rng: &mut dyn RngCore) -> Option<PlayMove>;
}
