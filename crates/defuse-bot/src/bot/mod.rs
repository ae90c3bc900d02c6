mod detector;
mod edge;
mod params;
mod pick;
mod play;

pub use detector::{DetectorChoice, best_double_detector, joint_probability};
pub use edge::{EDGE_ORDER, EdgeSide, edge_fallback};
pub use params::BotParams;
pub use pick::{PickDecision, PickPlanner, hand_uncertainty};
pub use play::{PlayDecision, PlayPlanner};

use defuse_core::game::actions::ActionError;
use defuse_core::game::state::GameState;
use defuse_core::model::candidate::Candidate;
use defuse_core::model::player::Player;
use defuse_core::model::wire::WireTile;
use std::fmt;

/// Which rule produced a play decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    AllRedDisposal,
    FourOfAKind,
    TwoOfAKind,
    InfoTokenMatch,
    DeterministicMatch,
    BestProbability,
    DoubleDetector,
    EdgeFallback,
    FirstAvailable,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::AllRedDisposal => "all_red_disposal",
            Strategy::FourOfAKind => "four_of_a_kind",
            Strategy::TwoOfAKind => "two_of_a_kind",
            Strategy::InfoTokenMatch => "info_token_match",
            Strategy::DeterministicMatch => "deterministic_match",
            Strategy::BestProbability => "best_probability",
            Strategy::DoubleDetector => "double_detector",
            Strategy::EdgeFallback => "edge_fallback",
            Strategy::FirstAvailable => "first_available",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    UnknownSeat { seat: usize, players: usize },
    /// The game refused a decision the planner produced.
    Rejected(ActionError),
}

impl From<ActionError> for ContextError {
    fn from(err: ActionError) -> Self {
        ContextError::Rejected(err)
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::UnknownSeat { seat, players } => {
                write!(f, "seat {seat} is not at a table of {players} players")
            }
            ContextError::Rejected(err) => write!(f, "decision rejected: {err}"),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContextError::Rejected(err) => Some(err),
            ContextError::UnknownSeat { .. } => None,
        }
    }
}

/// Everything a planner needs to decide for one seat.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: usize,
    pub state: &'a GameState,
    pub params: &'a BotParams,
}

impl<'a> BotContext<'a> {
    pub fn new(
        state: &'a GameState,
        seat: usize,
        params: &'a BotParams,
    ) -> Result<Self, ContextError> {
        if seat >= state.player_count() {
            return Err(ContextError::UnknownSeat {
                seat,
                players: state.player_count(),
            });
        }
        Ok(Self {
            seat,
            state,
            params,
        })
    }

    pub fn player(&self) -> &'a Player {
        &self.state.players()[self.seat]
    }

    /// Own wires that are still uncut, in hand order.
    pub fn own_unrevealed(&self) -> Vec<&'a WireTile> {
        self.player()
            .hand
            .iter()
            .filter(|tile| !tile.revealed)
            .collect()
    }

    /// Seats other than ours, in table order.
    pub fn other_seats(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.state.player_count()).filter(move |seat| *seat != self.seat)
    }
}

/// Groups tiles by value, keeping the order in which values first appear.
pub(crate) fn group_by_value<'a>(tiles: &[&'a WireTile]) -> Vec<(Candidate, Vec<&'a WireTile>)> {
    let mut groups: Vec<(Candidate, Vec<&'a WireTile>)> = Vec::new();
    for &tile in tiles {
        let value = tile.value();
        match groups.iter_mut().find(|(key, _)| *key == value) {
            Some((_, members)) => members.push(tile),
            None => groups.push((value, vec![tile])),
        }
    }
    groups
}


#[cfg(test)]
mod tests {
    use super::fixtures::{ai, other, table};
    use super::*;
    use defuse_core::model::wire::WireTile;

    #[test]
    fn context_rejects_unknown_seat() {
        let state = table(vec![ai(vec![WireTile::blue(0, 1)])]);
        let params = BotParams::default();
        let err = BotContext::new(&state, 3, &params).unwrap_err();
        assert_eq!(err, ContextError::UnknownSeat { seat: 3, players: 1 });
        assert!(err.to_string().contains("seat 3"));
    }

    #[test]
    fn other_seats_skip_self() {
        let state = table(vec![
            other(0, vec![WireTile::blue(0, 1)]),
            ai(vec![WireTile::blue(1, 2)]),
            other(2, vec![WireTile::blue(2, 3)]),
        ]);
        let params = BotParams::default();
        let ctx = BotContext::new(&state, 1, &params).unwrap();
        assert_eq!(ctx.other_seats().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn grouping_preserves_first_appearance() {
        let tiles = [
            WireTile::blue(0, 3),
            WireTile::yellow(1, 3),
            WireTile::blue(2, 3),
            WireTile::yellow(3, 8),
        ];
        let refs: Vec<&WireTile> = tiles.iter().collect();
        let groups = group_by_value(&refs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Candidate::Blue(3));
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, Candidate::Yellow);
        assert_eq!(groups[1].1.len(), 2);
    }
}
