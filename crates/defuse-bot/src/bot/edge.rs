use super::{BotContext, PlayDecision, Strategy};
use defuse_core::game::actions::PlayMove;
use defuse_core::model::candidate::Candidate;
use defuse_core::model::hand::Hand;
use defuse_core::model::wire::WireTile;

/// Which end of a sorted hand an edge cut targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    First,
    Last,
}

/// Extremal numbers paired with the hand end where they most likely sit.
pub const EDGE_ORDER: [(u8, EdgeSide); 6] = [
    (1, EdgeSide::First),
    (12, EdgeSide::Last),
    (2, EdgeSide::First),
    (11, EdgeSide::Last),
    (3, EdgeSide::First),
    (10, EdgeSide::Last),
];

fn edge_target(hand: &Hand, side: EdgeSide) -> Option<&WireTile> {
    match side {
        EdgeSide::First => hand.iter().find(|tile| !tile.is_known()),
        EdgeSide::Last => hand.tiles().iter().rev().find(|tile| !tile.is_known()),
    }
}

/// Last-resort cut when no deduction or estimate produced a move.
pub fn edge_fallback(ctx: &BotContext<'_>) -> Option<PlayDecision> {
    let own = ctx.own_unrevealed();
    for (number, side) in EDGE_ORDER {
        let Some(source) = own
            .iter()
            .find(|tile| tile.value() == Candidate::Blue(number))
        else {
            continue;
        };
        for seat in ctx.other_seats() {
            if let Some(target) = edge_target(&ctx.state.players()[seat].hand, side) {
                return Some(PlayDecision {
                    play: PlayMove::cut(ctx.seat, source.id, seat, target.id),
                    strategy: Strategy::EdgeFallback,
                    probability: None,
                });
            }
        }
    }

    let source = own.first()?;
    ctx.other_seats().find_map(|seat| {
        let target = ctx.state.players()[seat]
            .hand
            .iter()
            .find(|tile| !tile.revealed)?;
        Some(PlayDecision {
            play: PlayMove::cut(ctx.seat, source.id, seat, target.id),
            strategy: Strategy::FirstAvailable,
            probability: None,
        })
    })
}
