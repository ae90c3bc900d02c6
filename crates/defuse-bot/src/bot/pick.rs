use super::{BotContext, BotParams, ContextError};
use defuse_core::deduction::candidates_for_slot;
use defuse_core::game::state::GameState;
use defuse_core::model::wire::{WireId, WireTile};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use tracing::{Level, event};

/// The wire a seat marks with its opening info token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickDecision {
    /// Position in the seat's sorted hand.
    pub index: usize,
    pub wire: WireId,
}

/// Total ambiguity left in `seat`'s hand from public information, each slot capped at `cap`.
pub fn hand_uncertainty(state: &GameState, seat: usize, cap: usize) -> usize {
    let Some(player) = state.player(seat) else {
        return 0;
    };
    (0..player.hand.len())
        .filter_map(|idx| candidates_for_slot(state, seat, idx, None))
        .map(|slot| slot.len().min(cap))
        .sum()
}

pub struct PickPlanner;

impl PickPlanner {
    pub fn choose<R: Rng + ?Sized>(ctx: &BotContext<'_>, rng: &mut R) -> Option<PickDecision> {
        let mut pool = markable(ctx);
        if pool.is_empty() {
            return None;
        }

        let triples = triple_numbers(&pool);
        if !triples.is_empty() {
            pool.retain(|(_, tile)| triples.contains(&tile.number.base()));
        }

        let cap = ctx.params.uncertainty_cap;
        let baseline = hand_uncertainty(ctx.state, ctx.seat, cap);
        let mut best: Option<(usize, usize)> = None;
        for (slot, (_, tile)) in pool.iter().enumerate() {
            let mut trial = ctx.state.clone();
            if trial.place_info_token(ctx.seat, tile.id).is_err() {
                continue;
            }
            let score = hand_uncertainty(&trial, ctx.seat, cap);
            if best.is_none_or(|(_, top)| score < top) {
                best = Some((slot, score));
            }
        }

        let chosen = match best {
            Some((slot, score)) if score < baseline => pool[slot],
            _ => *pool.choose(rng)?,
        };
        Some(PickDecision {
            index: chosen.0,
            wire: chosen.1.id,
        })
    }

    /// Chooses for `seat` and places the info token on the chosen wire.
    pub fn apply<R: Rng + ?Sized>(
        state: &mut GameState,
        seat: usize,
        params: &BotParams,
        rng: &mut R,
    ) -> Result<Option<PickDecision>, ContextError> {
        let decision = {
            let ctx = BotContext::new(state, seat, params)?;
            Self::choose(&ctx, rng)
        };
        if let Some(decision) = decision {
            state.place_info_token(seat, decision.wire)?;
            event!(
                target: "defuse_bot::pick",
                Level::DEBUG,
                seat,
                wire = %decision.wire,
                index = decision.index
            );
        }
        Ok(decision)
    }
}

/// Own hidden blue wires whose number no other seat has already marked.
fn markable<'a>(ctx: &BotContext<'a>) -> Vec<(usize, &'a WireTile)> {
    let marked_elsewhere: Vec<u8> = ctx
        .other_seats()
        .flat_map(|seat| ctx.state.players()[seat].hand.iter())
        .filter(|tile| tile.info_token && tile.color.is_blue())
        .map(|tile| tile.number.base())
        .collect();

    ctx.player()
        .hand
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.color.is_blue() && !tile.is_known())
        .filter(|(_, tile)| !marked_elsewhere.contains(&tile.number.base()))
        .collect()
}

fn triple_numbers(pool: &[(usize, &WireTile)]) -> Vec<u8> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for (_, tile) in pool {
        *counts.entry(tile.number.base()).or_default() += 1;
    }
    let mut triples: Vec<u8> = counts
        .into_iter()
        .filter(|(_, count)| *count == 3)
        .map(|(number, _)| number)
        .collect();
    triples.sort_unstable();
    triples
}
