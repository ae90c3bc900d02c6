use super::detector::best_double_detector;
use super::edge::edge_fallback;
use super::{BotContext, Strategy, group_by_value};
use defuse_core::belief::{MonteCarloReport, SlotQuery, monte_carlo_slot_probabilities};
use defuse_core::deduction::{SlotCandidates, SlotRef, candidates_for_slot};
use defuse_core::game::actions::PlayMove;
use defuse_core::model::candidate::Candidate;
use defuse_core::model::wire::{WireId, WireTile};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayDecision {
    pub play: PlayMove,
    pub strategy: Strategy,
    /// Estimated chance of a match, when the strategy computed one.
    pub probability: Option<f64>,
}

impl PlayDecision {
    fn certain(play: PlayMove, strategy: Strategy) -> Self {
        Self {
            play,
            strategy,
            probability: Some(1.0),
        }
    }
}

/// A hidden wire of another seat, with what deduction leaves open for it.
#[derive(Debug, Clone)]
struct OpenSlot {
    seat: usize,
    wire: WireId,
    candidates: SlotCandidates,
}

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose<R: Rng + ?Sized>(ctx: &BotContext<'_>, rng: &mut R) -> Option<PlayMove> {
        Self::decide(ctx, rng).map(|decision| decision.play)
    }

    /// Runs the play strategies in priority order and returns the first that applies.
    pub fn decide<R: Rng + ?Sized>(ctx: &BotContext<'_>, rng: &mut R) -> Option<PlayDecision> {
        let own = ctx.own_unrevealed();
        if own.is_empty() {
            return None;
        }

        if let Some(decision) = all_red(ctx, &own)
            .or_else(|| four_of_a_kind(ctx, &own))
            .or_else(|| two_of_a_kind(ctx, &own))
            .or_else(|| info_token_match(ctx, &own))
        {
            return Some(decision);
        }

        let open = open_slots(ctx);
        if let Some(decision) = deterministic_match(ctx, &own, &open) {
            return Some(decision);
        }
        if let Some(decision) = probabilistic_match(ctx, &own, &open, rng) {
            return Some(decision);
        }
        edge_fallback(ctx)
    }
}

fn all_red(ctx: &BotContext<'_>, own: &[&WireTile]) -> Option<PlayDecision> {
    if !own.iter().all(|tile| tile.color.is_red()) {
        return None;
    }
    let first = own.first()?;
    Some(PlayDecision::certain(
        PlayMove::solo(ctx.seat, first.id),
        Strategy::AllRedDisposal,
    ))
}

fn self_cut(ctx: &BotContext<'_>, pair: &[&WireTile], strategy: Strategy) -> PlayDecision {
    PlayDecision::certain(
        PlayMove::cut(ctx.seat, pair[0].id, ctx.seat, pair[1].id),
        strategy,
    )
}

fn four_of_a_kind(ctx: &BotContext<'_>, own: &[&WireTile]) -> Option<PlayDecision> {
    group_by_value(own)
        .into_iter()
        .find(|(_, members)| members.len() >= 4)
        .map(|(_, members)| self_cut(ctx, &members, Strategy::FourOfAKind))
}

/// A pair is safe to self-cut when no other copy of its value is still hidden anywhere.
fn two_of_a_kind(ctx: &BotContext<'_>, own: &[&WireTile]) -> Option<PlayDecision> {
    group_by_value(own)
        .into_iter()
        .filter(|(value, members)| *value != Candidate::Red && members.len() == 2)
        .find(|(value, _)| ctx.state.unrevealed_count(*value) == 2)
        .map(|(_, members)| self_cut(ctx, &members, Strategy::TwoOfAKind))
}

fn info_token_match(ctx: &BotContext<'_>, own: &[&WireTile]) -> Option<PlayDecision> {
    for seat in ctx.other_seats() {
        let marked = ctx.state.players()[seat]
            .hand
            .iter()
            .filter(|tile| tile.info_token && !tile.revealed);
        for target in marked {
            if let Some(source) = own.iter().find(|tile| tile.matches(target)) {
                return Some(PlayDecision::certain(
                    PlayMove::cut(ctx.seat, source.id, seat, target.id),
                    Strategy::InfoTokenMatch,
                ));
            }
        }
    }
    None
}

/// Hidden, unmarked wires of every other seat, seen with our own hand as a hint.
fn open_slots(ctx: &BotContext<'_>) -> Vec<OpenSlot> {
    let mut open = Vec::new();
    for seat in ctx.other_seats() {
        let hand = &ctx.state.players()[seat].hand;
        for (idx, tile) in hand.iter().enumerate() {
            if tile.is_known() {
                continue;
            }
            if let Some(candidates) = candidates_for_slot(ctx.state, seat, idx, Some(ctx.seat)) {
                open.push(OpenSlot {
                    seat,
                    wire: tile.id,
                    candidates,
                });
            }
        }
    }
    open
}

fn deterministic_match(
    ctx: &BotContext<'_>,
    own: &[&WireTile],
    open: &[OpenSlot],
) -> Option<PlayDecision> {
    open.iter().find_map(|slot| {
        let value = slot.candidates.possibilities.single()?;
        if value == Candidate::Red {
            return None;
        }
        let source = own.iter().find(|tile| tile.matches_value(value))?;
        Some(PlayDecision::certain(
            PlayMove::cut(ctx.seat, source.id, slot.seat, slot.wire),
            Strategy::DeterministicMatch,
        ))
    })
}

fn estimate_open_slots<R: Rng + ?Sized>(
    ctx: &BotContext<'_>,
    open: &[OpenSlot],
    rng: &mut R,
) -> MonteCarloReport {
    let queries: Vec<SlotQuery> = open
        .iter()
        .filter(|slot| !slot.candidates.is_empty())
        .map(|slot| SlotQuery {
            info: SlotRef::new(slot.seat, slot.wire),
            candidates: slot.candidates.possibilities.clone(),
        })
        .collect();
    monte_carlo_slot_probabilities(
        ctx.state,
        &queries,
        ctx.seat,
        &ctx.params.monte_carlo(),
        rng,
    )
}

/// Best single target by estimated match probability, then the double detector
/// when it clearly beats that target.
fn probabilistic_match<R: Rng + ?Sized>(
    ctx: &BotContext<'_>,
    own: &[&WireTile],
    open: &[OpenSlot],
    rng: &mut R,
) -> Option<PlayDecision> {
    if open.is_empty() {
        return None;
    }
    let report = estimate_open_slots(ctx, open, rng);
    let last_wire = own.len() == 1;
    let ratio = ctx.params.red_guard_ratio;

    let mut best: Option<(WireId, SlotRef, f64)> = None;
    for source in own.iter().filter(|tile| !tile.color.is_red()) {
        let value = source.value();
        for estimate in &report.estimates {
            let p = estimate.probability(value);
            if p <= 0.0 {
                continue;
            }
            if !last_wire && estimate.probability(Candidate::Red) > p * ratio {
                continue;
            }
            if best.is_none_or(|(_, _, top)| p > top) {
                best = Some((source.id, estimate.info, p));
            }
        }
    }

    let best_prob = best.map_or(0.0, |(_, _, p)| p);
    if ctx.player().has_double_detector && best_prob < ctx.params.certainty {
        if let Some(choice) = best_double_detector(ctx, own, &report) {
            if choice.joint >= best_prob + ctx.params.dd_min_gain {
                return Some(PlayDecision {
                    play: PlayMove::double(
                        ctx.seat,
                        choice.source,
                        choice.target_player,
                        choice.first,
                        choice.second,
                    ),
                    strategy: Strategy::DoubleDetector,
                    probability: Some(choice.joint),
                });
            }
        }
    }

    best.map(|(source, target, p)| PlayDecision {
        play: PlayMove::cut(ctx.seat, source, target.player, target.card),
        strategy: Strategy::BestProbability,
        probability: Some(p),
    })
}
