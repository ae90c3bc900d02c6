use super::BotContext;
use defuse_core::belief::{MonteCarloReport, SlotEstimate};
use defuse_core::deduction::KnownCounts;
use defuse_core::model::candidate::Candidate;
use defuse_core::model::wire::{WireId, WireTile};

/// A double-detector cut: one own wire against two wires of the same seat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorChoice {
    pub source: WireId,
    pub target_player: usize,
    pub first: WireId,
    pub second: WireId,
    /// Probability that at least one of the two targets matches the source.
    pub joint: f64,
}

/// Combines the estimated probabilities of two slots into the chance that either matches.
///
/// When `remaining` is one, at most one of the slots can hold the value, so the events
/// are disjoint and the probabilities add.
pub fn joint_probability(p1: f64, p2: f64, remaining: usize) -> f64 {
    let joint = if remaining == 1 {
        p1 + p2
    } else {
        p1 + p2 - p1 * p2
    };
    joint.min(1.0)
}

/// Best pair of same-seat slots for any of `own` wires, by joint match probability.
pub fn best_double_detector(
    ctx: &BotContext<'_>,
    own: &[&WireTile],
    report: &MonteCarloReport,
) -> Option<DetectorChoice> {
    let counts = KnownCounts::observe(ctx.state, None, Some(ctx.seat));
    let last_wire = own.len() == 1;
    let ratio = ctx.params.red_guard_ratio;
    let mut best: Option<DetectorChoice> = None;

    for source in own.iter().filter(|tile| !tile.color.is_red()) {
        let value = source.value();
        let remaining = counts.remaining(ctx.state, value);
        if remaining == 0 {
            continue;
        }
        for (i, first) in report.estimates.iter().enumerate() {
            for second in &report.estimates[i + 1..] {
                if first.info.player != second.info.player {
                    continue;
                }
                let p1 = guarded(first, value, ratio, last_wire);
                let p2 = guarded(second, value, ratio, last_wire);
                let (Some(p1), Some(p2)) = (p1, p2) else {
                    continue;
                };
                let joint = joint_probability(p1, p2, remaining);
                if joint > 0.0 && best.is_none_or(|top| joint > top.joint) {
                    best = Some(DetectorChoice {
                        source: source.id,
                        target_player: first.info.player,
                        first: first.info.card,
                        second: second.info.card,
                        joint,
                    });
                }
            }
        }
    }
    best
}

/// Match probability of `value` in a slot, or `None` when the slot is too likely red.
fn guarded(estimate: &SlotEstimate, value: Candidate, ratio: f64, last_wire: bool) -> Option<f64> {
    let p = estimate.probability(value);
    let red = estimate.probability(Candidate::Red);
    if !last_wire && red > p * ratio {
        return None;
    }
    Some(p)
}
