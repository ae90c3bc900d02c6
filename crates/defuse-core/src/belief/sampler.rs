//! Monte Carlo estimation of hidden slot values.

use crate::deduction::{CandidateSet, KnownCounts, SlotRef};
use crate::game::state::GameState;
use crate::model::candidate::Candidate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_ITERATIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloConfig {
    pub iterations: usize,
    /// Wall-clock bound; trials stop early once exceeded.
    pub time_cap: Option<Duration>,
}

impl MonteCarloConfig {
    pub const fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            time_cap: None,
        }
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self::with_iterations(DEFAULT_ITERATIONS)
    }
}

/// One hidden slot to estimate, with the values deduction left open for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub info: SlotRef,
    pub candidates: CandidateSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueProbability {
    pub value: Candidate,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEstimate {
    pub info: SlotRef,
    pub slots: Vec<ValueProbability>,
}

impl SlotEstimate {
    /// Estimated probability of `value`; zero when it never appeared.
    pub fn probability(&self, value: Candidate) -> f64 {
        self.slots
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.probability)
            .unwrap_or(0.0)
    }

    pub fn most_likely(&self) -> Option<ValueProbability> {
        self.slots
            .iter()
            .copied()
            .fold(None, |best: Option<ValueProbability>, entry| match best {
                Some(top) if top.probability >= entry.probability => Some(top),
                _ => Some(entry),
            })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingStats {
    pub attempts: usize,
    pub succeeded: usize,
    pub rejections: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloReport {
    pub estimates: Vec<SlotEstimate>,
    pub stats: SamplingStats,
}

impl MonteCarloReport {
    pub fn estimate(&self, slot: SlotRef) -> Option<&SlotEstimate> {
        self.estimates.iter().find(|estimate| estimate.info == slot)
    }
}

/// Samples full assignments of `slots` and tallies how often each value lands in each slot.
///
/// Remaining copies are counted from `requesting_seat`'s point of view. Within a trial
/// every assignment consumes one copy; a trial in which some slot has no value left is
/// discarded and contributes nothing.
pub fn monte_carlo_slot_probabilities<R: Rng + ?Sized>(
    state: &GameState,
    slots: &[SlotQuery],
    requesting_seat: usize,
    config: &MonteCarloConfig,
    rng: &mut R,
) -> MonteCarloReport {
    let counts = KnownCounts::observe(state, None, Some(requesting_seat));
    let mut budget: HashMap<Candidate, usize> = HashMap::new();
    for query in slots {
        for value in query.candidates.iter() {
            budget
                .entry(value)
                .or_insert_with(|| counts.remaining(state, value));
        }
    }

    let mut hits: Vec<Vec<u32>> = slots
        .iter()
        .map(|query| vec![0; query.candidates.len()])
        .collect();
    let mut stats = SamplingStats::default();
    let mut order: Vec<usize> = (0..slots.len()).collect();
    let mut assignment: Vec<usize> = vec![0; slots.len()];
    let mut feasible: Vec<usize> = Vec::new();
    let started = Instant::now();

    for _ in 0..config.iterations {
        if config
            .time_cap
            .is_some_and(|cap| started.elapsed() >= cap)
        {
            stats.truncated = true;
            break;
        }
        stats.attempts += 1;

        let mut remaining = budget.clone();
        order.shuffle(rng);
        let mut complete = true;

        for &slot in &order {
            let values = slots[slot].candidates.as_slice();
            feasible.clear();
            feasible.extend(
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| remaining.get(*value).copied().unwrap_or(0) > 0)
                    .map(|(idx, _)| idx),
            );
            if feasible.is_empty() {
                complete = false;
                break;
            }
            let choice = feasible[rng.gen_range(0..feasible.len())];
            if let Some(left) = remaining.get_mut(&values[choice]) {
                *left -= 1;
            }
            assignment[slot] = choice;
        }

        if !complete {
            stats.rejections += 1;
            continue;
        }
        stats.succeeded += 1;
        for (slot, &choice) in assignment.iter().enumerate() {
            hits[slot][choice] += 1;
        }
    }

    let estimates = slots
        .iter()
        .zip(hits)
        .map(|(query, counts)| SlotEstimate {
            info: query.info,
            slots: query
                .candidates
                .iter()
                .zip(counts)
                .map(|(value, count)| ValueProbability {
                    value,
                    probability: if stats.succeeded == 0 {
                        0.0
                    } else {
                        f64::from(count) / stats.succeeded as f64
                    },
                })
                .collect(),
        })
        .collect();

    MonteCarloReport { estimates, stats }
}
