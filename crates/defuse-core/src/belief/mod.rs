//! Probabilistic estimates layered on top of exact deduction.
//!
//! - `sampler`: Monte Carlo assignment of hidden slots under global scarcity.

mod sampler;

pub use sampler::{
    MonteCarloConfig, MonteCarloReport, SamplingStats, SlotEstimate, SlotQuery, ValueProbability,
    monte_carlo_slot_probabilities,
};
