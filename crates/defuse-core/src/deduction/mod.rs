//! Exact, single-level deduction over public wire information.
//!
//! - `neighbors`: nearest known wire on either side of a slot.
//! - `knowledge`: scarcity ledger of wires already accounted for.
//! - `candidates`: per-slot candidate sets and the most probable value.

mod candidates;
mod knowledge;
mod neighbors;

pub use candidates::{CandidateSet, MostProbable, SlotCandidates, candidates_for_slot};
pub use knowledge::{KnownCounts, SlotRef};
pub use neighbors::{nearest_known_left, nearest_known_right};
