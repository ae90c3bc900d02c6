use super::knowledge::KnownCounts;
use super::neighbors::{nearest_known_left, nearest_known_right};
use crate::game::state::GameState;
use crate::model::candidate::Candidate;
use crate::model::color::WireColor;
use crate::model::number::{MAX_BLUE, MIN_BLUE};
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of candidate values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateSet {
    values: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn singleton(value: Candidate) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Returns false when the value was already present.
    pub fn insert(&mut self, value: Candidate) -> bool {
        if self.contains(value) {
            return false;
        }
        self.values.push(value);
        true
    }

    pub fn contains(&self, value: Candidate) -> bool {
        self.values.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.values
    }

    /// The only candidate, when exactly one remains.
    pub fn single(&self) -> Option<Candidate> {
        match self.values.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MostProbable {
    pub value: Candidate,
    pub probability: f64,
}

impl MostProbable {
    /// String form of the value (`"7"`, `"yellow"`, `"red"`).
    pub fn label(&self) -> String {
        self.value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotCandidates {
    pub possibilities: CandidateSet,
    pub most_probable: Option<MostProbable>,
}

impl SlotCandidates {
    fn known(value: Candidate) -> Self {
        Self {
            possibilities: CandidateSet::singleton(value),
            most_probable: Some(MostProbable {
                value,
                probability: 1.0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.possibilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.possibilities.is_empty()
    }
}

/// Values slot `idx` of `seat` can hold given public information.
///
/// With `hint`, the hinted seat's whole hand also counts as accounted for, which is
/// how a player reasons about other hands while knowing their own. Returns `None`
/// when the slot does not exist.
///
/// Scarcity is checked one slot at a time; combinations across several hidden slots
/// are not propagated.
pub fn candidates_for_slot(
    state: &GameState,
    seat: usize,
    idx: usize,
    hint: Option<usize>,
) -> Option<SlotCandidates> {
    let hand = &state.player(seat)?.hand;
    let tile = hand.get(idx)?;
    if tile.is_known() {
        return Some(SlotCandidates::known(tile.value()));
    }

    let left = nearest_known_left(hand, idx);
    let right = nearest_known_right(hand, idx);
    let counts = KnownCounts::observe(state, Some((seat, idx)), hint);

    let mut weighted: Vec<(Candidate, usize)> = Vec::new();
    for n in MIN_BLUE..=MAX_BLUE {
        if !left.bounds_blue(right, n) {
            continue;
        }
        let remaining = counts.blue_remaining(n);
        if remaining > 0 {
            weighted.push((Candidate::Blue(n), remaining));
        }
    }

    // Colored wires are ranged by base number, so 5.1 fits beside a known 5.
    let bases = left.base()..=right.base();
    for (color, token) in [
        (WireColor::Yellow, Candidate::Yellow),
        (WireColor::Red, Candidate::Red),
    ] {
        let in_range = counts
            .unseen_pool(state, color)
            .filter(|wire| bases.contains(&wire.number.base()))
            .count();
        if in_range > 0 {
            weighted.push((token, in_range));
        }
    }

    let total: usize = weighted.iter().map(|(_, weight)| weight).sum();
    let mut best: Option<(Candidate, usize)> = None;
    for &(value, weight) in &weighted {
        if best.is_none_or(|(_, top)| weight > top) {
            best = Some((value, weight));
        }
    }

    Some(SlotCandidates {
        possibilities: weighted.iter().map(|(value, _)| *value).collect(),
        most_probable: best.map(|(value, weight)| MostProbable {
            value,
            probability: weight as f64 / total as f64,
        }),
    })
}
