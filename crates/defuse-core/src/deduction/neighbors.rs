use crate::model::hand::Hand;
use crate::model::number::WireNumber;

/// Number of the closest known wire at or left of `idx`, or 1 when there is none.
pub fn nearest_known_left(hand: &Hand, idx: usize) -> WireNumber {
    hand.tiles()
        .iter()
        .take(idx.saturating_add(1))
        .rev()
        .find(|tile| tile.is_known())
        .map(|tile| tile.number)
        .unwrap_or(WireNumber::LOWEST)
}

/// Number of the closest known wire at or right of `idx`, or 12 when there is none.
pub fn nearest_known_right(hand: &Hand, idx: usize) -> WireNumber {
    hand.tiles()
        .iter()
        .skip(idx)
        .find(|tile| tile.is_known())
        .map(|tile| tile.number)
        .unwrap_or(WireNumber::HIGHEST)
}
