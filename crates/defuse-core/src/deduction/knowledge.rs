use crate::game::state::GameState;
use crate::model::candidate::Candidate;
use crate::model::color::WireColor;
use crate::model::number::{MAX_BLUE, WireNumber};
use crate::model::pool::BLUE_COPIES;
use crate::model::wire::{WireId, WireTile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A slot addressed by seat and wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    pub player: usize,
    pub card: WireId,
}

impl SlotRef {
    pub const fn new(player: usize, card: WireId) -> Self {
        Self { player, card }
    }
}

/// Wires whose identity is accounted for from one point of view.
///
/// Public wires (cut or info-token) always count. When a `hint` seat is given,
/// every wire in that seat's hand counts as well, modelling a player who knows
/// their own hand.
#[derive(Debug, Clone, Default)]
pub struct KnownCounts {
    blue: [u8; MAX_BLUE as usize + 1],
    seen_colored: HashSet<(WireColor, WireNumber)>,
}

impl KnownCounts {
    pub fn observe(state: &GameState, exclude: Option<(usize, usize)>, hint: Option<usize>) -> Self {
        let mut counts = Self::default();
        for (seat, player) in state.players().iter().enumerate() {
            let own_hand = hint == Some(seat);
            for (idx, tile) in player.hand.iter().enumerate() {
                if exclude == Some((seat, idx)) {
                    continue;
                }
                if tile.is_known() || own_hand {
                    counts.record(tile);
                }
            }
        }
        counts
    }

    fn record(&mut self, tile: &WireTile) {
        match tile.color {
            WireColor::Blue => {
                if let Some(slot) = self.blue.get_mut(tile.number.base() as usize) {
                    *slot = slot.saturating_add(1);
                }
            }
            color => {
                self.seen_colored.insert((color, tile.number));
            }
        }
    }

    pub fn blue_known(&self, n: u8) -> u8 {
        self.blue.get(n as usize).copied().unwrap_or(0)
    }

    /// Copies of blue `n` not yet accounted for.
    pub fn blue_remaining(&self, n: u8) -> usize {
        BLUE_COPIES.saturating_sub(self.blue_known(n) as usize)
    }

    pub fn is_seen(&self, tile: &WireTile) -> bool {
        self.seen_colored.contains(&(tile.color, tile.number))
    }

    /// Pool wires of `color` that nobody has accounted for yet.
    pub fn unseen_pool<'a>(
        &'a self,
        state: &'a GameState,
        color: WireColor,
    ) -> impl Iterator<Item = &'a WireTile> + 'a {
        state.pool(color).iter().filter(move |tile| !self.is_seen(tile))
    }

    /// Remaining unseen copies of `value` anywhere in the game.
    pub fn remaining(&self, state: &GameState, value: Candidate) -> usize {
        match value {
            Candidate::Blue(n) => self.blue_remaining(n),
            Candidate::Yellow => self.unseen_pool(state, WireColor::Yellow).count(),
            Candidate::Red => self.unseen_pool(state, WireColor::Red).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hand::Hand;
    use crate::model::player::{Player, PlayerKind};

    fn state() -> GameState {
        let players = vec![
            Player::new(
                0,
                "a",
                PlayerKind::Ai,
                Hand::with_tiles(vec![
                    WireTile::blue(0, 4),
                    WireTile::yellow(1, 6),
                    WireTile::blue(2, 9).with_revealed(),
                ]),
            ),
            Player::new(
                1,
                "b",
                PlayerKind::Ai,
                Hand::with_tiles(vec![
                    WireTile::blue(3, 4).with_info_token(),
                    WireTile::blue(4, 9),
                ]),
            ),
        ];
        GameState::from_hands(
            players,
            vec![WireTile::yellow(1, 6), WireTile::yellow(20, 8)],
            Vec::new(),
        )
    }

    #[test]
    fn public_view_counts_only_known_wires() {
        let counts = KnownCounts::observe(&state(), None, None);
        assert_eq!(counts.blue_known(4), 1);
        assert_eq!(counts.blue_known(9), 1);
        assert_eq!(counts.blue_remaining(4), 3);
        assert_eq!(counts.remaining(&state(), Candidate::Yellow), 2);
    }

    #[test]
    fn hint_adds_the_hinted_hand() {
        let table = state();
        let counts = KnownCounts::observe(&table, None, Some(0));
        assert_eq!(counts.blue_known(4), 2);
        assert_eq!(counts.remaining(&table, Candidate::Yellow), 1);
        assert_eq!(counts.remaining(&table, Candidate::Red), 0);
    }

    #[test]
    fn out_of_range_snapshot_number_is_ignored() {
        let stray: WireTile = serde_json::from_str(
            r#"{"id":7,"color":"blue","number":200,"revealed":true,"info_token":false,"selected":false}"#,
        )
        .unwrap();
        let table = GameState::from_hands(
            vec![Player::new(
                0,
                "a",
                PlayerKind::Ai,
                Hand::with_tiles(vec![WireTile::blue(0, 4).with_revealed(), stray]),
            )],
            Vec::new(),
            Vec::new(),
        );
        let counts = KnownCounts::observe(&table, None, None);
        assert_eq!(counts.blue_known(4), 1);
        assert_eq!(counts.blue_known(20), 0);
    }

    #[test]
    fn excluded_slot_is_not_counted() {
        let counts = KnownCounts::observe(&state(), Some((1, 0)), None);
        assert_eq!(counts.blue_known(4), 0);
    }
}
