use crate::model::wire::{WireId, WireTile};
use serde::{Deserialize, Serialize};

/// Wires held by one player, kept in ascending number order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    tiles: Vec<WireTile>,
}

impl Hand {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn with_tiles(tiles: Vec<WireTile>) -> Self {
        let mut hand = Self { tiles };
        hand.sort();
        hand
    }

    pub fn add(&mut self, tile: WireTile) {
        self.tiles.push(tile);
        self.sort();
    }

    pub fn remove(&mut self, id: WireId) -> Option<WireTile> {
        let index = self.position(id)?;
        Some(self.tiles.remove(index))
    }

    pub fn position(&self, id: WireId) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&WireTile> {
        self.tiles.get(index)
    }

    pub fn find(&self, id: WireId) -> Option<&WireTile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    pub fn find_mut(&mut self, id: WireId) -> Option<&mut WireTile> {
        self.tiles.iter_mut().find(|tile| tile.id == id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WireTile> {
        self.tiles.iter()
    }

    pub fn tiles(&self) -> &[WireTile] {
        &self.tiles
    }

    /// Tiles not yet cut, with their slot index.
    pub fn unrevealed(&self) -> impl Iterator<Item = (usize, &WireTile)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| !tile.revealed)
    }

    pub fn unrevealed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.revealed).count()
    }

    // Stable: equal numbers keep their insertion order.
    fn sort(&mut self) {
        self.tiles.sort_by_key(|tile| tile.number);
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::wire::{WireId, WireTile};

    #[test]
    fn tiles_are_sorted_by_number() {
        let hand = Hand::with_tiles(vec![
            WireTile::blue(0, 9),
            WireTile::red(1, 3),
            WireTile::blue(2, 3),
            WireTile::yellow(3, 3),
        ]);
        let ids: Vec<u32> = hand.iter().map(|tile| tile.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1, 0]);
    }

    #[test]
    fn equal_numbers_keep_insertion_order() {
        let mut hand = Hand::new();
        hand.add(WireTile::blue(5, 4));
        hand.add(WireTile::blue(1, 4));
        hand.add(WireTile::blue(3, 2));
        let ids: Vec<u32> = hand.iter().map(|tile| tile.id.0).collect();
        assert_eq!(ids, vec![3, 5, 1]);
    }

    #[test]
    fn unrevealed_skips_cut_wires() {
        let hand = Hand::with_tiles(vec![
            WireTile::blue(0, 1).with_revealed(),
            WireTile::blue(1, 2).with_info_token(),
            WireTile::blue(2, 3),
        ]);
        let slots: Vec<usize> = hand.unrevealed().map(|(idx, _)| idx).collect();
        assert_eq!(slots, vec![1, 2]);
        assert_eq!(hand.unrevealed_count(), 2);
        assert_eq!(hand.position(WireId(2)), Some(2));
        assert!(hand.find(WireId(9)).is_none());
    }
}
