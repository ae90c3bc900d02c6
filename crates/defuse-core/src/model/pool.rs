use crate::model::color::WireColor;
use crate::model::number::{MAX_BLUE, MAX_COLORED_BASE, MIN_BLUE, WireNumber};
use crate::model::wire::{WireId, WireTile};
use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

pub const BLUE_COPIES: usize = 4;
pub const BLUE_SET_SIZE: usize = BLUE_COPIES * MAX_BLUE as usize;

/// A collection of wire tiles drawn from the box.
#[derive(Debug, Clone, Default)]
pub struct WirePool {
    tiles: Vec<WireTile>,
}

impl WirePool {
    /// Four copies of every blue number, ids starting at `first_id`.
    pub fn blue_set(first_id: u32) -> Self {
        let mut tiles = Vec::with_capacity(BLUE_SET_SIZE);
        let mut id = first_id;
        for n in MIN_BLUE..=MAX_BLUE {
            for _ in 0..BLUE_COPIES {
                if let Some(number) = WireNumber::blue(n) {
                    tiles.push(WireTile::new(WireId(id), WireColor::Blue, number));
                    id += 1;
                }
            }
        }
        Self { tiles }
    }

    /// Draws `count` distinct colored wires (yellow or red) in ascending order.
    pub fn colored<R: Rng + ?Sized>(
        color: WireColor,
        count: usize,
        first_id: u32,
        rng: &mut R,
    ) -> Self {
        let mut bases = (MIN_BLUE..=MAX_COLORED_BASE).choose_multiple(rng, count);
        bases.sort_unstable();
        let tiles = bases
            .into_iter()
            .zip(first_id..)
            .filter_map(|(base, id)| {
                WireNumber::for_color(color, base).map(|number| WireTile::new(WireId(id), color, number))
            })
            .collect();
        Self { tiles }
    }

    pub fn from_tiles(tiles: Vec<WireTile>) -> Self {
        Self { tiles }
    }

    pub fn shuffle_in_place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    /// Removes up to `count` tiles from the front of the pool.
    pub fn take(&mut self, count: usize) -> Vec<WireTile> {
        let count = count.min(self.tiles.len());
        self.tiles.drain(..count).collect()
    }

    pub fn extend(&mut self, tiles: impl IntoIterator<Item = WireTile>) {
        self.tiles.extend(tiles);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[WireTile] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<WireTile> {
        self.tiles
    }
}
