use crate::model::candidate::Candidate;
use crate::model::color::WireColor;
use crate::model::number::WireNumber;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// One physical wire tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTile {
    pub id: WireId,
    pub color: WireColor,
    pub number: WireNumber,
    #[serde(default)]
    pub revealed: bool,
    #[serde(default)]
    pub info_token: bool,
    #[serde(default)]
    pub selected: bool,
}

impl WireTile {
    pub const fn new(id: WireId, color: WireColor, number: WireNumber) -> Self {
        Self {
            id,
            color,
            number,
            revealed: false,
            info_token: false,
            selected: false,
        }
    }

    /// Blue tile with number `n`. Panics on an out-of-range number.
    #[cfg(any(test, feature = "fixtures"))]
    pub fn blue(id: u32, n: u8) -> Self {
        let number = WireNumber::blue(n).expect("blue wire number in 1..=12");
        Self::new(WireId(id), WireColor::Blue, number)
    }

    #[cfg(any(test, feature = "fixtures"))]
    pub fn yellow(id: u32, base: u8) -> Self {
        let number = WireNumber::yellow(base).expect("yellow wire base in 1..=11");
        Self::new(WireId(id), WireColor::Yellow, number)
    }

    #[cfg(any(test, feature = "fixtures"))]
    pub fn red(id: u32, base: u8) -> Self {
        let number = WireNumber::red(base).expect("red wire base in 1..=11");
        Self::new(WireId(id), WireColor::Red, number)
    }

    pub fn with_revealed(mut self) -> Self {
        self.revealed = true;
        self
    }

    pub fn with_info_token(mut self) -> Self {
        self.info_token = true;
        self
    }

    /// Identity of the tile is public.
    pub const fn is_known(&self) -> bool {
        self.revealed || self.info_token
    }

    pub const fn value(&self) -> Candidate {
        match self.color {
            WireColor::Blue => Candidate::Blue(self.number.base()),
            WireColor::Yellow => Candidate::Yellow,
            WireColor::Red => Candidate::Red,
        }
    }

    /// Blue wires match on number, colored wires on color alone.
    pub fn matches(&self, other: &WireTile) -> bool {
        match (self.color, other.color) {
            (WireColor::Blue, WireColor::Blue) => self.number == other.number,
            (a, b) => a == b && !a.is_blue(),
        }
    }

    pub fn matches_value(&self, value: Candidate) -> bool {
        self.value() == value
    }
}

impl fmt::Display for WireTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.id, self.color, self.number)
    }
}
