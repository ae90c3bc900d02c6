use crate::model::color::WireColor;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_BLUE: u8 = 1;
pub const MAX_BLUE: u8 = 12;
pub const MAX_COLORED_BASE: u8 = 11;

/// Position of a wire on the shared number line, stored in tenths.
///
/// Blue wires sit on whole numbers, yellow wires at `n.1` and red wires at `n.5`,
/// so a plain integer comparison reproduces the physical sort order of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireNumber(u8);

impl WireNumber {
    pub const LOWEST: WireNumber = WireNumber(MIN_BLUE * 10);
    pub const HIGHEST: WireNumber = WireNumber(MAX_BLUE * 10);

    pub const fn blue(value: u8) -> Option<Self> {
        if value >= MIN_BLUE && value <= MAX_BLUE {
            Some(WireNumber(value * 10))
        } else {
            None
        }
    }

    pub const fn yellow(base: u8) -> Option<Self> {
        Self::colored(base, WireColor::Yellow)
    }

    pub const fn red(base: u8) -> Option<Self> {
        Self::colored(base, WireColor::Red)
    }

    pub const fn for_color(color: WireColor, base: u8) -> Option<Self> {
        match color {
            WireColor::Blue => Self::blue(base),
            WireColor::Yellow | WireColor::Red => Self::colored(base, color),
        }
    }

    const fn colored(base: u8, color: WireColor) -> Option<Self> {
        if base >= MIN_BLUE && base <= MAX_COLORED_BASE {
            Some(WireNumber(base * 10 + color.tenths_offset()))
        } else {
            None
        }
    }

    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// Integer part of the number (`7` for `7`, `3` for `3.1`).
    pub const fn base(self) -> u8 {
        self.0 / 10
    }

    pub const fn is_whole(self) -> bool {
        self.0 % 10 == 0
    }

    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// True when blue value `n` lies inside `[self, upper]`.
    pub const fn bounds_blue(self, upper: WireNumber, n: u8) -> bool {
        let tenths = n as u16 * 10;
        tenths >= self.0 as u16 && tenths <= upper.0 as u16
    }
}

impl fmt::Display for WireNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.base())
        } else {
            write!(f, "{}.{}", self.base(), self.0 % 10)
        }
    }
}
