use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum WireColor {
    Blue = 0,
    Yellow = 1,
    Red = 2,
}

impl WireColor {
    pub const ALL: [WireColor; 3] = [WireColor::Blue, WireColor::Yellow, WireColor::Red];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WireColor::Blue),
            1 => Some(WireColor::Yellow),
            2 => Some(WireColor::Red),
            _ => None,
        }
    }

    pub const fn is_blue(self) -> bool {
        matches!(self, WireColor::Blue)
    }

    pub const fn is_red(self) -> bool {
        matches!(self, WireColor::Red)
    }

    /// Fractional offset (in tenths) that colored wires sit at between blue numbers.
    pub const fn tenths_offset(self) -> u8 {
        match self {
            WireColor::Blue => 0,
            WireColor::Yellow => 1,
            WireColor::Red => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            WireColor::Blue => "blue",
            WireColor::Yellow => "yellow",
            WireColor::Red => "red",
        }
    }
}

impl fmt::Display for WireColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::WireColor;

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(WireColor::Blue.to_string(), "blue");
        assert_eq!(WireColor::Red.to_string(), "red");
    }

    #[test]
    fn from_index_maps_valid_values() {
        assert_eq!(WireColor::from_index(1), Some(WireColor::Yellow));
        assert_eq!(WireColor::from_index(3), None);
    }
}
