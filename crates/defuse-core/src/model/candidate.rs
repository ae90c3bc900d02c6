use crate::model::color::WireColor;
use crate::model::number::{MAX_BLUE, MIN_BLUE};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Value token a hidden slot may resolve to.
///
/// Blue wires are identified by their number; yellow and red wires only by color,
/// which is also how they match during a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Candidate {
    Blue(u8),
    Yellow,
    Red,
}

impl Candidate {
    pub fn all_blue() -> impl Iterator<Item = Candidate> {
        (MIN_BLUE..=MAX_BLUE).map(Candidate::Blue)
    }

    pub const fn color(self) -> WireColor {
        match self {
            Candidate::Blue(_) => WireColor::Blue,
            Candidate::Yellow => WireColor::Yellow,
            Candidate::Red => WireColor::Red,
        }
    }

    pub const fn is_red(self) -> bool {
        matches!(self, Candidate::Red)
    }

    pub const fn blue_number(self) -> Option<u8> {
        match self {
            Candidate::Blue(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Blue(n) => write!(f, "{n}"),
            Candidate::Yellow => f.write_str("yellow"),
            Candidate::Red => f.write_str("red"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Candidate;
    use crate::model::color::WireColor;

    #[test]
    fn display_renders_numbers_and_color_tokens() {
        assert_eq!(Candidate::Blue(7).to_string(), "7");
        assert_eq!(Candidate::Yellow.to_string(), "yellow");
        assert_eq!(Candidate::Red.to_string(), "red");
    }

    #[test]
    fn blue_values_cover_the_full_range() {
        let all: Vec<_> = Candidate::all_blue().collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], Candidate::Blue(1));
        assert_eq!(all[11].color(), WireColor::Blue);
    }
}
