use crate::model::hand::Hand;
use crate::model::wire::WireTile;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Ai,
}

impl PlayerKind {
    pub const fn is_ai(self) -> bool {
        matches!(self, PlayerKind::Ai)
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerKind::Human => "human",
            PlayerKind::Ai => "ai",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Hand,
    #[serde(default)]
    pub known_wires: Vec<WireTile>,
    #[serde(default)]
    pub has_double_detector: bool,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, kind: PlayerKind, hand: Hand) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            hand,
            known_wires: Vec::new(),
            has_double_detector: false,
        }
    }

    pub fn with_double_detector(mut self, available: bool) -> Self {
        self.has_double_detector = available;
        self
    }

    pub fn is_cleared(&self) -> bool {
        self.hand.iter().all(|tile| tile.revealed)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
