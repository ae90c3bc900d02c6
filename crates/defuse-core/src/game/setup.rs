use crate::model::color::WireColor;
use crate::model::number::MAX_COLORED_BASE;
use crate::model::player::PlayerKind;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl SeatConfig {
    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Ai,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }
}

/// How many colored wires of one color take part in a mission.
///
/// `in_play` wires are announced publicly; only `dealt` of them end up in hands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredWireRule {
    pub in_play: usize,
    pub dealt: usize,
}

impl ColoredWireRule {
    pub const NONE: ColoredWireRule = ColoredWireRule {
        in_play: 0,
        dealt: 0,
    };

    pub const fn new(in_play: usize, dealt: usize) -> Self {
        Self { in_play, dealt }
    }

    fn validate(self, color: WireColor) -> Result<(), SetupError> {
        if self.dealt > self.in_play || self.in_play > MAX_COLORED_BASE as usize {
            return Err(SetupError::ColoredWires {
                color,
                in_play: self.in_play,
                dealt: self.dealt,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub seats: Vec<SeatConfig>,
    #[serde(default = "default_mission")]
    pub mission: u32,
    #[serde(default)]
    pub yellow: ColoredWireRule,
    #[serde(default)]
    pub red: ColoredWireRule,
    #[serde(default = "default_double_detectors")]
    pub double_detectors: bool,
    #[serde(default)]
    pub detonator_limit: Option<u8>,
}

impl GameSetup {
    /// All-AI table with the given seat count and no colored wires.
    pub fn all_ai(players: usize) -> Self {
        Self {
            seats: (0..players)
                .map(|idx| SeatConfig::ai(format!("Bot {}", idx + 1)))
                .collect(),
            mission: default_mission(),
            yellow: ColoredWireRule::NONE,
            red: ColoredWireRule::NONE,
            double_detectors: default_double_detectors(),
            detonator_limit: None,
        }
    }

    pub fn with_yellow(mut self, rule: ColoredWireRule) -> Self {
        self.yellow = rule;
        self
    }

    pub fn with_red(mut self, rule: ColoredWireRule) -> Self {
        self.red = rule;
        self
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let players = self.seats.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(SetupError::PlayerCount { found: players });
        }
        self.yellow.validate(WireColor::Yellow)?;
        self.red.validate(WireColor::Red)?;
        if self.detonator_limit == Some(0) {
            return Err(SetupError::DetonatorLimit);
        }
        Ok(())
    }

    pub fn resolved_detonator_limit(&self) -> u8 {
        self.detonator_limit
            .unwrap_or_else(|| u8::try_from(self.seats.len()).unwrap_or(u8::MAX))
    }
}

fn default_mission() -> u32 {
    1
}

fn default_double_detectors() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    PlayerCount {
        found: usize,
    },
    ColoredWires {
        color: WireColor,
        in_play: usize,
        dealt: usize,
    },
    DetonatorLimit,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::PlayerCount { found } => write!(
                f,
                "a game needs {MIN_PLAYERS} to {MAX_PLAYERS} players but {found} were given"
            ),
            SetupError::ColoredWires {
                color,
                in_play,
                dealt,
            } => write!(
                f,
                "cannot deal {dealt} of {in_play} {color} wires (at most {MAX_COLORED_BASE} exist)"
            ),
            SetupError::DetonatorLimit => write!(f, "detonator limit must be at least 1"),
        }
    }
}

impl std::error::Error for SetupError {}
