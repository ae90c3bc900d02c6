use crate::game::actions::HistoryEntry;
use crate::game::setup::{GameSetup, SetupError};
use crate::model::candidate::Candidate;
use crate::model::color::WireColor;
use crate::model::hand::Hand;
use crate::model::player::Player;
use crate::model::pool::{BLUE_SET_SIZE, WirePool};
use crate::model::wire::{WireId, WireTile};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Every player marks one of their blue wires with an info token.
    Picking,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Defused,
    Exploded,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Full table state: hands, colored wire pools, detonator and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) players: Vec<Player>,
    pub(crate) yellow_wires: Vec<WireTile>,
    pub(crate) red_wires: Vec<WireTile>,
    pub(crate) detonator_dial: u8,
    pub(crate) detonator_limit: u8,
    pub(crate) turn: usize,
    pub(crate) mission: u32,
    pub(crate) phase: GamePhase,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<HistoryEntry>,
}

impl GameState {
    /// Validates `setup`, draws colored wires, shuffles and deals every wire.
    pub fn setup<R: Rng + ?Sized>(setup: &GameSetup, rng: &mut R) -> Result<Self, SetupError> {
        setup.validate()?;

        let yellow_first = BLUE_SET_SIZE as u32;
        let yellow_pool = WirePool::colored(WireColor::Yellow, setup.yellow.in_play, yellow_first, rng);
        let red_first = yellow_first + yellow_pool.len() as u32;
        let red_pool = WirePool::colored(WireColor::Red, setup.red.in_play, red_first, rng);

        let mut board = WirePool::blue_set(0);
        let mut yellow_draw = yellow_pool.clone();
        yellow_draw.shuffle_in_place(rng);
        board.extend(yellow_draw.take(setup.yellow.dealt));
        let mut red_draw = red_pool.clone();
        red_draw.shuffle_in_place(rng);
        board.extend(red_draw.take(setup.red.dealt));
        board.shuffle_in_place(rng);

        let seat_count = setup.seats.len();
        let mut hands: Vec<Vec<WireTile>> = vec![Vec::new(); seat_count];
        for (index, tile) in board.into_tiles().into_iter().enumerate() {
            hands[index % seat_count].push(tile);
        }

        let players = setup
            .seats
            .iter()
            .zip(hands)
            .enumerate()
            .map(|(id, (seat, tiles))| {
                Player::new(id, seat.name.clone(), seat.kind, Hand::with_tiles(tiles))
                    .with_double_detector(setup.double_detectors)
            })
            .collect();

        Ok(Self {
            players,
            yellow_wires: yellow_pool.into_tiles(),
            red_wires: red_pool.into_tiles(),
            detonator_dial: 0,
            detonator_limit: setup.resolved_detonator_limit(),
            turn: 0,
            mission: setup.mission,
            phase: GamePhase::Picking,
            status: GameStatus::InProgress,
            history: Vec::new(),
        })
    }

    /// Builds a state in the playing phase from explicit players and pools.
    ///
    /// Player ids are renumbered to their seat index. No table-size validation is
    /// performed, which lets scenarios use partial tables.
    pub fn from_hands(
        players: Vec<Player>,
        yellow_wires: Vec<WireTile>,
        red_wires: Vec<WireTile>,
    ) -> Self {
        let players: Vec<Player> = players
            .into_iter()
            .enumerate()
            .map(|(id, mut player)| {
                player.id = id;
                player
            })
            .collect();
        let detonator_limit = u8::try_from(players.len().max(1)).unwrap_or(u8::MAX);
        Self {
            players,
            yellow_wires,
            red_wires,
            detonator_dial: 0,
            detonator_limit,
            turn: 0,
            mission: 0,
            phase: GamePhase::Playing,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub(crate) fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.get_mut(seat)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Every wire currently in a hand.
    pub fn wires(&self) -> impl Iterator<Item = &WireTile> {
        self.players.iter().flat_map(|player| player.hand.iter())
    }

    /// The complete yellow pool, including wires that were never dealt.
    pub fn yellow_wires(&self) -> &[WireTile] {
        &self.yellow_wires
    }

    /// The complete red pool, including wires that were never dealt.
    pub fn red_wires(&self) -> &[WireTile] {
        &self.red_wires
    }

    pub fn pool(&self, color: WireColor) -> &[WireTile] {
        match color {
            WireColor::Blue => &[],
            WireColor::Yellow => &self.yellow_wires,
            WireColor::Red => &self.red_wires,
        }
    }

    pub fn detonator_dial(&self) -> u8 {
        self.detonator_dial
    }

    pub fn detonator_limit(&self) -> u8 {
        self.detonator_limit
    }

    pub fn set_detonator_limit(&mut self, limit: u8) {
        self.detonator_limit = limit.max(1);
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn mission(&self) -> u32 {
        self.mission
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn begin_play(&mut self) {
        self.phase = GamePhase::Playing;
        self.turn = 0;
        if self.players.first().is_some_and(|player| player.is_cleared()) {
            self.advance_turn();
        }
    }

    pub fn tile(&self, seat: usize, id: WireId) -> Option<&WireTile> {
        self.player(seat).and_then(|player| player.hand.find(id))
    }

    /// Number of uncut wires with `value` across every hand.
    pub fn unrevealed_count(&self, value: Candidate) -> usize {
        self.wires()
            .filter(|tile| !tile.revealed && tile.matches_value(value))
            .count()
    }

    /// Moves the turn to the next seat that still holds an uncut wire.
    pub fn advance_turn(&mut self) {
        let count = self.players.len();
        if count == 0 {
            return;
        }
        for step in 1..=count {
            let seat = (self.turn + step) % count;
            if !self.players[seat].is_cleared() {
                self.turn = seat;
                return;
            }
        }
    }

    pub(crate) fn refresh_status(&mut self) {
        if self.status.is_over() {
            return;
        }
        if self.detonator_dial >= self.detonator_limit {
            self.status = GameStatus::Exploded;
        } else if self
            .wires()
            .all(|tile| tile.revealed || tile.color.is_red())
        {
            self.status = GameStatus::Defused;
        }
    }
}
