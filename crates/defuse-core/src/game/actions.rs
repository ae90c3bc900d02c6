use crate::game::state::{GamePhase, GameState, GameStatus};
use crate::model::color::WireColor;
use crate::model::wire::{WireId, WireTile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cut request: one of the acting player's wires against zero, one or two targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayMove {
    pub source_player_idx: usize,
    pub source_card_id: WireId,
    #[serde(default)]
    pub target_player_idx: Option<usize>,
    #[serde(default)]
    pub target_card_id: Option<WireId>,
    #[serde(default)]
    pub second_target_card_id: Option<WireId>,
    #[serde(default)]
    pub double_detector: bool,
}

impl PlayMove {
    /// Source only: disposes of a red wire.
    pub const fn solo(source_player_idx: usize, source_card_id: WireId) -> Self {
        Self {
            source_player_idx,
            source_card_id,
            target_player_idx: None,
            target_card_id: None,
            second_target_card_id: None,
            double_detector: false,
        }
    }

    pub const fn cut(
        source_player_idx: usize,
        source_card_id: WireId,
        target_player_idx: usize,
        target_card_id: WireId,
    ) -> Self {
        Self {
            source_player_idx,
            source_card_id,
            target_player_idx: Some(target_player_idx),
            target_card_id: Some(target_card_id),
            second_target_card_id: None,
            double_detector: false,
        }
    }

    pub const fn double(
        source_player_idx: usize,
        source_card_id: WireId,
        target_player_idx: usize,
        target_card_id: WireId,
        second_target_card_id: WireId,
    ) -> Self {
        Self {
            source_player_idx,
            source_card_id,
            target_player_idx: Some(target_player_idx),
            target_card_id: Some(target_card_id),
            second_target_card_id: Some(second_target_card_id),
            double_detector: true,
        }
    }

    pub fn is_self_cut(&self) -> bool {
        self.target_player_idx == Some(self.source_player_idx)
    }
}

impl fmt::Display for PlayMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}:{}", self.source_player_idx, self.source_card_id)?;
        if let (Some(player), Some(card)) = (self.target_player_idx, self.target_card_id) {
            write!(f, " -> p{player}:{card}")?;
            if let Some(second) = self.second_target_card_id {
                write!(f, "|{second}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlayOutcome {
    Disposed,
    Cut { target: WireId },
    Miss { info_token: Option<WireId> },
    Exploded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum HistoryEntry {
    InfoToken { seat: usize, wire: WireId },
    Play { play: PlayMove, outcome: PlayOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    GameOver,
    UnknownSeat(usize),
    UnknownWire { seat: usize, wire: WireId },
    AlreadyRevealed(WireId),
    AlreadyKnown(WireId),
    NotBlue(WireId),
    NotRed(WireId),
    SameWire(WireId),
    MissingTarget,
    DetectorUnavailable(usize),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::GameOver => write!(f, "the game is already over"),
            ActionError::UnknownSeat(seat) => write!(f, "no player sits at seat {seat}"),
            ActionError::UnknownWire { seat, wire } => {
                write!(f, "seat {seat} does not hold wire {wire}")
            }
            ActionError::AlreadyRevealed(wire) => write!(f, "wire {wire} is already cut"),
            ActionError::AlreadyKnown(wire) => write!(f, "wire {wire} is already public"),
            ActionError::NotBlue(wire) => write!(f, "wire {wire} is not blue"),
            ActionError::NotRed(wire) => {
                write!(f, "wire {wire} is not red and cannot be cut alone")
            }
            ActionError::SameWire(wire) => write!(f, "wire {wire} cannot be cut against itself"),
            ActionError::MissingTarget => write!(f, "a target wire is required"),
            ActionError::DetectorUnavailable(seat) => {
                write!(f, "seat {seat} has no double detector left")
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl GameState {
    /// Marks one of `seat`'s hidden blue wires with an info token.
    pub fn place_info_token(&mut self, seat: usize, wire: WireId) -> Result<(), ActionError> {
        if self.status.is_over() {
            return Err(ActionError::GameOver);
        }
        let tile = self.hidden_tile(seat, wire)?;
        if !tile.color.is_blue() {
            return Err(ActionError::NotBlue(wire));
        }
        if tile.info_token {
            return Err(ActionError::AlreadyKnown(wire));
        }
        self.tile_mut(seat, wire)?.info_token = true;
        self.history.push(HistoryEntry::InfoToken { seat, wire });
        Ok(())
    }

    /// Resolves a cut. State is left untouched when validation fails.
    pub fn apply_play(&mut self, play: &PlayMove) -> Result<PlayOutcome, ActionError> {
        if self.status.is_over() {
            return Err(ActionError::GameOver);
        }
        let seat = play.source_player_idx;
        let source = self.hidden_tile(seat, play.source_card_id)?.clone();

        let outcome = match (play.target_player_idx, play.target_card_id) {
            (None, _) => {
                if source.color != WireColor::Red {
                    return Err(ActionError::NotRed(source.id));
                }
                self.tile_mut(seat, source.id)?.revealed = true;
                PlayOutcome::Disposed
            }
            (Some(_), None) => return Err(ActionError::MissingTarget),
            (Some(target_seat), Some(first)) => {
                let mut targets = vec![self.hidden_tile(target_seat, first)?.clone()];
                if play.double_detector {
                    let second = play.second_target_card_id.ok_or(ActionError::MissingTarget)?;
                    if second == first {
                        return Err(ActionError::SameWire(second));
                    }
                    if !self.players[seat].has_double_detector {
                        return Err(ActionError::DetectorUnavailable(seat));
                    }
                    targets.push(self.hidden_tile(target_seat, second)?.clone());
                }
                if let Some(clash) = targets.iter().find(|tile| tile.id == source.id) {
                    return Err(ActionError::SameWire(clash.id));
                }
                if play.double_detector {
                    self.players[seat].has_double_detector = false;
                }
                self.resolve_cut(seat, &source, target_seat, &targets)?
            }
        };

        self.history.push(HistoryEntry::Play {
            play: *play,
            outcome,
        });
        if outcome == PlayOutcome::Exploded {
            self.status = GameStatus::Exploded;
        }
        self.refresh_status();
        Ok(outcome)
    }

    fn resolve_cut(
        &mut self,
        seat: usize,
        source: &WireTile,
        target_seat: usize,
        targets: &[WireTile],
    ) -> Result<PlayOutcome, ActionError> {
        if let Some(hit) = targets.iter().find(|target| source.matches(target)) {
            self.tile_mut(seat, source.id)?.revealed = true;
            self.tile_mut(target_seat, hit.id)?.revealed = true;
            return Ok(PlayOutcome::Cut { target: hit.id });
        }

        match targets.iter().find(|target| !target.color.is_red()) {
            None => Ok(PlayOutcome::Exploded),
            Some(marked) => {
                self.tile_mut(target_seat, marked.id)?.info_token = true;
                self.detonator_dial = self.detonator_dial.saturating_add(1);
                Ok(PlayOutcome::Miss {
                    info_token: Some(marked.id),
                })
            }
        }
    }

    /// True once every seat has placed its opening info token.
    pub fn picks_complete(&self) -> bool {
        self.phase != GamePhase::Picking
            || self.players.iter().enumerate().all(|(seat, _)| {
                self.history
                    .iter()
                    .any(|entry| matches!(entry, HistoryEntry::InfoToken { seat: s, .. } if *s == seat))
            })
    }

    fn hidden_tile(&self, seat: usize, wire: WireId) -> Result<&WireTile, ActionError> {
        let player = self.player(seat).ok_or(ActionError::UnknownSeat(seat))?;
        let tile = player
            .hand
            .find(wire)
            .ok_or(ActionError::UnknownWire { seat, wire })?;
        if tile.revealed {
            return Err(ActionError::AlreadyRevealed(wire));
        }
        Ok(tile)
    }

    fn tile_mut(&mut self, seat: usize, wire: WireId) -> Result<&mut WireTile, ActionError> {
        self.player_mut(seat)
            .ok_or(ActionError::UnknownSeat(seat))?
            .hand
            .find_mut(wire)
            .ok_or(ActionError::UnknownWire { seat, wire })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hand::Hand;
    use crate::model::player::{Player, PlayerKind};

    fn table() -> GameState {
        let players = vec![
            Player::new(
                0,
                "ai",
                PlayerKind::Ai,
                Hand::with_tiles(vec![
                    WireTile::blue(1, 3),
                    WireTile::red(2, 5),
                    WireTile::blue(3, 7),
                ]),
            )
            .with_double_detector(true),
            Player::new(
                1,
                "other",
                PlayerKind::Human,
                Hand::with_tiles(vec![
                    WireTile::blue(10, 3),
                    WireTile::red(11, 6),
                    WireTile::blue(12, 9),
                ]),
            ),
        ];
        let mut state = GameState::from_hands(
            players,
            Vec::new(),
            vec![WireTile::red(2, 5), WireTile::red(11, 6)],
        );
        state.set_detonator_limit(3);
        state
    }

    #[test]
    fn matching_cut_reveals_both_wires() {
        let mut state = table();
        let outcome = state
            .apply_play(&PlayMove::cut(0, WireId(1), 1, WireId(10)))
            .unwrap();
        assert_eq!(outcome, PlayOutcome::Cut { target: WireId(10) });
        assert!(state.tile(0, WireId(1)).unwrap().revealed);
        assert!(state.tile(1, WireId(10)).unwrap().revealed);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn miss_marks_target_and_advances_dial() {
        let mut state = table();
        let outcome = state
            .apply_play(&PlayMove::cut(0, WireId(3), 1, WireId(12)))
            .unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::Miss {
                info_token: Some(WireId(12))
            }
        );
        assert!(state.tile(1, WireId(12)).unwrap().info_token);
        assert_eq!(state.detonator_dial(), 1);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn cutting_red_target_explodes() {
        let mut state = table();
        let outcome = state
            .apply_play(&PlayMove::cut(0, WireId(3), 1, WireId(11)))
            .unwrap();
        assert_eq!(outcome, PlayOutcome::Exploded);
        assert_eq!(state.status(), GameStatus::Exploded);
        assert_eq!(
            state.apply_play(&PlayMove::cut(0, WireId(1), 1, WireId(10))),
            Err(ActionError::GameOver)
        );
    }

    #[test]
    fn solo_cut_requires_red_source() {
        let mut state = table();
        assert_eq!(
            state.apply_play(&PlayMove::solo(0, WireId(1))),
            Err(ActionError::NotRed(WireId(1)))
        );
        assert_eq!(
            state.apply_play(&PlayMove::solo(0, WireId(2))),
            Ok(PlayOutcome::Disposed)
        );
    }

    #[test]
    fn double_detector_is_consumed_and_hits_either_target() {
        let mut state = table();
        let play = PlayMove::double(0, WireId(1), 1, WireId(12), WireId(10));
        assert_eq!(
            state.apply_play(&play),
            Ok(PlayOutcome::Cut { target: WireId(10) })
        );
        assert!(!state.player(0).unwrap().has_double_detector);

        let again = PlayMove::double(0, WireId(3), 1, WireId(12), WireId(11));
        assert_eq!(
            state.apply_play(&again),
            Err(ActionError::DetectorUnavailable(0))
        );
    }

    #[test]
    fn defused_once_every_non_red_wire_is_cut() {
        let mut state = table();
        state
            .apply_play(&PlayMove::cut(0, WireId(1), 1, WireId(10)))
            .unwrap();
        for tile in [WireId(3), WireId(12)] {
            let seat = if tile == WireId(3) { 0 } else { 1 };
            state.tile_mut(seat, tile).unwrap().revealed = true;
        }
        state.refresh_status();
        assert_eq!(state.status(), GameStatus::Defused);
    }

    #[test]
    fn info_token_only_on_hidden_blue_wires() {
        let mut state = table();
        assert_eq!(
            state.place_info_token(0, WireId(2)),
            Err(ActionError::NotBlue(WireId(2)))
        );
        state.place_info_token(0, WireId(3)).unwrap();
        assert_eq!(
            state.place_info_token(0, WireId(3)),
            Err(ActionError::AlreadyKnown(WireId(3)))
        );
        assert_eq!(
            state.place_info_token(4, WireId(3)),
            Err(ActionError::UnknownSeat(4))
        );
    }

    #[test]
    fn dial_reaching_limit_explodes() {
        let mut state = table();
        state.set_detonator_limit(1);
        state
            .apply_play(&PlayMove::cut(0, WireId(3), 1, WireId(12)))
            .unwrap();
        assert_eq!(state.status(), GameStatus::Exploded);
    }
}
