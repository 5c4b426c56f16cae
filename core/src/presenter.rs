use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Sound effects the engine asks the frontend to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Hover,
    Select,
    Match,
}

/// Receiver for everything the engine wants shown or played.
///
/// All methods default to doing nothing so a frontend only implements what it renders.
pub trait Presenter {
    fn reveal_cell(&mut self, _coords: Coord2, _value: PairValue) {}

    fn hide_cell(&mut self, _coords: Coord2) {}

    fn mark_matched(&mut self, _first: Coord2, _second: Coord2) {}

    fn play_sound(&mut self, _sound: Sound) {}

    fn score_changed(&mut self, _matched_pairs: CellCount, _remaining_cells: CellCount) {}

    fn game_won(&mut self) {}

    fn time_expired(&mut self) {}
}

/// Discards every event.
impl Presenter for () {}

/// Presenter calls as plain values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Reveal(Coord2, PairValue),
    Hide(Coord2),
    Matched(Coord2, Coord2),
    Sound(Sound),
    Score {
        matched_pairs: CellCount,
        remaining_cells: CellCount,
    },
    Won,
    TimeExpired,
}

impl Presenter for Vec<GameEvent> {
    fn reveal_cell(&mut self, coords: Coord2, value: PairValue) {
        self.push(GameEvent::Reveal(coords, value));
    }

    fn hide_cell(&mut self, coords: Coord2) {
        self.push(GameEvent::Hide(coords));
    }

    fn mark_matched(&mut self, first: Coord2, second: Coord2) {
        self.push(GameEvent::Matched(first, second));
    }

    fn play_sound(&mut self, sound: Sound) {
        self.push(GameEvent::Sound(sound));
    }

    fn score_changed(&mut self, matched_pairs: CellCount, remaining_cells: CellCount) {
        self.push(GameEvent::Score {
            matched_pairs,
            remaining_cells,
        });
    }

    fn game_won(&mut self) {
        self.push(GameEvent::Won);
    }

    fn time_expired(&mut self) {
        self.push(GameEvent::TimeExpired);
    }
}
