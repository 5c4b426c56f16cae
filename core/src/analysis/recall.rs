use alloc::collections::BTreeMap;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Autoplayer with perfect memory of every value it has seen.
///
/// It never peeks at face-down values: knowledge comes only from cells the engine has
/// shown face-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecallPlayer {
    seen: BTreeMap<Coord2, PairValue>,
}

/// Summary of a simulated game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayReport {
    pub clicks: u32,
    pub mismatches: u32,
    pub frames: u32,
    pub elapsed: Duration,
    pub won: bool,
}

impl RecallPlayer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn known_cells(&self) -> usize {
        self.seen.len()
    }

    /// Remembers visible values and forgets cells that are matched.
    pub fn observe(&mut self, engine: &PairsEngine) {
        for coords in iter_cells(engine.size()) {
            match engine.cell_at(coords) {
                CellState::Matched => {
                    self.seen.remove(&coords);
                }
                CellState::FaceUp => {
                    if let Some(value) = engine.face_value(coords) {
                        self.seen.insert(coords, value);
                    }
                }
                CellState::FaceDown => {}
            }
        }
    }

    pub fn next_click(&self, engine: &PairsEngine) -> Option<Coord2> {
        if engine.is_won() {
            return None;
        }

        match engine.turn() {
            TurnState::LockedMismatch { .. } => None,
            TurnState::OneRevealed { first } => {
                let value = engine.face_value(first)?;
                self.known_face_down(engine)
                    .find(|&(coords, known)| known == value && coords != first)
                    .map(|(coords, _)| coords)
                    .or_else(|| self.unknown_face_down(engine))
                    .or_else(|| any_face_down(engine))
            }
            TurnState::Idle => self
                .known_pair(engine)
                .or_else(|| self.unknown_face_down(engine))
                .or_else(|| any_face_down(engine)),
        }
    }

    /// Drives `engine` with a fixed frame cadence until the game is won or `max_frames`
    /// have passed, hovering each cell before clicking it.
    pub fn play(
        &mut self,
        engine: &mut PairsEngine,
        frame: Duration,
        max_frames: u32,
        out: &mut impl Presenter,
    ) -> Result<PlayReport> {
        let mut report = PlayReport::default();

        for frame_no in 1..=max_frames {
            let Some(now) = frame.checked_mul(frame_no) else {
                log::warn!("frame {} overflows the clock, stopping", frame_no);
                break;
            };
            engine.tick(now, out);
            report.frames = frame_no;
            report.elapsed = now;

            if engine.is_won() {
                break;
            }

            let Some(coords) = self.next_click(engine) else {
                continue;
            };

            engine.hover(Some(coords), out)?;
            let outcome = engine.click(coords, out)?;
            if outcome.has_update() {
                report.clicks += 1;
            }
            if outcome == ClickOutcome::Mismatched {
                report.mismatches += 1;
            }
            self.observe(engine);
        }

        report.won = engine.is_won();
        log::debug!("autoplay finished: {:?}", report);
        Ok(report)
    }

    fn known_face_down<'a>(
        &'a self,
        engine: &'a PairsEngine,
    ) -> impl Iterator<Item = (Coord2, PairValue)> + 'a {
        self.seen
            .iter()
            .map(|(&coords, &value)| (coords, value))
            .filter(|&(coords, _)| engine.cell_at(coords) == CellState::FaceDown)
    }

    fn known_pair(&self, engine: &PairsEngine) -> Option<Coord2> {
        let mut by_value = BTreeMap::new();
        for (coords, value) in self.known_face_down(engine) {
            if by_value.insert(value, coords).is_some() {
                return Some(coords);
            }
        }
        None
    }

    fn unknown_face_down(&self, engine: &PairsEngine) -> Option<Coord2> {
        iter_cells(engine.size()).find(|coords| {
            engine.cell_at(*coords) == CellState::FaceDown && !self.seen.contains_key(coords)
        })
    }
}

fn any_face_down(engine: &PairsEngine) -> Option<Coord2> {
    iter_cells(engine.size()).find(|&coords| engine.cell_at(coords) == CellState::FaceDown)
}
