#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{BitOr, Index};
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use presenter::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod clock;
mod engine;
mod error;
mod generator;
mod presenter;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid size as `(cols, rows)`.
    pub size: Coord2,
    /// How long a mismatched pair stays face-up before flipping back.
    pub flip_back_ms: u32,
    /// Optional countdown, purely informational.
    pub time_limit_secs: Option<u32>,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (6, 6);
    pub const DEFAULT_FLIP_BACK_MS: u32 = 500;

    pub const fn new_unchecked(size: Coord2, flip_back_ms: u32) -> Self {
        Self {
            size,
            flip_back_ms,
            time_limit_secs: None,
        }
    }

    pub fn new(size: Coord2, flip_back_ms: u32) -> Result<Self> {
        let config = Self::new_unchecked(size, flip_back_ms);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not parse game config: {}", err);
            GameError::MalformedConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub const fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let total = self.total_cells();
        if self.size.0 == 0 || self.size.1 == 0 || total % 2 != 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub const fn flip_back_delay(&self) -> Duration {
        Duration::from_millis(self.flip_back_ms as u64)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .map(|secs| Duration::from_secs(secs.into()))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Maps a pointer position to the cell under it, `None` outside the grid.
    pub fn cell_at_point(&self, x: f32, y: f32, tile_size: f32) -> Option<Coord2> {
        if !(x >= 0.0 && y >= 0.0 && tile_size > 0.0) {
            return None;
        }
        // truncation equals floor for non-negative values
        let col = (x / tile_size) as u32;
        let row = (y / tile_size) as u32;
        if col >= self.size.0.into() || row >= self.size.1.into() {
            return None;
        }
        Some((col as Coord, row as Coord))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_FLIP_BACK_MS)
    }
}

/// Pair values dealt onto the grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    size: Coord2,
    values: Vec<PairValue>,
}

impl Deck {
    /// Builds a deck from explicit row-major values, checking that every value in
    /// `1..=pair_count` appears exactly twice.
    pub fn from_values(size: Coord2, values: Vec<PairValue>) -> Result<Self> {
        let total = usize::from(mult(size.0, size.1));
        if total == 0 || total % 2 != 0 || values.len() != total {
            return Err(GameError::InvalidDeck);
        }

        let pair_count = total / 2;
        let mut seen = vec![0u8; pair_count];
        for &value in &values {
            let slot = usize::from(value)
                .checked_sub(1)
                .filter(|&slot| slot < pair_count)
                .ok_or(GameError::InvalidPairValue)?;
            seen[slot] += 1;
            if seen[slot] > 2 {
                return Err(GameError::InvalidDeck);
            }
        }

        if seen.iter().any(|&count| count != 2) {
            return Err(GameError::InvalidDeck);
        }

        Ok(Self::from_values_unchecked(size, values))
    }

    pub(crate) fn from_values_unchecked(size: Coord2, values: Vec<PairValue>) -> Self {
        Self { size, values }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn values(&self) -> &[PairValue] {
        &self.values
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Index<Coord2> for Deck {
    type Output = PairValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_linear_index(self.size)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Revealed,
    Mismatched,
    Matched,
    Won,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Mismatched => true,
            Matched => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    FlippedBack,
    TimeExpired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl BitOr for TickOutcome {
    type Output = TickOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use TickOutcome::*;
        match (self, rhs) {
            (TimeExpired, _) => TimeExpired,
            (_, TimeExpired) => TimeExpired,
            (FlippedBack, _) => FlippedBack,
            (_, FlippedBack) => FlippedBack,
            (NoChange, NoChange) => NoChange,
        }
    }
}
