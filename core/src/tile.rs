use serde::{Deserialize, Serialize};

/// Canonical state of a grid cell stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    FaceDown,
    FaceUp,
    Matched,
}

impl CellState {
    /// Whether the player can see the cell's value.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::FaceUp | Self::Matched)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::FaceDown
    }
}
