use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of the board, without the hidden deck values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub faces: Array2<Option<PairValue>>,
    pub matched: Array2<bool>,
    pub matched_pairs: CellCount,
    pub remaining_cells: CellCount,
    pub accepts_input: bool,
    pub won: bool,
}

impl BoardView {
    pub fn from_engine(engine: &PairsEngine) -> Self {
        let size = engine.size();
        let mut faces = Array2::from_elem(size.to_nd_index(), None);
        let mut matched = Array2::from_elem(size.to_nd_index(), false);

        for coords in iter_cells(size) {
            faces[coords.to_nd_index()] = engine.face_value(coords);
            matched[coords.to_nd_index()] = engine.cell_at(coords).is_matched();
        }

        Self {
            size,
            faces,
            matched,
            matched_pairs: engine.matched_pairs(),
            remaining_cells: engine.remaining_cells(),
            accepts_input: engine.accepts_input(),
            won: engine.is_won(),
        }
    }

    pub fn face_down_count(&self) -> usize {
        self.faces.iter().filter(|face| face.is_none()).count()
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (self.size.0 as usize, self.size.1 as usize);
        if self.faces.dim() != expected || self.matched.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }
}
