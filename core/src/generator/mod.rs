use crate::*;
use alloc::vec::Vec;
pub use random::*;

mod random;

pub trait DeckDealer {
    fn deal(self, config: &GameConfig) -> Result<Deck>;
}

/// Deals a predetermined layout, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedDealer {
    deck: Deck,
}

impl FixedDealer {
    pub fn new(size: Coord2, values: Vec<PairValue>) -> Result<Self> {
        Ok(Self {
            deck: Deck::from_values(size, values)?,
        })
    }
}

impl DeckDealer for FixedDealer {
    fn deal(self, config: &GameConfig) -> Result<Deck> {
        if self.deck.size() != config.size {
            log::warn!(
                "Fixed deck size {:?} differs from configured size {:?}, using the deck",
                self.deck.size(),
                config.size
            );
        }
        Ok(self.deck)
    }
}
