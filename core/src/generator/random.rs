use super::*;
use alloc::vec::Vec;

/// Uniformly random deal: values are drawn one at a time from a pool holding every pair
/// value twice, removing the drawn entry by position.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDealer {
    seed: u64,
}

impl RandomDealer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckDealer for RandomDealer {
    fn deal(self, config: &GameConfig) -> Result<Deck> {
        use rand::prelude::*;

        config.validate()?;

        let pair_count = config.pair_count();
        let mut pool: Vec<PairValue> = (1..=pair_count).chain(1..=pair_count).collect();
        let mut values = Vec::with_capacity(pool.len());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while !pool.is_empty() {
            let place = rng.random_range(0..pool.len());
            // by position, so the other copy of the same value stays in the pool
            values.push(pool.remove(place));
        }

        if values.len() != usize::from(config.total_cells()) {
            log::warn!(
                "Dealt deck size mismatch, actual: {}, requested: {}",
                values.len(),
                config.total_cells()
            );
        }
        log::debug!("Dealt {} pairs with seed {}", pair_count, self.seed);
        Ok(Deck::from_values_unchecked(config.size, values))
    }
}
