use core::num::Saturating;
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Progress of the current turn.
///
/// A turn resolves as soon as the second cell is revealed: a match goes straight back to
/// [`TurnState::Idle`], a mismatch locks input until the flip-back delay has passed.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurnState {
    Idle,
    OneRevealed {
        first: Coord2,
    },
    LockedMismatch {
        first: Coord2,
        second: Coord2,
        since: Duration,
    },
}

impl TurnState {
    pub const fn accepts_input(self) -> bool {
        !matches!(self, Self::LockedMismatch { .. })
    }

    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairsEngine {
    config: GameConfig,
    deck: Deck,
    board: Array2<CellState>,
    turn: TurnState,
    matched_pairs: Saturating<CellCount>,
    won: bool,
    time_expired: bool,
    now: Duration,
    hovered: Option<Coord2>,
}

impl PairsEngine {
    pub fn new(mut config: GameConfig, deck: Deck) -> Self {
        if config.size != deck.size() {
            log::warn!(
                "Deck size {:?} overrides configured size {:?}",
                deck.size(),
                config.size
            );
            config.size = deck.size();
        }
        Self {
            config,
            board: Array2::default(deck.size().to_nd_index()),
            deck,
            turn: Default::default(),
            matched_pairs: Saturating(0),
            won: false,
            time_expired: false,
            now: Duration::ZERO,
            // pointer tracking starts on the top-left cell
            hovered: Some((0, 0)),
        }
    }

    pub fn deal(config: GameConfig, dealer: impl DeckDealer) -> Result<Self> {
        let deck = dealer.deal(&config)?;
        Ok(Self::new(config, deck))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.deck.size()
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn accepts_input(&self) -> bool {
        self.turn.accepts_input()
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    /// Value of a cell the player can currently see, `None` while it is face-down.
    pub fn face_value(&self, coords: Coord2) -> Option<PairValue> {
        self.cell_at(coords)
            .is_visible()
            .then(|| self.deck[coords])
    }

    pub fn pair_count(&self) -> CellCount {
        self.deck.pair_count()
    }

    pub fn matched_pairs(&self) -> CellCount {
        self.matched_pairs.0
    }

    pub fn remaining_cells(&self) -> CellCount {
        self.deck.total_cells() - self.matched_pairs.0 * 2
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_time_expired(&self) -> bool {
        self.time_expired
    }

    /// Latest time seen by [`Self::tick`].
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn hovered(&self) -> Option<Coord2> {
        self.hovered
    }

    pub fn click(&mut self, coords: Coord2, out: &mut impl Presenter) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        let coords = self.deck.validate_coords(coords)?;

        let first = match self.turn {
            TurnState::LockedMismatch { .. } => {
                log::trace!("click at {:?} ignored, waiting for flip-back", coords);
                return Ok(NoChange);
            }
            TurnState::Idle => None,
            TurnState::OneRevealed { first } => Some(first),
        };

        if self.board[coords.to_nd_index()] != CellState::FaceDown {
            return Ok(NoChange);
        }

        let value = self.deck[coords];
        self.board[coords.to_nd_index()] = CellState::FaceUp;
        out.reveal_cell(coords, value);
        log::debug!("reveal {:?}: {}", coords, value);

        let Some(first) = first else {
            out.play_sound(Sound::Select);
            self.turn = TurnState::OneRevealed { first: coords };
            return Ok(Revealed);
        };

        if self.deck[first] == value {
            return Ok(self.resolve_match(first, coords, out));
        }

        out.play_sound(Sound::Select);
        self.turn = TurnState::LockedMismatch {
            first,
            second: coords,
            since: self.now,
        };
        log::debug!("mismatch {:?} / {:?}, locked at {:?}", first, coords, self.now);
        Ok(Mismatched)
    }

    pub fn tick(&mut self, now: Duration, out: &mut impl Presenter) -> TickOutcome {
        use TickOutcome::*;

        if now < self.now {
            log::warn!("tick went backwards from {:?} to {:?}", self.now, now);
        } else {
            self.now = now;
        }

        let mut outcome = NoChange;

        if let TurnState::LockedMismatch {
            first,
            second,
            since,
        } = self.turn
        {
            if self.now.saturating_sub(since) > self.config.flip_back_delay() {
                self.board[first.to_nd_index()] = CellState::FaceDown;
                self.board[second.to_nd_index()] = CellState::FaceDown;
                out.hide_cell(first);
                out.hide_cell(second);
                self.turn = TurnState::Idle;
                log::trace!("flipped back {:?} / {:?}", first, second);
                outcome = outcome | FlippedBack;
            }
        }

        if let Some(limit) = self.config.time_limit() {
            if !self.time_expired && !self.won && self.now >= limit {
                self.time_expired = true;
                out.time_expired();
                log::debug!("time limit of {:?} reached", limit);
                outcome = outcome | TimeExpired;
            }
        }

        outcome
    }

    /// Tracks the cell under the pointer, returns whether a hover sound was requested.
    ///
    /// `None` means the pointer left the grid, the last hovered cell is kept.
    pub fn hover(&mut self, coords: Option<Coord2>, out: &mut impl Presenter) -> Result<bool> {
        let Some(coords) = coords else {
            return Ok(false);
        };
        let coords = self.deck.validate_coords(coords)?;

        if self.hovered == Some(coords) {
            return Ok(false);
        }

        self.hovered = Some(coords);
        out.play_sound(Sound::Hover);
        Ok(true)
    }

    fn resolve_match(
        &mut self,
        first: Coord2,
        second: Coord2,
        out: &mut impl Presenter,
    ) -> ClickOutcome {
        self.board[first.to_nd_index()] = CellState::Matched;
        self.board[second.to_nd_index()] = CellState::Matched;
        self.turn = TurnState::Idle;

        out.play_sound(Sound::Match);
        self.matched_pairs += 1;
        out.mark_matched(first, second);
        out.score_changed(self.matched_pairs(), self.remaining_cells());
        log::debug!(
            "matched {:?} / {:?}, {} of {} pairs",
            first,
            second,
            self.matched_pairs(),
            self.pair_count()
        );

        if self.matched_pairs() == self.pair_count() && !self.won {
            self.won = true;
            out.game_won();
            ClickOutcome::Won
        } else {
            ClickOutcome::Matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[rustfmt::skip]
    const LAYOUT: [PairValue; 36] = [
        5, 5, 1, 1, 2, 2,
        3, 3, 4, 4, 6, 6,
        7, 7, 9, 8, 8, 10,
        9, 10, 11, 11, 12, 12,
        13, 13, 14, 14, 15, 15,
        16, 16, 17, 17, 18, 18,
    ];

    fn engine_with(config: GameConfig) -> PairsEngine {
        let dealer = FixedDealer::new((6, 6), LAYOUT.to_vec()).unwrap();
        PairsEngine::deal(config, dealer).unwrap()
    }

    fn engine() -> PairsEngine {
        engine_with(GameConfig::default())
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn pairs_of(engine: &PairsEngine) -> Vec<(Coord2, Coord2)> {
        let cells: Vec<_> = iter_cells(engine.size()).collect();
        let mut pairs = Vec::new();
        for (i, &first) in cells.iter().enumerate() {
            for &second in &cells[i + 1..] {
                if engine.deck[first] == engine.deck[second] {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }

    #[test]
    fn first_click_reveals_and_selects() {
        let mut engine = engine();
        let mut events = Vec::new();

        let outcome = engine.click((0, 0), &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::Revealed);
        assert_eq!(engine.turn(), TurnState::OneRevealed { first: (0, 0) });
        assert_eq!(engine.cell_at((0, 0)), CellState::FaceUp);
        assert_eq!(
            events,
            [GameEvent::Reveal((0, 0), 5), GameEvent::Sound(Sound::Select)]
        );
    }

    #[test]
    fn clicking_the_same_cell_again_does_nothing() {
        let mut engine = engine();
        engine.click((0, 0), &mut ()).unwrap();
        let mut events = Vec::new();

        let outcome = engine.click((0, 0), &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::NoChange);
        assert!(events.is_empty());
        assert_eq!(engine.turn(), TurnState::OneRevealed { first: (0, 0) });
    }

    #[test]
    fn equal_values_become_matched() {
        let mut engine = engine();
        let mut events = Vec::new();

        engine.click((0, 0), &mut events).unwrap();
        events.clear();
        let outcome = engine.click((1, 0), &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::Matched);
        assert_eq!(engine.cell_at((0, 0)), CellState::Matched);
        assert_eq!(engine.cell_at((1, 0)), CellState::Matched);
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.remaining_cells(), 34);
        assert_eq!(engine.turn(), TurnState::Idle);
        assert!(!engine.is_won());
        assert_eq!(
            events,
            [
                GameEvent::Reveal((1, 0), 5),
                GameEvent::Sound(Sound::Match),
                GameEvent::Matched((0, 0), (1, 0)),
                GameEvent::Score {
                    matched_pairs: 1,
                    remaining_cells: 34
                },
            ]
        );
    }

    #[test]
    fn matched_cells_never_flip_back() {
        let mut engine = engine();
        engine.click((0, 0), &mut ()).unwrap();
        engine.click((1, 0), &mut ()).unwrap();
        let mut events = Vec::new();

        assert_eq!(engine.tick(ms(10_000), &mut events), TickOutcome::NoChange);
        assert_eq!(engine.click((0, 0), &mut events).unwrap(), ClickOutcome::NoChange);

        assert!(events.is_empty());
        assert_eq!(engine.cell_at((0, 0)), CellState::Matched);
        assert_eq!(engine.cell_at((1, 0)), CellState::Matched);
    }

    #[test]
    fn mismatch_locks_input_until_flip_back() {
        let mut engine = engine();
        let mut events = Vec::new();

        engine.click((0, 0), &mut events).unwrap();
        let outcome = engine.click((2, 2), &mut events).unwrap();

        assert_eq!(outcome, ClickOutcome::Mismatched);
        assert_eq!(
            engine.turn(),
            TurnState::LockedMismatch {
                first: (0, 0),
                second: (2, 2),
                since: Duration::ZERO
            }
        );
        assert_eq!(
            events[2..],
            [GameEvent::Reveal((2, 2), 9), GameEvent::Sound(Sound::Select)]
        );

        events.clear();
        assert_eq!(engine.click((5, 5), &mut events).unwrap(), ClickOutcome::NoChange);
        assert_eq!(engine.tick(ms(300), &mut events), TickOutcome::NoChange);
        assert_eq!(engine.cell_at((5, 5)), CellState::FaceDown);
        assert_eq!(engine.cell_at((0, 0)), CellState::FaceUp);
        assert!(events.is_empty());

        assert_eq!(engine.tick(ms(600), &mut events), TickOutcome::FlippedBack);
        assert_eq!(engine.cell_at((0, 0)), CellState::FaceDown);
        assert_eq!(engine.cell_at((2, 2)), CellState::FaceDown);
        assert_eq!(engine.turn(), TurnState::Idle);
        assert_eq!(events, [GameEvent::Hide((0, 0)), GameEvent::Hide((2, 2))]);

        assert_eq!(engine.click((5, 5), &mut ()).unwrap(), ClickOutcome::Revealed);
    }

    #[test]
    fn flip_back_needs_strictly_more_than_the_delay() {
        let mut engine = engine();
        engine.tick(ms(10_000), &mut ());
        engine.click((0, 0), &mut ()).unwrap();
        engine.click((2, 2), &mut ()).unwrap();

        assert_eq!(engine.tick(ms(10_500), &mut ()), TickOutcome::NoChange);
        assert_eq!(engine.tick(ms(10_501), &mut ()), TickOutcome::FlippedBack);
    }

    #[test]
    fn ticks_going_backwards_do_not_rewind_the_clock() {
        let mut engine = engine();
        engine.tick(ms(1_000), &mut ());
        engine.tick(ms(200), &mut ());

        assert_eq!(engine.now(), ms(1_000));
    }

    #[test]
    fn winning_fires_exactly_once() {
        let mut engine = engine();
        let mut events = Vec::new();
        let pairs = pairs_of(&engine);
        assert_eq!(pairs.len(), 18);

        let mut outcomes = Vec::new();
        for &(first, second) in &pairs {
            engine.click(first, &mut events).unwrap();
            outcomes.push(engine.click(second, &mut events).unwrap());
        }

        assert!(outcomes[..17].iter().all(|&o| o == ClickOutcome::Matched));
        assert_eq!(outcomes[17], ClickOutcome::Won);
        assert!(engine.is_won());
        assert_eq!(engine.matched_pairs(), 18);
        assert_eq!(engine.remaining_cells(), 0);

        for &(first, second) in &pairs {
            engine.click(first, &mut events).unwrap();
            engine.click(second, &mut events).unwrap();
        }
        engine.tick(ms(5_000), &mut events);

        let wins = events.iter().filter(|&&e| e == GameEvent::Won).count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn time_limit_expires_once_and_does_not_end_the_game() {
        let mut engine = engine_with(GameConfig::default().with_time_limit(2));
        let mut events = Vec::new();

        assert_eq!(engine.tick(ms(1_000), &mut events), TickOutcome::NoChange);
        assert_eq!(engine.tick(ms(2_000), &mut events), TickOutcome::TimeExpired);
        assert_eq!(engine.tick(ms(3_000), &mut events), TickOutcome::NoChange);

        assert_eq!(events, [GameEvent::TimeExpired]);
        assert!(engine.is_time_expired());
        assert_eq!(engine.click((0, 0), &mut ()).unwrap(), ClickOutcome::Revealed);
    }

    #[test]
    fn hover_sounds_only_on_cell_change() {
        let mut engine = engine();
        let mut events = Vec::new();

        assert!(engine.hover(Some((1, 1)), &mut events).unwrap());
        assert!(!engine.hover(Some((1, 1)), &mut events).unwrap());
        assert!(!engine.hover(None, &mut events).unwrap());
        assert!(!engine.hover(Some((1, 1)), &mut events).unwrap());
        assert!(engine.hover(Some((2, 1)), &mut events).unwrap());

        assert_eq!(events, vec![GameEvent::Sound(Sound::Hover); 2]);
        assert_eq!(engine.hovered(), Some((2, 1)));
        assert_eq!(engine.turn(), TurnState::Idle);
    }

    #[test]
    fn first_hover_on_the_origin_is_silent() {
        let mut engine = engine();
        let mut events = Vec::new();

        assert!(!engine.hover(Some((0, 0)), &mut events).unwrap());
        assert!(engine.hover(Some((0, 1)), &mut events).unwrap());
        assert!(engine.hover(Some((0, 0)), &mut events).unwrap());

        assert_eq!(events, vec![GameEvent::Sound(Sound::Hover); 2]);
    }

    #[test]
    fn time_limit_is_skipped_once_the_game_is_won() {
        let config = GameConfig::new((2, 1), 500).unwrap().with_time_limit(1);
        let deck = Deck::from_values((2, 1), vec![1, 1]).unwrap();
        let mut engine = PairsEngine::new(config, deck);
        let mut events = Vec::new();

        engine.click((0, 0), &mut events).unwrap();
        assert_eq!(engine.click((1, 0), &mut events).unwrap(), ClickOutcome::Won);
        events.clear();

        assert_eq!(engine.tick(ms(5_000), &mut events), TickOutcome::NoChange);
        assert!(!engine.is_time_expired());
        assert!(events.is_empty());
    }

    #[test]
    fn out_of_grid_coords_are_rejected() {
        let mut engine = engine();

        assert_eq!(engine.click((6, 0), &mut ()), Err(GameError::InvalidCoords));
        assert_eq!(engine.hover(Some((0, 6)), &mut ()), Err(GameError::InvalidCoords));
    }

    #[test]
    fn face_value_hides_face_down_cells() {
        let mut engine = engine();

        assert_eq!(engine.face_value((0, 0)), None);
        engine.click((0, 0), &mut ()).unwrap();
        assert_eq!(engine.face_value((0, 0)), Some(5));
        assert_eq!(engine.face_value((1, 0)), None);
    }

    #[test]
    fn deck_size_overrides_config_size() {
        let config = GameConfig::new((2, 2), 500).unwrap();
        let deck = Deck::from_values((2, 1), vec![1, 1]).unwrap();

        let engine = PairsEngine::new(config, deck);

        assert_eq!(engine.size(), (2, 1));
        assert_eq!(engine.config().size, (2, 1));
        assert_eq!(engine.pair_count(), 1);
    }
}
