use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid must have a positive, even number of cells")]
    InvalidConfig,
    #[error("Config could not be parsed")]
    MalformedConfig,
    #[error("Deck must hold every pair value exactly twice")]
    InvalidDeck,
    #[error("Pair value out of range")]
    InvalidPairValue,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
