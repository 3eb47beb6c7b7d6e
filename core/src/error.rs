use thiserror::Error;

use crate::CellCode;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Width and height must be between 1 and the supported maximum")]
    InvalidDimensions,
    #[error("Mine count must leave at least one safe cell")]
    InvalidMineCount,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cell is already revealed")]
    CellAlreadyRevealed,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyCompleted,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown cell code {0}")]
    InvalidCellCode(CellCode),
    #[error("Malformed session id")]
    InvalidSessionId,
}

pub type Result<T> = core::result::Result<T, GameError>;
