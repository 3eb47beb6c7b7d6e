use sapper_core::{GameError, SessionId};
use sapper_protocol::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No stored session {0}")]
    NotFound(SessionId),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("Session store lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),
    /// Also what a finished game turns into, since it is deleted once it ends
    #[error("Game {0} not found")]
    GameNotFound(SessionId),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::GameNotFound(id),
            err => Self::Store(err),
        }
    }
}

pub type Result<T> = core::result::Result<T, ServiceError>;
