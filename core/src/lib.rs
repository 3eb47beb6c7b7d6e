#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod session;
mod types;

/// Board dimensions and mine count of one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Validates the requested game; at least one cell must stay free of mines.
    pub fn new(width: i32, height: i32, mines: i32) -> Result<Self> {
        let width = checked_dimension(width)?;
        let height = checked_dimension(height)?;
        let max_mines = mult(width, height) - 1;
        match CellCount::try_from(mines) {
            Ok(mines) if (1..=max_mines).contains(&mines) => {
                Ok(Self::new_unchecked(width, height, mines))
            }
            _ => Err(GameError::InvalidMineCount),
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Board size as `(rows, cols)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }
}
