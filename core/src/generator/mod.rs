use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for filling a board with mines once the first move is known.
///
/// Every implementation must leave `exclude` mine-free, this is what makes the first move safe.
pub trait MinePlacer {
    fn place(self, grid: &mut Grid, mine_count: CellCount, exclude: Coord2) -> Result<()>;
}
