use alloc::vec::Vec;

use super::*;

/// Places mines at a known list of cells, used to replay or reproduce a board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinePlacer {
    mine_coords: Vec<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(mine_coords: &[Coord2]) -> Self {
        Self {
            mine_coords: mine_coords.to_vec(),
        }
    }
}

impl MinePlacer for FixedMinePlacer {
    fn place(self, grid: &mut Grid, mine_count: CellCount, exclude: Coord2) -> Result<()> {
        if !grid.contains(exclude) || self.mine_coords.iter().any(|&c| !grid.contains(c)) {
            return Err(GameError::OutOfBounds);
        }
        let mut unique = self.mine_coords.clone();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() != self.mine_coords.len()
            || unique.len() != usize::from(mine_count)
            || unique.contains(&exclude)
            || unique.iter().any(|&coords| grid[coords] != Cell::Hidden)
        {
            return Err(GameError::InvalidMineCount);
        }

        for coords in unique {
            grid[coords] = Cell::HiddenMine;
        }
        Ok(())
    }
}
