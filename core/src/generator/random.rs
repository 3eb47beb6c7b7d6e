use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Spreads mines uniformly over every hidden cell except the excluded one.
///
/// Uses a partial Fisher-Yates shuffle of the eligible cells, so the running time only depends on the board size and
/// never on how crowded the board is. The same seed on the same board always yields the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinePlacer {
    seed: u64,
}

impl RandomMinePlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomMinePlacer {
    fn place(self, grid: &mut Grid, mine_count: CellCount, exclude: Coord2) -> Result<()> {
        if !grid.contains(exclude) {
            return Err(GameError::OutOfBounds);
        }

        let mut eligible: Vec<Coord2> = grid
            .iter()
            .filter(|&(coords, cell)| coords != exclude && cell == Cell::Hidden)
            .map(|(coords, _)| coords)
            .collect();
        let mine_count = usize::from(mine_count);
        if mine_count > eligible.len() {
            log::warn!(
                "Cannot place {} mines, only {} eligible cells",
                mine_count,
                eligible.len()
            );
            return Err(GameError::InvalidMineCount);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..mine_count {
            let pick = rng.random_range(i..eligible.len());
            eligible.swap(i, pick);
        }

        for &coords in &eligible[..mine_count] {
            grid[coords] = Cell::HiddenMine;
        }
        log::debug!("Placed {} mines, kept {:?} safe", mine_count, exclude);
        Ok(())
    }
}
