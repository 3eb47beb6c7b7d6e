use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    HitMine,
    Won,
}

impl Grid {
    /// Opens the cell at `coords`, flood-filling across zero cells.
    ///
    /// Mines must already be placed. Revealing a cell that is not hidden is an error, never a silent no-op.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        match self.get(coords)? {
            Cell::HiddenMine => {
                // remaining mines stay hidden after a loss
                self[coords] = Cell::ExplodedMine;
                log::debug!("Mine hit at {:?}", coords);
                Ok(RevealOutcome::HitMine)
            }
            Cell::Hidden => {
                let opened = self.flood_fill(coords);
                log::trace!("Opened {} cells from {:?}", opened, coords);

                if self.is_won() {
                    self.disclose_mines();
                    Ok(RevealOutcome::Won)
                } else {
                    Ok(RevealOutcome::Revealed)
                }
            }
            Cell::Revealed(_) | Cell::ExplodedMine | Cell::RevealedMineOnWin => {
                Err(GameError::CellAlreadyRevealed)
            }
        }
    }

    /// True once no safe cell is left hidden; mines may still be hidden at this point.
    pub fn is_won(&self) -> bool {
        !self.iter().any(|(_, cell)| cell == Cell::Hidden)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self[visit_coords] != Cell::Hidden {
                continue;
            }

            let adjacent_mines = self.adjacent_mine_count(visit_coords);
            self[visit_coords] = Cell::Revealed(adjacent_mines);
            opened += 1;

            if adjacent_mines == 0 {
                for pos in self.neighbors(visit_coords) {
                    if self[pos] == Cell::Hidden && visited.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
            }
        }
        opened
    }

    fn disclose_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if self[(row, col)] == Cell::HiddenMine {
                    self[(row, col)] = Cell::RevealedMineOnWin;
                }
            }
        }
    }
}
