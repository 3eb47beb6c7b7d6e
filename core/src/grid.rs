use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Rectangular board of [`Cell`]s, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let width = checked_dimension(width)?;
        let height = checked_dimension(height)?;
        Ok(Self::with_size((height, width)))
    }

    pub(crate) fn with_size(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    /// Board size as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, row: i32, col: i32) -> Result<Coord2> {
        checked_coords(row, col, self.size())
    }

    fn check_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.check_coords(coords)?;
        Ok(self[coords])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.check_coords(coords)?;
        self[coords] = cell.validate()?;
        Ok(())
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn count_cells(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        // a board never holds more than `Coord::MAX²` cells
        self.cells.iter().filter(|&&cell| pred(cell)).count() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(Cell::is_mine)
    }

    /// Encodes the board as `height` rows of `width` cell codes.
    pub fn to_codes(&self) -> Vec<Vec<CellCode>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&cell| cell.code()).collect())
            .collect()
    }

    pub fn from_codes(rows: &[Vec<CellCode>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(GameError::InvalidBoardShape);
        }
        let size = (
            Coord::try_from(height).map_err(|_| GameError::InvalidDimensions)?,
            Coord::try_from(width).map_err(|_| GameError::InvalidDimensions)?,
        );

        let mut grid = Self::with_size(size);
        for (row, codes) in rows.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                grid.cells[[row, col]] = Cell::from_code(code)?;
            }
        }
        Ok(grid)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "[{}]", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
