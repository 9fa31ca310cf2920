use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Arena of cells laid out row-major, with adjacency wired once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Allocates `height * width` hidden, unarmed cells.
    ///
    /// Each cell is linked to every in-bounds cell at row±1, col±1; the links never
    /// change afterwards.
    pub fn new(height: Coord, width: Coord) -> Self {
        let size = (height, width);
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // shape dims come from `Coord` so the casts are lossless
            let coords = (row as Coord, col as Coord);
            Cell::with_neighbors(NeighborIter::new(coords, size))
        });
        Self { cells }
    }

    /// Builds an armed grid with mines at exactly `mine_coords`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size.0, size.1);
        for &coords in mine_coords {
            grid.cell_at_mut(coords)?.set_mine(true);
        }
        Ok(grid)
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (height, width) = self.cells.dim();
        (height as Coord, width as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (height, width) = self.size();
        if coords.0 < height && coords.1 < width {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn cell_at_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self[coords])
    }

    /// Arms the cell at `coords` if it can hold a mine, returning whether it was armed.
    pub fn arm(&mut self, coords: Coord2) -> Result<bool> {
        let cell = self.cell_at_mut(coords)?;
        if cell.can_hold_mine() {
            cell.set_mine(true);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Live count of mines among the neighbors of `coords`, which must be in bounds.
    pub(crate) fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self[coords]
            .neighbors()
            .iter()
            .filter(|&&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn count_mines(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine()).count() as CellCount
    }

    pub fn count_with(&self, visibility: Visibility) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.visibility() == visibility)
            .count() as CellCount
    }

    /// Resets every cell to hidden and unarmed.
    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }

    /// Iterates `(coords, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Coord2, &mut Cell)> {
        self.cells
            .indexed_iter_mut()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
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
