use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer shows for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Possible,
    Revealed(u8),
    /// Revealed cell whose chord lost the game.
    ChordOrigin(u8),
    Mine,
    Detonated,
    Misflag,
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '#',
            Self::Flagged => 'F',
            Self::Possible => '?',
            Self::Revealed(0) => '.',
            Self::Revealed(count) | Self::ChordOrigin(count) => (b'0' + count) as char,
            Self::Mine => '*',
            Self::Detonated => 'X',
            Self::Misflag => '!',
        }
    }
}

/// Snapshot of everything the presentation layer re-renders after a mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub flags_remaining: i32,
    pub revealed_count: CellCount,
    pub phase: Phase,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_engine<P: MinePlacer>(engine: &GameEngine<P>) -> Self {
        let grid = engine.grid();
        let mut cells = Array2::from_elem(grid.size().to_nd_index(), CellView::Hidden);

        for (coords, cell) in grid.iter() {
            cells[coords.to_nd_index()] = match (cell.visibility(), cell.marker()) {
                (_, CellMarker::Detonated) => CellView::Detonated,
                (_, CellMarker::Mine) => CellView::Mine,
                (_, CellMarker::Misflag) => CellView::Misflag,
                (Visibility::Revealed, CellMarker::ChordOrigin) => {
                    CellView::ChordOrigin(grid.adjacent_mine_count(coords))
                }
                (Visibility::Revealed, _) => CellView::Revealed(grid.adjacent_mine_count(coords)),
                (Visibility::Flagged, _) => CellView::Flagged,
                (Visibility::Possible, _) => CellView::Possible,
                (Visibility::Hidden, _) => CellView::Hidden,
            };
        }

        Self {
            size: grid.size(),
            mine_count: engine.mine_count(),
            flags_remaining: engine.flags_remaining(),
            revealed_count: engine.revealed_count(),
            phase: engine.phase(),
            cells,
        }
    }

    pub fn cell_at(&self, (row, col): Coord2) -> Result<CellView> {
        self.cells
            .get([usize::from(row), usize::from(col)])
            .copied()
            .ok_or(GameError::OutOfBounds { row, col })
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> GameEngine {
        let grid = Grid::from_mine_coords(size, mines).unwrap();
        GameEngine::from_grid(grid, RandomMinePlacer::new(0)).unwrap()
    }

    #[test]
    fn from_engine_maps_revealed_and_flagged_cells() {
        let mut engine = engine((2, 2), &[(0, 0)]);

        engine.activate_primary((1, 1)).unwrap();
        engine.activate_secondary((0, 1)).unwrap();
        engine.activate_secondary((1, 0)).unwrap();
        engine.activate_secondary((1, 0)).unwrap();

        let view = engine.view();

        assert_eq!(view.mine_count, 1);
        assert_eq!(view.flags_remaining, 0);
        assert_eq!(view.cell_at((1, 1)).unwrap(), CellView::Revealed(1));
        assert_eq!(view.cell_at((0, 1)).unwrap(), CellView::Flagged);
        assert_eq!(view.cell_at((1, 0)).unwrap(), CellView::Possible);
        assert_eq!(view.cell_at((0, 0)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn cell_at_rejects_out_of_bounds() {
        let view = engine((2, 3), &[(0, 0)]).view();

        assert_eq!(view.cell_at((1, 2)), Ok(CellView::Hidden));
        assert_eq!(
            view.cell_at((2, 0)),
            Err(GameError::OutOfBounds { row: 2, col: 0 })
        );
    }

    #[test]
    fn display_after_win() {
        let mut engine = engine((3, 3), &[(2, 2)]);
        engine.activate_primary((0, 0)).unwrap();

        assert_eq!(engine.view().to_string(), ". . .\n. 1 1\n. 1 #\n");
    }

    #[test]
    fn display_after_loss() {
        let mut engine = engine((3, 3), &[(0, 0), (2, 2)]);
        engine.activate_primary((0, 2)).unwrap();
        engine.activate_secondary((1, 0)).unwrap();
        engine.activate_primary((0, 0)).unwrap();

        assert_eq!(engine.view().to_string(), "X 1 .\n! 2 1\n# # *\n");
    }

    #[test]
    fn serializes_phase() {
        let mut engine = engine((1, 2), &[(0, 0)]);
        engine.activate_primary((0, 1)).unwrap();

        let json = serde_json::to_value(engine.view()).unwrap();

        assert_eq!(json["phase"], "Won");
        assert_eq!(json["revealed_count"], 1);
    }
}
