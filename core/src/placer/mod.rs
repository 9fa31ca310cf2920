use crate::*;
pub use random::*;

mod random;

/// Arms cells of a grid with mines.
pub trait MinePlacer {
    /// Arms `count` more cells, choosing only cells where [`Cell::can_hold_mine`] holds.
    ///
    /// Returns how many mines were actually placed, which is less than `count` only when
    /// the grid ran out of eligible cells.
    fn place(&mut self, grid: &mut Grid, count: CellCount) -> CellCount;
}
