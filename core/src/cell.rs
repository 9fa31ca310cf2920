use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Coord2;

/// Player-visible state of a cell.
///
/// Transitions are `Hidden -> Flagged -> Possible -> Hidden` (cyclic) or
/// `Hidden -> Revealed`, which is terminal until the grid is cleared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    Possible,
}

impl Visibility {
    /// Next state in the secondary-activation cycle, `None` for revealed cells.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Flagged),
            Self::Flagged => Some(Self::Possible),
            Self::Possible => Some(Self::Hidden),
            Self::Revealed => None,
        }
    }
}

/// Presentation state assigned by the loss sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMarker {
    #[default]
    None,
    /// The mine that ended the game.
    Detonated,
    /// Revealed cell whose chord set off a neighboring mine.
    ChordOrigin,
    /// Unflagged mine shown after a loss.
    Mine,
    /// Flag placed on a cell without a mine.
    Misflag,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    is_mine: bool,
    visibility: Visibility,
    marker: CellMarker,
    neighbors: SmallVec<[Coord2; 8]>,
}

impl Cell {
    pub(crate) fn with_neighbors(neighbors: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            neighbors: neighbors.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn marker(&self) -> CellMarker {
        self.marker
    }

    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    /// Whether a mine placer may put a mine here.
    pub fn can_hold_mine(&self) -> bool {
        !self.is_mine && self.visibility != Visibility::Revealed
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        debug_assert!(
            !(is_mine && self.visibility == Visibility::Revealed),
            "revealed cell cannot be armed"
        );
        self.is_mine = is_mine;
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub(crate) fn set_marker(&mut self, marker: CellMarker) {
        self.marker = marker;
    }

    /// Back to a hidden, unarmed cell. Neighbor links are kept.
    pub(crate) fn clear(&mut self) {
        self.is_mine = false;
        self.visibility = Visibility::Hidden;
        self.marker = CellMarker::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_cycle_returns_to_hidden() {
        let mut state = Visibility::Hidden;
        for _ in 0..3 {
            state = state.next_mark().unwrap();
        }
        assert_eq!(state, Visibility::Hidden);
        assert_eq!(Visibility::Revealed.next_mark(), None);
    }

    #[test]
    fn clear_keeps_neighbors() {
        let mut cell = Cell::with_neighbors([(0, 1), (1, 0)]);
        cell.set_mine(true);
        cell.set_visibility(Visibility::Flagged);
        cell.set_marker(CellMarker::Mine);

        cell.clear();

        assert!(!cell.is_mine());
        assert_eq!(cell.visibility(), Visibility::Hidden);
        assert_eq!(cell.marker(), CellMarker::None);
        assert_eq!(cell.neighbors(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn revealed_cell_is_not_eligible_for_mines() {
        let mut cell = Cell::default();
        assert!(cell.can_hold_mine());
        cell.set_visibility(Visibility::Revealed);
        assert!(!cell.can_hold_mine());
    }
}
