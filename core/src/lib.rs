use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use placer::*;
pub use types::*;
pub use view::*;

mod cell;
mod engine;
mod error;
mod grid;
mod placer;
mod types;
mod view;

/// Validated grid dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Fails unless both dimensions are positive and `1 <= mines <= height * width - 1`.
    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        let total_cells = mult(height, width);
        if height == 0 || width == 0 || mines == 0 || mines >= total_cells {
            return Err(GameError::InvalidConfiguration {
                height,
                width,
                mines,
            });
        }
        Ok(Self {
            size: (height, width),
            mines,
        })
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the collaborator has anything to re-render.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether the collaborator has anything to re-render.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord reveals several cells
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_maximum_mines() {
        let config = GameConfig::new(1, 2, 1).unwrap();
        assert_eq!(config.total_cells(), 2);
        assert_eq!(config.safe_cell_count(), 1);
    }

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            GameConfig::new(1, 2, 2),
            Err(GameError::InvalidConfiguration {
                height: 1,
                width: 2,
                mines: 2
            })
        );
    }

    #[test]
    fn config_rejects_degenerate_values() {
        assert!(GameConfig::new(0, 5, 1).is_err());
        assert!(GameConfig::new(5, 0, 1).is_err());
        assert!(GameConfig::new(5, 5, 0).is_err());
        assert!(GameConfig::new(1, 1, 1).is_err());
    }

    #[test]
    fn reveal_outcome_merge_prefers_hit_mine() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
