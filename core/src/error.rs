use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "Invalid configuration: {height}x{width} with {mines} mines (need at least 1 mine and one safe cell)"
    )]
    InvalidConfiguration {
        height: Coord,
        width: Coord,
        mines: CellCount,
    },
    #[error("Coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds { row: Coord, col: Coord },
}

pub type Result<T> = core::result::Result<T, GameError>;
