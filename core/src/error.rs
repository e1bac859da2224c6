use thiserror::Error;

use crate::{Cell, CellCount};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines: {mines} requested but the board only has {capacity} cells")]
    InvalidConfiguration { mines: CellCount, capacity: CellCount },
    #[error("Mine position {0} is outside the board")]
    InvalidCell(Cell),
    #[error("Cell {0} is outside the board")]
    OutOfBounds(Cell),
}

pub type Result<T> = core::result::Result<T, GameError>;
