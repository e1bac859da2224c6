use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::generator::check_capacity;
use crate::*;

/// How the mines of a new game are chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MineSpec {
    /// Sample this many distinct cells uniformly at random.
    Count(CellCount),
    /// Place mines exactly on these cells, duplicates collapse.
    Cells(Vec<Cell>),
}

/// Parameters of one game: board dimensions and mine placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: MineSpec,
}

impl GameConfig {
    pub const fn with_count(width: Coord, height: Coord, count: CellCount) -> Self {
        Self {
            width,
            height,
            mines: MineSpec::Count(count),
        }
    }

    pub fn with_cells(width: Coord, height: Coord, cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            width,
            height,
            mines: MineSpec::Cells(cells.into_iter().collect()),
        }
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.width, self.height)
    }

    pub const fn capacity(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Checks the mine placement against the board without generating anything.
    pub fn validate(&self) -> Result<()> {
        match &self.mines {
            MineSpec::Count(count) => check_capacity(*count, self.size()),
            MineSpec::Cells(cells) => Minefield::from_cells(self.size(), cells).map(drop),
        }
    }
}
