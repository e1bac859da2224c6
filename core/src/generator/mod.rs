use hashbrown::HashSet;
use rand::Rng;

use crate::*;
pub use explicit::*;
pub use random::*;

mod explicit;
mod random;

/// Produces the mine placement of a new game, or fails without side effects.
pub trait MinefieldGenerator {
    fn generate(self, size: (Coord, Coord)) -> Result<Minefield>;
}

/// Board dimensions together with the fixed set of mined cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minefield {
    size: (Coord, Coord),
    mines: HashSet<Cell>,
}

impl Minefield {
    pub(crate) fn new_unchecked(size: (Coord, Coord), mines: HashSet<Cell>) -> Self {
        Self { size, mines }
    }

    /// Runs whichever generator `config` asks for; `rng` is only touched for [`MineSpec::Count`].
    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        match &config.mines {
            MineSpec::Count(count) => RandomMinefieldGenerator::new(*count, rng).generate(config.size()),
            MineSpec::Cells(cells) => ExplicitMinefieldGenerator::new(cells).generate(config.size()),
        }
    }

    pub fn from_cells(size: (Coord, Coord), cells: &[Cell]) -> Result<Self> {
        ExplicitMinefieldGenerator::new(cells).generate(size)
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.mines.iter().copied()
    }

    pub(crate) fn into_parts(self) -> ((Coord, Coord), HashSet<Cell>) {
        (self.size, self.mines)
    }
}

pub(crate) fn check_capacity(mines: CellCount, (width, height): (Coord, Coord)) -> Result<()> {
    let capacity = mult(width, height);
    if mines > capacity {
        Err(GameError::InvalidConfiguration { mines, capacity })
    } else {
        Ok(())
    }
}
