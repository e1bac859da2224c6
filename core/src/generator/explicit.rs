use super::*;

/// Uses a caller-supplied list of mine cells as-is.
#[derive(Clone, Debug)]
pub struct ExplicitMinefieldGenerator<'a> {
    cells: &'a [Cell],
}

impl<'a> ExplicitMinefieldGenerator<'a> {
    pub fn new(cells: &'a [Cell]) -> Self {
        Self { cells }
    }
}

impl MinefieldGenerator for ExplicitMinefieldGenerator<'_> {
    fn generate(self, size: (Coord, Coord)) -> Result<Minefield> {
        let mines: HashSet<Cell> = self.cells.iter().copied().collect();
        check_capacity(CellCount::try_from(mines.len()).unwrap_or(CellCount::MAX), size)?;

        if let Some(&cell) = self.cells.iter().find(|cell| !cell.is_within(size)) {
            return Err(GameError::InvalidCell(cell));
        }

        Ok(Minefield::new_unchecked(size, mines))
    }
}
