use hashbrown::HashSet;

use crate::*;

/// Per-cell state of one game: the fixed mines plus the marked and closed sets.
///
/// `closed` starts out as the whole board and only ever shrinks, marking never touches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: (Coord, Coord),
    mines: HashSet<Cell>,
    marked: HashSet<Cell>,
    closed: HashSet<Cell>,
}

impl Board {
    pub fn new(minefield: Minefield) -> Self {
        let (size, mines) = minefield.into_parts();
        let (width, height) = size;
        let mut closed = HashSet::with_capacity(mult(width, height) as usize);
        for y in 0..height {
            for x in 0..width {
                closed.insert(Cell::new(x, y));
            }
        }

        Self {
            size,
            mines,
            marked: HashSet::new(),
            closed,
        }
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.is_within(self.size)
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<Cell> {
        if self.is_in_bounds(cell) {
            Ok(cell)
        } else {
            Err(GameError::OutOfBounds(cell))
        }
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    pub fn is_marked(&self, cell: Cell) -> bool {
        self.marked.contains(&cell)
    }

    pub fn is_closed(&self, cell: Cell) -> bool {
        self.closed.contains(&cell)
    }

    pub fn is_opened(&self, cell: Cell) -> bool {
        !self.is_closed(cell)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn marked_count(&self) -> CellCount {
        self.marked.len() as CellCount
    }

    pub fn closed_count(&self) -> CellCount {
        self.closed.len() as CellCount
    }

    /// Every non-mine cell has been opened.
    pub fn all_safe_opened(&self) -> bool {
        self.closed.len() == self.mines.len()
    }

    /// Mines in the clipped 3×3 block around `cell`, the cell itself included.
    pub fn adjacent_mine_count(&self, cell: Cell) -> u8 {
        cell.block(self.size).filter(|&pos| self.is_mine(pos)).count() as u8
    }

    pub fn mines(&self) -> impl Iterator<Item = Cell> + '_ {
        self.mines.iter().copied()
    }

    pub fn marked(&self) -> impl Iterator<Item = Cell> + '_ {
        self.marked.iter().copied()
    }

    /// Flips the mark on `cell`, returns whether it is marked afterwards.
    pub(crate) fn toggle_mark(&mut self, cell: Cell) -> bool {
        if self.marked.remove(&cell) {
            false
        } else {
            self.marked.insert(cell);
            true
        }
    }

    /// Removes `cell` from the closed set, returns whether it was closed.
    pub(crate) fn open(&mut self, cell: Cell) -> bool {
        self.closed.remove(&cell)
    }
}
