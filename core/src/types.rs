use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One grid position, `x` grows to the right and `y` grows downwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies in `[0, width) × [0, height)`.
    pub const fn is_within(self, (width, height): (Coord, Coord)) -> bool {
        self.x < width && self.y < height
    }

    /// Every cell of the clipped 3×3 block centred on this one, the centre included.
    pub fn block(self, bounds: (Coord, Coord)) -> BlockIter {
        BlockIter::new(self, bounds)
    }
}

impl From<(Coord, Coord)> for Cell {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (Coord, Coord) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const DISPLACEMENTS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `cell`, returning a value only when it remains in bounds.
fn apply_delta(cell: Cell, delta: (i32, i32), bounds: (Coord, Coord)) -> Option<Cell> {
    let (dx, dy) = delta;

    let x = cell.x.checked_add_signed(dx.try_into().ok()?)?;
    let y = cell.y.checked_add_signed(dy.try_into().ok()?)?;

    let next = Cell::new(x, y);
    next.is_within(bounds).then_some(next)
}

#[derive(Debug)]
pub struct BlockIter {
    center: Cell,
    bounds: (Coord, Coord),
    index: u8,
}

impl BlockIter {
    fn new(center: Cell, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for BlockIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
