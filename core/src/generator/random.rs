use alloc::vec::Vec;
use rand::seq::SliceRandom;

use super::*;

/// Picks `count` distinct cells uniformly: every cell is listed, the list is shuffled and
/// the first `count` entries become mines.
pub struct RandomMinefieldGenerator<'a, R: ?Sized> {
    count: CellCount,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomMinefieldGenerator<'a, R> {
    pub fn new(count: CellCount, rng: &'a mut R) -> Self {
        Self { count, rng }
    }
}

impl<R: Rng + ?Sized> MinefieldGenerator for RandomMinefieldGenerator<'_, R> {
    fn generate(self, size: (Coord, Coord)) -> Result<Minefield> {
        check_capacity(self.count, size)?;

        if self.count == 0 {
            return Ok(Minefield::new_unchecked(size, HashSet::new()));
        }

        let (width, height) = size;
        let mut cells: Vec<Cell> = (0..width)
            .flat_map(|x| (0..height).map(move |y| Cell::new(x, y)))
            .collect();
        cells.shuffle(self.rng);

        let mines: HashSet<Cell> = cells.into_iter().take(self.count as usize).collect();
        log::debug!(
            "Placed {} random mines on a {}x{} board",
            mines.len(),
            width,
            height
        );
        Ok(Minefield::new_unchecked(size, mines))
    }
}
