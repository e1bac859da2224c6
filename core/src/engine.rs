use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Victory
/// - InProgress -> Defeat
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No cell has been opened or marked yet
    NotStarted,
    InProgress,
    /// Every safe cell is open
    Victory,
    /// A mine was opened
    Defeat,
}

impl GameStatus {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// The game ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Marked,
    Unmarked,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    /// Number of cells opened, the flood fill included
    Opened(CellCount),
    Exploded,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One row per `y`, one symbol per `x`, top row first.
pub type RenderedField = Vec<String>;

/// A single Minesweeper game, from first click to victory or defeat.
///
/// The mine sampler `R` and the wall clock `C` are injected so games can be replayed
/// deterministically. The engine does no locking of its own; share it between threads
/// behind a mutex.
#[derive(Clone, Debug)]
pub struct Minesweeper<R = SmallRng, C = SystemClock> {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    started_at: u64,
    finished_at: u64,
    rng: R,
    clock: C,
}

impl Minesweeper {
    /// Game on the system clock, random mines are drawn from a PRNG seeded with `seed`.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self> {
        Self::with_parts(config, SmallRng::seed_from_u64(seed), SystemClock)
    }
}

impl<R: Rng, C: Clock> Minesweeper<R, C> {
    pub fn with_parts(config: &GameConfig, mut rng: R, clock: C) -> Result<Self> {
        let minefield = Minefield::from_config(config, &mut rng)?;
        Ok(Self {
            config: config.clone(),
            board: Board::new(minefield),
            status: Default::default(),
            started_at: 0,
            finished_at: 0,
            rng,
            clock,
        })
    }

    /// Replaces the whole game with a fresh one.
    ///
    /// The new configuration is validated first, on error the current game is left untouched.
    pub fn new_game(&mut self, config: &GameConfig) -> Result<()> {
        let minefield = Minefield::from_config(config, &mut self.rng)?;
        log::debug!(
            "New {}x{} game with {} mines",
            config.width,
            config.height,
            minefield.mine_count()
        );

        self.config = config.clone();
        self.board = Board::new(minefield);
        self.status = GameStatus::NotStarted;
        self.started_at = 0;
        self.finished_at = 0;
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.board.size()
    }

    pub fn width(&self) -> Coord {
        self.board.width()
    }

    pub fn height(&self) -> Coord {
        self.board.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn marked_count(&self) -> CellCount {
        self.board.marked_count()
    }

    pub fn closed_count(&self) -> CellCount {
        self.board.closed_count()
    }

    /// How many mines have not been marked yet, negative when over-marked
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.board.marked_count())
    }

    /// Toggle the mark on a cell, open cells can be marked too
    pub fn mark(&mut self, cell: Cell) -> Result<MarkOutcome> {
        let cell = self.board.validate_cell(cell)?;

        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }
        self.mark_started();

        Ok(if self.board.toggle_mark(cell) {
            MarkOutcome::Marked
        } else {
            MarkOutcome::Unmarked
        })
    }

    /// Open a cell, cascading through cells without adjacent mines
    pub fn open(&mut self, cell: Cell) -> Result<OpenOutcome> {
        let cell = self.board.validate_cell(cell)?;

        if self.status.is_finished() || self.board.is_marked(cell) || self.board.is_opened(cell) {
            return Ok(OpenOutcome::NoChange);
        }
        self.mark_started();

        if self.board.is_mine(cell) {
            log::debug!("Opened mine at {}", cell);
            self.end_game(GameStatus::Defeat);
            return Ok(OpenOutcome::Exploded);
        }

        let opened = self.flood_open(cell);
        log::debug!("Opened {} cells from {}", opened, cell);

        if self.board.all_safe_opened() {
            self.end_game(GameStatus::Victory);
            Ok(OpenOutcome::Won)
        } else {
            Ok(OpenOutcome::Opened(opened))
        }
    }

    /// Breadth-first reveal from `seed`; cells leave the closed set when they are queued,
    /// so none is queued twice. Marked cells stop the cascade.
    fn flood_open(&mut self, seed: Cell) -> CellCount {
        let bounds = self.board.size();
        let mut to_visit = VecDeque::from([seed]);
        self.board.open(seed);
        let mut opened = 1;

        while let Some(current) = to_visit.pop_front() {
            if self.board.adjacent_mine_count(current) != 0 {
                continue;
            }

            for neighbor in current.block(bounds) {
                if self.board.is_closed(neighbor) && !self.board.is_marked(neighbor) {
                    self.board.open(neighbor);
                    to_visit.push_back(neighbor);
                    opened += 1;
                    log::trace!("Flood opened cell at {}", neighbor);
                }
            }
        }

        opened
    }

    /// Seconds since the first move, frozen once the game is over
    pub fn elapsed_secs(&self) -> u64 {
        match self.status {
            GameStatus::NotStarted => 0,
            GameStatus::InProgress => {
                let now = self.clock.now();
                now.checked_sub(self.started_at).unwrap_or_else(|| {
                    log::warn!(
                        "Clock went backwards, now {} is before start {}",
                        now,
                        self.started_at
                    );
                    0
                })
            }
            GameStatus::Victory | GameStatus::Defeat => self.finished_at - self.started_at,
        }
    }

    /// What the player sees at `cell`
    pub fn tile_at(&self, cell: Cell) -> Result<Tile> {
        let cell = self.board.validate_cell(cell)?;
        Ok(self.tile(cell))
    }

    fn tile(&self, cell: Cell) -> Tile {
        if self.status == GameStatus::Defeat && self.board.is_mine(cell) {
            Tile::Mine
        } else if self.board.is_marked(cell) {
            Tile::Marked
        } else if self.board.is_closed(cell) {
            Tile::Closed
        } else {
            Tile::Open(self.board.adjacent_mine_count(cell))
        }
    }

    pub fn render(&self) -> RenderedField {
        let (width, height) = self.board.size();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| self.tile(Cell::new(x, y)).symbol())
                    .collect()
            })
            .collect()
    }

    /// Checks if the game is yet to start and starts it, recording the start time
    fn mark_started(&mut self) {
        if self.status == GameStatus::NotStarted {
            self.started_at = self.clock.now();
            self.status = GameStatus::InProgress;
            log::debug!("started at {}", self.started_at);
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        self.finished_at = self.clock.now().max(self.started_at);
        self.status = status;
        log::debug!("ended at {} with {:?}", self.finished_at, status);
    }
}

impl<R: Rng, C: Clock> fmt::Display for Minesweeper<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    type TestGame = Minesweeper<SmallRng, ManualClock>;

    fn game(size: (Coord, Coord), mines: &[(Coord, Coord)]) -> (TestGame, ManualClock) {
        let clock = ManualClock::new(1_000);
        let config = GameConfig::with_cells(size.0, size.1, mines.iter().map(|&m| Cell::from(m)));
        let engine =
            Minesweeper::with_parts(&config, SmallRng::seed_from_u64(0), clock.clone()).unwrap();
        (engine, clock)
    }

    fn cell(x: Coord, y: Coord) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn opening_the_only_safe_cell_wins() {
        let (mut engine, _) = game((1, 2), &[(0, 0)]);

        assert_eq!(engine.open(cell(0, 1)).unwrap(), OpenOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Victory);
        assert_eq!(engine.closed_count(), 1);
        assert_eq!(engine.render(), ["-", "1"]);
    }

    #[test]
    fn opening_a_mine_loses_and_shows_mines() {
        let (mut engine, _) = game((3, 2), &[(0, 0), (2, 1)]);

        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Exploded);
        assert_eq!(engine.status(), GameStatus::Defeat);
        assert!(engine.board().is_closed(cell(0, 0)));
        assert_eq!(engine.closed_count(), 6);
        assert_eq!(engine.render(), ["*--", "--*"]);
    }

    #[test]
    fn flood_fill_opens_the_zero_region() {
        let (mut engine, _) = game((3, 3), &[(2, 2)]);

        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Won);
        assert_eq!(engine.closed_count(), 1);
        assert!(engine.board().is_closed(cell(2, 2)));
        assert_eq!(engine.render(), ["...", ".11", ".1-"]);
    }

    #[test]
    fn flood_fill_stops_at_numbers() {
        let (mut engine, _) = game((5, 1), &[(2, 0)]);

        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Opened(2));
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.render(), [".1---"]);
    }

    #[test]
    fn opening_a_number_opens_only_that_cell() {
        let (mut engine, _) = game((3, 3), &[(0, 0)]);

        assert_eq!(engine.open(cell(1, 1)).unwrap(), OpenOutcome::Opened(1));
        assert_eq!(engine.render(), ["---", "-1-", "---"]);
    }

    #[test]
    fn marked_cell_blocks_open_and_victory() {
        let (mut engine, _) = game((3, 3), &[(2, 2)]);

        assert_eq!(engine.mark(cell(1, 1)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Opened(7));
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.render(), ["...", ".?1", ".1-"]);

        assert_eq!(engine.open(cell(1, 1)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(engine.mark(cell(1, 1)).unwrap(), MarkOutcome::Unmarked);
        assert_eq!(engine.open(cell(1, 1)).unwrap(), OpenOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Victory);
    }

    #[test]
    fn marked_cell_is_skipped_by_the_cascade() {
        let (mut engine, _) = game((4, 1), &[]);

        engine.mark(cell(2, 0)).unwrap();
        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Opened(2));
        assert_eq!(engine.render(), ["..?-"]);
    }

    #[test]
    fn mark_twice_restores_unmarked() {
        let (mut engine, _) = game((2, 2), &[(0, 0)]);

        assert_eq!(engine.mark(cell(1, 0)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.mines_left(), 0);
        assert_eq!(engine.mark(cell(1, 0)).unwrap(), MarkOutcome::Unmarked);
        assert!(!engine.board().is_marked(cell(1, 0)));
        assert_eq!(engine.marked_count(), 0);
        assert_eq!(engine.mines_left(), 1);
    }

    #[test]
    fn open_cells_can_be_marked() {
        let (mut engine, _) = game((4, 1), &[(1, 0)]);

        assert_eq!(engine.open(cell(0, 0)).unwrap(), OpenOutcome::Opened(1));
        assert_eq!(engine.mark(cell(0, 0)).unwrap(), MarkOutcome::Marked);
        assert_eq!(engine.tile_at(cell(0, 0)).unwrap(), Tile::Marked);
        assert!(engine.board().is_opened(cell(0, 0)));
    }

    #[test]
    fn reopening_changes_nothing() {
        let (mut engine, _) = game((3, 3), &[(0, 0)]);

        engine.open(cell(1, 1)).unwrap();
        let before = engine.render();
        let closed = engine.closed_count();

        assert_eq!(engine.open(cell(1, 1)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(engine.render(), before);
        assert_eq!(engine.closed_count(), closed);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let (mut engine, _) = game((2, 2), &[]);

        assert_eq!(engine.open(cell(2, 0)), Err(GameError::OutOfBounds(cell(2, 0))));
        assert_eq!(engine.mark(cell(0, 2)), Err(GameError::OutOfBounds(cell(0, 2))));
        assert_eq!(engine.tile_at(cell(5, 5)), Err(GameError::OutOfBounds(cell(5, 5))));
        assert_eq!(engine.status(), GameStatus::NotStarted);
    }

    #[test]
    fn finished_game_ignores_moves() {
        let (mut engine, _) = game((2, 2), &[(0, 0)]);

        engine.open(cell(0, 0)).unwrap();
        assert_eq!(engine.open(cell(1, 1)).unwrap(), OpenOutcome::NoChange);
        assert_eq!(engine.mark(cell(1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(engine.closed_count(), 4);
        assert_eq!(engine.marked_count(), 0);
        // out of bounds is still reported after the game ends
        assert!(engine.open(cell(9, 9)).is_err());
    }

    #[test]
    fn elapsed_time_follows_the_game() {
        let (mut engine, clock) = game((3, 1), &[(2, 0)]);

        clock.advance(50);
        assert_eq!(engine.elapsed_secs(), 0);

        engine.mark(cell(2, 0)).unwrap();
        assert_eq!(engine.status(), GameStatus::InProgress);
        clock.advance(7);
        assert_eq!(engine.elapsed_secs(), 7);

        clock.advance(3);
        engine.mark(cell(2, 0)).unwrap();
        engine.open(cell(2, 0)).unwrap();
        assert_eq!(engine.status(), GameStatus::Defeat);
        assert_eq!(engine.elapsed_secs(), 10);

        clock.advance(100);
        assert_eq!(engine.elapsed_secs(), 10);
    }

    #[test]
    fn clock_going_backwards_reports_zero() {
        let (mut engine, clock) = game((2, 1), &[]);

        engine.mark(cell(0, 0)).unwrap();
        clock.set(10);
        assert_eq!(engine.elapsed_secs(), 0);
    }

    #[test]
    fn new_game_replaces_everything() {
        let (mut engine, clock) = game((2, 2), &[(0, 0)]);
        engine.mark(cell(1, 1)).unwrap();
        engine.open(cell(0, 0)).unwrap();
        clock.advance(5);

        engine
            .new_game(&GameConfig::with_cells(4, 1, [cell(3, 0)]))
            .unwrap();

        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert_eq!(engine.elapsed_secs(), 0);
        assert_eq!(engine.size(), (4, 1));
        assert_eq!(engine.mine_count(), 1);
        assert_eq!(engine.marked_count(), 0);
        assert_eq!(engine.closed_count(), 4);
        assert_eq!(engine.render(), ["----"]);
    }

    #[test]
    fn failed_new_game_keeps_the_current_game() {
        let (mut engine, _) = game((3, 3), &[(0, 0)]);
        engine.open(cell(1, 1)).unwrap();
        let before = engine.render();

        let err = engine
            .new_game(&GameConfig::with_count(2, 2, 5))
            .unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidConfiguration {
                mines: 5,
                capacity: 4
            }
        );
        assert_eq!(engine.size(), (3, 3));
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(engine.render(), before);

        let err = engine
            .new_game(&GameConfig::with_cells(2, 2, [cell(2, 0)]))
            .unwrap_err();
        assert_eq!(err, GameError::InvalidCell(cell(2, 0)));
        assert_eq!(engine.config().size(), (3, 3));
    }

    #[test]
    fn random_game_from_seed() {
        let config = GameConfig::with_count(9, 9, 10);

        let engine = Minesweeper::new(&config, 42).unwrap();

        assert_eq!(engine.mine_count(), 10);
        assert_eq!(engine.closed_count(), 81);
        assert!(engine.board().mines().all(|m| engine.board().is_in_bounds(m)));
    }

    #[test]
    fn too_many_mines_fail_construction() {
        let result = Minesweeper::new(&GameConfig::with_count(3, 3, 10), 0);

        assert!(matches!(
            result,
            Err(GameError::InvalidConfiguration { mines: 10, capacity: 9 })
        ));
    }

    #[test]
    fn display_prints_rows() {
        let (mut engine, _) = game((3, 2), &[(2, 1)]);
        engine.open(cell(0, 0)).unwrap();

        assert_eq!(engine.to_string(), ".1-\n.1-\n");
    }

    #[test]
    fn empty_board_renders_nothing() {
        let (engine, _) = game((0, 0), &[]);

        assert!(engine.render().is_empty());
        assert!(engine.board().all_safe_opened());
    }
}
