//! Rules engine for single-player Minesweeper.
//!
//! A [`Minesweeper`] owns one rectangular board: the mines are fixed when the game is
//! created, the player opens and marks cells, and the engine tracks victory, defeat and
//! the elapsed time. [`Minesweeper::render`] gives a textual snapshot of what the player
//! sees; drawing it and reading input are left to the embedder.
//!
//! ```
//! use sweeper_core::*;
//!
//! let config = GameConfig::with_cells(3, 3, [Cell::new(2, 2)]);
//! let mut game = Minesweeper::new(&config, 0)?;
//!
//! assert_eq!(game.open(Cell::new(0, 0))?, OpenOutcome::Won);
//! assert_eq!(game.render(), ["...", ".11", ".1-"]);
//! # Ok::<(), GameError>(())
//! ```

#![no_std]

extern crate alloc;

pub use board::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod clock;
mod config;
mod engine;
mod error;
mod generator;
mod tile;
mod types;
