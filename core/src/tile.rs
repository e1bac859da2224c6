use serde::{Deserialize, Serialize};

/// Player-visible state of one cell, as drawn by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Mine, only shown once the game is lost.
    Mine,
    Marked,
    Closed,
    /// Opened cell with the number of mines around it.
    Open(u8),
}

impl Tile {
    pub const fn symbol(self) -> char {
        match self {
            Self::Mine => '*',
            Self::Marked => '?',
            Self::Closed => '-',
            Self::Open(0) => '.',
            Self::Open(count) => (b'0' + count) as char,
        }
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Marked)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Closed
    }
}
