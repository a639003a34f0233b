//! Tilt engine for an N x N sliding-tile board.
//!
//! The pieces, leaves first:
//! - [`Grid`]: cell storage with board-space accessors, no direction logic.
//! - [`Perspective`]: maps board space to "travel space", where every tilt
//!   moves tiles toward the highest row. The tilt engine reads and writes
//!   through a crate-private view built on it.
//! - [`merge_line`]: the per-line compaction and merge pass.
//! - [`tilt`] / [`tilt_par`]: run the line pass over every column of a view.
//! - [`terminal`]: winning-tile and no-move detection.
//!
//! Board space puts (0, 0) in the south-west corner; rows grow northward and
//! columns grow eastward.
//!
//! ```
//! use tilt_2048::engine::{self, Direction, Grid};
//!
//! let mut grid = Grid::from_rows(&[
//!     [0, 0, 0, 0],
//!     [0, 0, 2, 0],
//!     [0, 0, 2, 0],
//!     [0, 0, 0, 0],
//! ]).unwrap();
//! let outcome = engine::tilt(&mut grid, Direction::North);
//! assert!(outcome.changed);
//! assert_eq!(outcome.score, 4);
//! assert_eq!(grid.to_rows()[0], vec![0, 0, 4, 0]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

mod grid;
mod line;
mod perspective;
pub mod terminal;
mod tilt;

pub use grid::Grid;
pub use line::{merge_line, LineOutcome, MergeEvent};
pub use perspective::Perspective;
pub use terminal::{can_tilt, has_any_move, has_winning_tile, is_game_over, legal_directions};
pub use tilt::{tilt, tilt_par, TiltOutcome};

/// Value at which the reference game is won.
pub const WINNING_VALUE: u32 = 2048;

/// Largest value a tile can hold. Tiles of this value never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Edge of the board that tiles travel toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Clockwise quarter turns from north.
    #[inline]
    pub fn turns(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts compass names, arrow-key names and their one-letter forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" | "u" | "up" => Ok(Direction::North),
            "e" | "east" | "r" | "right" => Ok(Direction::East),
            "s" | "south" | "d" | "down" => Ok(Direction::South),
            "w" | "west" | "l" | "left" => Ok(Direction::West),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// Identity of a tile, stable for as long as the tile lives.
///
/// The surviving tile of a merge keeps its id; the absorbed tile's id is retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub(crate) u64);

impl TileId {
    #[inline]
    pub fn raw(self) -> u64 { self.0 }
}

/// A tile on the board: an identity, a power-of-two value and the board-space
/// cell it currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) value: u32,
    pub(crate) col: usize,
    pub(crate) row: usize,
    /// Set once the tile has taken part in a merge during the current tilt.
    pub(crate) merged: bool,
}

impl Tile {
    #[inline]
    pub fn id(&self) -> TileId { self.id }

    #[inline]
    pub fn value(&self) -> u32 { self.value }

    #[inline]
    pub fn col(&self) -> usize { self.col }

    #[inline]
    pub fn row(&self) -> usize { self.row }

    /// `(col, row)` in board space.
    #[inline]
    pub fn position(&self) -> (usize, usize) { (self.col, self.row) }

    /// True if this tile absorbed another one during the most recent tilt.
    ///
    /// Every tilt clears the flags first, including one that finds no move.
    #[inline]
    pub fn merged_this_tilt(&self) -> bool { self.merged }
}

/// True if `value` may sit on the board.
#[inline]
pub fn is_valid_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// True if tiles of values `a` and `b` fuse when pushed together.
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a == b && a < MAX_TILE_VALUE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_directions() {
        assert_eq!("N".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::East);
        assert_eq!(" south ".parse::<Direction>().unwrap(), Direction::South);
        assert_eq!("l".parse::<Direction>().unwrap(), Direction::West);
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(GameError::InvalidDirection("sideways".to_string()))
        );
    }

    #[test]
    fn it_survives_postcard_encoding() {
        for dir in Direction::ALL {
            let bytes = postcard::to_allocvec(&dir).unwrap();
            assert_eq!(bytes, vec![dir.turns() as u8]);
            assert_eq!(postcard::from_bytes::<Direction>(&bytes).unwrap(), dir);
        }
    }

    #[test]
    fn it_counts_turns_clockwise() {
        let turns: Vec<usize> = Direction::ALL.iter().map(|d| d.turns()).collect();
        assert_eq!(turns, vec![0, 1, 2, 3]);
    }

    #[test]
    fn it_validates_values() {
        assert!(is_valid_value(2));
        assert!(is_valid_value(2048));
        assert!(is_valid_value(MAX_TILE_VALUE));
        assert!(!is_valid_value(0));
        assert!(!is_valid_value(1));
        assert!(!is_valid_value(6));
    }

    #[test]
    fn it_refuses_to_merge_past_the_largest_value() {
        assert!(can_merge(4096, 4096));
        assert!(!can_merge(4, 8));
        assert!(!can_merge(MAX_TILE_VALUE, MAX_TILE_VALUE));
    }
}
