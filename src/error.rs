use thiserror::Error;

/// Everything a caller can get wrong when driving a session.
///
/// None of these are fatal to the session: the offending call is rejected
/// and the board is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cell ({col}, {row}) is already occupied")]
    Occupied { col: usize, row: usize },
    #[error("cell ({col}, {row}) is outside a {size}x{size} board")]
    OutOfBounds { col: usize, row: usize, size: usize },
    #[error("tile value {0} is not a power of two >= 2")]
    InvalidValue(u32),
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("raw board row {row} has {len} cells, expected {expected}")]
    NotSquare { expected: usize, row: usize, len: usize },
    #[error("winning value {0} is not a power of two >= 2")]
    InvalidWinningValue(u32),
    #[error("unknown direction {0:?}")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
