//! A running game: board, score, best score and change notification.

use std::fmt;
use std::hash::{Hash, Hasher};

use log::{debug, info};
use rand::Rng;

use crate::config::SessionConfig;
use crate::engine::{self, terminal, Direction, Grid, Tile, TileId, TiltOutcome};
use crate::error::Result;

/// Receives a bare "something changed" signal after each visible mutation.
///
/// Any `FnMut()` closure is an observer.
pub trait Observer {
    fn state_changed(&mut self);
}

impl<F: FnMut()> Observer for F {
    fn state_changed(&mut self) {
        self()
    }
}

/// One game of 2048.
///
/// Game over is never stored as independent truth: it is re-derived from the
/// board after every mutation and on every query. Each time the session is
/// found over, `best_score` is raised to at least `score`.
pub struct Session {
    grid: Grid,
    config: SessionConfig,
    score: u64,
    best_score: u64,
    /// Last derived game-over state, kept to spot the transition.
    game_over: bool,
    observer: Option<Box<dyn Observer>>,
}

impl Session {
    /// Empty `size` x `size` board, score 0, default target.
    pub fn new(size: usize) -> Result<Self> {
        Session::with_config(SessionConfig { size, ..SessionConfig::default() })
    }

    pub fn with_config(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.size)?;
        Ok(Session::assemble(grid, config, 0, 0))
    }

    /// Empty board with a carried-over score and best score.
    pub fn with_scores(size: usize, score: u64, best_score: u64) -> Result<Self> {
        let mut session = Session::new(size)?;
        session.score = score;
        session.best_score = best_score;
        Ok(session)
    }

    /// Session over a raw matrix of values (0 = empty), first row north.
    ///
    /// ```
    /// use tilt_2048::{Direction, Session};
    ///
    /// let mut s = Session::from_rows(&[
    ///     [0, 0, 2, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 2, 0],
    ///     [0, 0, 2, 0],
    /// ], 0, 0).unwrap();
    /// assert!(s.tilt(Direction::North));
    /// assert_eq!(s.score(), 4);
    /// assert_eq!(s.grid().to_rows()[1], vec![0, 0, 2, 0]);
    /// ```
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], score: u64, best_score: u64) -> Result<Self> {
        Session::from_rows_with_config(rows, score, best_score, SessionConfig::default())
    }

    /// Like [`Session::from_rows`]; `config.size` is taken from the matrix.
    pub fn from_rows_with_config<R: AsRef<[u32]>>(
        rows: &[R],
        score: u64,
        best_score: u64,
        config: SessionConfig,
    ) -> Result<Self> {
        let grid = Grid::from_rows(rows)?;
        let config = SessionConfig { size: grid.size(), ..config };
        config.validate()?;
        Ok(Session::assemble(grid, config, score, best_score))
    }

    fn assemble(grid: Grid, config: SessionConfig, score: u64, best_score: u64) -> Self {
        let mut session = Session { grid, config, score, best_score, game_over: false, observer: None };
        session.refresh();
        session
    }

    /// Install the change observer, returning the previous one.
    pub fn set_observer<O: Observer + 'static>(&mut self, observer: O) -> Option<Box<dyn Observer>> {
        self.observer.replace(Box::new(observer))
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn Observer>> {
        self.observer.take()
    }

    /// Tile at `(col, row)` in board space.
    pub fn tile_at(&self, col: usize, row: usize) -> Result<Option<Tile>> {
        Ok(self.grid.tile(col, row)?.copied())
    }

    #[inline]
    pub fn size(&self) -> usize { self.grid.size() }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    #[inline]
    pub fn best_score(&self) -> u64 { self.best_score }

    #[inline]
    pub fn config(&self) -> &SessionConfig { &self.config }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn highest_tile(&self) -> Option<u32> { self.grid.highest_tile() }

    pub fn legal_directions(&self) -> Vec<Direction> {
        terminal::legal_directions(&self.grid)
    }

    /// Winning tile on the board, or no move left. Recomputed on every call.
    pub fn is_game_over(&self) -> bool {
        terminal::is_game_over(&self.grid, self.config.winning_value)
    }

    /// Empty the board and reset the score. The best score is kept.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.game_over = false;
        self.refresh();
        self.notify();
    }

    /// Place a tile of `value` at `(col, row)`. Fails if the cell is taken.
    pub fn add_tile(&mut self, value: u32, col: usize, row: usize) -> Result<TileId> {
        let id = self.grid.add_tile(value, col, row)?;
        debug!("added {value} at ({col}, {row})");
        self.refresh();
        self.notify();
        Ok(id)
    }

    /// Drop a 2 (90%) or a 4 (10%) into a random empty cell.
    ///
    /// Returns `None` when the board is full.
    pub fn add_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tile> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (col, row) = empty[rng.gen_range(0..empty.len())];
        let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        self.add_tile(value, col, row).ok()?;
        self.tile_at(col, row).ok().flatten()
    }

    /// Tilt toward `direction`. Returns true iff the board changed.
    pub fn tilt(&mut self, direction: Direction) -> bool {
        self.apply(direction).changed
    }

    /// Tilt toward `direction` and report every merge.
    pub fn apply(&mut self, direction: Direction) -> TiltOutcome {
        let outcome = if self.config.parallel_columns {
            engine::tilt_par(&mut self.grid, direction)
        } else {
            engine::tilt(&mut self.grid, direction)
        };
        self.score += outcome.score;
        debug!(
            "tilt {direction}: changed={} +{} ({} merges), score {}",
            outcome.changed,
            outcome.score,
            outcome.merges.len(),
            self.score
        );
        self.refresh();
        if outcome.changed {
            self.notify();
        }
        outcome
    }

    fn refresh(&mut self) {
        let over = self.is_game_over();
        if over {
            self.best_score = self.best_score.max(self.score);
            if !self.game_over {
                info!("game over: score {}, best {}", self.score, self.best_score);
            }
        }
        self.game_over = over;
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.state_changed();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("rows", &self.grid.to_rows())
            .field("config", &self.config)
            .field("score", &self.score)
            .field("best_score", &self.best_score)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}

/// Canonical text form: rows north to south, four-wide cells, then the score
/// line. Equality and hashing are defined over this rendering.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "[")?;
        for row in self.grid.to_rows() {
            for value in row {
                match value {
                    0 => write!(f, "|    ")?,
                    v => write!(f, "|{v:>4}")?,
                }
            }
            writeln!(f, "|")?;
        }
        let over = if self.is_game_over() { "over" } else { "not over" };
        writeln!(f, "] {} (max: {}) (game is {}) ", self.score, self.best_score, over)
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Session {}

impl Hash for Session {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}
