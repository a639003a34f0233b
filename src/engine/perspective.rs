use super::{Direction, Grid, Tile};
use crate::error::{GameError, Result};

/// Coordinate mapping between board space and travel space.
///
/// In travel space the active direction always points toward the highest row,
/// so a single "slide north" pass serves all four directions. The mapping for
/// `k` clockwise quarter turns rotates the board `k` times counter-clockwise
/// about its centre, which carries the target edge to the top.
///
/// Both mappings reject coordinates off the board:
///
/// ```
/// use tilt_2048::engine::{Direction, Perspective};
/// use tilt_2048::GameError;
///
/// let east = Perspective::new(Direction::East, 4);
/// assert_eq!(east.to_travel(3, 2), Ok((1, 3)));
/// assert_eq!(east.to_board(1, 3), Ok((3, 2)));
/// assert_eq!(east.to_travel(9, 9), Err(GameError::OutOfBounds { col: 9, row: 9, size: 4 }));
/// ```
///
/// Writing through a perspective is reserved to the tilt engine; a grid
/// cannot be rotated from outside the crate:
///
/// ```compile_fail
/// use tilt_2048::engine::{Direction, Grid};
///
/// let mut grid = Grid::from_rows(&[[0, 0], [2, 0]]).unwrap();
/// let mut view = grid.travel(Direction::North);
/// let t = view.line(0)[0];
/// view.write_line(0, &[t, t]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective {
    direction: Direction,
    size: usize,
}

impl Perspective {
    pub fn new(direction: Direction, size: usize) -> Self {
        Perspective { direction, size }
    }

    /// The north-facing mapping, where travel space equals board space.
    pub fn identity(size: usize) -> Self {
        Perspective::new(Direction::North, size)
    }

    #[inline]
    pub fn direction(&self) -> Direction { self.direction }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    fn check(&self, col: usize, row: usize) -> Result<()> {
        if col < self.size && row < self.size {
            Ok(())
        } else {
            Err(GameError::OutOfBounds { col, row, size: self.size })
        }
    }

    /// Board `(col, row)` to travel `(tc, tr)`.
    pub fn to_travel(&self, col: usize, row: usize) -> Result<(usize, usize)> {
        self.check(col, row)?;
        Ok(self.rotate_in(col, row))
    }

    /// Travel `(tc, tr)` back to board `(col, row)`.
    pub fn to_board(&self, tc: usize, tr: usize) -> Result<(usize, usize)> {
        self.check(tc, tr)?;
        Ok(self.rotate_out(tc, tr))
    }

    // Unchecked forms; callers stay inside `0..size`.
    #[inline]
    fn rotate_in(&self, col: usize, row: usize) -> (usize, usize) {
        let last = self.size - 1;
        (0..self.direction.turns()).fold((col, row), |(c, r), _| (last - r, c))
    }

    #[inline]
    fn rotate_out(&self, tc: usize, tr: usize) -> (usize, usize) {
        let last = self.size - 1;
        (0..self.direction.turns()).fold((tc, tr), |(c, r), _| (r, last - c))
    }
}

/// A grid seen through an active [`Perspective`].
///
/// Holding the view is what "activating" a direction means: every read and
/// write goes through the mapping while it lives, and dropping it leaves the
/// grid back in plain board space. Storage is never reordered.
pub(crate) struct TravelView<'a> {
    grid: &'a mut Grid,
    perspective: Perspective,
}

impl Grid {
    /// Activate the perspective for `direction` over this grid.
    pub(crate) fn travel(&mut self, direction: Direction) -> TravelView<'_> {
        let perspective = Perspective::new(direction, self.size());
        TravelView { grid: self, perspective }
    }
}

impl<'a> TravelView<'a> {
    #[inline]
    pub(crate) fn size(&self) -> usize { self.perspective.size }

    /// Tile at travel `(tc, tr)`.
    #[inline]
    pub(crate) fn get(&self, tc: usize, tr: usize) -> Option<&Tile> {
        let (col, row) = self.perspective.rotate_out(tc, tr);
        self.grid.get(col, row)
    }

    /// Snapshot of travel column `tc`, indexed by travel row.
    pub(crate) fn line(&self, tc: usize) -> Vec<Option<Tile>> {
        (0..self.size()).map(|tr| self.get(tc, tr).copied()).collect()
    }

    /// Overwrite travel column `tc` with `cells` (indexed by travel row).
    ///
    /// `cells` must be a rearrangement of that same column: the only writer is
    /// the line pass, which never duplicates a tile.
    pub(crate) fn write_line(&mut self, tc: usize, cells: &[Option<Tile>]) {
        debug_assert_eq!(cells.len(), self.size());
        for (tr, cell) in cells.iter().enumerate() {
            let (col, row) = self.perspective.rotate_out(tc, tr);
            self.grid.put(col, row, *cell);
        }
    }
}
