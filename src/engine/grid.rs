use crate::error::{GameError, Result};

use super::{is_valid_value, Tile, TileId};

/// N x N board of optional tiles, addressed in board space as `(col, row)`.
///
/// Every tile stored here records the cell it occupies; the grid rewrites that
/// position on each placement so the two never disagree.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
    next_id: u64,
}

impl Grid {
    /// An empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize(size));
        }
        Ok(Grid { size, cells: vec![None; size * size], next_id: 0 })
    }

    /// Build a board from a matrix of values (0 = empty), listed the way the
    /// board is drawn: the first row is the north edge, columns run west to east.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut grid = Grid::new(size)?;
        for (idx, raw) in rows.iter().enumerate() {
            let raw = raw.as_ref();
            if raw.len() != size {
                return Err(GameError::NotSquare { expected: size, row: idx, len: raw.len() });
            }
            let row = size - 1 - idx;
            for (col, &value) in raw.iter().enumerate() {
                if value != 0 {
                    grid.add_tile(value, col, row)?;
                }
            }
        }
        Ok(grid)
    }

    /// Inverse of [`Grid::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .rev()
            .map(|row| (0..self.size).map(|col| self.get(col, row).map_or(0, |t| t.value)).collect())
            .collect()
    }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    #[inline]
    pub fn in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size
    }

    fn check(&self, col: usize, row: usize) -> Result<usize> {
        if self.in_bounds(col, row) {
            Ok(row * self.size + col)
        } else {
            Err(GameError::OutOfBounds { col, row, size: self.size })
        }
    }

    /// The tile at `(col, row)`, rejecting coordinates off the board.
    pub fn tile(&self, col: usize, row: usize) -> Result<Option<&Tile>> {
        let idx = self.check(col, row)?;
        Ok(self.cells[idx].as_ref())
    }

    /// Unchecked lookup for internal scans: off-board reads as empty.
    #[inline]
    pub(crate) fn get(&self, col: usize, row: usize) -> Option<&Tile> {
        if self.in_bounds(col, row) { self.cells[row * self.size + col].as_ref() } else { None }
    }

    /// Place a new tile. Fails if the cell is taken, off the board, or `value`
    /// is not a power of two >= 2.
    pub fn add_tile(&mut self, value: u32, col: usize, row: usize) -> Result<TileId> {
        let idx = self.check(col, row)?;
        if !is_valid_value(value) {
            return Err(GameError::InvalidValue(value));
        }
        if self.cells[idx].is_some() {
            return Err(GameError::Occupied { col, row });
        }
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.cells[idx] = Some(Tile { id, value, col, row, merged: false });
        Ok(id)
    }

    /// Take the tile at `(col, row)` off the board.
    pub fn remove(&mut self, col: usize, row: usize) -> Result<Option<Tile>> {
        let idx = self.check(col, row)?;
        Ok(self.cells[idx].take())
    }

    /// Move a tile without merging. The destination must be empty.
    ///
    /// Returns `false` if there was nothing to move.
    pub fn move_tile(&mut self, from: (usize, usize), to: (usize, usize)) -> Result<bool> {
        let src = self.check(from.0, from.1)?;
        let dst = self.check(to.0, to.1)?;
        if src == dst {
            return Ok(self.cells[src].is_some());
        }
        if self.cells[dst].is_some() {
            return Err(GameError::Occupied { col: to.0, row: to.1 });
        }
        match self.cells[src].take() {
            Some(tile) => {
                self.put(to.0, to.1, Some(tile));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Empty every cell. Tile ids keep counting up so none is ever reused.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Occupied cells in board order: row 0 first, west to east within a row.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    /// Empty cells as `(col, row)`, in board order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| (idx % self.size, idx / self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Highest tile value on the board, if any.
    pub fn highest_tile(&self) -> Option<u32> {
        self.tiles().map(|t| t.value).max()
    }

    /// Write `cell` at `(col, row)` and stamp the tile with its new position.
    #[inline]
    pub(crate) fn put(&mut self, col: usize, row: usize, cell: Option<Tile>) {
        debug_assert!(self.in_bounds(col, row));
        self.cells[row * self.size + col] = cell.map(|mut tile| {
            tile.col = col;
            tile.row = row;
            tile
        });
    }

    pub(crate) fn reset_merge_flags(&mut self) {
        self.cells.iter_mut().flatten().for_each(|tile| tile.merged = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_empty_board() {
        assert_eq!(Grid::new(0).unwrap_err(), GameError::InvalidSize(0));
    }

    #[test]
    fn it_reads_rows_north_first() {
        let grid = Grid::from_rows(&[[0, 2], [4, 0]]).unwrap();
        assert_eq!(grid.tile(1, 1).unwrap().map(|t| t.value()), Some(2));
        assert_eq!(grid.tile(0, 0).unwrap().map(|t| t.value()), Some(4));
        assert!(grid.tile(0, 1).unwrap().is_none());
        assert_eq!(grid.to_rows(), vec![vec![0, 2], vec![4, 0]]);
    }

    #[test]
    fn it_rejects_ragged_rows() {
        let rows: Vec<Vec<u32>> = vec![vec![0, 2], vec![4]];
        assert_eq!(
            Grid::from_rows(&rows).unwrap_err(),
            GameError::NotSquare { expected: 2, row: 1, len: 1 }
        );
    }

    #[test]
    fn it_rejects_occupied_and_out_of_bounds() {
        let mut grid = Grid::new(4).unwrap();
        grid.add_tile(2, 1, 1).unwrap();
        assert_eq!(grid.add_tile(4, 1, 1), Err(GameError::Occupied { col: 1, row: 1 }));
        assert_eq!(grid.add_tile(2, 4, 0), Err(GameError::OutOfBounds { col: 4, row: 0, size: 4 }));
        assert_eq!(grid.tile(0, 7).unwrap_err(), GameError::OutOfBounds { col: 0, row: 7, size: 4 });
        assert_eq!(grid.add_tile(3, 0, 0), Err(GameError::InvalidValue(3)));
        assert_eq!(grid.tiles().count(), 1);
    }

    #[test]
    fn it_tracks_positions_on_move() {
        let mut grid = Grid::new(4).unwrap();
        let id = grid.add_tile(8, 0, 0).unwrap();
        assert!(grid.move_tile((0, 0), (3, 2)).unwrap());
        let tile = *grid.tile(3, 2).unwrap().unwrap();
        assert_eq!(tile.id(), id);
        assert_eq!(tile.position(), (3, 2));
        assert!(grid.tile(0, 0).unwrap().is_none());
        assert!(!grid.move_tile((0, 0), (1, 1)).unwrap());
    }

    #[test]
    fn it_refuses_to_move_onto_a_tile() {
        let mut grid = Grid::from_rows(&[[2, 2], [0, 0]]).unwrap();
        assert_eq!(grid.move_tile((0, 1), (1, 1)), Err(GameError::Occupied { col: 1, row: 1 }));
        assert_eq!(grid.to_rows(), vec![vec![2, 2], vec![0, 0]]);
    }

    #[test]
    fn it_counts_and_clears() {
        let mut grid = Grid::from_rows(&[[2, 0, 0], [0, 16, 0], [0, 0, 4]]).unwrap();
        assert_eq!(grid.count_empty(), 6);
        assert_eq!(grid.empty_cells().len(), 6);
        assert_eq!(grid.highest_tile(), Some(16));
        let removed = grid.remove(1, 1).unwrap().unwrap();
        assert_eq!(removed.value(), 16);
        grid.clear();
        assert_eq!(grid.count_empty(), 9);
        assert_eq!(grid.highest_tile(), None);
        let id = grid.add_tile(2, 0, 0).unwrap();
        assert_eq!(id.raw(), 3);
    }
}
