use log::trace;
use rayon::prelude::*;

use super::line::{merge_line, LineOutcome, MergeEvent};
use super::terminal::has_any_move;
use super::{Direction, Grid};

/// Aggregate result of one tilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TiltOutcome {
    /// True if any tile moved, merged or disappeared.
    pub changed: bool,
    /// Sum of the doubled values over every merge.
    pub score: u64,
    pub merges: Vec<MergeEvent>,
}

impl TiltOutcome {
    fn absorb(&mut self, line: LineOutcome) {
        self.changed |= line.changed;
        self.score += line.score;
        self.merges.extend(line.merges);
    }
}

/// Slide and merge every tile toward `direction`, one line at a time.
///
/// A board with no legal move is left untouched and reports no change; no
/// perspective is activated for it.
pub fn tilt(grid: &mut Grid, direction: Direction) -> TiltOutcome {
    let mut outcome = TiltOutcome::default();
    grid.reset_merge_flags();
    if !has_any_move(grid) {
        return outcome;
    }

    let mut view = grid.travel(direction);
    for tc in 0..view.size() {
        let line = merge_line(view.line(tc));
        if line.changed {
            trace!("{direction} line {tc}: +{} from {} merges", line.score, line.merges.len());
            view.write_line(tc, &line.cells);
        }
        outcome.absorb(line);
    }
    outcome
}

/// Same result as [`tilt`], with the line pass fanned out over rayon.
///
/// Lines never share cells, so snapshots are taken up front, merged in
/// parallel and written back in column order.
pub fn tilt_par(grid: &mut Grid, direction: Direction) -> TiltOutcome {
    let mut outcome = TiltOutcome::default();
    grid.reset_merge_flags();
    if !has_any_move(grid) {
        return outcome;
    }

    let mut view = grid.travel(direction);
    let snapshots: Vec<_> = (0..view.size()).map(|tc| view.line(tc)).collect();
    let lines: Vec<LineOutcome> = snapshots.into_par_iter().map(merge_line).collect();
    for (tc, line) in lines.into_iter().enumerate() {
        if line.changed {
            trace!("{direction} line {tc}: +{} from {} merges", line.score, line.merges.len());
            view.write_line(tc, &line.cells);
        }
        outcome.absorb(line);
    }
    outcome
}
