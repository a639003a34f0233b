use super::{can_merge, Tile, TileId};

/// One fusion of two equal tiles during a tilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeEvent {
    /// Tile that stays on the board with its value doubled.
    pub survivor: TileId,
    /// Tile destroyed by the merge.
    pub absorbed: TileId,
    /// Value after doubling, which is also the score payoff.
    pub value: u32,
}

/// Result of sliding one line toward its far end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOutcome {
    /// Post-slide cells, indexed by travel row.
    pub cells: Vec<Option<Tile>>,
    pub score: u64,
    pub changed: bool,
    pub merges: Vec<MergeEvent>,
}

/// Compact and merge one line in travel space.
///
/// `cells` is indexed by travel row; tiles travel toward the last index. Tiles
/// are visited from the far end back, and each one either fuses into the last
/// tile written out (same value, and that tile has not merged yet this tilt)
/// or is written out after it. Of three equal tiles in a row the two nearest
/// the far edge merge and the third stays whole.
pub fn merge_line(cells: Vec<Option<Tile>>) -> LineOutcome {
    let len = cells.len();
    let mut out: Vec<Tile> = Vec::with_capacity(len);
    let mut score = 0u64;
    let mut merges = Vec::new();

    for tile in cells.iter().rev().flatten() {
        match out.last_mut() {
            Some(current) if !current.merged && can_merge(current.value, tile.value) => {
                current.value *= 2;
                current.merged = true;
                score += u64::from(current.value);
                merges.push(MergeEvent { survivor: current.id, absorbed: tile.id, value: current.value });
            }
            _ => out.push(*tile),
        }
    }

    let mut compacted = vec![None; len];
    for (slot, tile) in compacted.iter_mut().rev().zip(out) {
        *slot = Some(tile);
    }
    let changed = cells.iter().zip(&compacted).any(|(before, after)| footprint(before) != footprint(after));

    LineOutcome { cells: compacted, score, changed, merges }
}

#[inline]
fn footprint(cell: &Option<Tile>) -> Option<(TileId, u32)> {
    cell.map(|t| (t.id, t.value))
}
