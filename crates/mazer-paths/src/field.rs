use mazer_core::{Point, Range};

/// Parent-index sentinel meaning "no predecessor" (the start cell).
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search bookkeeping
// ---------------------------------------------------------------------------

/// Search state for one grid position.
///
/// A cell moves monotonically through undiscovered → open → visited; it is
/// never re-opened once visited, and a visited cell's `g` is final.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Best known cost from the start; `INFINITY` until first discovered.
    pub(crate) g: f64,
    /// Heuristic distance to the goal, computed once at discovery.
    pub(crate) h: f64,
    /// `g + h`, the frontier ordering key.
    pub(crate) f: f64,
    /// Arena index of the predecessor on the best known path.
    pub(crate) parent: usize,
    /// Pending in the frontier.
    pub(crate) open: bool,
    /// Fully expanded; never examined again.
    pub(crate) visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: NO_PARENT,
            open: false,
            visited: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Frontier entries
// ---------------------------------------------------------------------------

/// Reference into the cell arena, ordered for use in `BinaryHeap`.
///
/// Entries pop in ascending `(f, seq)` order: lowest estimated total cost
/// first, ties resolved by insertion sequence so the expansion order is
/// stable and independent of cell identity.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EntryRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) seq: u64,
}

impl PartialEq for EntryRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for EntryRef {}

impl PartialOrd for EntryRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntryRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse both keys so BinaryHeap (a max-heap) pops the smallest
        // (f, seq) first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ---------------------------------------------------------------------------
// SearchField
// ---------------------------------------------------------------------------

/// Owner of the per-cell search state for a grid rectangle.
///
/// The cell arena is allocated once, at construction, and reused across
/// queries; each [`astar_path`](SearchField::astar_path) call resets it to
/// the undiscovered state before expanding.
pub struct SearchField {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) seq: u64,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl SearchField {
    /// Create a new `SearchField` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            cells: vec![Cell::default(); rng.len()],
            seq: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Return all cells to the undiscovered state.
    pub(crate) fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.seq = 0;
    }

    /// Next frontier insertion-sequence number.
    #[inline]
    pub(crate) fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq += 1;
        s
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat arena index. Returns `None` if out of
    /// range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat arena index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        debug_assert!(idx < self.cells.len(), "arena index out of range");
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SearchField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SearchField {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rng = Range::deserialize(deserializer)?;
        Ok(SearchField::new(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn default_cell_is_undiscovered() {
        let c = Cell::default();
        assert!(c.g.is_infinite());
        assert!(c.f.is_infinite());
        assert_eq!(c.parent, NO_PARENT);
        assert!(!c.open);
        assert!(!c.visited);
    }

    #[test]
    fn entries_pop_lowest_f_first() {
        let mut heap = BinaryHeap::new();
        heap.push(EntryRef { idx: 0, f: 3.5, seq: 0 });
        heap.push(EntryRef { idx: 1, f: 1.25, seq: 1 });
        heap.push(EntryRef { idx: 2, f: 2.0, seq: 2 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn equal_f_ties_break_by_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(EntryRef { idx: 7, f: 2.0, seq: 2 });
        heap.push(EntryRef { idx: 5, f: 2.0, seq: 0 });
        heap.push(EntryRef { idx: 6, f: 2.0, seq: 1 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.idx).collect();
        assert_eq!(order, vec![5, 6, 7]);
    }

    #[test]
    fn idx_and_point_round_trip() {
        let sf = SearchField::new(Range::new(0, 0, 4, 3));
        for y in 0..3 {
            for x in 0..4 {
                let p = Point::new(x, y);
                let i = sf.idx(p).unwrap();
                assert_eq!(sf.point(i), p);
            }
        }
        assert_eq!(sf.idx(Point::new(4, 0)), None);
        assert_eq!(sf.idx(Point::new(0, 3)), None);
        assert_eq!(sf.idx(Point::new(-1, -1)), None);
    }

    #[test]
    fn reset_clears_state() {
        let mut sf = SearchField::new(Range::new(0, 0, 2, 2));
        sf.cells[3].g = 1.0;
        sf.cells[3].open = true;
        sf.seq = 9;
        sf.reset();
        assert!(sf.cells[3].g.is_infinite());
        assert!(!sf.cells[3].open);
        assert_eq!(sf.seq, 0);
    }
}
