use std::collections::BinaryHeap;

use mazer_core::Point;

use crate::SearchField;
use crate::field::{EntryRef, NO_PARENT};
use crate::traits::AstarPather;

impl SearchField {
    /// Compute a shortest-cost path from `from` to `to` using A*.
    ///
    /// Returns the full path (both endpoints included) or `None` if no path
    /// exists within the field's range.
    ///
    /// Termination policy: the search returns as soon as the goal is
    /// discovered as a neighbor of the cell being expanded, rather than
    /// waiting for the goal itself to be extracted from the frontier. The
    /// goal therefore never enters the frontier.
    ///
    /// Cost improvements to an already-open cell are handled by lazy
    /// deletion: the cell is updated in place and a fresh frontier entry is
    /// pushed; superseded entries are detected on pop and skipped.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        self.reset();

        // Initialise the start cell.
        {
            let cell = &mut self.cells[start_idx];
            cell.g = 0.0;
            cell.h = pather.estimate(from, to);
            cell.f = cell.h;
            cell.parent = NO_PARENT;
            cell.open = true;
        }

        let mut open: BinaryHeap<EntryRef> = BinaryHeap::new();
        let f = self.cells[start_idx].f;
        let seq = self.next_seq();
        open.push(EntryRef {
            idx: start_idx,
            f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip entries superseded by a cheaper re-insertion or belonging
            // to an already expanded cell.
            if self.cells[ci].visited || !self.cells[ci].open {
                continue;
            }
            self.cells[ci].open = false;

            let current_g = self.cells[ci].g;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };

                // Discovering the goal adjacent to the expanded cell ends
                // the search.
                if ni == goal_idx {
                    self.cells[ni].parent = ci;
                    break 'search true;
                }

                if self.cells[ni].visited {
                    continue;
                }

                let tentative_g = current_g + pather.cost(cp, np);
                let cell = &mut self.cells[ni];
                if cell.open {
                    // The heuristic is fixed per cell; only a cheaper route
                    // supersedes the pending entry.
                    let tentative_f = tentative_g + cell.h;
                    if tentative_f < cell.f {
                        cell.g = tentative_g;
                        cell.f = tentative_f;
                        cell.parent = ci;
                        let seq = self.next_seq();
                        open.push(EntryRef {
                            idx: ni,
                            f: tentative_f,
                            seq,
                        });
                    }
                } else {
                    cell.g = tentative_g;
                    cell.h = pather.estimate(np, to);
                    cell.f = tentative_g + cell.h;
                    cell.parent = ci;
                    cell.open = true;
                    let f = cell.f;
                    let seq = self.next_seq();
                    open.push(EntryRef { idx: ni, f, seq });
                }
            }

            self.cells[ci].visited = true;
        };

        self.nbuf = nbuf;

        if !found {
            return None;
        }

        // Reconstruct by walking backpointers from the goal.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.cells[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}
