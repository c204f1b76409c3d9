//! Maze model: loading, validation, and the pathfinding adapter.
//!
//! A maze file holds one character per cell, all rows the same width, with
//! exactly one `S` (start) and one `G` (goal). Validation happens entirely
//! at load time — the search never sees an inconsistent grid.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use mazer_core::{Point, Range};
use mazer_paths::{AstarPather, Pather, SearchField, WeightedPather, euclidean};

use crate::terrain::Terrain;

/// A rectangular character maze with one start and one goal.
#[derive(Debug)]
pub struct Maze {
    cells: Vec<Terrain>,
    rng: Range,
    start: Point,
    goal: Point,
}

impl Maze {
    /// Load and parse a maze file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a maze from text.
    ///
    /// Every line must have the same width, and exactly one start and one
    /// goal marker must be present.
    pub fn parse(s: &str) -> Result<Self, MazeError> {
        let mut cells = Vec::new();
        let mut width: i32 = -1;
        let mut start = None;
        let mut goal = None;
        let mut y: i32 = 0;

        for line in s.lines() {
            let row_width = line.chars().count() as i32;
            if width < 0 {
                width = row_width;
            } else if row_width != width {
                return Err(MazeError::InconsistentWidth {
                    line: y,
                    expected: width,
                    got: row_width,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y);
                let t = Terrain::from_rune(ch);
                match t {
                    Terrain::Start => {
                        if start.replace(p).is_some() {
                            return Err(MazeError::DuplicateStart(p));
                        }
                    }
                    Terrain::Goal => {
                        if goal.replace(p).is_some() {
                            return Err(MazeError::DuplicateGoal(p));
                        }
                    }
                    _ => {}
                }
                cells.push(t);
            }
            y += 1;
        }

        if width <= 0 || y == 0 {
            return Err(MazeError::Empty);
        }
        let start = start.ok_or(MazeError::MissingStart)?;
        let goal = goal.ok_or(MazeError::MissingGoal)?;
        let rng = Range::new(0, 0, width, y);
        log::debug!(
            "parsed {}x{} maze, start {start}, goal {goal}",
            rng.width(),
            rng.height()
        );
        Ok(Self {
            cells,
            rng,
            start,
            goal,
        })
    }

    /// The maze bounds.
    pub fn bounds(&self) -> Range {
        self.rng
    }

    /// Position of the start marker.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Position of the goal marker.
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Terrain at `p`, or `None` outside the bounds.
    pub fn terrain(&self, p: Point) -> Option<Terrain> {
        if !self.rng.contains(p) {
            return None;
        }
        Some(self.cells[(p.y * self.rng.width() + p.x) as usize])
    }

    /// Sum of the coin values along a path. Non-coin cells contribute 0.
    pub fn coins_along(&self, path: &[Point]) -> u32 {
        path.iter()
            .filter_map(|&p| self.terrain(p))
            .map(Terrain::coin_value)
            .sum()
    }

    /// Find a cheapest route from start to goal, or `None` if the goal is
    /// unreachable (a normal outcome, not an error).
    pub fn solve(&self) -> Option<Vec<Point>> {
        let mut field = SearchField::new(self.rng);
        field.astar_path(&MazePather { maze: self }, self.start, self.goal)
    }
}

// ---------------------------------------------------------------------------
// Pathfinding adapter
// ---------------------------------------------------------------------------

/// Pathfinding view of a maze: 8-way movement, walls excluded, Euclidean
/// step costs and heuristic.
pub struct MazePather<'a> {
    pub maze: &'a Maze,
}

impl Pather for MazePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_8() {
            if self.maze.terrain(n).is_some_and(Terrain::passable) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for MazePather<'_> {
    fn cost(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}

impl AstarPather for MazePather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a maze.
#[derive(Debug)]
pub enum MazeError {
    /// The maze file could not be read.
    Io(io::Error),
    /// The input contained no cells.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth { line: i32, expected: i32, got: i32 },
    /// No `S` marker present.
    MissingStart,
    /// No `G` marker present.
    MissingGoal,
    /// A second `S` marker at the given position.
    DuplicateStart(Point),
    /// A second `G` marker at the given position.
    DuplicateGoal(Point),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reading maze: {err}"),
            Self::Empty => write!(f, "maze is empty"),
            Self::InconsistentWidth {
                line,
                expected,
                got,
            } => write!(
                f,
                "maze line {line} is {got} cells wide, expected {expected}"
            ),
            Self::MissingStart => write!(f, "maze has no start marker 'S'"),
            Self::MissingGoal => write!(f, "maze has no goal marker 'G'"),
            Self::DuplicateStart(p) => write!(f, "duplicate start marker at {p}"),
            Self::DuplicateGoal(p) => write!(f, "duplicate goal marker at {p}"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MazeError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
S.2
.X.
..G";

    #[test]
    fn parse_geometry_and_markers() {
        let maze = Maze::parse(SMALL).unwrap();
        assert_eq!(maze.bounds(), Range::new(0, 0, 3, 3));
        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.goal(), Point::new(2, 2));
        assert_eq!(maze.terrain(Point::new(1, 1)), Some(Terrain::Wall));
        assert_eq!(maze.terrain(Point::new(2, 0)), Some(Terrain::Coin(2)));
        assert_eq!(maze.terrain(Point::new(1, 0)), Some(Terrain::Floor));
        assert_eq!(maze.terrain(Point::new(3, 0)), None);
        assert_eq!(maze.terrain(Point::new(0, -1)), None);
    }

    #[test]
    fn trailing_newline_is_fine() {
        let maze = Maze::parse("SG\n").unwrap();
        assert_eq!(maze.bounds(), Range::new(0, 0, 2, 1));
    }

    #[test]
    fn inconsistent_width_rejected() {
        let err = Maze::parse("S..\n.G").unwrap_err();
        assert!(matches!(
            err,
            MazeError::InconsistentWidth {
                line: 1,
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn missing_markers_rejected() {
        assert!(matches!(
            Maze::parse("...\n..G").unwrap_err(),
            MazeError::MissingStart
        ));
        assert!(matches!(
            Maze::parse("S..\n...").unwrap_err(),
            MazeError::MissingGoal
        ));
    }

    #[test]
    fn duplicate_markers_rejected() {
        assert!(matches!(
            Maze::parse("SS\n.G").unwrap_err(),
            MazeError::DuplicateStart(_)
        ));
        assert!(matches!(
            Maze::parse("SG\nG.").unwrap_err(),
            MazeError::DuplicateGoal(_)
        ));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(Maze::parse("").unwrap_err(), MazeError::Empty));
    }

    #[test]
    fn coins_along_counts_digits_only() {
        let maze = Maze::parse(SMALL).unwrap();
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(maze.coins_along(&path), 2);
        assert_eq!(maze.coins_along(&[]), 0);
    }

    #[test]
    fn pather_filters_walls_and_bounds() {
        let maze = Maze::parse(SMALL).unwrap();
        let pather = MazePather { maze: &maze };
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        // Of the 8 surrounding positions only (1,0) and (0,1) are in bounds
        // and passable — (1,1) is the wall.
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1)]);
    }

    #[test]
    fn solve_small_maze() {
        let maze = Maze::parse(SMALL).unwrap();
        let path = maze.solve().unwrap();
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.goal()));
        assert!(!path.contains(&Point::new(1, 1)));
    }
}
