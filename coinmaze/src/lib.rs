//! Coinmaze — loads a character maze, finds a cheapest route from start to
//! goal with A*, and totals the coins collected along it.

pub mod maze;
pub mod render;
pub mod terrain;

pub use maze::{Maze, MazeError, MazePather};
pub use terrain::Terrain;
