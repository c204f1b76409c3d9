//! **mazer-core** — foundational geometry types for the maze solver.
//!
//! This crate provides the primitives shared by the search engine and the
//! application: integer [`Point`]s and half-open rectangular [`Range`]s.

pub mod geom;

pub use geom::{Point, Range};
