//! Terminal rendering of a solved maze.
//!
//! Draws the terrain grid with the route overlaid and a one-line summary.
//! An empty path means "no route found" and is rendered as such — it is
//! never an error here.

use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, ResetColor, SetBackgroundColor},
};

use mazer_core::Point;

use crate::maze::Maze;
use crate::terrain::Terrain;

/// Background color for a maze cell; `path` overrides plain floor.
fn cell_color(t: Terrain, on_path: bool) -> Color {
    match t {
        Terrain::Wall => Color::DarkRed,
        Terrain::Start => Color::DarkYellow,
        Terrain::Goal => Color::DarkGreen,
        _ if on_path => Color::DarkBlue,
        _ => Color::White,
    }
}

/// Plain-text character for a maze cell; `path` overrides floor and coins.
fn cell_rune(t: Terrain, on_path: bool) -> char {
    match t {
        Terrain::Wall | Terrain::Start | Terrain::Goal => t.rune(),
        _ if on_path => '*',
        _ => t.rune(),
    }
}

/// Write the maze grid with `path` overlaid, then a summary line.
///
/// With `color` on, each cell becomes two colored spaces (red walls, yellow
/// start, green goal, blue route, white floor). With `color` off, one plain
/// character per cell is written instead, the route marked with `*`.
pub fn render(
    out: &mut impl Write,
    maze: &Maze,
    path: &[Point],
    coins: u32,
    color: bool,
) -> io::Result<()> {
    let route: HashSet<Point> = path.iter().copied().collect();
    let bounds = maze.bounds();

    for y in 0..bounds.height() {
        for x in 0..bounds.width() {
            let p = Point::new(x, y);
            let t = maze.terrain(p).unwrap_or(Terrain::Floor);
            let on_path = route.contains(&p);
            if color {
                queue!(out, SetBackgroundColor(cell_color(t, on_path)))?;
                write!(out, "  ")?;
                queue!(out, ResetColor)?;
            } else {
                write!(out, "{}", cell_rune(t, on_path))?;
            }
        }
        writeln!(out)?;
    }

    if path.is_empty() {
        writeln!(out, "No route found.")?;
    } else {
        writeln!(out, "Collected {coins} coins.")?;
    }
    out.flush()
}
