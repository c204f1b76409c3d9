//! Coinmaze — solve a character maze and tally the coins along the route.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use coinmaze_lib::maze::Maze;
use coinmaze_lib::render::render;

/// Find the cheapest route through a maze file and display it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the maze file.
    maze: PathBuf,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let maze = Maze::load(&args.maze)?;
    let path = maze.solve().unwrap_or_default();
    let coins = maze.coins_along(&path);

    let mut stdout = io::stdout().lock();
    render(&mut stdout, &maze, &path, coins, !args.no_color)?;
    Ok(())
}
