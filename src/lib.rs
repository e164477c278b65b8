//! **maze_runner** is the maze generation and navigation engine behind a family of maze games.
//!
//! It builds perfect mazes with a recursive backtracker over one of two grid representations, tracks a player
//! moving through the maze, and regenerates a bigger maze each time the player reaches the goal. Nothing here
//! draws or reads input; a host queries walls and positions and feeds in directions.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_traits;
pub mod levels;
pub mod navigation;
pub mod pathing;
pub mod units;
pub mod wall_grid;
mod utils;
