use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use maze_runner::{
    cells::CompassPrimary,
    grid::Grid,
    grid_traits::MazeGrid,
    levels::{LevelConfig, LevelController},
    pathing,
    units::{ColumnsCount, RowsCount},
    wall_grid::WallGrid,
};
use std::{
    fmt,
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze Runner

Usage:
    maze_runner_driver -h | --help
    maze_runner_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--wall-grid] [--seed=<s>] [--growth=<f>] [--moves=<keys>] [--solve] [--levels=<n>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 20].
    --grid-height=<h>      The grid height in a w*h grid [default: 20].
    --wall-grid            Store the maze as a doubled resolution wall grid rather than a grid of cells.
    --seed=<s>             Seed the maze generator so the run can be reproduced.
    --growth=<f>           Multiplier applied to the grid size each time a level is completed [default: 1.2].
    --moves=<keys>         Moves to play from the start: w, d, s, a for north, east, south, west. Other characters are skipped.
    --solve                After any moves, walk the shortest route to the goal.
    --levels=<n>           How many levels to solve with --solve [default: 1].
    --save-edges=<path>    Serialize the final maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_wall_grid: bool,
    flag_seed: Option<u64>,
    flag_growth: f64,
    flag_moves: String,
    flag_solve: bool,
    flag_levels: u32,
    flag_save_edges: String,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Maze(::maze_runner::errors::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let config = LevelConfig {
        columns: ColumnsCount(width),
        rows: RowsCount(height),
        growth_factor: args.flag_growth,
        seed: args.flag_seed,
    };

    if args.flag_wall_grid {
        play::<WallGrid>(&args, config)
    } else {
        play::<Grid>(&args, config)
    }
}

fn play<G: MazeGrid + fmt::Display>(args: &MazeArgs, config: LevelConfig) -> Result<()> {

    let mut levels = LevelController::<G>::new(config)
        .chain_err(|| "Cannot generate the first maze")?;
    println!("{}\n", levels.grid());

    for direction in args.flag_moves.chars().filter_map(key_direction) {
        let moved = levels.try_move(direction)?;
        info!("{:?} -> moved: {}, position: {:?}", direction, moved, levels.position());
        if levels.regenerate_if_goal_reached()? {
            println!("Goal reached! Score: {}", levels.score());
        }
    }

    if args.flag_solve {
        for _ in 0..args.flag_levels {
            let distances = pathing::Distances::new(levels.grid(), levels.position())?;
            let route = pathing::shortest_path(levels.grid(), &distances, levels.navigator().goal())
                .and_then(|path| pathing::path_directions(&path))
                .ok_or("No route to the goal, the maze is not perfect")?;

            for direction in route {
                levels.try_move(direction)?;
            }
            if levels.regenerate_if_goal_reached()? {
                println!("Goal reached! Score: {}", levels.score());
            }
        }
    }

    let (columns, rows) = levels.dimensions();
    let position = levels.position();
    println!("{}\n", levels.grid());
    println!("Maze: {}x{}, position: ({}, {}), score: {}",
             columns.0, rows.0, position.x, position.y, levels.score());

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(levels.grid(), &args.flag_save_edges)?;
    }

    Ok(())
}

fn key_direction(key: char) -> Option<CompassPrimary> {
    match key.to_ascii_lowercase() {
        'w' => Some(CompassPrimary::North),
        'd' => Some(CompassPrimary::East),
        's' => Some(CompassPrimary::South),
        'a' => Some(CompassPrimary::West),
        _ => None,
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph<G: MazeGrid>(maze_grid: &G, file_path: &str) -> Result<()> {

    let graph = maze_grid.links_graph();
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", graph.node_count(), graph.edge_count()));

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
