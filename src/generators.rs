use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, ALL_DIRECTIONS};
use crate::errors::MazeError;
use crate::grid::Grid;
use crate::grid_traits::MazeGrid;
use crate::wall_grid::{Tile, WallGrid};

/// Where every maze starts carving from, and where a navigator starts.
pub const START: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 0, y: 0 };

/// Apply the recursive backtracker maze generation algorithm to a cell graph grid.
///
/// A randomised depth first walk: from the current cell carve into a random unvisited neighbour, pushing the
/// current cell onto a stack; when there are no unvisited neighbours, pop back to the most recent cell that
/// may still have some. The stack replaces recursion so large grids cannot overflow the call stack.
/// Every cell is visited exactly once so the result is a perfect maze with `size - 1` passages.
///
/// Expects a freshly created grid. Cells already marked visited are treated as part of the maze and never
/// carved into.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Result<(), MazeError> {
    let mut unvisited = grid.iter().filter(|cell| !cell.is_visited()).count();
    if !grid.at(START)?.is_visited() {
        grid.at_mut(START)?.visited = true;
        unvisited -= 1;
    }

    let mut current = START;
    let mut stack: Vec<Cartesian2DCoordinate> = Vec::with_capacity(grid.size());

    while unvisited > 0 {
        let mut candidates = SmallVec::<[CompassPrimary; 4]>::new();
        for dir in &ALL_DIRECTIONS {
            if let Some(neighbour) = grid.neighbour_at_direction(current, *dir) {
                if !grid.at(neighbour)?.is_visited() {
                    candidates.push(*dir);
                }
            }
        }

        if let Some(&dir) = candidates.choose(rng) {
            stack.push(current);
            let next = grid.remove_wall_between(current, dir)?;
            grid.at_mut(next)?.visited = true;
            unvisited -= 1;
            current = next;
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            // Only reachable when the grid was handed over with visited cells walled off from the start.
            trace!("Backtracker stopped with {} unreachable unvisited cells", unvisited);
            break;
        }
    }

    Ok(())
}

/// Apply the recursive backtracker to a doubled resolution wall grid.
///
/// The walk moves two tiles at a time between rooms, opening the destination room and the wall tile in between.
/// Unvisited rooms are recognised by their tile rather than a flag. Neighbours are checked in the same order as
/// the cell graph version.
pub fn recursive_backtracker_wall_grid<R: Rng + ?Sized>(grid: &mut WallGrid,
                                                        rng: &mut R)
                                                        -> Result<(), MazeError> {
    let (raw_width, raw_height) = grid.raw_dimensions();
    let mut unvisited = (0..raw_height)
        .flat_map(|y| (0..raw_width).map(move |x| (x, y)))
        .filter(|&(x, y)| grid.tile(x, y) == Ok(Tile::UnvisitedRoom))
        .count();

    let mut current = grid.room_position(START)?;
    if grid.tile(current.0, current.1)? == Tile::UnvisitedRoom {
        grid.open(current.0, current.1)?;
        unvisited -= 1;
    }

    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(grid.size());

    while unvisited > 0 {
        let mut candidates = SmallVec::<[CompassPrimary; 4]>::new();
        for dir in &ALL_DIRECTIONS {
            if let Some((x, y)) = grid.raw_step(current, *dir, 2) {
                if grid.tile(x, y)? == Tile::UnvisitedRoom {
                    candidates.push(*dir);
                }
            }
        }

        if let Some(&dir) = candidates.choose(rng) {
            let between = grid.raw_step(current, dir, 1);
            let next = grid.raw_step(current, dir, 2);
            if let (Some(between), Some(next)) = (between, next) {
                stack.push(current);
                grid.open(between.0, between.1)?;
                grid.open(next.0, next.1)?;
                unvisited -= 1;
                current = next;
            }
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            trace!("Backtracker stopped with {} unreachable unvisited rooms", unvisited);
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing::Distances;
    use crate::units::{ColumnsCount, RowsCount};
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn assert_perfect_maze<G: MazeGrid>(grid: &G) {
        let graph = grid.links_graph();
        assert_eq!(grid.links_count(), grid.size() - 1);
        assert_eq!(graph.edge_count(), grid.size() - 1);
        assert_eq!(connected_components(&graph), 1);
        assert!(!is_cyclic_undirected(&graph));

        let distances = Distances::new(grid, START).unwrap();
        for coord in grid.coordinates() {
            assert!(distances.distance_from_start_to(coord).is_some());
        }
    }

    fn assert_symmetric_walls<G: MazeGrid>(grid: &G) {
        for coord in grid.coordinates() {
            for dir in &ALL_DIRECTIONS {
                if let Some(neighbour) = grid.neighbour_at_direction(coord, *dir) {
                    assert_eq!(grid.walls(coord).unwrap().has(*dir),
                               grid.walls(neighbour).unwrap().has(dir.opposite()));
                }
            }
        }
    }

    fn assert_closed_border<G: MazeGrid>(grid: &G) {
        for coord in grid.coordinates() {
            for dir in &ALL_DIRECTIONS {
                if grid.neighbour_at_direction(coord, *dir).is_none() {
                    assert!(grid.walls(coord).unwrap().has(*dir));
                }
            }
        }
    }

    #[test]
    fn cell_grid_is_perfect_maze() {
        let grid = Grid::generate(ColumnsCount(12), RowsCount(7), &mut seeded(1)).unwrap();
        assert_perfect_maze(&grid);
        assert_symmetric_walls(&grid);
        assert_closed_border(&grid);
    }

    #[test]
    fn wall_grid_is_perfect_maze() {
        let grid = WallGrid::generate(ColumnsCount(7), RowsCount(12), &mut seeded(1)).unwrap();
        assert_perfect_maze(&grid);
        assert_symmetric_walls(&grid);
        assert_closed_border(&grid);
    }

    #[test]
    fn every_cell_visited() {
        let mut grid = Grid::new(ColumnsCount(9), RowsCount(9)).unwrap();
        recursive_backtracker(&mut grid, &mut seeded(5)).unwrap();
        assert!(grid.iter().all(|cell| cell.is_visited()));
    }

    #[test]
    fn every_room_opened() {
        let mut grid = WallGrid::new(ColumnsCount(9), RowsCount(4)).unwrap();
        recursive_backtracker_wall_grid(&mut grid, &mut seeded(5)).unwrap();
        let (w, h) = grid.raw_dimensions();
        for y in 0..h {
            for x in 0..w {
                assert_ne!(grid.tile(x, y), Ok(Tile::UnvisitedRoom));
                if x % 2 == 0 && y % 2 == 0 {
                    assert_eq!(grid.tile(x, y), Ok(Tile::Wall));
                }
            }
        }
    }

    #[test]
    fn single_cell_maze() {
        let grid = Grid::generate(ColumnsCount(1), RowsCount(1), &mut seeded(0)).unwrap();
        assert_eq!(grid.links_count(), 0);
        let wall_grid = WallGrid::generate(ColumnsCount(1), RowsCount(1), &mut seeded(0)).unwrap();
        assert_eq!(wall_grid.links_count(), 0);
        assert_eq!(wall_grid.tile(1, 1), Ok(Tile::Open));
    }

    #[test]
    fn corridor_mazes() {
        let row = Grid::generate(ColumnsCount(6), RowsCount(1), &mut seeded(2)).unwrap();
        assert_perfect_maze(&row);
        let column = WallGrid::generate(ColumnsCount(1), RowsCount(6), &mut seeded(2)).unwrap();
        assert_perfect_maze(&column);
    }

    #[test]
    fn generating_twice_does_not_add_cycles() {
        let mut grid = Grid::generate(ColumnsCount(5), RowsCount(5), &mut seeded(9)).unwrap();
        let once = grid.clone();
        recursive_backtracker(&mut grid, &mut seeded(10)).unwrap();
        assert_eq!(grid, once);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = Grid::generate(ColumnsCount(15), RowsCount(10), &mut seeded(42)).unwrap();
        let b = Grid::generate(ColumnsCount(15), RowsCount(10), &mut seeded(42)).unwrap();
        assert_eq!(a, b);

        let c = WallGrid::generate(ColumnsCount(15), RowsCount(10), &mut seeded(42)).unwrap();
        let d = WallGrid::generate(ColumnsCount(15), RowsCount(10), &mut seeded(42)).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn representations_carve_identical_layouts() {
        // Same neighbour order and the same number of random draws, so the same seed gives the same maze.
        let cells = Grid::generate(ColumnsCount(8), RowsCount(6), &mut seeded(77)).unwrap();
        let tiles = WallGrid::generate(ColumnsCount(8), RowsCount(6), &mut seeded(77)).unwrap();
        for coord in cells.coordinates() {
            assert_eq!(cells.walls(coord), tiles.walls(coord));
        }
    }

    #[test]
    fn quickcheck_perfect_cell_grids() {
        fn prop(columns: u8, rows: u8, seed: u64) -> TestResult {
            let (columns, rows) = (columns as usize % 16, rows as usize % 16);
            if columns == 0 || rows == 0 {
                return TestResult::discard();
            }
            let grid = Grid::generate(ColumnsCount(columns), RowsCount(rows), &mut seeded(seed)).unwrap();
            let graph = grid.links_graph();
            TestResult::from_bool(grid.links_count() == columns * rows - 1 &&
                                  connected_components(&graph) == 1)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_perfect_wall_grids() {
        fn prop(columns: u8, rows: u8, seed: u64) -> TestResult {
            let (columns, rows) = (columns as usize % 16, rows as usize % 16);
            if columns == 0 || rows == 0 {
                return TestResult::discard();
            }
            let grid = WallGrid::generate(ColumnsCount(columns), RowsCount(rows), &mut seeded(seed)).unwrap();
            let graph = grid.links_graph();
            TestResult::from_bool(grid.links_count() == columns * rows - 1 &&
                                  connected_components(&graph) == 1)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_determinism() {
        fn prop(columns: u8, rows: u8, seed: u64) -> bool {
            let (columns, rows) = (ColumnsCount(columns as usize % 12 + 1), RowsCount(rows as usize % 12 + 1));
            let a = Grid::generate(columns, rows, &mut seeded(seed)).unwrap();
            let b = Grid::generate(columns, rows, &mut seeded(seed)).unwrap();
            a == b
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }
}
