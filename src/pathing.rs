use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, ALL_DIRECTIONS};
use crate::errors::MazeError;
use crate::grid_traits::MazeGrid;
use crate::utils::{self, FnvHashMap};

/// Step counts from a start cell to every cell reachable from it through open walls.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn new<G: MazeGrid>(grid: &G, start_coordinate: Cartesian2DCoordinate) -> Result<Distances, MazeError> {
        // Validates the start coordinate.
        grid.walls(start_coordinate)?;

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every passage is one step, so the first time a cell is reached is by a shortest route and the map
        // doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for dir in &ALL_DIRECTIONS {
                    if !grid.is_neighbour_linked(*cell_coord, *dir) {
                        continue;
                    }
                    if let Some(link_coordinate) = grid.neighbour_at_direction(*cell_coord, *dir) {
                        if !distances.contains_key(&link_coordinate) {
                            distances.insert(link_coordinate, distance_to_cell + 1);
                            new_frontier.push(link_coordinate);
                        }
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let mut furthest = self.distances
                               .iter()
                               .filter(|&(_, distance)| *distance == self.max_distance)
                               .map(|(coord, _)| *coord)
                               .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` to the start by always stepping to a linked neighbour one closer to the start.
/// None if `end_point` is not reachable.
pub fn shortest_path<G: MazeGrid>(grid: &G,
                                  distances_from_start: &Distances,
                                  end_point: Cartesian2DCoordinate)
                                  -> Option<Vec<Cartesian2DCoordinate>> {
    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = ALL_DIRECTIONS.iter()
            .filter(|dir| grid.is_neighbour_linked(current_coord, **dir))
            .filter_map(|dir| grid.neighbour_at_direction(current_coord, *dir))
            .find(|coord| distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1))?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The moves that walk along a path of adjacent coordinates.
/// None if two consecutive coordinates are not adjacent.
pub fn path_directions(path: &[Cartesian2DCoordinate]) -> Option<Vec<CompassPrimary>> {
    path.windows(2)
        .map(|step| CompassPrimary::between(step[0], step[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::START;
    use crate::grid::Grid;
    use crate::units::{ColumnsCount, RowsCount};
    use crate::wall_grid::WallGrid;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn open_2x2() -> Grid {
        let mut g = Grid::new(ColumnsCount(2), RowsCount(2)).unwrap();
        g.remove_wall_between(gc(0, 0), CompassPrimary::East).unwrap();
        g.remove_wall_between(gc(0, 0), CompassPrimary::North).unwrap();
        g.remove_wall_between(gc(1, 0), CompassPrimary::North).unwrap();
        g.remove_wall_between(gc(0, 1), CompassPrimary::East).unwrap();
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = Grid::new(ColumnsCount(3), RowsCount(3)).unwrap();
        let distances = Distances::new(&g, OUT_OF_GRID_COORDINATE);
        assert!(distances.is_err());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = Grid::new(ColumnsCount(3), RowsCount(3)).unwrap();
        let distances = Distances::new(&g, START).unwrap();
        assert_eq!(distances.start(), START);
        for coord in g.coordinates() {
            let d = distances.distance_from_start_to(coord);
            if coord != START {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_2x2();
        let distances = Distances::new(&g, START).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 1)]);
    }

    #[test]
    fn shortest_path_through_generated_maze() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        let g = WallGrid::generate(ColumnsCount(10), RowsCount(10), &mut rng).unwrap();
        let distances = Distances::new(&g, START).unwrap();
        let goal = gc(9, 9);
        let path = shortest_path(&g, &distances, goal).expect("perfect mazes connect every cell");

        assert_eq!(path.first(), Some(&START));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() as u32, distances.distance_from_start_to(goal).unwrap() + 1);

        let moves = path_directions(&path).unwrap();
        assert_eq!(moves.len(), path.len() - 1);
        for (step, dir) in path.iter().zip(moves.iter()) {
            assert!(g.is_neighbour_linked(*step, *dir));
        }
    }

    #[test]
    fn no_path_to_walled_off_cell() {
        let g = Grid::new(ColumnsCount(2), RowsCount(2)).unwrap();
        let distances = Distances::new(&g, START).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(1, 1)), None);
        assert_eq!(shortest_path(&g, &distances, START), Some(vec![START]));
    }

    #[test]
    fn directions_need_adjacent_steps() {
        assert_eq!(path_directions(&[gc(0, 0), gc(0, 1), gc(1, 1)]),
                   Some(vec![CompassPrimary::North, CompassPrimary::East]));
        assert_eq!(path_directions(&[gc(0, 0), gc(1, 1)]), None);
        assert_eq!(path_directions(&[gc(0, 0)]), Some(vec![]));
    }
}
