use std::fmt::Debug;

use petgraph::graph::UnGraph;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, WallMask};
use crate::errors::MazeError;
use crate::units::{self, ColumnsCount, RowsCount};

/// The query contract a host (renderer, navigator, path finder) uses on a maze, independent of how the
/// maze stores its walls.
pub trait MazeGrid: Debug {
    fn columns(&self) -> ColumnsCount;
    fn rows(&self) -> RowsCount;

    /// The wall mask of the cell at `coord`.
    fn walls(&self, coord: Cartesian2DCoordinate) -> Result<WallMask, MazeError>;

    /// Number of wall pairs removed between adjacent cells.
    fn links_count(&self) -> usize;

    /// Creates a fresh grid and carves a perfect maze into it.
    fn generate<R: Rng + ?Sized>(columns: ColumnsCount,
                                 rows: RowsCount,
                                 rng: &mut R)
                                 -> Result<Self, MazeError>
        where Self: Sized;

    #[inline]
    fn dimensions(&self) -> (ColumnsCount, RowsCount) {
        (self.columns(), self.rows())
    }

    #[inline]
    fn size(&self) -> usize {
        self.columns().0 * self.rows().0
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.columns().0 && (coord.y as usize) < self.rows().0
    }

    /// The in bounds cell adjacent to `coord` in `direction`, not necessarily linked by a passage.
    fn neighbour_at_direction(&self,
                              coord: Cartesian2DCoordinate,
                              direction: CompassPrimary)
                              -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Is there a passage from `coord` to its neighbour in `direction`?
    fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction).is_some() &&
        self.walls(coord).map_or(false, |walls| !walls.has(direction))
    }

    /// Convert a grid coordinate to a one dimensional row major index.
    fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns().0 + coord.x as usize)
        } else {
            None
        }
    }

    /// All grid coordinates in row major order, starting at the origin.
    fn coordinates(&self) -> Vec<Cartesian2DCoordinate> {
        let columns = self.columns().0;
        (0..self.size()).map(|index| Cartesian2DCoordinate::from_row_major_index(index, columns))
                        .collect()
    }

    /// The passages of the maze as a graph: one node per cell in row major order, one edge per
    /// removed wall pair.
    fn links_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.links_count());
        let nodes = self.coordinates()
                        .into_iter()
                        .map(|coord| graph.add_node(coord))
                        .collect::<Vec<_>>();

        for coord in self.coordinates() {
            // Only look north and east so each passage is added once.
            for dir in &[CompassPrimary::North, CompassPrimary::East] {
                if self.is_neighbour_linked(coord, *dir) {
                    if let (Some(a), Some(b)) =
                        (self.grid_coordinate_to_index(coord),
                         self.neighbour_at_direction(coord, *dir)
                             .and_then(|n| self.grid_coordinate_to_index(n))) {
                        graph.add_edge(nodes[a], nodes[b], ());
                    }
                }
            }
        }
        graph
    }
}

/// Check requested dimensions are non zero and addressable with `u32` coordinates.
/// `scale` is the per axis storage multiplier of the representation (1 for cells, 2 for a doubled wall grid),
/// storage is `scale * n + (scale - 1)` per axis.
pub(crate) fn validate_dimensions(columns: ColumnsCount,
                                  rows: RowsCount,
                                  scale: usize)
                                  -> Result<(usize, usize), MazeError> {
    let invalid = MazeError::InvalidDimensions { columns, rows };
    if columns.0 == 0 || rows.0 == 0 {
        return Err(invalid);
    }
    let stored = |n: usize| n.checked_mul(scale).and_then(|s| s.checked_add(scale - 1));
    match (stored(columns.0), stored(rows.0)) {
        (Some(w), Some(h)) if w <= u32::MAX as usize && h <= u32::MAX as usize &&
                              units::cells_count(ColumnsCount(w), RowsCount(h)).is_some() => Ok((w, h)),
        _ => Err(invalid),
    }
}
