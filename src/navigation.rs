use log::trace;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::MazeError;
use crate::generators::START;
use crate::grid_traits::MazeGrid;

/// A player's position in a maze, moved only by moves the maze's walls allow.
///
/// The navigator does not own the maze, every query that needs walls takes the grid explicitly.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Navigator {
    position: Cartesian2DCoordinate,
    start: Cartesian2DCoordinate,
    goal: Cartesian2DCoordinate,
}

impl Navigator {
    /// Starts at the origin with the goal in the far corner.
    pub fn new<G: MazeGrid>(grid: &G) -> Navigator {
        let (columns, rows) = grid.dimensions();
        // Grids always have at least one cell and fit u32 coordinates.
        let goal = Cartesian2DCoordinate::new(columns.0 as u32 - 1, rows.0 as u32 - 1);
        Navigator {
            position: START,
            start: START,
            goal,
        }
    }

    pub fn with_start_and_goal<G: MazeGrid>(grid: &G,
                                            start: Cartesian2DCoordinate,
                                            goal: Cartesian2DCoordinate)
                                            -> Result<Navigator, MazeError> {
        grid.walls(start)?;
        grid.walls(goal)?;
        Ok(Navigator {
            position: start,
            start,
            goal,
        })
    }

    #[inline]
    pub fn position(&self) -> Cartesian2DCoordinate {
        self.position
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.goal
    }

    /// Move one cell in `direction` unless a wall is in the way.
    ///
    /// Returns `Ok(false)`, with the position unchanged, for a blocked move. An open wall leading off the grid
    /// means the maze is broken and is reported as `OutOfBounds`.
    pub fn try_move<G: MazeGrid>(&mut self, grid: &G, direction: CompassPrimary) -> Result<bool, MazeError> {
        if grid.walls(self.position)?.has(direction) {
            trace!("Move {:?} from {:?} blocked", direction, self.position);
            return Ok(false);
        }

        let (x, y) = self.position.signed_offset(direction);
        let destination = grid.neighbour_at_direction(self.position, direction)
                              .ok_or(MazeError::OutOfBounds { x, y })?;
        trace!("Move {:?} from {:?} to {:?}", direction, self.position, destination);
        self.position = destination;
        Ok(true)
    }

    #[inline]
    pub fn at_goal(&self) -> bool {
        self.position == self.goal
    }

    pub fn reset(&mut self) {
        self.position = self.start;
    }
}
