use std::fmt;

use log::debug;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, WallMask, ALL_DIRECTIONS};
use crate::errors::MazeError;
use crate::generators;
use crate::grid_traits::{self, MazeGrid};
use crate::units::{ColumnsCount, RowsCount};

/// State of one position in a doubled resolution wall grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Tile {
    Wall,
    Open,
    UnvisitedRoom,
}

/// The doubled resolution maze representation.
///
/// A maze of `columns` * `rows` rooms is stored as `(2 * columns + 1)` * `(2 * rows + 1)` tiles. A tile with
/// both raw coordinates odd is a room, a tile with both even is a permanent corner wall, and a tile with
/// exactly one even coordinate is a wall between two rooms (or the border) that generation may carve open.
/// Room `(x, y)` sits at raw tile `(2x + 1, 2y + 1)`.
#[derive(Clone, PartialEq, Eq)]
pub struct WallGrid {
    tiles: Vec<Tile>,
    columns: ColumnsCount,
    rows: RowsCount,
    raw_width: usize,
    raw_height: usize,
}

impl fmt::Debug for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WallGrid :: columns: {:?}, rows: {:?}, raw: {}x{}, links: {}",
               self.columns, self.rows, self.raw_width, self.raw_height, self.links_count())
    }
}

impl WallGrid {
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> Result<WallGrid, MazeError> {
        let (raw_width, raw_height) = grid_traits::validate_dimensions(columns, rows, 2)?;

        let tiles = (0..raw_width * raw_height)
            .map(|index| {
                let (x, y) = (index % raw_width, index / raw_width);
                if x % 2 == 1 && y % 2 == 1 {
                    Tile::UnvisitedRoom
                } else {
                    Tile::Wall
                }
            })
            .collect();

        Ok(WallGrid {
            tiles,
            columns,
            rows,
            raw_width,
            raw_height,
        })
    }

    /// Size of the tile array, (width, height).
    #[inline]
    pub fn raw_dimensions(&self) -> (usize, usize) {
        (self.raw_width, self.raw_height)
    }

    pub fn tile(&self, raw_x: usize, raw_y: usize) -> Result<Tile, MazeError> {
        self.raw_index(raw_x, raw_y)
            .map(|index| self.tiles[index])
            .ok_or(MazeError::OutOfBounds {
                x: raw_x as i64,
                y: raw_y as i64,
            })
    }

    /// The raw tile position of a room.
    pub fn room_position(&self, coord: Cartesian2DCoordinate) -> Result<(usize, usize), MazeError> {
        if self.is_valid_coordinate(coord) {
            Ok((2 * coord.x as usize + 1, 2 * coord.y as usize + 1))
        } else {
            Err(MazeError::OutOfBounds {
                x: i64::from(coord.x),
                y: i64::from(coord.y),
            })
        }
    }

    /// The raw tile one step from `(raw_x, raw_y)`, if it is inside the tile array.
    pub(crate) fn raw_step(&self,
                           (raw_x, raw_y): (usize, usize),
                           direction: CompassPrimary,
                           distance: usize)
                           -> Option<(usize, usize)> {
        let stepped = match direction {
            CompassPrimary::North => raw_y.checked_add(distance).map(|y| (raw_x, y)),
            CompassPrimary::East => raw_x.checked_add(distance).map(|x| (x, raw_y)),
            CompassPrimary::South => raw_y.checked_sub(distance).map(|y| (raw_x, y)),
            CompassPrimary::West => raw_x.checked_sub(distance).map(|x| (x, raw_y)),
        };
        stepped.filter(|&(x, y)| x < self.raw_width && y < self.raw_height)
    }

    /// Carve a room or a between-rooms wall open. Corner walls never change.
    pub(crate) fn open(&mut self, raw_x: usize, raw_y: usize) -> Result<(), MazeError> {
        let out_of_bounds = MazeError::OutOfBounds {
            x: raw_x as i64,
            y: raw_y as i64,
        };
        let on_border = raw_x == 0 || raw_y == 0 || raw_x + 1 == self.raw_width || raw_y + 1 == self.raw_height;
        let is_corner = raw_x % 2 == 0 && raw_y % 2 == 0;
        if on_border || is_corner {
            return Err(out_of_bounds);
        }
        let index = self.raw_index(raw_x, raw_y).ok_or(out_of_bounds)?;
        self.tiles[index] = Tile::Open;
        Ok(())
    }

    #[inline]
    fn raw_index(&self, raw_x: usize, raw_y: usize) -> Option<usize> {
        if raw_x < self.raw_width && raw_y < self.raw_height {
            Some(raw_y * self.raw_width + raw_x)
        } else {
            None
        }
    }
}

impl MazeGrid for WallGrid {
    #[inline]
    fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    fn rows(&self) -> RowsCount {
        self.rows
    }

    fn walls(&self, coord: Cartesian2DCoordinate) -> Result<WallMask, MazeError> {
        let room = self.room_position(coord)?;
        let mut mask = WallMask::all();
        for dir in &ALL_DIRECTIONS {
            // Rooms are never on the border, so the between tile always exists.
            if let Some((x, y)) = self.raw_step(room, *dir, 1) {
                mask.set(*dir, self.tile(x, y)? != Tile::Open);
            }
        }
        Ok(mask)
    }

    fn links_count(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(index, tile)| {
                let (x, y) = (index % self.raw_width, index / self.raw_width);
                *tile == Tile::Open && (x % 2 == 0) != (y % 2 == 0)
            })
            .count()
    }

    fn generate<R: Rng + ?Sized>(columns: ColumnsCount,
                                 rows: RowsCount,
                                 rng: &mut R)
                                 -> Result<WallGrid, MazeError> {
        let mut grid = WallGrid::new(columns, rows)?;
        generators::recursive_backtracker_wall_grid(&mut grid, rng)?;
        debug!("Generated {}x{} wall grid maze with {} passages",
               columns.0, rows.0, grid.links_count());
        Ok(grid)
    }
}

impl fmt::Display for WallGrid {
    /// One character per tile, north at the top.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (row_index, row) in self.tiles.chunks(self.raw_width).enumerate().rev() {
            let line = row.iter()
                          .map(|tile| match *tile {
                              Tile::Wall => '#',
                              Tile::Open => ' ',
                              Tile::UnvisitedRoom => '.',
                          })
                          .collect::<String>();
            if row_index == 0 {
                write!(f, "{}", line)?;
            } else {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
