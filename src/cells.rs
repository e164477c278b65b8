#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (stepping below zero or past `u32::MAX`),
    /// it does not know about any grid's extent.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_add(1).map(|ny| Cartesian2DCoordinate::new(x, ny)),
            CompassPrimary::East => x.checked_add(1).map(|nx| Cartesian2DCoordinate::new(nx, y)),
            CompassPrimary::South => y.checked_sub(1).map(|ny| Cartesian2DCoordinate::new(x, ny)),
            CompassPrimary::West => x.checked_sub(1).map(|nx| Cartesian2DCoordinate::new(nx, y)),
        }
    }

    /// The signed coordinate one step away, for reporting steps that leave the grid.
    pub fn signed_offset(self, dir: CompassPrimary) -> (i64, i64) {
        let (dx, dy) = dir.delta();
        (i64::from(self.x) + dx, i64::from(self.y) + dy)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: usize) -> Cartesian2DCoordinate {
        let x = index % row_length;
        let y = index / row_length;
        Cartesian2DCoordinate::new(x as u32, y as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four axis aligned directions.
///
/// The origin is the bottom left cell, so `North` increases `y`.
/// The declaration order is also the order neighbours are checked in during maze generation,
/// which only matters for reproducing a maze from a seed.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::East,
                                                 CompassPrimary::South,
                                                 CompassPrimary::West];

impl CompassPrimary {
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Index into a wall mask: top, right, bottom, left.
    #[inline]
    pub fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }

    /// Unit step (dx, dy) for this direction.
    #[inline]
    pub fn delta(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::South => (0, -1),
            CompassPrimary::West => (-1, 0),
        }
    }

    /// The direction taking `from` to the adjacent coordinate `to`, if they are adjacent.
    pub fn between(from: Cartesian2DCoordinate,
                   to: Cartesian2DCoordinate)
                   -> Option<CompassPrimary> {
        ALL_DIRECTIONS.iter()
                      .cloned()
                      .find(|dir| from.offset(*dir) == Some(to))
    }
}

/// Presence of a wall on each of the four sides of a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallMask {
    walls: [bool; 4],
}

impl WallMask {
    pub fn all() -> WallMask {
        WallMask { walls: [true; 4] }
    }

    pub fn none() -> WallMask {
        WallMask { walls: [false; 4] }
    }

    #[inline]
    pub fn has(&self, dir: CompassPrimary) -> bool {
        self.walls[dir.wall_index()]
    }

    #[inline]
    pub fn set(&mut self, dir: CompassPrimary, present: bool) {
        self.walls[dir.wall_index()] = present;
    }

    #[inline]
    pub fn north(&self) -> bool {
        self.has(CompassPrimary::North)
    }

    #[inline]
    pub fn east(&self) -> bool {
        self.has(CompassPrimary::East)
    }

    #[inline]
    pub fn south(&self) -> bool {
        self.has(CompassPrimary::South)
    }

    #[inline]
    pub fn west(&self) -> bool {
        self.has(CompassPrimary::West)
    }

    pub fn open_count(&self) -> usize {
        self.walls.iter().filter(|&&present| !present).count()
    }
}

impl Default for WallMask {
    fn default() -> WallMask {
        WallMask::all()
    }
}

/// A cell of the cell graph maze representation.
///
/// The cell never refers back to its grid, grid operations take the grid explicitly.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct SquareCell {
    coord: Cartesian2DCoordinate,
    pub(crate) walls: WallMask,
    pub(crate) visited: bool,
}

impl SquareCell {
    pub fn new(coord: Cartesian2DCoordinate) -> SquareCell {
        SquareCell {
            coord,
            walls: WallMask::all(),
            visited: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn walls(&self) -> WallMask {
        self.walls
    }

    /// Only meaningful while a maze is being generated.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }
}
