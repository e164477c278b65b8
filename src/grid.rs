use std::fmt;

use log::debug;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, SquareCell, WallMask};
use crate::errors::MazeError;
use crate::generators;
use crate::grid_traits::{self, MazeGrid};
use crate::units::{ColumnsCount, RowsCount};

/// The cell graph maze representation: a row major 2D array of cells, each with its own wall mask.
///
/// The grid is the sole owner of its cells. The shape is fixed at creation; the only mutation is wall
/// removal while a maze is generated.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<SquareCell>,
    columns: ColumnsCount,
    rows: RowsCount,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: columns: {:?}, rows: {:?}, links: {}",
               self.columns, self.rows, self.links_count())
    }
}

impl Grid {
    /// Allocates a `columns` * `rows` grid, every cell with all four walls and not visited.
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> Result<Grid, MazeError> {
        let (width, height) = grid_traits::validate_dimensions(columns, rows, 1)?;

        let cells = (0..width * height)
            .map(|index| SquareCell::new(Cartesian2DCoordinate::from_row_major_index(index, width)))
            .collect();

        Ok(Grid { cells, columns, rows })
    }

    pub fn at(&self, coord: Cartesian2DCoordinate) -> Result<&SquareCell, MazeError> {
        let index = self.index_or_err(coord)?;
        Ok(&self.cells[index])
    }

    pub(crate) fn at_mut(&mut self, coord: Cartesian2DCoordinate) -> Result<&mut SquareCell, MazeError> {
        let index = self.index_or_err(coord)?;
        Ok(&mut self.cells[index])
    }

    /// Remove the wall on the `direction` side of `coord` and the facing wall of its neighbour.
    /// Both sides change together or not at all.
    ///
    /// Returns the neighbour's coordinate.
    pub fn remove_wall_between(&mut self,
                               coord: Cartesian2DCoordinate,
                               direction: CompassPrimary)
                               -> Result<Cartesian2DCoordinate, MazeError> {
        let a_index = self.index_or_err(coord)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
                            .ok_or_else(|| out_of_bounds(coord.signed_offset(direction)))?;
        let b_index = self.index_or_err(neighbour)?;

        self.cells[a_index].walls.set(direction, false);
        self.cells[b_index].walls.set(direction.opposite(), false);
        Ok(neighbour)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SquareCell> {
        self.cells.iter()
    }

    fn index_or_err(&self, coord: Cartesian2DCoordinate) -> Result<usize, MazeError> {
        self.grid_coordinate_to_index(coord)
            .ok_or_else(|| out_of_bounds((i64::from(coord.x), i64::from(coord.y))))
    }
}

fn out_of_bounds((x, y): (i64, i64)) -> MazeError {
    MazeError::OutOfBounds { x, y }
}

impl MazeGrid for Grid {
    #[inline]
    fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    fn walls(&self, coord: Cartesian2DCoordinate) -> Result<WallMask, MazeError> {
        self.at(coord).map(|cell| cell.walls())
    }

    fn links_count(&self) -> usize {
        // Every removed pair shows up as two open sides.
        self.cells.iter().map(|cell| cell.walls().open_count()).sum::<usize>() / 2
    }

    fn generate<R: Rng + ?Sized>(columns: ColumnsCount,
                                 rows: RowsCount,
                                 rng: &mut R)
                                 -> Result<Grid, MazeError> {
        let mut grid = Grid::new(columns, rows)?;
        generators::recursive_backtracker(&mut grid, rng)?;
        debug!("Generated {}x{} cell grid maze with {} passages",
               columns.0, rows.0, grid.links_count());
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    /// ASCII art, north at the top.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_CORNER: &str = "+";
        const WALL_HORIZONTAL: &str = "---";
        const WALL_VERTICAL: &str = "|";
        const PASSAGE_HORIZONTAL: &str = "   ";
        const PASSAGE_VERTICAL: &str = " ";
        const CELL_BODY: &str = "   ";

        let columns = self.columns.0;
        let top = format!("{}{}\n", WALL_CORNER, format!("{}{}", WALL_HORIZONTAL, WALL_CORNER).repeat(columns));
        f.write_str(&top)?;

        for (row_index, row) in self.cells.chunks(columns).enumerate().rev() {
            let mut body = String::from(WALL_VERTICAL);
            let mut bottom = String::from(WALL_CORNER);

            for cell in row {
                body.push_str(CELL_BODY);
                body.push_str(if cell.walls().east() { WALL_VERTICAL } else { PASSAGE_VERTICAL });

                bottom.push_str(if cell.walls().south() { WALL_HORIZONTAL } else { PASSAGE_HORIZONTAL });
                bottom.push_str(WALL_CORNER);
            }

            writeln!(f, "{}", body)?;
            if row_index == 0 {
                write!(f, "{}", bottom)?;
            } else {
                writeln!(f, "{}", bottom)?;
            }
        }
        Ok(())
    }
}
