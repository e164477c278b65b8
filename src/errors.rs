use std::error::Error;
use std::fmt;

use crate::units::{ColumnsCount, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// A grid was requested with zero (or unrepresentably many) cells along an axis.
    InvalidDimensions {
        columns: ColumnsCount,
        rows: RowsCount,
    },
    /// A coordinate outside the grid's extent was accessed.
    /// Signed so that a step off the west or south edge can still be reported.
    OutOfBounds { x: i64, y: i64 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimensions { columns, rows } => {
                write!(f, "invalid maze dimensions {}x{}", columns.0, rows.0)
            }
            MazeError::OutOfBounds { x, y } => {
                write!(f, "coordinate ({}, {}) is outside the grid", x, y)
            }
        }
    }
}

impl Error for MazeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let invalid = MazeError::InvalidDimensions {
            columns: ColumnsCount(0),
            rows: RowsCount(3),
        };
        assert_eq!(invalid.to_string(), "invalid maze dimensions 0x3");

        let out = MazeError::OutOfBounds { x: -1, y: 4 };
        assert_eq!(out.to_string(), "coordinate (-1, 4) is outside the grid");
    }
}
