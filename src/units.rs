#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub struct ColumnsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub struct RowsCount(pub usize);

/// Number of cells in a `columns` * `rows` grid, or None if that overflows.
pub fn cells_count(columns: ColumnsCount, rows: RowsCount) -> Option<usize> {
    columns.0.checked_mul(rows.0)
}
