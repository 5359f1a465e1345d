use alloc::format;
use alloc::vec::Vec;

use crate::value::ValueError;

/// The most cells a grid may hold.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Number of cells in a `rows` by `columns` grid, or `None` if that
/// overflows or exceeds [`MAX_GRID_CELLS`].
#[inline]
pub fn grid_cells(rows: usize, columns: usize) -> Option<usize> {
    rows.checked_mul(columns)
        .filter(|cells| *cells <= MAX_GRID_CELLS)
}

// -----------------------------------------------------------------------------
// Grid

/// A dense two dimensional array of optional values with fixed dimensions.
///
/// # Examples
///
/// ```
/// use beans_reflect::collections::Grid;
///
/// let mut board = Grid::new(2, 3).unwrap();
/// board.put(1, 2, 'x').unwrap();
///
/// assert_eq!(board.get(1, 2), Some(&'x'));
/// assert_eq!(board.get(0, 0), None);
/// assert!(board.put(2, 0, 'o').is_err());
/// assert!(Grid::<char>::new(usize::MAX, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<V> {
    rows: usize,
    columns: usize,
    cells: Vec<Option<V>>,
}

impl<V> Grid<V> {
    /// Creates an empty grid.
    ///
    /// Fails if the grid would hold more than [`MAX_GRID_CELLS`] cells.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ValueError> {
        let size = grid_cells(rows, columns).ok_or_else(|| {
            ValueError::Invalid(format!("a {rows}x{columns} grid is too large"))
        })?;
        let mut cells = Vec::new();
        cells.resize_with(size, || None);
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then_some(row * self.columns + column)
    }

    /// Stores a value, returning the one previously in that cell.
    pub fn put(&mut self, row: usize, column: usize, value: V) -> Result<Option<V>, ValueError> {
        let index = self.index(row, column).ok_or_else(|| {
            ValueError::Invalid(format!(
                "cell ({row}, {column}) is outside a {}x{} grid",
                self.rows, self.columns
            ))
        })?;
        Ok(self.cells[index].replace(value))
    }

    /// Returns the value of a cell.
    pub fn get(&self, row: usize, column: usize) -> Option<&V> {
        self.index(row, column)
            .and_then(|index| self.cells[index].as_ref())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &V)> {
        let columns = self.columns;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.as_ref()
                .map(|value| (index / columns, index % columns, value))
        })
    }
}

impl<V> Default for Grid<V> {
    #[inline]
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cells: Vec::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Grid, MAX_GRID_CELLS, grid_cells};

    #[test]
    fn sizes_are_bounded() {
        assert_eq!(grid_cells(3, 4), Some(12));
        assert_eq!(grid_cells(MAX_GRID_CELLS, 1), Some(MAX_GRID_CELLS));
        assert_eq!(grid_cells(MAX_GRID_CELLS, 2), None);
        assert_eq!(grid_cells(usize::MAX, usize::MAX), None);
        assert!(Grid::<u8>::new(1 << 32, 1 << 32).is_err());
        assert_eq!(Grid::<u8>::new(0, 0).unwrap(), Grid::default());
    }

    #[test]
    fn iterates_row_major() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.put(1, 0, 'b').unwrap();
        grid.put(0, 1, 'a').unwrap();
        let cells: alloc::vec::Vec<_> = grid.iter().collect();
        assert_eq!(cells, [(0, 1, &'a'), (1, 0, &'b')]);
        assert_eq!(grid.len(), 2);
    }
}
