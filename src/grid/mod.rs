mod axes;
mod cell;

pub use axes::CumulativeAxes;
pub use cell::Cell;

use crate::error::{LayoutError, Result};

/// Group id shared by all standalone (unmerged) cells.
pub const UNGROUPED: u32 = 0;

/// Row-major rectangular grid of cells, indexed `[row][col]`.
///
/// Rows run along the depth axis and columns along the width axis.
/// Column widths are read from row 0 and row depths from column 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NonRectangular` if the rows differ in length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let expected = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(LayoutError::NonRectangular {
                    row,
                    expected,
                    found: cells.len(),
                }
                .into());
            }
        }
        Ok(Self { rows })
    }

    /// Creates a grid of ungrouped, visible cells from column widths and row depths.
    #[must_use]
    pub fn from_sizes(widths: &[f64], depths: &[f64]) -> Self {
        let rows = depths
            .iter()
            .map(|&depth| {
                widths
                    .iter()
                    .map(|&width| Cell::new(UNGROUPED, width, depth))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Creates a `rows x cols` grid of unit cells.
    #[must_use]
    pub fn uniform(rows: usize, cols: usize, size: f64) -> Self {
        Self::from_sizes(&vec![size; cols], &vec![size; rows])
    }

    /// Number of rows (depth axis).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (width axis).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Returns the cell at `(row, col)`, if in bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns a mutable reference to the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` if the position is outside the grid.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let count = self.rows() * self.cols();
        let index = row * self.cols() + col;
        self.rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| LayoutError::IndexOutOfRange { index, count }.into())
    }

    /// Returns the group id at a signed position, or `None` outside the grid.
    #[must_use]
    pub fn group_at(&self, row: isize, col: isize) -> Option<u32> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.cell(row, col).map(|c| c.group)
    }

    /// Iterates over all cells as `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells.iter().enumerate().map(move |(c, cell)| (r, c, cell))
        })
    }

    /// Column widths, read from row 0.
    #[must_use]
    pub fn column_widths(&self) -> Vec<f64> {
        self.rows
            .first()
            .map(|r| r.iter().map(|c| c.width).collect())
            .unwrap_or_default()
    }

    /// Row depths, read from column 0.
    #[must_use]
    pub fn row_depths(&self) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.first().map(|c| c.depth))
            .collect()
    }

    /// Builds the cumulative coordinate tables for this grid.
    #[must_use]
    pub fn cumulative_axes(&self) -> CumulativeAxes {
        CumulativeAxes::build(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uniform_grid_dimensions() {
        let grid = Grid::uniform(2, 3, 10.0);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert!(!grid.is_empty());
        assert_eq!(grid.iter().count(), 6);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![
            vec![Cell::new(0, 1.0, 1.0), Cell::new(0, 1.0, 1.0)],
            vec![Cell::new(0, 1.0, 1.0)],
        ];
        assert!(Grid::new(rows).is_err());
    }

    #[test]
    fn group_lookup_outside_is_none() {
        let grid = Grid::uniform(1, 1, 1.0);
        assert_eq!(grid.group_at(0, 0), Some(UNGROUPED));
        assert_eq!(grid.group_at(-1, 0), None);
        assert_eq!(grid.group_at(0, 1), None);
    }

    #[test]
    fn sizes_read_from_first_row_and_column() {
        let grid = Grid::from_sizes(&[10.0, 20.0], &[5.0, 7.0, 9.0]);
        assert_eq!(grid.column_widths(), vec![10.0, 20.0]);
        assert_eq!(grid.row_depths(), vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn cell_mut_out_of_range() {
        let mut grid = Grid::uniform(2, 2, 1.0);
        grid.cell_mut(1, 1).unwrap().group = 4;
        assert_eq!(grid.cell(1, 1).unwrap().group, 4);
        assert!(grid.cell_mut(2, 0).is_err());
    }
}
