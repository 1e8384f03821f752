use super::Grid;
use crate::math::Point2;

/// Prefix-sum coordinate tables mapping grid corner indices to world units.
///
/// `widths[k]` is the world x of grid column line `k` and `depths[k]`
/// the world y of grid row line `k`; both start at 0 and hold one more
/// entry than there are columns/rows. An empty grid yields empty tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeAxes {
    pub widths: Vec<f64>,
    pub depths: Vec<f64>,
}

impl CumulativeAxes {
    /// Builds both tables from the grid's column widths and row depths.
    #[must_use]
    pub fn build(grid: &Grid) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        Self {
            widths: prefix_sums(&grid.column_widths()),
            depths: prefix_sums(&grid.row_depths()),
        }
    }

    /// Returns `true` if no coordinates are available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty() || self.depths.is_empty()
    }

    /// Maps a grid corner `(col, row)` to world coordinates.
    #[must_use]
    pub fn to_world(&self, col: usize, row: usize) -> Option<Point2> {
        Some(Point2::new(*self.widths.get(col)?, *self.depths.get(row)?))
    }

    /// Total width covered by the grid.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.widths.last().copied().unwrap_or(0.0)
    }

    /// Total depth covered by the grid.
    #[must_use]
    pub fn total_depth(&self) -> f64 {
        self.depths.last().copied().unwrap_or(0.0)
    }
}

fn prefix_sums(sizes: &[f64]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(sizes.len() + 1);
    let mut acc = 0.0;
    sums.push(acc);
    for s in sizes {
        acc += s;
        sums.push(acc);
    }
    sums
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn prefix_sums_start_at_zero() {
        let grid = Grid::from_sizes(&[10.0, 20.0, 5.0], &[3.0, 4.0]);
        let axes = CumulativeAxes::build(&grid);
        assert_eq!(axes.widths, vec![0.0, 10.0, 30.0, 35.0]);
        assert_eq!(axes.depths, vec![0.0, 3.0, 7.0]);
        assert_relative_eq!(axes.total_width(), 35.0);
        assert_relative_eq!(axes.total_depth(), 7.0);
    }

    #[test]
    fn empty_grid_yields_empty_axes() {
        let axes = CumulativeAxes::build(&Grid::default());
        assert!(axes.is_empty());
        assert!(axes.to_world(0, 0).is_none());
    }

    #[test]
    fn corner_mapping() {
        let grid = Grid::from_sizes(&[10.0, 20.0], &[5.0]);
        let axes = grid.cumulative_axes();
        let p = axes.to_world(2, 1).unwrap();
        assert_relative_eq!(p.x, 30.0);
        assert_relative_eq!(p.y, 5.0);
        assert!(axes.to_world(3, 0).is_none());
    }
}
