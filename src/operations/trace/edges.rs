use crate::grid::Grid;

/// A grid corner as `(col, row)` in index space.
pub type Corner = (usize, usize);

/// A unit-length, axis-aligned boundary segment in index space.
///
/// Oriented so the region lies on its left (CCW traversal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitEdge {
    pub start: Corner,
    pub end: Corner,
}

/// Collects the boundary edges of all cells for which `inside` holds.
///
/// A side contributes an edge when the neighbor across it is outside the
/// grid or not part of the region. Cells are visited in row-major order,
/// each emitting bottom, right, top, left.
pub fn boundary_edges(grid: &Grid, inside: impl Fn(usize, usize) -> bool) -> Vec<UnitEdge> {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut edges = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            if !inside(row, col) {
                continue;
            }
            let outside = |r: Option<usize>, c: Option<usize>| match (r, c) {
                (Some(r), Some(c)) if r < rows && c < cols => !inside(r, c),
                _ => true,
            };

            if outside(row.checked_sub(1), Some(col)) {
                edges.push(UnitEdge {
                    start: (col, row),
                    end: (col + 1, row),
                });
            }
            if outside(Some(row), Some(col + 1)) {
                edges.push(UnitEdge {
                    start: (col + 1, row),
                    end: (col + 1, row + 1),
                });
            }
            if outside(Some(row + 1), Some(col)) {
                edges.push(UnitEdge {
                    start: (col + 1, row + 1),
                    end: (col, row + 1),
                });
            }
            if outside(Some(row), col.checked_sub(1)) {
                edges.push(UnitEdge {
                    start: (col, row + 1),
                    end: (col, row),
                });
            }
        }
    }

    edges
}
