mod edges;
mod stitch;

use tracing::{debug, warn};

use crate::geometry::Polygon;
use crate::grid::{CumulativeAxes, Grid};
use crate::math::Point2;

/// The set of cells whose outline is traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// All cells carrying this group id.
    Group(u32),
    /// A single standalone cell at `(row, col)`.
    Cell { row: usize, col: usize },
}

impl Region {
    fn contains(self, grid: &Grid, row: usize, col: usize) -> bool {
        match self {
            Self::Group(id) => grid.cell(row, col).is_some_and(|c| c.group == id),
            Self::Cell { row: r, col: c } => r == row && c == col && grid.cell(row, col).is_some(),
        }
    }
}

/// Outcome of tracing a region's boundary.
#[derive(Debug, Clone, Default)]
pub struct TraceResult {
    /// The boundary loop in world coordinates (CCW when complete).
    pub polygon: Polygon,
    /// `true` if stitching stopped before consuming every boundary segment
    /// or the loop failed to close (holes, disconnected regions).
    pub truncated: bool,
    /// Boundary segments left over when stitching stopped.
    pub unused_segments: usize,
    /// `true` if the loop touches itself at a corner, as when cells of the
    /// region meet only diagonally. Such a loop cannot bound a solid.
    pub pinched: bool,
}

impl TraceResult {
    /// Returns `true` if the loop closed, covered the whole boundary and
    /// never touches itself.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.truncated && !self.pinched && !self.polygon.is_degenerate()
    }
}

/// Extracts the closed boundary polygon of a cell region.
///
/// Boundary edges are collected and stitched in grid-index space, where
/// corner comparisons are exact, and scaled to world units through the
/// grid's cumulative axes only at the end.
pub struct TraceOutline<'a> {
    grid: &'a Grid,
    axes: &'a CumulativeAxes,
    region: Region,
}

impl<'a> TraceOutline<'a> {
    /// Creates a new trace over `grid` using precomputed `axes`.
    #[must_use]
    pub fn new(grid: &'a Grid, axes: &'a CumulativeAxes, region: Region) -> Self {
        Self { grid, axes, region }
    }

    /// Executes the trace.
    ///
    /// An empty region or empty grid yields an empty polygon. A region that
    /// cannot be stitched into one loop yields the partial loop with
    /// `truncated` set; one whose loop touches itself has `pinched` set.
    #[must_use]
    pub fn execute(&self) -> TraceResult {
        if self.grid.is_empty() || self.axes.is_empty() {
            return TraceResult::default();
        }

        let edges = edges::boundary_edges(self.grid, |row, col| {
            self.region.contains(self.grid, row, col)
        });
        if edges.is_empty() {
            return TraceResult::default();
        }

        let stitched = stitch::stitch_loop(&edges);
        let corners = stitch::remove_collinear(&stitched.corners, stitched.closed);

        let points: Vec<Point2> = corners
            .iter()
            .filter_map(|&(col, row)| self.axes.to_world(col, row))
            .collect();
        let polygon = if stitched.closed {
            Polygon::new(points).canonical()
        } else {
            Polygon::new(points)
        };

        let truncated = !stitched.closed || stitched.unused > 0;
        if truncated {
            warn!(
                region = ?self.region,
                unused = stitched.unused,
                closed = stitched.closed,
                "outline trace truncated"
            );
        } else if stitched.pinched {
            warn!(region = ?self.region, "outline touches itself at a corner");
        } else {
            debug!(region = ?self.region, vertices = polygon.len(), "outline traced");
        }

        TraceResult {
            polygon,
            truncated,
            unused_segments: stitched.unused,
            pinched: stitched.pinched,
        }
    }
}
