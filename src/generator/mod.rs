mod metadata;
mod params;

pub use metadata::BoxMetadata;
pub use params::BoxParams;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{CellboxError, GeometryError, OperationError, Result};
use crate::geometry::Polygon;
use crate::grid::{CumulativeAxes, UNGROUPED};
use crate::layout::BoxLayout;
use crate::operations::offset::InsetPolygon;
use crate::operations::rounding::{CornerRadii, RoundCorners};
use crate::operations::shaping::{build_floor_solid, build_wall_solid, Solid};
use crate::operations::trace::{Region, TraceOutline};

/// Geometry produced for one visible box.
#[derive(Debug, Clone)]
pub struct GeneratedBox {
    pub metadata: BoxMetadata,
    /// Rounded outer wall profile.
    pub outer: Polygon,
    /// Rounded inner wall profile.
    pub inner: Polygon,
    pub wall: Solid,
    /// Present when the parameters ask for a bottom.
    pub floor: Option<Solid>,
}

/// A box that could not be built, with the reason.
#[derive(Debug)]
pub struct SkippedBox {
    pub index: usize,
    pub error: CellboxError,
}

/// Everything produced by one generation pass.
#[derive(Debug, Default)]
pub struct Generation {
    pub boxes: Vec<GeneratedBox>,
    pub skipped: Vec<SkippedBox>,
}

/// Builds wall and floor solids for every visible box of a layout.
///
/// Each standalone cell and each merged box is traced, inset by the wall
/// thickness, rounded and extruded. A box that fails is recorded in
/// [`Generation::skipped`] and the remaining boxes are still built.
pub struct GenerateBoxes<'a> {
    params: BoxParams,
    layout: &'a BoxLayout,
}

impl<'a> GenerateBoxes<'a> {
    /// Creates a new generation pass.
    #[must_use]
    pub fn new(params: BoxParams, layout: &'a BoxLayout) -> Self {
        Self { params, layout }
    }

    /// Executes the generation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parameters are invalid; per-box
    /// failures are reported in the result.
    pub fn execute(&self) -> Result<Generation> {
        self.params.validate()?;

        let grid = self.layout.grid();
        let axes = grid.cumulative_axes();
        let mut generation = Generation::default();
        if axes.is_empty() {
            return Ok(generation);
        }

        let mut seen_groups = HashSet::new();
        for (row, col, cell) in grid.iter() {
            let index = self.layout.index_of(row, col);
            let (region, metadata) = if cell.group == UNGROUPED {
                (Region::Cell { row, col }, self.standalone_metadata(index)?)
            } else {
                if !seen_groups.insert(cell.group) {
                    continue;
                }
                (Region::Group(cell.group), self.combined_metadata(index)?)
            };

            if !cell.visible {
                debug!(index, "skipping hidden box");
                continue;
            }

            match self.build_box(&axes, region, metadata) {
                Ok(built) => generation.boxes.push(built),
                Err(error) => {
                    warn!(index, %error, "skipping box");
                    generation.skipped.push(SkippedBox { index, error });
                }
            }
        }

        info!(
            built = generation.boxes.len(),
            skipped = generation.skipped.len(),
            "generated boxes"
        );
        Ok(generation)
    }

    fn standalone_metadata(&self, index: usize) -> Result<BoxMetadata> {
        let (origin_x, origin_y, width, depth) = self.layout.box_rect(index)?;
        Ok(BoxMetadata {
            index,
            width,
            depth,
            height: self.params.wall_height,
            origin_x,
            origin_y,
            is_combined: false,
            combined_indices: vec![index],
            direction: None,
        })
    }

    fn combined_metadata(&self, index: usize) -> Result<BoxMetadata> {
        let info = self.layout.combined_for(index).ok_or_else(|| {
            OperationError::Failed(format!("box {index} has a group but no merge record"))
        })?;
        let (origin_x, origin_y, _, _) = self.layout.box_rect(info.primary_index)?;
        Ok(BoxMetadata {
            index: info.primary_index,
            width: info.width,
            depth: info.depth,
            height: self.params.wall_height,
            origin_x,
            origin_y,
            is_combined: true,
            combined_indices: info.indices(),
            direction: Some(info.direction),
        })
    }

    fn build_box(
        &self,
        axes: &CumulativeAxes,
        region: Region,
        metadata: BoxMetadata,
    ) -> Result<GeneratedBox> {
        let p = &self.params;
        let (width, depth) = (metadata.width, metadata.depth);
        for (what, value) in [("box width", width), ("box depth", depth)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidDimensions { what, value }.into());
            }
        }
        if p.wall_thickness * 2.0 >= width.min(depth) {
            return Err(GeometryError::WallTooThick {
                thickness: p.wall_thickness,
                width,
                depth,
            }
            .into());
        }

        let trace = TraceOutline::new(self.layout.grid(), axes, region).execute();
        if !trace.is_complete() {
            return Err(OperationError::Failed(format!(
                "outline of box {} is incomplete ({} segments unused, pinched: {})",
                metadata.index, trace.unused_segments, trace.pinched
            ))
            .into());
        }
        let outer_raw = trace.polygon;
        let inner_raw = InsetPolygon::new(&outer_raw, p.wall_thickness).execute()?;

        let radius = p.effective_corner_radius(width, depth);
        let segments = p.segments_per_corner;
        let outer_radii = CornerRadii::outer(radius, p.wall_thickness);
        let inner_radii = CornerRadii::inner(radius, p.wall_thickness);
        let outer = RoundCorners::new(&outer_raw, outer_radii, segments).execute()?;
        let inner = RoundCorners::new(&inner_raw, inner_radii, segments).execute()?;

        let wall = build_wall_solid(&outer, &inner, p.wall_height)?;
        let floor = if p.has_bottom {
            Some(build_floor_solid(&outer, p.wall_thickness)?)
        } else {
            None
        };

        debug!(
            index = metadata.index,
            combined = metadata.is_combined,
            radius,
            outer_points = outer.len(),
            "built box"
        );
        Ok(GeneratedBox {
            metadata,
            outer,
            inner,
            wall,
            floor,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> BoxParams {
        BoxParams {
            total_width: 250.0,
            total_depth: 100.0,
            corner_radius: 0.0,
            wall_thickness: 2.0,
            wall_height: 10.0,
            ..BoxParams::default()
        }
    }

    #[test]
    fn one_box_per_cell() {
        let layout = BoxLayout::from_params(&params()).unwrap();
        let generation = GenerateBoxes::new(params(), &layout).execute().unwrap();
        assert_eq!(generation.boxes.len(), 3);
        assert!(generation.skipped.is_empty());

        let last = &generation.boxes[2];
        assert_eq!(last.metadata.index, 2);
        assert_relative_eq!(last.metadata.width, 50.0);
        assert_relative_eq!(last.metadata.origin_x, 200.0);
        assert!(!last.metadata.is_combined);
        assert!(last.floor.is_some());
    }

    #[test]
    fn square_wall_volume() {
        let layout = BoxLayout::from_params(&params()).unwrap();
        let generation = GenerateBoxes::new(params(), &layout).execute().unwrap();
        let first = &generation.boxes[0];
        // 100 x 100 outer, 96 x 96 inner, sharp corners.
        assert_relative_eq!(
            first.wall.volume(),
            (100.0 * 100.0 - 96.0 * 96.0) * 10.0,
            epsilon = 1e-6
        );
        let floor = first.floor.as_ref().unwrap();
        assert_relative_eq!(floor.volume(), 100.0 * 100.0 * 2.0, epsilon = 1e-6);
    }

    #[test]
    fn merged_box_is_generated_once() {
        let mut layout = BoxLayout::from_params(&params()).unwrap();
        layout.merge(&[0, 1]).unwrap();
        let generation = GenerateBoxes::new(params(), &layout).execute().unwrap();
        assert_eq!(generation.boxes.len(), 2);

        let merged = &generation.boxes[0];
        assert!(merged.metadata.is_combined);
        assert_eq!(merged.metadata.combined_indices, vec![0, 1]);
        assert_relative_eq!(merged.metadata.width, 200.0);
        let (min, max) = merged.outer.bounds().unwrap();
        assert_relative_eq!(max.x - min.x, 200.0);
        assert_relative_eq!(max.y - min.y, 100.0);
    }

    #[test]
    fn hidden_boxes_are_not_built() {
        let mut layout = BoxLayout::from_params(&params()).unwrap();
        layout.merge(&[0, 1]).unwrap();
        layout.set_hidden(0, true).unwrap();
        layout.set_hidden(2, true).unwrap();
        let generation = GenerateBoxes::new(params(), &layout).execute().unwrap();
        assert!(generation.boxes.is_empty());
    }

    #[test]
    fn too_thick_walls_skip_box_but_continue() {
        let p = BoxParams {
            wall_thickness: 30.0,
            ..params()
        };
        let layout = BoxLayout::from_params(&p).unwrap();
        let generation = GenerateBoxes::new(p, &layout).execute().unwrap();
        // The 50-wide box is too narrow; the two 100-wide boxes still build.
        assert_eq!(generation.boxes.len(), 2);
        assert_eq!(generation.skipped.len(), 1);
        assert_eq!(generation.skipped[0].index, 2);
        assert!(matches!(
            generation.skipped[0].error,
            CellboxError::Geometry(GeometryError::WallTooThick { .. })
        ));
    }

    #[test]
    fn no_floor_without_bottom() {
        let p = BoxParams {
            has_bottom: false,
            ..params()
        };
        let layout = BoxLayout::from_params(&p).unwrap();
        let generation = GenerateBoxes::new(p, &layout).execute().unwrap();
        assert!(generation.boxes.iter().all(|b| b.floor.is_none()));
    }

    #[test]
    fn invalid_params_fail_fast() {
        let layout = BoxLayout::from_params(&params()).unwrap();
        let p = BoxParams {
            wall_height: -1.0,
            ..params()
        };
        assert!(GenerateBoxes::new(p, &layout).execute().is_err());
    }
}
