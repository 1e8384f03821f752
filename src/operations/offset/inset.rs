use crate::error::{GeometryError, Result};
use crate::geometry::Polygon;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, PARALLEL_TOLERANCE};

/// Offsets a CCW polygon inward by a uniform distance.
///
/// Every vertex is replaced by the intersection of its two adjacent edges
/// after each edge is shifted `thickness` along its left (inward) normal.
/// Where the two edges are parallel the vertex is shifted along the
/// incoming edge's normal instead. Output keeps the input's vertex count
/// and winding. No self-intersection repair is attempted for concave or
/// thin regions.
///
/// A negative thickness offsets outward.
#[derive(Debug)]
pub struct InsetPolygon<'a> {
    polygon: &'a Polygon,
    thickness: f64,
}

impl<'a> InsetPolygon<'a> {
    /// Creates a new inset operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon, thickness: f64) -> Self {
        Self { polygon, thickness }
    }

    /// Executes the inset.
    ///
    /// # Errors
    ///
    /// - `GeometryError::Degenerate` if the polygon has fewer than 3 points
    ///   or a zero-length edge
    /// - `GeometryError::InvalidDimensions` if the thickness is not finite
    pub fn execute(&self) -> Result<Polygon> {
        let points = &self.polygon.points;
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::Degenerate(format!(
                "inset needs at least 3 points, got {n}"
            ))
            .into());
        }
        if !self.thickness.is_finite() {
            return Err(GeometryError::InvalidDimensions {
                what: "inset thickness",
                value: self.thickness,
            }
            .into());
        }

        let mut result = Vec::with_capacity(n);
        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            result.push(self.offset_vertex(&prev, &curr, &next)?);
        }

        Ok(Polygon::new(result))
    }

    fn offset_vertex(&self, prev: &Point2, curr: &Point2, next: &Point2) -> Result<Point2> {
        let d1 = segment_direction(prev, curr)?;
        let d2 = segment_direction(curr, next)?;
        let n1 = left_normal(d1);
        let n2 = left_normal(d2);

        let line1 = prev + n1 * self.thickness;
        let line2 = curr + n2 * self.thickness;

        match line_line_intersect_2d(&line1, &d1, &line2, &d2, PARALLEL_TOLERANCE) {
            Some((s, _)) => Ok(point_at(&line1, &d1, s)),
            None => Ok(curr + n1 * self.thickness),
        }
    }
}
