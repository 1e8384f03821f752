use crate::error::{GeometryError, Result};
use crate::geometry::Polygon;
use crate::math::bezier_2d::sample_quadratic;
use crate::math::intersect_2d::cross_2d;
use crate::math::polygon_2d::segment_direction;
use crate::math::{Point2, TOLERANCE};

/// Radius policy for rounding a wall profile.
///
/// `base` is the radius applied at convex corners. `reference` is the
/// canonical corner radius of the outer profile and `wall_thickness` the
/// distance between the outer and inner profiles. Concave corners take:
///
/// - `reference - wall_thickness` when `base == reference` (outer profile)
/// - `reference` otherwise (inner profile)
///
/// so the inner and outer arcs stay concentric at both kinds of corner
/// and the wall keeps a constant thickness around them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerRadii {
    pub base: f64,
    pub reference: f64,
    pub wall_thickness: f64,
}

impl CornerRadii {
    /// Radii for the outer profile of a wall with corner radius `radius`.
    #[must_use]
    pub fn outer(radius: f64, wall_thickness: f64) -> Self {
        Self {
            base: radius,
            reference: radius,
            wall_thickness,
        }
    }

    /// Radii for the inner profile of a wall with corner radius `radius`.
    #[must_use]
    pub fn inner(radius: f64, wall_thickness: f64) -> Self {
        Self {
            base: radius - wall_thickness,
            reference: radius,
            wall_thickness,
        }
    }

    /// Radius for a corner of the given convexity, before edge clamping.
    #[must_use]
    pub fn for_corner(&self, convex: bool) -> f64 {
        if convex {
            self.base
        } else if (self.base - self.reference).abs() < TOLERANCE {
            self.reference - self.wall_thickness
        } else {
            self.reference
        }
    }
}

/// Replaces the sharp vertices of a CCW polygon with quadratic arcs.
///
/// Each corner is trimmed back along both adjacent edges by its radius
/// and an arc is spliced in with the original vertex as control point.
/// A radius is clamped to half the shorter adjacent edge so neighboring
/// arcs never overlap. Each rounded corner contributes `segments` points
/// (at least 2), so the output has about `N * segments` points.
#[derive(Debug)]
pub struct RoundCorners<'a> {
    polygon: &'a Polygon,
    radii: CornerRadii,
    segments: usize,
}

impl<'a> RoundCorners<'a> {
    /// Creates a new rounding operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon, radii: CornerRadii, segments: usize) -> Self {
        Self {
            polygon,
            radii,
            segments,
        }
    }

    /// Executes the rounding.
    ///
    /// Returns the input unchanged when `radii.base <= 0` or the polygon has
    /// fewer than 3 points.
    ///
    /// # Errors
    ///
    /// - `GeometryError::Degenerate` if the polygon has a zero-length edge or
    ///   a non-finite point
    /// - `GeometryError::InvalidDimensions` if a radius or the thickness is not finite
    pub fn execute(&self) -> Result<Polygon> {
        let points = &self.polygon.points;
        let n = points.len();
        if self.radii.base <= 0.0 || n < 3 {
            return Ok(self.polygon.clone());
        }
        for (what, value) in [
            ("corner radius", self.radii.base),
            ("reference corner radius", self.radii.reference),
            ("wall thickness", self.radii.wall_thickness),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::InvalidDimensions { what, value }.into());
            }
        }
        if let Some(p) = points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeometryError::Degenerate(format!(
                "non-finite polygon point ({}, {})",
                p.x, p.y
            ))
            .into());
        }

        let samples = self.segments.max(2);
        let mut result = Vec::with_capacity(n * samples);
        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            self.push_corner(&mut result, &prev, &curr, &next, samples)?;
        }

        Ok(Polygon::new(result).deduplicated())
    }

    fn push_corner(
        &self,
        out: &mut Vec<Point2>,
        prev: &Point2,
        curr: &Point2,
        next: &Point2,
        samples: usize,
    ) -> Result<()> {
        let d1 = segment_direction(prev, curr)?;
        let d2 = segment_direction(curr, next)?;
        let convex = cross_2d(&d1, &d2) >= 0.0;

        let max_radius = (curr - prev).norm().min((next - curr).norm()) * 0.5;
        let radius = self.radii.for_corner(convex).min(max_radius).max(0.0);
        if radius < TOLERANCE {
            out.push(*curr);
            return Ok(());
        }

        let start = curr - d1 * radius;
        let end = curr + d2 * radius;
        out.extend(sample_quadratic(&start, curr, &end, samples));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CellboxError;
    use approx::assert_relative_eq;

    fn l_shape() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 20.0),
            Point2::new(20.0, 20.0),
            Point2::new(20.0, 40.0),
            Point2::new(0.0, 40.0),
        ])
    }

    #[test]
    fn zero_radius_is_identity() {
        let poly = l_shape();
        let rounded = RoundCorners::new(&poly, CornerRadii::outer(0.0, 2.0), 8)
            .execute()
            .unwrap();
        assert_eq!(rounded, poly);
    }

    #[test]
    fn rectangle_corners_trimmed_by_radius() {
        let rect = Polygon::rectangle(0.0, 0.0, 10.0, 6.0);
        let rounded = RoundCorners::new(&rect, CornerRadii::outer(2.0, 1.0), 8)
            .execute()
            .unwrap();
        assert_eq!(rounded.len(), 4 * 8);
        assert!(rounded.is_ccw());

        // First corner (0, 0): arc runs from 2 up the left edge to 2 along the bottom.
        assert_relative_eq!(rounded.points[0], Point2::new(0.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(rounded.points[7], Point2::new(2.0, 0.0), epsilon = 1e-12);
        // Second corner (10, 0).
        assert_relative_eq!(rounded.points[8], Point2::new(8.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(rounded.points[15], Point2::new(10.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn outer_concave_corner_uses_reduced_radius() {
        let radii = CornerRadii::outer(5.0, 2.0);
        assert_relative_eq!(radii.for_corner(true), 5.0);
        assert_relative_eq!(radii.for_corner(false), 3.0);

        let rounded = RoundCorners::new(&l_shape(), radii, 4).execute().unwrap();
        // Concave vertex (20, 20) is the fourth corner: incoming edge heads west.
        let start = rounded.points[12];
        let end = rounded.points[15];
        assert_relative_eq!(start, Point2::new(23.0, 20.0), epsilon = 1e-12);
        assert_relative_eq!(end, Point2::new(20.0, 23.0), epsilon = 1e-12);
    }

    #[test]
    fn inner_concave_corner_uses_reference_radius() {
        let radii = CornerRadii::inner(5.0, 2.0);
        assert_relative_eq!(radii.for_corner(true), 3.0);
        assert_relative_eq!(radii.for_corner(false), 5.0);
    }

    #[test]
    fn radius_clamped_to_half_edge() {
        let rect = Polygon::rectangle(0.0, 0.0, 4.0, 4.0);
        let rounded = RoundCorners::new(&rect, CornerRadii::outer(10.0, 0.0), 5)
            .execute()
            .unwrap();
        // Adjacent arcs meet at edge midpoints, shared points are merged.
        assert_eq!(rounded.len(), 4 * 4);
        assert!(rounded.is_ccw());
        assert!(rounded
            .points
            .iter()
            .any(|p| (p - Point2::new(2.0, 0.0)).norm() < 1e-12));
    }

    #[test]
    fn non_positive_concave_radius_keeps_sharp_vertex() {
        let radii = CornerRadii::outer(2.0, 3.0);
        let rounded = RoundCorners::new(&l_shape(), radii, 6).execute().unwrap();
        assert!(rounded
            .points
            .iter()
            .any(|p| (p - Point2::new(20.0, 20.0)).norm() < 1e-12));
        assert_eq!(rounded.len(), 5 * 6 + 1);
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let mut poly = Polygon::rectangle(0.0, 0.0, 10.0, 6.0);
        poly.points[2] = Point2::new(f64::NAN, 6.0);
        let result = RoundCorners::new(&poly, CornerRadii::outer(2.0, 1.0), 4).execute();
        assert!(matches!(
            result,
            Err(CellboxError::Geometry(GeometryError::Degenerate(_)))
        ));

        poly.points[2] = Point2::new(f64::INFINITY, 6.0);
        assert!(RoundCorners::new(&poly, CornerRadii::outer(2.0, 1.0), 4)
            .execute()
            .is_err());
    }

    #[test]
    fn small_polygon_returned_unchanged() {
        let poly = Polygon::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        let rounded = RoundCorners::new(&poly, CornerRadii::outer(1.0, 0.0), 4)
            .execute()
            .unwrap();
        assert_eq!(rounded, poly);
    }
}
