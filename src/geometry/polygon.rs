use crate::math::polygon_2d::{bounds_2d, rotate_to_canonical_start, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// A closed 2D polygon.
///
/// Points wind counter-clockwise and the loop is implicitly closed: the
/// last point connects back to the first and is never duplicated.
/// Polygons with fewer than 3 points are degenerate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from an ordered point loop.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates the axis-aligned rectangle `[x, x + width] x [y, y + depth]`, CCW.
    #[must_use]
    pub fn rectangle(x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self::new(vec![
            Point2::new(x, y),
            Point2::new(x + width, y),
            Point2::new(x + width, y + depth),
            Point2::new(x, y + depth),
        ])
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the polygon cannot enclose any area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Signed area; positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Returns `true` if the polygon winds counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns a copy with the point order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    /// Returns the `(min, max)` corners of the bounding rectangle.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        bounds_2d(&self.points)
    }

    /// Returns a copy starting at the leftmost-bottom vertex.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self::new(rotate_to_canonical_start(&self.points))
    }

    /// Removes consecutive duplicate points, including a duplicated closing point.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let mut points: Vec<Point2> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if points.last().is_some_and(|q| (p - q).norm() < TOLERANCE) {
                continue;
            }
            points.push(*p);
        }
        while points.len() > 1 {
            let (first, last) = (points[0], points[points.len() - 1]);
            if (first - last).norm() < TOLERANCE {
                points.pop();
            } else {
                break;
            }
        }
        Self::new(points)
    }

    /// Returns `true` if every vertex of `other` lies within `tolerance` of
    /// the vertex at the same position in `self`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }
}
