use nalgebra::Matrix3;

use crate::error::{GeometryError, Result, TessellationError};
use crate::geometry::Polygon;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::tessellation::{PlanarTriangulation, TriangleMesh, TriangulateRegion};

use super::Solid;

/// Extrudes a planar region, optionally with one hole, into a closed solid.
///
/// The profile lies in the XY plane and is extruded along +Z; the result
/// is then rotated -90 degrees about X so the extrusion axis becomes +Y.
/// A profile point `(x, y)` at height `h` ends up at `(x, h, -y)`.
pub struct ExtrudeRegion<'a> {
    outer: &'a Polygon,
    hole: Option<&'a Polygon>,
    height: f64,
}

impl<'a> ExtrudeRegion<'a> {
    /// Creates a new extrusion of `outer` to `height`.
    #[must_use]
    pub fn new(outer: &'a Polygon, height: f64) -> Self {
        Self {
            outer,
            hole: None,
            height,
        }
    }

    /// Cuts `hole` out of the extruded region.
    #[must_use]
    pub fn with_hole(mut self, hole: &'a Polygon) -> Self {
        self.hole = Some(hole);
        self
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidDimensions` if the height is not positive
    /// - `GeometryError::Degenerate` if a profile has fewer than 3 points or
    ///   encloses no area
    /// - `TessellationError::Failed` if the cap faces cannot be triangulated
    pub fn execute(&self) -> Result<Solid> {
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(GeometryError::InvalidDimensions {
                what: "extrusion height",
                value: self.height,
            }
            .into());
        }

        let outer = ccw_profile(self.outer, "outer")?;
        let hole = self.hole.map(|h| ccw_profile(h, "hole")).transpose()?;

        let mut triangulate = TriangulateRegion::new(&outer);
        if let Some(hole) = &hole {
            triangulate = triangulate.with_hole(hole);
        }
        let cap = triangulate.execute()?;

        // Bottom cap faces down, top cap faces up.
        let mut mesh = cap_mesh(&cap, 0.0, true);
        if mesh.is_empty() {
            return Err(TessellationError::Failed("profile has no interior".into()).into());
        }
        mesh.merge(&cap_mesh(&cap, self.height, false));

        push_side_walls(&mut mesh, &outer.points, self.height);
        if let Some(hole) = &hole {
            let reversed: Vec<Point2> = hole.points.iter().rev().copied().collect();
            push_side_walls(&mut mesh, &reversed, self.height);
        }

        mesh.transform(&y_up_rotation());
        Ok(Solid::from_mesh(mesh))
    }
}

/// Extrudes the outer profile with the inner profile as a hole, forming
/// the walls of a box.
///
/// # Errors
///
/// Returns an error if either profile is degenerate, the height is not
/// positive, or the profiles cross each other.
pub fn build_wall_solid(outer: &Polygon, inner: &Polygon, wall_height: f64) -> Result<Solid> {
    ExtrudeRegion::new(outer, wall_height)
        .with_hole(inner)
        .execute()
}

/// Extrudes the outer profile without a hole, forming the floor of a box.
///
/// # Errors
///
/// Returns an error if the profile is degenerate or the thickness is not positive.
pub fn build_floor_solid(outer: &Polygon, thickness: f64) -> Result<Solid> {
    ExtrudeRegion::new(outer, thickness).execute()
}

/// Maps the local extrusion frame (+Z up) to the output frame (+Y up).
fn y_up_rotation() -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0)
}

fn ccw_profile(polygon: &Polygon, which: &str) -> Result<Polygon> {
    let clean = polygon.deduplicated();
    if clean.is_degenerate() {
        return Err(GeometryError::Degenerate(format!(
            "{which} profile has {} points",
            clean.len()
        ))
        .into());
    }
    if clean.signed_area().abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(format!("{which} profile encloses no area")).into());
    }
    Ok(if clean.is_ccw() { clean } else { clean.reversed() })
}

/// Places a planar triangulation at height `z`, facing up or down.
fn cap_mesh(cap: &PlanarTriangulation, z: f64, facing_down: bool) -> TriangleMesh {
    let normal = if facing_down { -Vector3::z() } else { Vector3::z() };
    let mut mesh = TriangleMesh::default();
    for p in &cap.points {
        mesh.push_vertex(Point3::new(p.x, p.y, z), normal);
    }
    mesh.indices.extend(
        cap.triangles
            .iter()
            .map(|&[a, b, c]| if facing_down { [a, c, b] } else { [a, b, c] }),
    );
    mesh
}

/// Adds one outward-facing quad per edge of a loop whose material lies
/// on its left.
fn push_side_walls(mesh: &mut TriangleMesh, points: &[Point2], height: f64) {
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let d = b - a;
        let len = d.norm();
        if len < TOLERANCE {
            continue;
        }
        let normal = Vector3::new(d.y / len, -d.x / len, 0.0);

        let a0 = mesh.push_vertex(Point3::new(a.x, a.y, 0.0), normal);
        let b0 = mesh.push_vertex(Point3::new(b.x, b.y, 0.0), normal);
        let b1 = mesh.push_vertex(Point3::new(b.x, b.y, height), normal);
        let a1 = mesh.push_vertex(Point3::new(a.x, a.y, height), normal);
        mesh.indices.push([a0, b0, b1]);
        mesh.indices.push([a0, b1, a1]);
    }
}
