use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{Result, TessellationError};
use crate::geometry::Polygon;
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangles covering a planar region, indexing into `points`.
///
/// Every triangle winds counter-clockwise in the XY plane.
#[derive(Debug, Clone, Default)]
pub struct PlanarTriangulation {
    pub points: Vec<Point2>,
    pub triangles: Vec<[u32; 3]>,
}

impl PlanarTriangulation {
    /// Total area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let a = self.points[t[0] as usize];
                let b = self.points[t[1] as usize];
                let c = self.points[t[2] as usize];
                ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) * 0.5
            })
            .sum()
    }
}

/// Triangulates the region bounded by an outer polygon minus optional holes.
///
/// Uses a constrained Delaunay triangulation of all boundary loops and
/// keeps the triangles reached across an odd number of constraint edges
/// from the outside.
pub struct TriangulateRegion<'a> {
    outer: &'a Polygon,
    holes: Vec<&'a Polygon>,
}

impl<'a> TriangulateRegion<'a> {
    /// Creates a new triangulation of `outer`.
    #[must_use]
    pub fn new(outer: &'a Polygon) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds a hole boundary.
    #[must_use]
    pub fn with_hole(mut self, hole: &'a Polygon) -> Self {
        self.holes.push(hole);
        self
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if a loop has fewer than 3 points,
    /// a point cannot be inserted, or boundary loops cross each other.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<PlanarTriangulation> {
        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &self.outer.points)?;
        for hole in &self.holes {
            insert_constraint_loop(&mut cdt, &hole.points)?;
        }

        let interior_faces = classify_interior_faces(&cdt);

        let mut result = PlanarTriangulation::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face_handle in cdt.inner_faces() {
            if !interior_faces.contains(&face_handle.fix().index()) {
                continue;
            }

            let mut tri = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                let idx = vh.fix().index();
                tri[i] = *vertex_map.entry(idx).or_insert_with(|| {
                    let pos = vh.position();
                    result.points.push(Point2::new(pos.x, pos.y));
                    (result.points.len() - 1) as u32
                });
            }
            result.triangles.push(tri);
        }

        Ok(result)
    }
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed(
                "boundary loops intersect each other".into(),
            )
            .into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Indices of the inner faces lying inside the region.
///
/// Walks the face adjacency graph from the convex hull inward, flipping
/// an inside/outside parity whenever a constraint edge is crossed. Faces
/// on the hull start inside only if their hull edge is a constraint.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut parity: HashMap<usize, bool> = HashMap::new();
    let mut pending: Vec<(FixedFaceHandle<InnerTag>, bool)> = Vec::new();

    for hull_edge in cdt.convex_hull() {
        let inside = cdt.is_constraint_edge(hull_edge.as_undirected().fix());
        let hull_faces = [hull_edge.face(), hull_edge.rev().face()];
        for face in hull_faces.iter().filter_map(|f| f.as_inner()) {
            if let Entry::Vacant(slot) = parity.entry(face.fix().index()) {
                slot.insert(inside);
                pending.push((face.fix(), inside));
            }
        }
    }

    while let Some((face, inside)) = pending.pop() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let crossed = inside ^ cdt.is_constraint_edge(edge.as_undirected().fix());
            if let Entry::Vacant(slot) = parity.entry(neighbor.fix().index()) {
                slot.insert(crossed);
                pending.push((neighbor.fix(), crossed));
            }
        }
    }

    parity
        .into_iter()
        .filter_map(|(index, inside)| inside.then_some(index))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn square_produces_two_triangles() {
        let square = Polygon::rectangle(0.0, 0.0, 2.0, 2.0);
        let tri = TriangulateRegion::new(&square).execute().unwrap();
        assert_eq!(tri.triangles.len(), 2);
        assert!((tri.area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn l_shape_concave_area() {
        let l = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 4.0),
            Point2::new(0.0, 4.0),
        ]);
        let tri = TriangulateRegion::new(&l).execute().unwrap();
        assert_eq!(tri.triangles.len(), 4);
        assert!((tri.area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn hole_is_excluded() {
        let outer = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let inner = Polygon::rectangle(2.0, 2.0, 6.0, 6.0);
        let tri = TriangulateRegion::new(&outer)
            .with_hole(&inner)
            .execute()
            .unwrap();
        assert_eq!(tri.triangles.len(), 8);
        assert!((tri.area() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_loop_fails() {
        let line = Polygon::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(TriangulateRegion::new(&line).execute().is_err());
    }

    #[test]
    fn crossing_hole_fails() {
        let outer = Polygon::rectangle(0.0, 0.0, 4.0, 4.0);
        let crossing = Polygon::rectangle(2.0, 2.0, 4.0, 4.0);
        assert!(TriangulateRegion::new(&outer)
            .with_hole(&crossing)
            .execute()
            .is_err());
    }
}
