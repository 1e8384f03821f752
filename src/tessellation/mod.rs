mod triangulate_region;

pub use triangulate_region::{PlanarTriangulation, TriangulateRegion};

use crate::math::{Point3, Vector3};

/// A triangle mesh with per-vertex normals.
///
/// Vertices are not shared between faces of different orientation, so
/// normals are flat per face.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a counter-clockwise triangle
    /// seen from outside).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Appends another mesh, re-basing its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|t| [t[0] + base, t[1] + base, t[2] + base]),
        );
    }

    /// Appends a vertex and returns its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_vertex(&mut self, point: Point3, normal: Vector3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(point);
        self.normals.push(normal);
        idx
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Enclosed volume by the signed tetrahedron method.
    ///
    /// Positive when triangles wind counter-clockwise seen from outside.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.indices
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize].coords;
                let v1 = self.vertices[tri[1] as usize].coords;
                let v2 = self.vertices[tri[2] as usize].coords;
                v0.dot(&v1.cross(&v2)) / 6.0
            })
            .sum()
    }

    /// Applies a linear transform to positions and normals.
    pub fn transform(&mut self, matrix: &nalgebra::Matrix3<f64>) {
        for v in &mut self.vertices {
            *v = Point3::from(matrix * v.coords);
        }
        for n in &mut self.normals {
            *n = (matrix * *n).normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetra() -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        let n = Vector3::z();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ] {
            mesh.push_vertex(p, n);
        }
        mesh.indices = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        mesh
    }

    #[test]
    fn tetrahedron_volume() {
        assert!((tetra().signed_volume() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn merge_rebases_indices() {
        let mut a = tetra();
        a.merge(&tetra());
        assert_eq!(a.vertices.len(), 8);
        assert_eq!(a.triangle_count(), 8);
        assert_eq!(a.indices[4], [4, 6, 5]);
        assert!((a.signed_volume() - 2.0 / 6.0).abs() < 1e-12);
    }
}
