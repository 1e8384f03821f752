use crate::math::Point3;
use crate::tessellation::TriangleMesh;

/// An extruded, closed triangle-mesh solid with its axis-aligned bounds.
#[derive(Debug, Clone)]
pub struct Solid {
    pub mesh: TriangleMesh,
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Solid {
    /// Wraps a mesh, computing its bounds.
    #[must_use]
    pub fn from_mesh(mesh: TriangleMesh) -> Self {
        let mut min = Point3::origin();
        let mut max = Point3::origin();
        if let Some(first) = mesh.vertices.first() {
            min = *first;
            max = *first;
            for v in &mesh.vertices[1..] {
                min = min.inf(v);
                max = max.sup(v);
            }
        }
        Self { mesh, min, max }
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.mesh.signed_volume()
    }

    /// Number of triangles in the mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}
