use crate::layout::MergeDirection;

/// Identity and nominal size of one generated box.
///
/// Carried alongside the geometry so rendering, picking and export can
/// label and locate a box without inspecting the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxMetadata {
    /// Box index in the layout; the primary index for merged boxes.
    pub index: usize,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    /// World position of the box's minimum corner in the footprint plane.
    pub origin_x: f64,
    pub origin_y: f64,
    pub is_combined: bool,
    /// Every layout index covered by this box, ascending.
    pub combined_indices: Vec<usize>,
    /// Merge axis, for merged boxes only.
    pub direction: Option<MergeDirection>,
}
