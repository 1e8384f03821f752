/// A single grid cell.
///
/// `group == 0` marks a standalone single-cell box; cells sharing a
/// positive group id form one merged region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub group: u32,
    pub width: f64,
    pub depth: f64,
    pub visible: bool,
}

impl Cell {
    /// Creates a visible cell.
    #[must_use]
    pub fn new(group: u32, width: f64, depth: f64) -> Self {
        Self {
            group,
            width,
            depth,
            visible: true,
        }
    }
}
