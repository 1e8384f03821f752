pub mod error;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{CellboxError, Result};
pub use generator::{BoxMetadata, BoxParams, GenerateBoxes, GeneratedBox, Generation, SkippedBox};
pub use geometry::Polygon;
pub use grid::{Cell, CumulativeAxes, Grid};
pub use layout::{BoxLayout, CombinedBoxInfo, MergeDirection};
