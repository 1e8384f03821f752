mod extrude;
mod solid;

pub use extrude::{build_floor_solid, build_wall_solid, ExtrudeRegion};
pub use solid::Solid;
