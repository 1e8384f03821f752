mod round_corners;

pub use round_corners::{CornerRadii, RoundCorners};
