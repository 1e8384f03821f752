pub mod offset;
pub mod rounding;
pub mod shaping;
pub mod trace;
