mod inset;

pub use inset::InsetPolygon;
