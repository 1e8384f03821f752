use thiserror::Error;

/// Top-level error type for the cellbox geometry core.
#[derive(Debug, Error)]
pub enum CellboxError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric inputs and computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid dimension: {what} = {value} must be positive and finite")]
    InvalidDimensions { what: &'static str, value: f64 },

    #[error("wall thickness {thickness} leaves no interior in a {width} x {depth} box")]
    WallTooThick {
        thickness: f64,
        width: f64,
        depth: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to grids and box layouts.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("grid row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("box index {index} is out of range for {count} boxes")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("boxes cannot be merged: {0}")]
    NotMergeable(String),
}

/// Errors related to pipeline operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to triangulation of cap faces.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CellboxError`].
pub type Result<T> = std::result::Result<T, CellboxError>;
