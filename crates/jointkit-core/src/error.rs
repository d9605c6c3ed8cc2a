//! Error handling for JointKit geometry

use thiserror::Error;

/// Geometry error type
///
/// Raised when a shape cannot be represented at all. Shapes that are merely
/// undesirable (too small, overlapping) are reported as validation findings
/// by the engine instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A polygon needs at least three distinct points
    #[error("Degenerate polygon: {points} distinct point(s), at least 3 required")]
    DegeneratePolygon {
        /// Number of distinct points supplied.
        points: usize,
    },

    /// A coordinate was NaN or infinite
    #[error("Non-finite coordinate in {context}")]
    NonFinite {
        /// Where the coordinate came from.
        context: String,
    },
}

/// Main error type for JointKit core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl Error {
    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
