use thiserror::Error;

/// Errors raised by the linear algebra routines.
#[derive(Debug, Error, PartialEq)]
pub enum LinalgError {
    /// Source and destination point sets differ in length.
    #[error("Mismatched point set lengths: source ({source_len}) != destination ({destination_len})")]
    MismatchedInputLengths {
        /// Number of source points.
        source_len: usize,
        /// Number of destination points.
        destination_len: usize,
    },

    /// Not enough points to determine the transformation.
    #[error("Alignment requires at least {required} point pairs, got {actual}")]
    InsufficientPoints {
        /// Minimum number of point pairs.
        required: usize,
        /// Number of point pairs provided.
        actual: usize,
    },

    /// The points are coincident, collinear or (for affine fits) coplanar, so
    /// the transformation is not unique.
    #[error("Point set is degenerate: the transformation is not unique")]
    DegeneratePointSet,

    /// A decomposition did not return the requested factor.
    #[error("{0} computation failed")]
    DecompositionFailed(&'static str),
}
