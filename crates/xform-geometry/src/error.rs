use thiserror::Error;
use xform_algebra::AlgebraError;
use xform_linalg::LinalgError;

/// Errors raised by the transformation engine.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// Invalid vector or quaternion input.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    /// A decomposition or point-set fit failed.
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// The homogeneous scale `M[3][3]` is zero, so the matrix cannot be normalized.
    #[error("homogeneous scale M[3][3] is zero")]
    ZeroHomogeneousScale,

    /// The matrix (or its upper 3x3 block) is singular.
    #[error("matrix is singular")]
    SingularMatrix,

    /// The upper 3x3 block is not a proper rotation (e.g. it is a reflection).
    #[error("upper 3x3 block is not a proper rotation (determinant {determinant})")]
    NotARotation {
        /// Determinant of the upper 3x3 block.
        determinant: f64,
    },

    /// No eigenvector with the eigenvalue required by the extractor exists.
    #[error("no eigenvector corresponding to eigenvalue {eigenvalue}")]
    NoEigenvector {
        /// The eigenvalue that was searched for.
        eigenvalue: f64,
    },

    /// The frustum bounds are inverted or the near plane is not in front of the eye.
    #[error("invalid frustum: {0}")]
    InvalidFrustum(&'static str),

    /// The shear direction is not orthogonal to the shear plane normal.
    #[error("shear direction and plane normal are not orthogonal")]
    NonOrthogonalShear,

    /// The projection direction is parallel to the projection plane.
    #[error("projection direction is parallel to the projection plane")]
    ParallelProjectionDirection,
}
