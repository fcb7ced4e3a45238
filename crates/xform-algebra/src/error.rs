use thiserror::Error;

/// Errors raised by the algebra primitives.
#[derive(Debug, Error, PartialEq)]
pub enum AlgebraError {
    /// A direction was required but the vector has (numerically) zero length.
    #[error("cannot normalize a zero-length vector")]
    ZeroVector,

    /// The quaternion has (numerically) zero norm and has no inverse.
    #[error("cannot invert a zero-norm quaternion")]
    ZeroQuaternion,

    /// The string does not name one of the 24 Euler axis conventions.
    #[error("unknown axis convention: {0:?}")]
    UnknownAxisConvention(String),
}
