#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! Fixed-size linear algebra needed by the transformation engine: a 3×3 SVD,
//! a 4×4 symmetric eigen-decomposition, SVD-based null spaces and the
//! Kabsch/Umeyama/Horn point-set fits built on them. The decompositions are
//! backed by `nalgebra`; the public API speaks `glam` f64 types.

/// Symmetric eigen-decomposition of 4x4 matrices.
pub mod eigen;

/// Error types for the linear algebra routines.
pub mod error;

/// Null spaces of small square matrices.
pub mod nullspace;

/// Rigid, similarity and affine alignment of corresponding point sets.
pub mod rigid;

/// Singular value decomposition of 3x3 matrices.
pub mod svd;

/// Conversions between glam and nalgebra matrices.
pub mod utils;

pub use eigen::{largest_eigenvector4, symmetric_eigen4, SymmetricEigen4};
pub use error::LinalgError;
pub use nullspace::{null_space3, null_space4};
pub use rigid::{fit_affine, horn, umeyama, RigidFit};
pub use svd::{svd3, Svd3};
