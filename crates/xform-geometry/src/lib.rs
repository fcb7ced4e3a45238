#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # xform geometry
//!
//! The transformation engine. Every function takes and returns plain values:
//! 4x4 homogeneous matrices are [`glam::DMat4`] with mathematical `(row, col)`
//! indexing and column vectors (`p' = M · p`), quaternions are
//! [`xform_algebra::Quaternion`] stored `[w, x, y, z]`.
//!
//! - [`matrix`]: builders and extractors for translation, rotation, reflection,
//!   scale, projection, clipping, shear and crystallographic matrices.
//! - [`convert`]: conversions between matrices, quaternions, Euler angles and
//!   axis-angle pairs.
//! - [`decompose`]: split a matrix into scale, shear, angles, translation and
//!   perspective, and compose it back.
//! - [`superimpose`]: least squares fits between corresponding point sets.
//! - [`interpolate`] and [`random`]: slerp and uniform rotation sampling.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use xform_algebra::{AxisConvention, EulerAngles, Tolerance};
//! use xform_geometry::{
//!     compose_matrix, decompose_matrix, euler_matrix, is_same_transform, rotation_matrix,
//!     scale_matrix, translation_matrix, concatenate_matrices,
//! };
//!
//! let m = concatenate_matrices(&[
//!     translation_matrix(DVec3::new(1.0, 2.0, 3.0)),
//!     rotation_matrix(0.5, DVec3::Z, None).unwrap(),
//!     scale_matrix(2.0, None, None).unwrap(),
//! ]);
//! let parts = decompose_matrix(&m).unwrap();
//! assert!(is_same_transform(&compose_matrix(&parts), &m, &Tolerance::default()));
//!
//! let r = euler_matrix(&EulerAngles::new(0.0, 0.0, 0.5, AxisConvention::Sxyz));
//! assert!(is_same_transform(&r, &rotation_matrix(0.5, DVec3::Z, None).unwrap(), &Tolerance::default()));
//! ```

/// Conversions between rotation representations.
pub mod convert;

/// Matrix decomposition and composition.
pub mod decompose;

/// Text rendering of matrices and quaternions.
pub mod display;

/// Error types for the transformation engine.
pub mod error;

/// Quaternion interpolation.
pub mod interpolate;

/// Homogeneous matrix builders and extractors.
pub mod matrix;

/// Uniform random rotations.
pub mod random;

/// Point set superimposition.
pub mod superimpose;

pub use convert::{
    axis_angle_from_quaternion, euler_from_matrix, euler_from_quaternion, euler_matrix,
    quaternion_about_axis, quaternion_from_euler, quaternion_from_matrix, quaternion_matrix,
    rotation_from_matrix, QuaternionExtraction, RotationAxisAngle,
};
pub use decompose::{compose_matrix, decompose_matrix, DecomposedTransform};
pub use display::{MatrixDisplay, PrintOptions, QuaternionDisplay};
pub use error::TransformError;
pub use interpolate::{quaternion_slerp, SLERP_LINEAR_THRESHOLD};
pub use matrix::{
    clip_matrix, concatenate_matrices, identity_matrix, inverse_matrix, is_same_transform,
    orthogonalization_matrix, projection_matrix, reflection_from_matrix, reflection_matrix,
    rotation_matrix, scale_from_matrix, scale_matrix, shear_from_matrix, shear_matrix,
    translation_from_matrix, translation_matrix, Frustum, Projection, Reflection, Scaling, Shear,
};
pub use random::{quaternion_from_uniforms, random_quaternion, random_rotation_matrix, random_vector};
pub use superimpose::{
    affine_matrix_from_points, superimposition_matrix, FitMethod, SuperimposeParams,
};
