//! # xform
//!
//! 3D homogeneous transformation algebra: rotation, translation, scale,
//! reflection, projection and shear matrices, conversions between rotation
//! matrices, quaternions, Euler angles and axis-angle pairs, matrix
//! decomposition, point set superimposition and quaternion slerp.
//!
//! This crate re-exports the workspace crates under short names:
//!
//! ```rust
//! use xform::algebra::{AxisConvention, EulerAngles};
//! use xform::geometry::{euler_from_matrix, euler_matrix};
//!
//! let angles = EulerAngles::new(0.1, 0.2, 0.3, AxisConvention::Rzyx);
//! let back = euler_from_matrix(&euler_matrix(&angles), AxisConvention::Rzyx);
//! assert!((back.ai - 0.1).abs() < 1e-12);
//! ```

#[doc(inline)]
pub use xform_algebra as algebra;

#[doc(inline)]
pub use xform_geometry as geometry;

#[doc(inline)]
pub use xform_linalg as linalg;
