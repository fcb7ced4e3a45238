#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # xform algebra
//!
//! Leaf primitives shared by the rest of the workspace:
//!
//! - [`Quaternion`]: a quaternion stored **w-first**, `[w, x, y, z]`. Every
//!   function in the workspace that takes or returns a quaternion uses this order.
//! - Vector helpers over [`glam::DVec3`] ([`vector_norm`], [`unit_vector`], ...).
//! - [`AxisConvention`]: the registry of the 24 Euler axis conventions.
//! - [`EulerAngles`]: three angles tagged with the convention they are expressed in.
//!
//! ## Example
//!
//! ```rust
//! use xform_algebra::{AxisConvention, Quaternion};
//!
//! let q = Quaternion::new(0.0, 1.0, 0.0, 0.0);
//! assert_eq!(q.w(), 0.0);
//! assert_eq!((q * q).to_array(), [-1.0, 0.0, 0.0, 0.0]);
//!
//! let axes: AxisConvention = "rzyx".parse().unwrap();
//! assert_eq!(axes.to_string(), "rzyx");
//! ```

/// Euler axis conventions.
pub mod axes;

/// Error types for the algebra primitives.
pub mod error;

/// Euler angle value type.
pub mod euler;

/// Quaternion type and quaternion algebra.
pub mod quaternion;

/// Comparison tolerances.
pub mod tolerance;

/// Vector helpers.
pub mod vector;

pub use axes::{Axis, AxisConvention, AxisTuple, Frame, Parity, NEXT_AXIS};
pub use error::AlgebraError;
pub use euler::EulerAngles;
pub use quaternion::{
    is_same_quaternion, quaternion_conjugate, quaternion_imag, quaternion_inverse,
    quaternion_multiply, quaternion_real, Quaternion,
};
pub use tolerance::{Tolerance, EPS};
pub use vector::{angle_between_vectors, unit_vector, vector_norm, vector_product};
