//! 3×3 Singular Value Decomposition (SVD).
//!
//! For any matrix A ∈ ℝ³ˣ³ the SVD factors it as
//!
//! ```text
//! A = U Σ Vᵀ
//! ```
//!
//! where U and V are orthogonal and Σ = diag(σ₁, σ₂, σ₃) with σ₁ ≥ σ₂ ≥ σ₃ ≥ 0.
//! Neither U nor V is guaranteed to be a proper rotation; callers that need one
//! (see [`crate::rigid`]) must correct the sign of the last singular vector.
//!
//! # Example
//!
//! ```
//! use glam::DMat3;
//! use xform_linalg::svd::svd3;
//!
//! let matrix = DMat3::from_diagonal(glam::DVec3::new(1.0, 3.0, 2.0));
//! let svd = svd3(&matrix).unwrap();
//! assert_eq!(svd.s().x, 3.0);
//! ```

use glam::{DMat3, DVec3};
use nalgebra::SVD;

use crate::{
    error::LinalgError,
    utils::{dmat3_to_na, na_to_dmat3},
};

/// Factors of a 3x3 singular value decomposition.
#[derive(Debug, Clone, Copy)]
pub struct Svd3 {
    u: DMat3,
    s: DVec3,
    v: DMat3,
}

impl Svd3 {
    /// Left singular vectors (columns).
    #[inline]
    pub fn u(&self) -> &DMat3 {
        &self.u
    }

    /// Singular values in descending order.
    #[inline]
    pub fn s(&self) -> &DVec3 {
        &self.s
    }

    /// Right singular vectors (columns).
    #[inline]
    pub fn v(&self) -> &DMat3 {
        &self.v
    }
}

/// Compute the SVD `A = U Σ Vᵀ` of a 3x3 matrix.
///
/// # Errors
///
/// [`LinalgError::DecompositionFailed`] if a singular vector basis was not produced.
pub fn svd3(a: &DMat3) -> Result<Svd3, LinalgError> {
    let svd = SVD::new(dmat3_to_na(a), true, true);
    let Some(u) = svd.u else {
        return Err(LinalgError::DecompositionFailed("SVD U"));
    };
    let Some(v_t) = svd.v_t else {
        return Err(LinalgError::DecompositionFailed("SVD V^T"));
    };
    let sv = svd.singular_values;

    Ok(Svd3 {
        u: na_to_dmat3(&u),
        s: DVec3::new(sv[0], sv[1], sv[2]),
        v: na_to_dmat3(&v_t).transpose(),
    })
}
