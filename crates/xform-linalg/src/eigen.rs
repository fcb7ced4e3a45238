use glam::{DMat4, DVec4};
use nalgebra::SymmetricEigen;

use crate::{error::LinalgError, utils::dmat4_to_na};

/// Iteration cap for the symmetric QR sweeps; 4x4 inputs converge in a few dozen.
pub const MAX_EIGEN_ITERATIONS: usize = 1000;

/// Eigen-decomposition of a real symmetric 4x4 matrix.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricEigen4 {
    /// Eigenvalues, in no particular order.
    pub values: DVec4,
    /// Unit eigenvectors; column `i` belongs to `values[i]`.
    pub vectors: DMat4,
}

/// Eigen-decomposition of a symmetric 4x4 matrix.
///
/// Only the lower triangle of `m` is read.
///
/// # Errors
///
/// [`LinalgError::DecompositionFailed`] if `m` has non-finite entries or the
/// iteration does not converge within [`MAX_EIGEN_ITERATIONS`].
pub fn symmetric_eigen4(m: &DMat4) -> Result<SymmetricEigen4, LinalgError> {
    if !m.is_finite() {
        return Err(LinalgError::DecompositionFailed("symmetric eigen"));
    }
    let eig = SymmetricEigen::try_new(dmat4_to_na(m), f64::EPSILON, MAX_EIGEN_ITERATIONS)
        .ok_or(LinalgError::DecompositionFailed("symmetric eigen"))?;
    let ev = eig.eigenvalues;
    let vecs = eig.eigenvectors;

    Ok(SymmetricEigen4 {
        values: DVec4::new(ev[0], ev[1], ev[2], ev[3]),
        vectors: DMat4::from_cols_slice(vecs.as_slice()),
    })
}

/// Unit eigenvector belonging to the largest eigenvalue of a symmetric 4x4 matrix.
///
/// The sign of the eigenvector is arbitrary.
pub fn largest_eigenvector4(m: &DMat4) -> Result<DVec4, LinalgError> {
    let eig = symmetric_eigen4(m)?;
    let values = eig.values.to_array();
    let imax = values
        .iter()
        .enumerate()
        .fold(0, |best, (i, v)| if *v > values[best] { i } else { best });
    Ok(eig.vectors.col(imax))
}
