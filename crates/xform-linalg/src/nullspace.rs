use glam::{DMat3, DVec3, DVec4};
use nalgebra::SVD;

use crate::{
    error::LinalgError,
    svd::svd3,
    utils::dmat4_to_na,
};

/// Orthonormal basis of the (numerical) null space of a 3x3 matrix.
///
/// A right singular vector is kept when its singular value is at most `tol`.
/// Used to find eigenvectors of known eigenvalue `λ` as the null space of `A - λI`.
pub fn null_space3(m: &DMat3, tol: f64) -> Result<Vec<DVec3>, LinalgError> {
    let svd = svd3(m)?;
    let s = svd.s().to_array();
    Ok((0..3)
        .filter(|&i| s[i] <= tol)
        .map(|i| svd.v().col(i))
        .collect())
}

/// Orthonormal basis of the (numerical) null space of a 4x4 matrix.
///
/// See [`null_space3`].
pub fn null_space4(m: &glam::DMat4, tol: f64) -> Result<Vec<DVec4>, LinalgError> {
    let svd = SVD::new(dmat4_to_na(m), false, true);
    let Some(v_t) = svd.v_t else {
        return Err(LinalgError::DecompositionFailed("SVD V^T"));
    };
    let s = svd.singular_values;
    Ok((0..4)
        .filter(|&i| s[i] <= tol)
        .map(|i| {
            let row = v_t.row(i);
            DVec4::new(row[0], row[1], row[2], row[3])
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_space3_rotation_axis() -> Result<(), LinalgError> {
        // 90 degrees about z: eigenvalue 1 belongs to the z axis
        let r = DMat3::from_rotation_z(std::f64::consts::FRAC_PI_2);
        let null = null_space3(&(r - DMat3::IDENTITY), 1e-8)?;
        assert_eq!(null.len(), 1);
        assert_relative_eq!(null[0].z.abs(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_null_space4_full_rank() -> Result<(), LinalgError> {
        let null = null_space4(&glam::DMat4::IDENTITY, 1e-8)?;
        assert!(null.is_empty());
        Ok(())
    }

    #[test]
    fn test_null_space4_dimension() -> Result<(), LinalgError> {
        let m = glam::DMat4::from_diagonal(DVec4::new(1.0, 0.0, 2.0, 0.0));
        let null = null_space4(&m, 1e-8)?;
        assert_eq!(null.len(), 2);
        for v in null {
            assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
        }
        Ok(())
    }
}
