use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};
use xform_linalg::{fit_affine, horn, umeyama};

use crate::error::TransformError;

/// Solver used to find the optimal rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitMethod {
    /// Kabsch/Umeyama: SVD of the cross-covariance with determinant correction.
    #[default]
    Svd,
    /// Horn: largest eigenvector of the 4x4 quaternion matrix.
    Quaternion,
}

/// Parameters for [`superimposition_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuperimposeParams {
    /// Also estimate a uniform scale factor.
    pub scaling: bool,
    /// Rotation solver.
    pub method: FitMethod,
}

/// Matrix that maps the points `from` onto the points `to` in the least
/// squares sense, using only rotation, translation and (optionally) uniform
/// scaling.
///
/// The rotation is always proper: mirrored point sets yield the best rotation,
/// never a reflection.
///
/// # Errors
///
/// [`TransformError::Linalg`] if the inputs differ in length, contain fewer
/// than three points, or are collinear.
///
/// Example:
/// ```
/// use glam::{DVec3, DVec4};
/// use xform_geometry::{superimposition_matrix, SuperimposeParams};
///
/// let from = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let to: Vec<DVec3> = from.iter().map(|p| *p + DVec3::new(1.0, 2.0, 3.0)).collect();
/// let m = superimposition_matrix(&from, &to, &SuperimposeParams::default()).unwrap();
/// let p = m * DVec4::new(0.0, 0.0, 0.0, 1.0);
/// assert!((p.truncate() - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-9);
/// ```
pub fn superimposition_matrix(
    from: &[DVec3],
    to: &[DVec3],
    params: &SuperimposeParams,
) -> Result<DMat4, TransformError> {
    let fit = match params.method {
        FitMethod::Svd => umeyama(from, to, params.scaling)?,
        FitMethod::Quaternion => horn(from, to, params.scaling)?,
    };
    log::debug!(
        "superimposed {} points with {:?} (scale {:.6})",
        from.len(),
        params.method,
        fit.scale
    );
    Ok(fit.to_matrix())
}

/// Matrix that maps the points `from` onto the points `to`.
///
/// With `shear` the unconstrained least squares affine transform is returned,
/// which needs at least four non-coplanar `from` points. Otherwise the result
/// is the rigid (or, with `scaling`, similarity) fit of
/// [`superimposition_matrix`] using `method`.
///
/// # Errors
///
/// [`TransformError::Linalg`] for mismatched, too few or degenerate points.
pub fn affine_matrix_from_points(
    from: &[DVec3],
    to: &[DVec3],
    shear: bool,
    scaling: bool,
    method: FitMethod,
) -> Result<DMat4, TransformError> {
    if shear {
        return Ok(fit_affine(from, to)?);
    }
    superimposition_matrix(from, to, &SuperimposeParams { scaling, method })
}
