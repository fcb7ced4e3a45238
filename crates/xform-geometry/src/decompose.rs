use glam::{DMat3, DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};
use xform_algebra::{AxisConvention, EulerAngles, EPS};

use crate::{
    convert::{euler_from_matrix, euler_matrix},
    error::TransformError,
};

/// A homogeneous matrix split into elementary transformations.
///
/// Composing the parts as `P · T · R · Z · S` (perspective, translation,
/// rotation, shear, scale) yields the original matrix up to its homogeneous
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecomposedTransform {
    /// Scale factors along the x, y and z axes.
    pub scale: DVec3,
    /// Shear factors `(xy, xz, yz)`.
    pub shear: DVec3,
    /// Rotation as Euler angles, `sxyz` when produced by [`decompose_matrix`].
    pub angles: EulerAngles,
    /// Translation vector.
    pub translate: DVec3,
    /// Perspective partition, the bottom row of `P`.
    pub perspective: DVec4,
}

impl Default for DecomposedTransform {
    fn default() -> Self {
        Self {
            scale: DVec3::ONE,
            shear: DVec3::ZERO,
            angles: EulerAngles::default(),
            translate: DVec3::ZERO,
            perspective: DVec4::W,
        }
    }
}

/// Split a homogeneous matrix into scale, shear, rotation, translation and
/// perspective.
///
/// The matrix is first normalized by `M[3][3]`. A negative determinant of the
/// 3x3 block is folded into the scale (all three factors negated).
///
/// # Errors
///
/// - [`TransformError::ZeroHomogeneousScale`] if `M[3][3]` is zero.
/// - [`TransformError::SingularMatrix`] if the matrix without its perspective
///   row is singular, or a column of the 3x3 block is zero or keeps no more
///   than [`EPS`] of its length after removing the preceding columns.
///
/// Example:
/// ```
/// use glam::DVec3;
/// use xform_geometry::{decompose_matrix, translation_matrix};
///
/// let d = decompose_matrix(&translation_matrix(DVec3::new(1.0, 2.0, 3.0))).unwrap();
/// assert_eq!(d.translate, DVec3::new(1.0, 2.0, 3.0));
/// assert_eq!(d.scale, DVec3::ONE);
/// ```
pub fn decompose_matrix(m: &DMat4) -> Result<DecomposedTransform, TransformError> {
    let w = m.w_axis.w;
    if w.abs() < EPS {
        return Err(TransformError::ZeroHomogeneousScale);
    }
    let m = *m * (1.0 / w);

    let mut affine = m;
    affine.x_axis.w = 0.0;
    affine.y_axis.w = 0.0;
    affine.z_axis.w = 0.0;
    affine.w_axis.w = 1.0;
    if affine.determinant() == 0.0 {
        return Err(TransformError::SingularMatrix);
    }

    let bottom = m.row(3);
    let perspective = if bottom.truncate().abs().max_element() > EPS {
        // row vector times the inverse of the perspective-free matrix
        affine.inverse().transpose() * bottom
    } else {
        DVec4::W
    };
    let translate = m.w_axis.truncate();

    // Gram-Schmidt over the columns of the 3x3 block
    let mut cols = [
        m.x_axis.truncate(),
        m.y_axis.truncate(),
        m.z_axis.truncate(),
    ];
    let lengths = cols.map(|c| c.length());
    let mut scale = DVec3::ZERO;
    let mut shear = DVec3::ZERO;

    scale.x = checked_length(cols[0], lengths[0])?;
    cols[0] /= scale.x;

    shear.x = cols[0].dot(cols[1]);
    cols[1] -= cols[0] * shear.x;
    scale.y = checked_length(cols[1], lengths[1])?;
    cols[1] /= scale.y;
    shear.x /= scale.y;

    shear.y = cols[0].dot(cols[2]);
    cols[2] -= cols[0] * shear.y;
    shear.z = cols[1].dot(cols[2]);
    cols[2] -= cols[1] * shear.z;
    scale.z = checked_length(cols[2], lengths[2])?;
    cols[2] /= scale.z;
    shear.y /= scale.z;
    shear.z /= scale.z;

    if cols[0].dot(cols[1].cross(cols[2])) < 0.0 {
        log::debug!("negative determinant, folding the reflection into the scale");
        scale = -scale;
        cols = cols.map(|c| -c);
    }

    let rotation = DMat4::from_mat3(DMat3::from_cols(cols[0], cols[1], cols[2]));
    let angles = euler_from_matrix(&rotation, AxisConvention::Sxyz);

    Ok(DecomposedTransform {
        scale,
        shear,
        angles,
        translate,
        perspective,
    })
}

/// Length of an orthogonalized column, rejected when the column is zero or
/// nothing of its original `reference` length survives the projection.
fn checked_length(v: DVec3, reference: f64) -> Result<f64, TransformError> {
    let length = v.length();
    if reference == 0.0 || length <= EPS * reference {
        return Err(TransformError::SingularMatrix);
    }
    Ok(length)
}

/// Homogeneous matrix `P · T · R · Z · S` of a decomposition, normalized by
/// its `M[3][3]`.
///
/// The rotation is built from `d.angles` in their own convention. The result is
/// left unnormalized if the perspective row makes `M[3][3]` vanish.
pub fn compose_matrix(d: &DecomposedTransform) -> DMat4 {
    let mut perspective = DMat4::IDENTITY;
    perspective.x_axis.w = d.perspective.x;
    perspective.y_axis.w = d.perspective.y;
    perspective.z_axis.w = d.perspective.z;
    perspective.w_axis.w = d.perspective.w;

    let translate = DMat4::from_translation(d.translate);
    let rotate = euler_matrix(&d.angles);

    let mut shear = DMat4::IDENTITY;
    shear.y_axis.x = d.shear.x;
    shear.z_axis.x = d.shear.y;
    shear.z_axis.y = d.shear.z;

    let scale = DMat4::from_scale(d.scale);

    let m = perspective * translate * rotate * shear * scale;
    let w = m.w_axis.w;
    if w.abs() < EPS {
        return m;
    }
    m * (1.0 / w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{is_same_transform, scale_matrix, translation_matrix};
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::PI;
    use xform_algebra::Tolerance;

    fn random_dvec3(rng: &mut StdRng) -> DVec3 {
        DVec3::new(
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
        )
    }

    fn random_transform(rng: &mut StdRng) -> DecomposedTransform {
        // magnitudes in [0.5, 5) with a random sign per axis
        let magnitude = (random_dvec3(rng) + 0.5) * 4.5 + 0.5;
        let sign = random_dvec3(rng).signum();
        let angles = random_dvec3(rng) * 2.0 * PI;
        DecomposedTransform {
            scale: magnitude * sign,
            shear: random_dvec3(rng),
            angles: EulerAngles::new(angles.x, angles.y, angles.z, AxisConvention::Sxyz),
            translate: random_dvec3(rng),
            perspective: random_dvec3(rng).extend(1.0 + rng.random_range(-0.5..0.5)),
        }
    }

    #[test]
    fn test_identity() -> Result<(), TransformError> {
        let d = decompose_matrix(&DMat4::IDENTITY)?;
        assert_eq!(d, DecomposedTransform::default());
        assert_eq!(compose_matrix(&DecomposedTransform::default()), DMat4::IDENTITY);
        Ok(())
    }

    #[test]
    fn test_decompose_scale_about_point() -> Result<(), TransformError> {
        let m = scale_matrix(0.25, Some(DVec3::X), None)?;
        let d = decompose_matrix(&m)?;
        assert_relative_eq!(d.scale.x, 0.25);
        assert_relative_eq!(d.scale.y, 0.25);
        assert_relative_eq!(d.scale.z, 0.25);
        assert_relative_eq!(d.translate.x, 0.75);
        Ok(())
    }

    #[test]
    fn test_decompose_rotation() -> Result<(), TransformError> {
        let angles = EulerAngles::new(1.0, 0.5, -2.0, AxisConvention::Sxyz);
        let m = euler_matrix(&angles);
        let d = decompose_matrix(&m)?;
        assert_relative_eq!(d.angles.ai, angles.ai, epsilon = 1e-12);
        assert_relative_eq!(d.angles.aj, angles.aj, epsilon = 1e-12);
        assert_relative_eq!(d.angles.ak, angles.ak, epsilon = 1e-12);
        assert_relative_eq!(d.scale.x, 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_negative_scale() -> Result<(), TransformError> {
        let m = scale_matrix(-2.0, None, None)?;
        let d = decompose_matrix(&m)?;
        assert_eq!(d.scale, DVec3::splat(-2.0));
        assert!(is_same_transform(&compose_matrix(&d), &m, &Tolerance::default()));
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<(), TransformError> {
        let mut rng = StdRng::seed_from_u64(42);
        let tol = Tolerance {
            rtol: 1e-9,
            atol: 1e-9,
        };
        for _ in 0..50 {
            let m0 = compose_matrix(&random_transform(&mut rng));
            let m1 = compose_matrix(&decompose_matrix(&m0)?);
            assert!(tol.all_close(&m0.to_cols_array(), &m1.to_cols_array()));
        }
        Ok(())
    }

    #[test]
    fn test_unnormalized_input() -> Result<(), TransformError> {
        let m = translation_matrix(DVec3::new(1.0, 2.0, 3.0)) * 4.0;
        let d = decompose_matrix(&m)?;
        assert_eq!(d.translate, DVec3::new(1.0, 2.0, 3.0));
        Ok(())
    }

    #[test]
    fn test_errors() {
        let mut m = DMat4::IDENTITY;
        m.w_axis.w = 0.0;
        assert_eq!(decompose_matrix(&m), Err(TransformError::ZeroHomogeneousScale));

        let m = DMat4::from_scale(DVec3::new(0.0, 1.0, 1.0));
        assert_eq!(decompose_matrix(&m), Err(TransformError::SingularMatrix));
    }

    #[test]
    fn test_tiny_scale() -> Result<(), TransformError> {
        let m = DMat4::from_scale(DVec3::new(1e-16, 1.0, 1.0));
        let d = decompose_matrix(&m)?;
        assert_relative_eq!(d.scale.x, 1e-16, max_relative = 1e-12);
        assert_relative_eq!(d.scale.y, 1.0);
        assert!(is_same_transform(&compose_matrix(&d), &m, &Tolerance::default()));
        Ok(())
    }

    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let d = DecomposedTransform::default();
        let json = serde_json::to_string(&d)?;
        let back: DecomposedTransform = serde_json::from_str(&json)?;
        assert_eq!(back, d);
        Ok(())
    }
}
