use glam::DVec3;

use crate::{error::AlgebraError, tolerance::EPS};

/// Euclidean length of a vector.
///
/// Example:
/// ```
/// use glam::DVec3;
/// use xform_algebra::vector_norm;
///
/// assert_eq!(vector_norm(DVec3::new(3.0, 4.0, 0.0)), 5.0);
/// ```
pub fn vector_norm(v: DVec3) -> f64 {
    v.dot(v).sqrt()
}

/// Vector scaled to unit length.
///
/// # Errors
///
/// [`AlgebraError::ZeroVector`] if the length is below [`EPS`].
///
/// Example:
/// ```
/// use glam::DVec3;
/// use xform_algebra::unit_vector;
///
/// let u = unit_vector(DVec3::new(0.0, 0.0, 2.0)).unwrap();
/// assert_eq!(u, DVec3::Z);
/// assert!(unit_vector(DVec3::ZERO).is_err());
/// ```
pub fn unit_vector(v: DVec3) -> Result<DVec3, AlgebraError> {
    let norm = vector_norm(v);
    if norm < EPS {
        return Err(AlgebraError::ZeroVector);
    }
    Ok(v / norm)
}

/// Vector perpendicular to both inputs (cross product `a × b`).
pub fn vector_product(a: DVec3, b: DVec3) -> DVec3 {
    a.cross(b)
}

/// Angle in radians between two vectors.
///
/// With `directed == false` the vectors are interpreted as undirected lines and
/// the result is in `[0, π/2]`.
///
/// # Errors
///
/// [`AlgebraError::ZeroVector`] if either vector has zero length.
pub fn angle_between_vectors(a: DVec3, b: DVec3, directed: bool) -> Result<f64, AlgebraError> {
    let denom = vector_norm(a) * vector_norm(b);
    if denom < EPS {
        return Err(AlgebraError::ZeroVector);
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    Ok(if directed { cos.acos() } else { cos.abs().acos() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_vector() -> Result<(), AlgebraError> {
        let v = unit_vector(DVec3::new(1.0, 2.0, 2.0))?;
        assert_relative_eq!(vector_norm(v), 1.0);
        assert_relative_eq!(v.x, 1.0 / 3.0);
        Ok(())
    }

    #[test]
    fn test_unit_vector_zero() {
        assert_eq!(unit_vector(DVec3::ZERO), Err(AlgebraError::ZeroVector));
    }

    #[test]
    fn test_vector_product() {
        assert_eq!(vector_product(DVec3::X, DVec3::Y), DVec3::Z);
        assert_eq!(vector_product(DVec3::Y, DVec3::X), -DVec3::Z);
    }

    #[test]
    fn test_angle_between_vectors() -> Result<(), AlgebraError> {
        let a = DVec3::new(1.0, -2.0, 3.0);
        let b = DVec3::new(-1.0, 2.0, -3.0);
        assert_relative_eq!(angle_between_vectors(a, b, true)?, std::f64::consts::PI);
        assert_relative_eq!(angle_between_vectors(a, b, false)?, 0.0);

        let angle = angle_between_vectors(DVec3::X, DVec3::new(1.0, 1.0, 0.0), true)?;
        assert_relative_eq!(angle, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        Ok(())
    }
}
