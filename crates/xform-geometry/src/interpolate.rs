use std::f64::consts::PI;

use xform_algebra::{AlgebraError, Quaternion};

use crate::error::TransformError;

/// Quaternions whose `|dot|` is within this distance of 1 are interpolated
/// linearly instead of spherically.
pub const SLERP_LINEAR_THRESHOLD: f64 = 1e-12;

/// Spherical linear interpolation between two rotations.
///
/// Both inputs are normalized first. A `fraction` of exactly `0` or `1`
/// returns the (normalized) endpoint unchanged; fractions outside `[0, 1]`
/// extrapolate along the same arc. `spin` adds that many half turns to the
/// arc angle. With `shortest_path` the sign of `q1` is chosen so that the
/// interpolation takes the shorter of the two arcs.
///
/// Nearly aligned inputs fall back to normalized linear interpolation; nearly
/// antipodal inputs (only reachable without `shortest_path`) describe the same
/// rotation and return `q0`.
///
/// # Errors
///
/// [`TransformError::Algebra`] if either quaternion has zero norm.
///
/// Example:
/// ```
/// use xform_algebra::Quaternion;
/// use xform_geometry::quaternion_slerp;
///
/// let q0 = Quaternion::IDENTITY;
/// let q1 = Quaternion::new(0.0, 0.0, 0.0, 1.0);
/// let q = quaternion_slerp(q0, q1, 0.5, 0, true).unwrap();
/// assert!((q.w() - q.z()).abs() < 1e-12);
/// ```
pub fn quaternion_slerp(
    q0: Quaternion,
    q1: Quaternion,
    fraction: f64,
    spin: i32,
    shortest_path: bool,
) -> Result<Quaternion, TransformError> {
    let q0 = q0.normalize().ok_or(AlgebraError::ZeroQuaternion)?;
    let mut q1 = q1.normalize().ok_or(AlgebraError::ZeroQuaternion)?;
    if fraction == 0.0 {
        return Ok(q0);
    }
    if fraction == 1.0 {
        return Ok(q1);
    }

    let mut d = q0.dot(&q1);
    if shortest_path && d < 0.0 {
        d = -d;
        q1 = -q1;
    }

    if 1.0 - d.abs() < SLERP_LINEAR_THRESHOLD {
        if d < 0.0 {
            log::debug!("slerp between antipodal quaternions, returning q0");
            return Ok(q0);
        }
        log::debug!("slerp between aligned quaternions, interpolating linearly");
        return Ok(q0.lerp(&q1, fraction).normalize().unwrap_or(q0));
    }

    // unit quaternion orthogonal to q0 in the plane spanned by q0 and q1
    let ortho = (q1 + q0 * -d)
        .normalize()
        .ok_or(AlgebraError::ZeroQuaternion)?;
    let angle = d.clamp(-1.0, 1.0).acos() + f64::from(spin) * PI;
    let (s, c) = (fraction * angle).sin_cos();
    Ok(q0 * c + ortho * s)
}
