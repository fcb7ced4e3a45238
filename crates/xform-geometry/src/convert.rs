//! # Rotation conversions
//!
//! Conversions between the four rotation representations of the workspace:
//! homogeneous matrices, quaternions (w-first), Euler angles in any of the 24
//! conventions and axis-angle pairs.
//!
//! Quaternions extracted from a matrix are returned with `w >= 0`. Euler angles
//! extracted at gimbal lock set the third angle of the static-frame sequence to
//! zero (i.e. `ak` for static conventions, `ai` for rotating ones) and let the
//! first angle absorb the combined rotation.

use glam::{DMat3, DMat4, DVec3};
use serde::{Deserialize, Serialize};
use xform_algebra::{unit_vector, AxisConvention, EulerAngles, Frame, Parity, Quaternion, EPS};
use xform_linalg::{
    largest_eigenvector4, null_space3,
    utils::{mat4_from_rows, mat4_to_rows},
};

use crate::{
    error::TransformError,
    matrix::{fixed_point, EIGEN_TOLERANCE},
};

/// Strategy used by [`quaternion_from_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuaternionExtraction {
    /// Eigenvector of the largest eigenvalue of a symmetric 4x4 matrix built
    /// from the rotation block. Tolerates matrices that are not exactly
    /// orthonormal.
    #[default]
    Precise,
    /// Closed form from the trace. Assumes an exactly orthonormal rotation block.
    Fast,
}

/// Rotation angle, axis direction and a point on the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationAxisAngle {
    /// Rotation angle in radians, in `(-π, π]`.
    pub angle: f64,
    /// Unit axis direction.
    pub direction: DVec3,
    /// A point on the rotation axis.
    pub point: DVec3,
}

/// Homogeneous rotation matrix of a quaternion.
///
/// The quaternion does not need to be normalized. A quaternion with squared
/// norm below [`EPS`] yields the identity.
pub fn quaternion_matrix(q: Quaternion) -> DMat4 {
    let n = q.dot(&q);
    if n < EPS {
        return DMat4::IDENTITY;
    }
    let [w, x, y, z] = (q * (2.0 / n).sqrt()).to_array();

    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (xw, yw, zw) = (x * w, y * w, z * w);

    #[rustfmt::skip]
    let rows = [
        [1.0 - yy - zz, xy - zw,       xz + yw,       0.0],
        [xy + zw,       1.0 - xx - zz, yz - xw,       0.0],
        [xz - yw,       yz + xw,       1.0 - xx - yy, 0.0],
        [0.0,           0.0,           0.0,           1.0],
    ];
    mat4_from_rows(rows)
}

/// Quaternion of the rotation block of a homogeneous matrix, with `w >= 0`.
///
/// # Errors
///
/// - [`TransformError::Linalg`] if the eigen-decomposition fails.
/// - [`TransformError::ZeroHomogeneousScale`] if the fast path meets a matrix
///   whose homogeneous scale leaves nothing to normalize by.
///
/// Example:
/// ```
/// use xform_algebra::{Quaternion, Tolerance, is_same_quaternion};
/// use xform_geometry::{quaternion_from_matrix, quaternion_matrix, QuaternionExtraction};
///
/// let q = Quaternion::new(0.5, 0.5, 0.5, 0.5);
/// let m = quaternion_matrix(q);
/// let back = quaternion_from_matrix(&m, QuaternionExtraction::Fast).unwrap();
/// assert!(is_same_quaternion(q, back, &Tolerance::default()));
/// ```
pub fn quaternion_from_matrix(
    m: &DMat4,
    method: QuaternionExtraction,
) -> Result<Quaternion, TransformError> {
    let r = mat4_to_rows(m);
    let q = match method {
        QuaternionExtraction::Precise => quaternion_from_rows_eigen(&r)?,
        QuaternionExtraction::Fast => quaternion_from_rows_trace(&r)?,
    };
    Ok(if q.w() < 0.0 { -q } else { q })
}

fn quaternion_from_rows_eigen(r: &[[f64; 4]; 4]) -> Result<Quaternion, TransformError> {
    let (m00, m01, m02) = (r[0][0], r[0][1], r[0][2]);
    let (m10, m11, m12) = (r[1][0], r[1][1], r[1][2]);
    let (m20, m21, m22) = (r[2][0], r[2][1], r[2][2]);

    // symmetric, ordered (x, y, z, w)
    let k = mat4_from_rows([
        [m00 - m11 - m22, m01 + m10, m02 + m20, m21 - m12],
        [m01 + m10, m11 - m00 - m22, m12 + m21, m02 - m20],
        [m02 + m20, m12 + m21, m22 - m00 - m11, m10 - m01],
        [m21 - m12, m02 - m20, m10 - m01, m00 + m11 + m22],
    ]) * (1.0 / 3.0);

    let v = largest_eigenvector4(&k)?;
    Ok(Quaternion::new(v.w, v.x, v.y, v.z))
}

fn quaternion_from_rows_trace(r: &[[f64; 4]; 4]) -> Result<Quaternion, TransformError> {
    let m33 = r[3][3];
    let trace = r[0][0] + r[1][1] + r[2][2] + m33;

    let (q, t) = if trace > m33 {
        (
            [trace, r[2][1] - r[1][2], r[0][2] - r[2][0], r[1][0] - r[0][1]],
            trace,
        )
    } else {
        // branch on the largest diagonal element
        let (mut i, mut j, mut k) = (0, 1, 2);
        if r[1][1] > r[0][0] {
            (i, j, k) = (1, 2, 0);
        }
        if r[2][2] > r[i][i] {
            (i, j, k) = (2, 0, 1);
        }
        let t = r[i][i] - (r[j][j] + r[k][k]) + m33;
        let mut q = [0.0; 4];
        q[0] = r[k][j] - r[j][k];
        q[i + 1] = t;
        q[j + 1] = r[i][j] + r[j][i];
        q[k + 1] = r[k][i] + r[i][k];
        (q, t)
    };

    let norm = t * m33;
    if norm <= 0.0 {
        return Err(TransformError::ZeroHomogeneousScale);
    }
    Ok(Quaternion::from_array(q) * (0.5 / norm.sqrt()))
}

/// Homogeneous rotation matrix of three Euler angles.
///
/// Example:
/// ```
/// use xform_algebra::{AxisConvention, EulerAngles};
/// use xform_geometry::euler_matrix;
///
/// let m = euler_matrix(&EulerAngles::new(1.0, 2.0, 3.0, AxisConvention::Syxz));
/// let row0: f64 = m.row(0).to_array().iter().sum();
/// assert!((row0 + 1.34786452).abs() < 1e-8);
/// ```
pub fn euler_matrix(angles: &EulerAngles) -> DMat4 {
    let tuple = angles.axes.tuple();
    let (i, j, k) = tuple.matrix_indices();

    let (mut ai, mut aj, mut ak) = (angles.ai, angles.aj, angles.ak);
    if tuple.frame == Frame::Rotating {
        std::mem::swap(&mut ai, &mut ak);
    }
    if tuple.parity == Parity::Odd {
        (ai, aj, ak) = (-ai, -aj, -ak);
    }

    let (si, ci) = ai.sin_cos();
    let (sj, cj) = aj.sin_cos();
    let (sk, ck) = ak.sin_cos();
    let (cc, cs) = (ci * ck, ci * sk);
    let (sc, ss) = (si * ck, si * sk);

    let mut r = mat4_to_rows(&DMat4::IDENTITY);
    if tuple.repetition {
        r[i][i] = cj;
        r[i][j] = sj * si;
        r[i][k] = sj * ci;
        r[j][i] = sj * sk;
        r[j][j] = -cj * ss + cc;
        r[j][k] = -cj * cs - sc;
        r[k][i] = -sj * ck;
        r[k][j] = cj * sc + cs;
        r[k][k] = cj * cc - ss;
    } else {
        r[i][i] = cj * ck;
        r[i][j] = sj * sc - cs;
        r[i][k] = sj * cc + ss;
        r[j][i] = cj * sk;
        r[j][j] = sj * ss + cc;
        r[j][k] = sj * cs - sc;
        r[k][i] = -sj;
        r[k][j] = cj * si;
        r[k][k] = cj * ci;
    }
    mat4_from_rows(r)
}

/// Euler angles of the rotation block of a homogeneous matrix.
///
/// Only the upper 3x3 block is read and it is assumed to be a pure rotation.
/// Near gimbal lock the third angle of the static sequence is set to zero.
pub fn euler_from_matrix(m: &DMat4, axes: AxisConvention) -> EulerAngles {
    let tuple = axes.tuple();
    let (i, j, k) = tuple.matrix_indices();
    let r = mat4_to_rows(m);

    let (mut ax, mut ay, mut az);
    if tuple.repetition {
        let sy = r[i][j].hypot(r[i][k]);
        if sy > EPS {
            ax = r[i][j].atan2(r[i][k]);
            ay = sy.atan2(r[i][i]);
            az = r[j][i].atan2(-r[k][i]);
        } else {
            log::debug!("gimbal lock in {axes} extraction (sy = {sy:e})");
            ax = (-r[j][k]).atan2(r[j][j]);
            ay = sy.atan2(r[i][i]);
            az = 0.0;
        }
    } else {
        let cy = r[i][i].hypot(r[j][i]);
        if cy > EPS {
            ax = r[k][j].atan2(r[k][k]);
            ay = (-r[k][i]).atan2(cy);
            az = r[j][i].atan2(r[i][i]);
        } else {
            log::debug!("gimbal lock in {axes} extraction (cy = {cy:e})");
            ax = (-r[j][k]).atan2(r[j][j]);
            ay = (-r[k][i]).atan2(cy);
            az = 0.0;
        }
    }

    if tuple.parity == Parity::Odd {
        (ax, ay, az) = (-ax, -ay, -az);
    }
    if tuple.frame == Frame::Rotating {
        std::mem::swap(&mut ax, &mut az);
    }
    EulerAngles::new(ax, ay, az, axes)
}

/// Quaternion of three Euler angles.
///
/// The sign of the result is not normalized.
pub fn quaternion_from_euler(angles: &EulerAngles) -> Quaternion {
    let tuple = angles.axes.tuple();
    let (i, j, k) = tuple.matrix_indices();
    // quaternion slots are offset by the leading w
    let (i, j, k) = (i + 1, j + 1, k + 1);

    let (mut ai, mut aj, mut ak) = (angles.ai, angles.aj, angles.ak);
    if tuple.frame == Frame::Rotating {
        std::mem::swap(&mut ai, &mut ak);
    }
    if tuple.parity == Parity::Odd {
        aj = -aj;
    }

    let (si, ci) = (ai / 2.0).sin_cos();
    let (sj, cj) = (aj / 2.0).sin_cos();
    let (sk, ck) = (ak / 2.0).sin_cos();
    let (cc, cs) = (ci * ck, ci * sk);
    let (sc, ss) = (si * ck, si * sk);

    let mut q = [0.0; 4];
    if tuple.repetition {
        q[0] = cj * (cc - ss);
        q[i] = cj * (cs + sc);
        q[j] = sj * (cc + ss);
        q[k] = sj * (cs - sc);
    } else {
        q[0] = cj * cc + sj * ss;
        q[i] = cj * sc - sj * cs;
        q[j] = cj * ss + sj * cc;
        q[k] = cj * cs - sj * sc;
    }
    if tuple.parity == Parity::Odd {
        q[j] = -q[j];
    }
    Quaternion::from_array(q)
}

/// Euler angles of a quaternion, through its rotation matrix.
pub fn euler_from_quaternion(q: Quaternion, axes: AxisConvention) -> EulerAngles {
    euler_from_matrix(&quaternion_matrix(q), axes)
}

/// Quaternion rotating by `angle` radians about `axis`.
///
/// # Errors
///
/// [`TransformError::Algebra`] if `axis` has zero length.
pub fn quaternion_about_axis(angle: f64, axis: DVec3) -> Result<Quaternion, TransformError> {
    let axis = unit_vector(axis)?;
    let (s, c) = (angle / 2.0).sin_cos();
    Ok(Quaternion::new(c, axis.x * s, axis.y * s, axis.z * s))
}

/// Rotation angle in `[0, π]` and unit axis of a quaternion.
///
/// A quaternion without rotation returns angle zero about the x axis.
///
/// # Errors
///
/// [`TransformError::Algebra`] if the quaternion has zero norm.
pub fn axis_angle_from_quaternion(q: Quaternion) -> Result<(f64, DVec3), TransformError> {
    let q = q
        .normalize()
        .ok_or(xform_algebra::AlgebraError::ZeroQuaternion)?;
    let q = if q.w() < 0.0 { -q } else { q };
    let imag = q.imag();
    let s = imag.length();
    if s < EPS {
        return Ok((0.0, DVec3::X));
    }
    Ok((2.0 * s.atan2(q.w()), imag / s))
}

/// Rotation angle, axis direction and axis point of a rotation matrix.
///
/// # Errors
///
/// - [`TransformError::NotARotation`] if the upper 3x3 block has a negative
///   determinant.
/// - [`TransformError::NoEigenvector`] if no axis direction or no finite axis
///   point exists.
pub fn rotation_from_matrix(m: &DMat4) -> Result<RotationAxisAngle, TransformError> {
    let r33 = DMat3::from_mat4(*m);
    let determinant = r33.determinant();
    if determinant < 0.0 {
        return Err(TransformError::NotARotation { determinant });
    }

    let direction = null_space3(&(r33 - DMat3::IDENTITY), EIGEN_TOLERANCE)?
        .into_iter()
        .next()
        .ok_or(TransformError::NoEigenvector { eigenvalue: 1.0 })?;
    let point = fixed_point(m)?;

    // angle from the trace, its sign from the entries off the axis
    let r = mat4_to_rows(m);
    let cosa = (r[0][0] + r[1][1] + r[2][2] - 1.0) / 2.0;
    let d = direction;
    let sina = if d.z.abs() > 1e-8 {
        (r[1][0] + (cosa - 1.0) * d.x * d.y) / d.z
    } else if d.y.abs() > 1e-8 {
        (r[0][2] + (cosa - 1.0) * d.x * d.z) / d.y
    } else {
        (r[2][1] + (cosa - 1.0) * d.y * d.z) / d.x
    };

    Ok(RotationAxisAngle {
        angle: sina.atan2(cosa),
        direction,
        point,
    })
}
