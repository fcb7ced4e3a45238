use glam::{DMat3, DMat4, DVec3, DVec4};
use serde::{Deserialize, Serialize};
use xform_algebra::{unit_vector, Tolerance, EPS};
use xform_linalg::{null_space3, null_space4, utils::mat4_from_rows};

use crate::error::TransformError;

/// Singular value below which a direction counts as an eigenvector.
pub(crate) const EIGEN_TOLERANCE: f64 = 1e-8;

/// Outer product `a bᵀ`.
#[inline]
pub(crate) fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Homogeneous matrix with the given linear block and translation column.
#[inline]
pub(crate) fn affine(linear: DMat3, translation: DVec3) -> DMat4 {
    DMat4::from_cols(
        linear.x_axis.extend(0.0),
        linear.y_axis.extend(0.0),
        linear.z_axis.extend(0.0),
        translation.extend(1.0),
    )
}

/// A finite point left unchanged by `m`, from the eigenvectors of eigenvalue 1.
///
/// The canonical homogeneous axis is projected onto the eigenspace so that the
/// result is a point (non-zero `w`) whenever the eigenspace contains one.
pub(crate) fn fixed_point(m: &DMat4) -> Result<DVec3, TransformError> {
    let null = null_space4(&(*m - DMat4::IDENTITY), EIGEN_TOLERANCE)?;
    let p = null.iter().fold(DVec4::ZERO, |acc, v| acc + *v * v.w);
    if p.w.abs() < EPS {
        return Err(TransformError::NoEigenvector { eigenvalue: 1.0 });
    }
    Ok(p.truncate() / p.w)
}

/// Mirror plane recovered from a reflection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    /// A point on the mirror plane.
    pub point: DVec3,
    /// Unit normal of the mirror plane.
    pub normal: DVec3,
}

/// Scaling parameters recovered from a scale matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Scale factor.
    pub factor: f64,
    /// A point left fixed by the scaling.
    pub origin: DVec3,
    /// Unit direction for a directional scale, `None` for a uniform one.
    pub direction: Option<DVec3>,
}

/// Shear parameters recovered from a shear matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shear {
    /// Shear angle in radians.
    pub angle: f64,
    /// Unit shear direction, lying in the shear plane.
    pub direction: DVec3,
    /// A point on the shear plane.
    pub point: DVec3,
    /// Unit normal of the shear plane.
    pub normal: DVec3,
}

/// How points are projected onto a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Along the plane normal.
    Orthogonal,
    /// Along a fixed direction, which must not be parallel to the plane.
    Parallel {
        /// Projection direction.
        direction: DVec3,
    },
    /// Through an eye point.
    Perspective {
        /// Center of projection.
        eye: DVec3,
        /// Keep relative depth so that `(x, y, z) / w` preserves the depth order.
        pseudo: bool,
    },
}

/// Viewing volume bounds for [`clip_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    /// Left clipping plane.
    pub left: f64,
    /// Right clipping plane.
    pub right: f64,
    /// Bottom clipping plane.
    pub bottom: f64,
    /// Top clipping plane.
    pub top: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
}

impl Frustum {
    /// Create a frustum from its six bounds.
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }
}

/// The 4x4 identity matrix.
#[inline]
pub fn identity_matrix() -> DMat4 {
    DMat4::IDENTITY
}

/// Matrix translating by `direction`.
///
/// Example:
/// ```
/// use glam::{DVec3, DVec4};
/// use xform_geometry::translation_matrix;
///
/// let m = translation_matrix(DVec3::new(1.0, 2.0, 3.0));
/// assert_eq!(m * DVec4::W, DVec4::new(1.0, 2.0, 3.0, 1.0));
/// ```
#[inline]
pub fn translation_matrix(direction: DVec3) -> DMat4 {
    DMat4::from_translation(direction)
}

/// Translation column of a homogeneous matrix.
#[inline]
pub fn translation_from_matrix(m: &DMat4) -> DVec3 {
    m.w_axis.truncate()
}

/// Matrix mirroring at the plane through `point` with the given `normal`.
///
/// # Errors
///
/// [`TransformError::Algebra`] if `normal` has zero length.
pub fn reflection_matrix(point: DVec3, normal: DVec3) -> Result<DMat4, TransformError> {
    let n = unit_vector(normal)?;
    let linear = DMat3::IDENTITY - outer(n, n) * 2.0;
    Ok(affine(linear, n * (2.0 * point.dot(n))))
}

/// Mirror plane of a reflection matrix.
///
/// # Errors
///
/// [`TransformError::NoEigenvector`] if the upper 3x3 block has no eigenvalue -1
/// or the matrix leaves no finite point fixed.
pub fn reflection_from_matrix(m: &DMat4) -> Result<Reflection, TransformError> {
    let m33 = DMat3::from_mat4(*m);
    let normal = null_space3(&(m33 + DMat3::IDENTITY), EIGEN_TOLERANCE)?
        .into_iter()
        .next()
        .ok_or(TransformError::NoEigenvector { eigenvalue: -1.0 })?;
    let point = fixed_point(m)?;
    Ok(Reflection { point, normal })
}

/// Matrix rotating by `angle` radians about the axis through `point` along `direction`.
///
/// The axis passes through the origin when `point` is `None`.
///
/// # Errors
///
/// [`TransformError::Algebra`] if `direction` has zero length.
///
/// Example:
/// ```
/// use glam::{DVec3, DVec4};
/// use xform_geometry::rotation_matrix;
///
/// let m = rotation_matrix(std::f64::consts::FRAC_PI_2, DVec3::Z, None).unwrap();
/// let v = m * DVec4::new(1.0, 0.0, 0.0, 1.0);
/// assert!((v - DVec4::new(0.0, 1.0, 0.0, 1.0)).length() < 1e-12);
/// ```
pub fn rotation_matrix(
    angle: f64,
    direction: DVec3,
    point: Option<DVec3>,
) -> Result<DMat4, TransformError> {
    let axis = unit_vector(direction)?;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let tmp1 = x * y * t;
    let tmp2 = z * s;
    let m10 = tmp1 + tmp2;
    let m01 = tmp1 - tmp2;

    let tmp3 = x * z * t;
    let tmp4 = y * s;
    let m20 = tmp3 - tmp4;
    let m02 = tmp3 + tmp4;

    let tmp5 = y * z * t;
    let tmp6 = x * s;
    let m21 = tmp5 + tmp6;
    let m12 = tmp5 - tmp6;

    let r = DMat3::from_cols(
        DVec3::new(m00, m10, m20),
        DVec3::new(m01, m11, m21),
        DVec3::new(m02, m12, m22),
    );
    let translation = point.map_or(DVec3::ZERO, |p| p - r * p);
    Ok(affine(r, translation))
}

/// Matrix scaling by `factor` about `origin`.
///
/// With a `direction` only the component along it is scaled, otherwise the
/// scaling is uniform. `origin` defaults to the coordinate origin.
///
/// # Errors
///
/// [`TransformError::Algebra`] if `direction` has zero length.
pub fn scale_matrix(
    factor: f64,
    origin: Option<DVec3>,
    direction: Option<DVec3>,
) -> Result<DMat4, TransformError> {
    let origin = origin.unwrap_or(DVec3::ZERO);
    match direction {
        None => Ok(affine(
            DMat3::from_diagonal(DVec3::splat(factor)),
            origin * (1.0 - factor),
        )),
        Some(direction) => {
            let d = unit_vector(direction)?;
            let f = 1.0 - factor;
            let linear = DMat3::IDENTITY - outer(d, d) * f;
            Ok(affine(linear, d * (f * origin.dot(d))))
        }
    }
}

/// Scale factor, origin and direction of a scale matrix.
///
/// # Errors
///
/// [`TransformError::NoEigenvector`] if the matrix leaves no finite point fixed.
pub fn scale_from_matrix(m: &DMat4) -> Result<Scaling, TransformError> {
    let m33 = DMat3::from_mat4(*m);
    let trace_factor = m33.x_axis.x + m33.y_axis.y + m33.z_axis.z - 2.0;

    let along = null_space3(
        &(m33 - DMat3::from_diagonal(DVec3::splat(trace_factor))),
        EIGEN_TOLERANCE,
    )?;
    let (factor, direction) = match along.first() {
        Some(d) => (trace_factor, Some(*d)),
        None => ((trace_factor + 2.0) / 3.0, None),
    };

    let origin = fixed_point(m)?;
    Ok(Scaling {
        factor,
        origin,
        direction,
    })
}

/// Matrix projecting onto the plane through `point` with the given `normal`.
///
/// # Errors
///
/// - [`TransformError::Algebra`] if `normal` has zero length.
/// - [`TransformError::ParallelProjectionDirection`] if a parallel projection
///   direction lies in the plane.
pub fn projection_matrix(
    point: DVec3,
    normal: DVec3,
    projection: Projection,
) -> Result<DMat4, TransformError> {
    let n = unit_vector(normal)?;
    let offset = point.dot(n);
    match projection {
        Projection::Orthogonal => Ok(affine(DMat3::IDENTITY - outer(n, n), n * offset)),
        Projection::Parallel { direction } => {
            let scale = direction.dot(n);
            if scale.abs() < EPS {
                return Err(TransformError::ParallelProjectionDirection);
            }
            let linear = DMat3::IDENTITY - outer(direction, n) * (1.0 / scale);
            Ok(affine(linear, direction * (offset / scale)))
        }
        Projection::Perspective { eye, pseudo } => {
            let mut linear =
                DMat3::from_diagonal(DVec3::splat((eye - point).dot(n))) - outer(eye, n);
            let translation = if pseudo {
                linear -= outer(n, n);
                (eye + n) * offset
            } else {
                eye * offset
            };
            let mut m = affine(linear, translation);
            // bottom row (-n, eye . n)
            m.x_axis.w = -n.x;
            m.y_axis.w = -n.y;
            m.z_axis.w = -n.z;
            m.w_axis.w = eye.dot(n);
            Ok(m)
        }
    }
}

/// Matrix mapping the viewing frustum to the canonical view volume `[-1, 1]³`.
///
/// With `perspective` the frustum is a truncated pyramid with its apex at the
/// origin and the result must be divided by `w`; otherwise it is a box.
///
/// # Errors
///
/// [`TransformError::InvalidFrustum`] if any lower bound is not below its upper
/// bound, or if a perspective near plane is not in front of the origin.
pub fn clip_matrix(frustum: &Frustum, perspective: bool) -> Result<DMat4, TransformError> {
    let Frustum {
        left,
        right,
        bottom,
        top,
        near,
        far,
    } = *frustum;
    if left >= right || bottom >= top || near >= far {
        return Err(TransformError::InvalidFrustum("bounds are inverted"));
    }

    let rows = if perspective {
        if near <= EPS {
            return Err(TransformError::InvalidFrustum("near <= 0"));
        }
        let t = 2.0 * near;
        [
            [t / (left - right), 0.0, (right + left) / (right - left), 0.0],
            [0.0, t / (bottom - top), (top + bottom) / (top - bottom), 0.0],
            [0.0, 0.0, (far + near) / (near - far), t * far / (far - near)],
            [0.0, 0.0, -1.0, 0.0],
        ]
    } else {
        [
            [2.0 / (right - left), 0.0, 0.0, (right + left) / (left - right)],
            [0.0, 2.0 / (top - bottom), 0.0, (top + bottom) / (bottom - top)],
            [0.0, 0.0, 2.0 / (far - near), (far + near) / (near - far)],
            [0.0, 0.0, 0.0, 1.0],
        ]
    };
    Ok(mat4_from_rows(rows))
}

/// Matrix shearing by `angle` along `direction` on the plane through `point`
/// with the given `normal`.
///
/// A point `p` moves by `tan(angle) * dist(p, plane)` along `direction`.
///
/// # Errors
///
/// - [`TransformError::Algebra`] if `direction` or `normal` has zero length.
/// - [`TransformError::NonOrthogonalShear`] if `direction` is not in the plane.
pub fn shear_matrix(
    angle: f64,
    direction: DVec3,
    point: DVec3,
    normal: DVec3,
) -> Result<DMat4, TransformError> {
    let n = unit_vector(normal)?;
    let d = unit_vector(direction)?;
    if n.dot(d).abs() > 1e-6 {
        return Err(TransformError::NonOrthogonalShear);
    }
    let t = angle.tan();
    let linear = DMat3::IDENTITY + outer(d, n) * t;
    Ok(affine(linear, d * (-t * point.dot(n))))
}

/// Shear angle, direction and plane of a shear matrix.
///
/// # Errors
///
/// [`TransformError::NoEigenvector`] if the upper 3x3 block does not keep a
/// plane fixed or the matrix leaves no finite point fixed.
pub fn shear_from_matrix(m: &DMat4) -> Result<Shear, TransformError> {
    let m33 = DMat3::from_mat4(*m);
    let delta = m33 - DMat3::IDENTITY;
    let plane = null_space3(&delta, 1e-6)?;

    let (normal, direction, angle) = match plane.as_slice() {
        [a, b] => {
            let normal = a.cross(*b).normalize();
            let moved = delta * normal;
            let length = moved.length();
            if length < EPS {
                return Err(TransformError::NoEigenvector { eigenvalue: 1.0 });
            }
            (normal, moved / length, length.atan())
        }
        // identity block: a zero shear about any plane
        [a, b, _] => (*a, *b, 0.0),
        _ => return Err(TransformError::NoEigenvector { eigenvalue: 1.0 }),
    };

    let point = fixed_point(m)?;
    Ok(Shear {
        angle,
        direction,
        point,
        normal,
    })
}

/// Matrix converting fractional crystallographic coordinates to Cartesian ones.
///
/// `lengths` are the cell edge lengths and `angles` the cell angles in
/// **degrees**.
///
/// # Errors
///
/// [`TransformError::SingularMatrix`] if the angles do not describe a cell.
pub fn orthogonalization_matrix(lengths: DVec3, angles: DVec3) -> Result<DMat4, TransformError> {
    let (a, b, c) = (lengths.x, lengths.y, lengths.z);
    let (sina, cosa) = angles.x.to_radians().sin_cos();
    let (sinb, cosb) = angles.y.to_radians().sin_cos();
    let cosg = angles.z.to_radians().cos();

    let denom = sina * sinb;
    if denom.abs() < EPS {
        return Err(TransformError::SingularMatrix);
    }
    let co = (cosa * cosb - cosg) / denom;
    if co.abs() > 1.0 {
        return Err(TransformError::SingularMatrix);
    }

    Ok(mat4_from_rows([
        [a * sinb * (1.0 - co * co).sqrt(), 0.0, 0.0, 0.0],
        [-a * sinb * co, b * sina, 0.0, 0.0],
        [a * cosb, b * cosa, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Inverse of a homogeneous matrix.
///
/// # Errors
///
/// [`TransformError::SingularMatrix`] if a column is zero or `|det|` is at
/// most [`EPS`] times the product of the column lengths (the Hadamard bound).
/// The test only looks at how close the columns are to linearly dependent, so
/// matrices with widely different but exact scales still invert.
pub fn inverse_matrix(m: &DMat4) -> Result<DMat4, TransformError> {
    let bound = m.x_axis.length() * m.y_axis.length() * m.z_axis.length() * m.w_axis.length();
    let det = m.determinant();
    if bound == 0.0 || !det.is_finite() || det.abs() <= EPS * bound {
        return Err(TransformError::SingularMatrix);
    }
    Ok(m.inverse())
}

/// Product `m[0] · m[1] · ... · m[n-1]`, the identity for an empty slice.
///
/// Applied to a point, the last matrix acts first.
pub fn concatenate_matrices(matrices: &[DMat4]) -> DMat4 {
    matrices
        .iter()
        .fold(DMat4::IDENTITY, |acc, m| acc * *m)
}

/// Whether two matrices perform the same transformation.
///
/// Both are normalized by their homogeneous scale `M[3][3]` before the
/// element-wise comparison, so `m` and `2m` compare equal.
pub fn is_same_transform(m0: &DMat4, m1: &DMat4, tol: &Tolerance) -> bool {
    let normalized = |m: &DMat4| {
        let w = m.w_axis.w;
        if w.abs() < EPS {
            *m
        } else {
            *m * (1.0 / w)
        }
    };
    tol.all_close(
        &normalized(m0).to_cols_array(),
        &normalized(m1).to_cols_array(),
    )
}
