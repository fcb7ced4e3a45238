//! Rigid alignment utilities (Kabsch / Umeyama / Horn)
//!
//! All fits minimize `Σ |s · R · src_i + t - dst_i|²` over corresponding point
//! pairs. The rotation is always proper (`det R = +1`): when the optimal
//! orthogonal matrix would be a reflection the smallest singular direction is
//! flipped instead.

use glam::{DMat3, DMat4, DQuat, DVec3};
use xform_algebra::Quaternion;

use crate::{eigen::largest_eigenvector4, error::LinalgError, svd::svd3};

/// Minimum number of point pairs for a 3D fit.
const MIN_POINTS: usize = 3;

/// Ratio of the second to the first singular value of the cross-covariance
/// below which the point set is considered collinear.
const RANK_TOLERANCE: f64 = 1e-10;

/// Rotation (R), translation (t) and scale (s) of a similarity transform
/// `dst ≈ s · R · src + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidFit {
    /// Proper rotation matrix.
    pub rotation: DMat3,
    /// Translation applied after rotation and scaling.
    pub translation: DVec3,
    /// Uniform scale, `1.0` when scaling was not estimated.
    pub scale: f64,
}

impl RigidFit {
    /// Homogeneous 4x4 matrix of the transform.
    pub fn to_matrix(&self) -> DMat4 {
        let mut m = DMat4::from_mat3(self.rotation * self.scale);
        m.w_axis = self.translation.extend(1.0);
        m
    }
}

/// Centered copies of a point set correspondence.
struct Centered {
    src: Vec<DVec3>,
    dst: Vec<DVec3>,
    src_centroid: DVec3,
    dst_centroid: DVec3,
}

fn check_inputs(src: &[DVec3], dst: &[DVec3]) -> Result<(), LinalgError> {
    if src.len() != dst.len() {
        return Err(LinalgError::MismatchedInputLengths {
            source_len: src.len(),
            destination_len: dst.len(),
        });
    }
    if src.len() < MIN_POINTS {
        return Err(LinalgError::InsufficientPoints {
            required: MIN_POINTS,
            actual: src.len(),
        });
    }
    Ok(())
}

fn center(src: &[DVec3], dst: &[DVec3]) -> Centered {
    let n = src.len() as f64;
    let src_centroid = src.iter().copied().sum::<DVec3>() / n;
    let dst_centroid = dst.iter().copied().sum::<DVec3>() / n;
    Centered {
        src: src.iter().map(|p| *p - src_centroid).collect(),
        dst: dst.iter().map(|p| *p - dst_centroid).collect(),
        src_centroid,
        dst_centroid,
    }
}

/// Cross-covariance `H = Σ dst_i · src_iᵀ` of centered points.
fn cross_covariance(c: &Centered) -> DMat3 {
    c.src
        .iter()
        .zip(c.dst.iter())
        .fold(DMat3::ZERO, |h, (s, d)| {
            h + DMat3::from_cols(*d * s.x, *d * s.y, *d * s.z)
        })
}

fn check_rank(s: &DVec3) -> Result<(), LinalgError> {
    if s.y <= RANK_TOLERANCE * s.x || s.x == 0.0 {
        return Err(LinalgError::DegeneratePointSet);
    }
    Ok(())
}

/// Least-squares scale `Σ (R·src_i)·dst_i / Σ |src_i|²` for centered points.
fn optimal_scale(c: &Centered, rotation: &DMat3) -> f64 {
    let num: f64 = c
        .src
        .iter()
        .zip(c.dst.iter())
        .map(|(s, d)| (*rotation * *s).dot(*d))
        .sum();
    let den: f64 = c.src.iter().map(|s| s.length_squared()).sum();
    num / den
}

fn finish(c: &Centered, rotation: DMat3, scaling: bool) -> RigidFit {
    let scale = if scaling {
        optimal_scale(c, &rotation)
    } else {
        1.0
    };
    let translation = c.dst_centroid - scale * (rotation * c.src_centroid);
    RigidFit {
        rotation,
        translation,
        scale,
    }
}

/// Umeyama/Kabsch alignment via the SVD of the cross-covariance matrix.
///
/// With `H = U Σ Vᵀ` the rotation is `R = U · diag(1, 1, d) · Vᵀ` where
/// `d = sign(det(U Vᵀ))`. With `scaling` the scale is
/// `trace(diag(1, 1, d) Σ) / Σ |src_i - c_src|²`.
///
/// # Errors
///
/// - [`LinalgError::MismatchedInputLengths`] for sets of different length.
/// - [`LinalgError::InsufficientPoints`] for fewer than three pairs.
/// - [`LinalgError::DegeneratePointSet`] for coincident or collinear points.
pub fn umeyama(src: &[DVec3], dst: &[DVec3], scaling: bool) -> Result<RigidFit, LinalgError> {
    check_inputs(src, dst)?;
    let c = center(src, dst);
    let h = cross_covariance(&c);

    let svd = svd3(&h)?;
    check_rank(svd.s())?;
    let u = *svd.u();
    let v = *svd.v();

    let d = (u * v.transpose()).determinant();
    let rotation = if d < 0.0 {
        // Handle reflection: R = U * diag(1, 1, -1) * V^T
        log::debug!("umeyama: correcting improper rotation");
        let correction = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0));
        u * correction * v.transpose()
    } else {
        u * v.transpose()
    };

    Ok(finish(&c, rotation, scaling))
}

/// Horn's closed-form alignment via unit quaternions.
///
/// The rotation is the quaternion eigenvector of the largest eigenvalue of
/// Horn's symmetric 4x4 matrix `N`. Produces the same fit as [`umeyama`] on
/// well-conditioned inputs.
///
/// # Errors
///
/// Same as [`umeyama`].
pub fn horn(src: &[DVec3], dst: &[DVec3], scaling: bool) -> Result<RigidFit, LinalgError> {
    check_inputs(src, dst)?;
    let c = center(src, dst);
    let h = cross_covariance(&c);
    check_rank(svd3(&h)?.s())?;

    // s(a, b) = Σ src_a * dst_b
    let s = |a: usize, b: usize| h.col(a)[b];
    let (xx, yy, zz) = (s(0, 0), s(1, 1), s(2, 2));
    let (xy, yz, zx) = (s(0, 1), s(1, 2), s(2, 0));
    let (xz, yx, zy) = (s(0, 2), s(1, 0), s(2, 1));

    #[rustfmt::skip]
    let n = DMat4::from_cols_array(&[
        xx + yy + zz, yz - zy, zx - xz, xy - yx,
        yz - zy, xx - yy - zz, xy + yx, zx + xz,
        zx - xz, xy + yx, yy - xx - zz, yz + zy,
        xy - yx, zx + xz, yz + zy, zz - xx - yy,
    ]);

    let q = largest_eigenvector4(&n)?;
    // eigenvector components are ordered w, x, y, z
    let quat = Quaternion::new(q.x, q.y, q.z, q.w)
        .normalize()
        .ok_or(LinalgError::DecompositionFailed("Horn quaternion"))?;
    let rotation = DMat3::from_quat(DQuat::from(quat));

    Ok(finish(&c, rotation, scaling))
}

/// Unconstrained least-squares affine map `dst ≈ A · src + t`.
///
/// # Errors
///
/// [`LinalgError::DegeneratePointSet`] if the source points are coplanar, plus
/// the input checks of [`umeyama`].
pub fn fit_affine(src: &[DVec3], dst: &[DVec3]) -> Result<DMat4, LinalgError> {
    check_inputs(src, dst)?;
    let c = center(src, dst);

    let h = cross_covariance(&c);
    let cov = c
        .src
        .iter()
        .fold(DMat3::ZERO, |acc, s| acc + DMat3::from_cols(*s * s.x, *s * s.y, *s * s.z));

    let s = *svd3(&cov)?.s();
    if s.z <= RANK_TOLERANCE * s.x || s.x == 0.0 {
        return Err(LinalgError::DegeneratePointSet);
    }

    let a = h * cov.inverse();
    let mut m = DMat4::from_mat3(a);
    m.w_axis = (c.dst_centroid - a * c.src_centroid).extend(1.0);
    Ok(m)
}
