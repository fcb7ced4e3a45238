//! Quaternion (double precision), stored **w-first**.
//!
//! A unit quaternion `q` and its negation `-q` encode the same rotation. The
//! algebra here does not pick a sign; functions that extract a quaternion from
//! a rotation (see `xform-geometry`) document the sign they return.

use glam::DVec3;

use crate::{error::AlgebraError, tolerance::Tolerance, tolerance::EPS};

/// Quaternion `w + xi + yj + zk`, stored as `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Quaternion(pub [f64; 4]);

impl Quaternion {
    /// Identity rotation `[1, 0, 0, 0]`.
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0]);

    /// Create a quaternion from its real part `w` and imaginary part `x, y, z`.
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self([w, x, y, z])
    }

    /// Create a quaternion from a `[w, x, y, z]` array.
    #[inline]
    pub const fn from_array(arr: [f64; 4]) -> Self {
        Self(arr)
    }

    /// Components as `[w, x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        self.0
    }

    /// Real component.
    #[inline]
    pub fn w(&self) -> f64 {
        self.0[0]
    }

    /// First imaginary component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0[1]
    }

    /// Second imaginary component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0[2]
    }

    /// Third imaginary component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0[3]
    }

    /// Real part.
    #[inline]
    pub fn real(&self) -> f64 {
        self.0[0]
    }

    /// Imaginary part as a vector.
    #[inline]
    pub fn imag(&self) -> DVec3 {
        DVec3::new(self.0[1], self.0[2], self.0[3])
    }

    /// Four-dimensional dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Euclidean norm of the four components.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Quaternion scaled to unit norm, or `None` when the norm is below [`EPS`].
    pub fn normalize(&self) -> Option<Self> {
        let n = self.norm();
        if n < EPS {
            return None;
        }
        Some(*self * (1.0 / n))
    }

    /// Conjugate `w - xi - yj - zk`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        let [w, x, y, z] = self.0;
        Self([w, -x, -y, -z])
    }

    /// Multiplicative inverse `conj(q) / |q|²`, or `None` for a zero quaternion.
    pub fn inverse(&self) -> Option<Self> {
        let n2 = self.dot(self);
        if n2 < EPS {
            return None;
        }
        Some(self.conjugate() * (1.0 / n2))
    }

    /// Linear combination `self + t * (other - self)`, not normalized.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut out = [0.0; 4];
        for (o, (a, b)) in out.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *o = a + t * (b - a);
        }
        Self(out)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 4]> for Quaternion {
    #[inline]
    fn from(arr: [f64; 4]) -> Self {
        Self(arr)
    }
}

impl From<Quaternion> for [f64; 4] {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.0
    }
}

// glam stores quaternions as x, y, z, w
impl From<glam::DQuat> for Quaternion {
    #[inline]
    fn from(q: glam::DQuat) -> Self {
        Self([q.w, q.x, q.y, q.z])
    }
}

impl From<Quaternion> for glam::DQuat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        let [w, x, y, z] = q.0;
        glam::DQuat::from_xyzw(x, y, z, w)
    }
}

// Hamilton product
impl std::ops::Mul<Quaternion> for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: Quaternion) -> Self::Output {
        let [w1, x1, y1, z1] = self.0;
        let [w0, x0, y0, z0] = rhs.0;
        Self([
            -x1 * x0 - y1 * y0 - z1 * z0 + w1 * w0,
            x1 * w0 + y1 * z0 - z1 * y0 + w1 * x0,
            -x1 * z0 + y1 * w0 + z1 * x0 + w1 * y0,
            x1 * y0 - y1 * x0 + z1 * w0 + w1 * z0,
        ])
    }
}

impl std::ops::Mul<f64> for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0.map(|c| c * rhs))
    }
}

impl std::ops::Add for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn add(self, rhs: Quaternion) -> Self::Output {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0.iter()) {
            *o += r;
        }
        Self(out)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.map(|c| -c))
    }
}

/// Hamilton product `q1 ⊗ q0`: the rotation `q0` followed by `q1`.
///
/// Example:
/// ```
/// use xform_algebra::{quaternion_multiply, Quaternion};
///
/// let q = quaternion_multiply(
///     Quaternion::new(4.0, 1.0, -2.0, 3.0),
///     Quaternion::new(8.0, -5.0, 6.0, 7.0),
/// );
/// assert_eq!(q.to_array(), [28.0, -44.0, -14.0, 48.0]);
/// ```
#[inline]
pub fn quaternion_multiply(q1: Quaternion, q0: Quaternion) -> Quaternion {
    q1 * q0
}

/// Conjugate of a quaternion.
#[inline]
pub fn quaternion_conjugate(q: Quaternion) -> Quaternion {
    q.conjugate()
}

/// Inverse of a quaternion.
///
/// # Errors
///
/// [`AlgebraError::ZeroQuaternion`] if the quaternion has zero norm.
pub fn quaternion_inverse(q: Quaternion) -> Result<Quaternion, AlgebraError> {
    q.inverse().ok_or(AlgebraError::ZeroQuaternion)
}

/// Real part of a quaternion.
#[inline]
pub fn quaternion_real(q: Quaternion) -> f64 {
    q.real()
}

/// Imaginary part of a quaternion.
#[inline]
pub fn quaternion_imag(q: Quaternion) -> DVec3 {
    q.imag()
}

/// Whether two quaternions encode the same rotation, i.e. `q0 ≈ q1` or `q0 ≈ -q1`.
pub fn is_same_quaternion(q0: Quaternion, q1: Quaternion, tol: &Tolerance) -> bool {
    tol.all_close(&q0.0, &q1.0) || tol.all_close(&q0.0, &(-q1).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity() {
        let q = Quaternion::new(0.3, -0.1, 0.7, 2.0);
        assert_eq!(Quaternion::IDENTITY * q, q);
        assert_eq!(q * Quaternion::IDENTITY, q);
    }

    #[test]
    fn test_multiply() {
        let q = quaternion_multiply(
            Quaternion::new(4.0, 1.0, -2.0, 3.0),
            Quaternion::new(8.0, -5.0, 6.0, 7.0),
        );
        assert_eq!(q, Quaternion::new(28.0, -44.0, -14.0, 48.0));
    }

    #[test]
    fn test_multiply_matches_glam() {
        let a = Quaternion::new(0.5, 0.1, -0.3, 0.8).normalize().unwrap();
        let b = Quaternion::new(-0.2, 0.9, 0.4, 0.1).normalize().unwrap();
        let expected = glam::DQuat::from(a) * glam::DQuat::from(b);
        let ab = Quaternion::from(expected);
        for (x, y) in (a * b).to_array().iter().zip(ab.to_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_conjugate() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let c = quaternion_conjugate(q);
        assert_eq!(c.real(), q.real());
        assert_eq!(c.imag(), -q.imag());
    }

    #[test]
    fn test_inverse() -> Result<(), AlgebraError> {
        let q = Quaternion::new(0.5, -1.0, 2.0, 0.25);
        let qi = quaternion_inverse(q)?;
        let p = q * qi;
        for (x, y) in p.to_array().iter().zip(Quaternion::IDENTITY.to_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
        assert_eq!(
            quaternion_inverse(Quaternion::new(0.0, 0.0, 0.0, 0.0)),
            Err(AlgebraError::ZeroQuaternion)
        );
        Ok(())
    }

    #[test]
    fn test_real_imag() {
        let q = Quaternion::new(3.0, 0.0, 2.0, 1.0);
        assert_eq!(quaternion_real(q), 3.0);
        assert_eq!(quaternion_imag(q), DVec3::new(0.0, 2.0, 1.0));
    }

    #[test]
    fn test_normalize_zero() {
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize().is_none());
        let q = Quaternion::new(0.0, 3.0, 0.0, 4.0).normalize().unwrap();
        assert_relative_eq!(q.norm(), 1.0);
    }

    #[test]
    fn test_glam_roundtrip_order() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let g = glam::DQuat::from(q);
        assert_eq!((g.x, g.y, g.z, g.w), (2.0, 3.0, 4.0, 1.0));
        assert_eq!(Quaternion::from(g), q);
    }

    #[test]
    fn test_is_same_quaternion() {
        let tol = Tolerance::default();
        let q = Quaternion::new(0.5, 0.5, -0.5, 0.5);
        assert!(is_same_quaternion(q, -q, &tol));
        assert!(!is_same_quaternion(q, q.conjugate(), &tol));
    }
}
