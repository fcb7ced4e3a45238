//! Uniform sampling of rotations.
//!
//! Rotations are drawn with Shoemake's subgroup algorithm: three independent
//! uniforms on `[0, 1)` map to a unit quaternion distributed uniformly over
//! SO(3).

use std::f64::consts::TAU;

use glam::DMat4;
use rand::Rng;
use xform_algebra::Quaternion;

use crate::convert::quaternion_matrix;

/// Unit quaternion for three uniforms in `[0, 1]`.
///
/// Deterministic half of [`random_quaternion`]; inputs outside `[0, 1]` give
/// meaningless results.
pub fn quaternion_from_uniforms(u: [f64; 3]) -> Quaternion {
    let r1 = (1.0 - u[0]).sqrt();
    let r2 = u[0].sqrt();
    let (s1, c1) = (TAU * u[1]).sin_cos();
    let (s2, c2) = (TAU * u[2]).sin_cos();
    Quaternion::new(c2 * r2, s1 * r1, c1 * r1, s2 * r2)
}

/// Uniformly distributed unit quaternion.
///
/// Example:
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use xform_geometry::random_quaternion;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let q = random_quaternion(&mut rng);
/// assert!((q.norm() - 1.0).abs() < 1e-12);
/// ```
pub fn random_quaternion<R: Rng + ?Sized>(rng: &mut R) -> Quaternion {
    quaternion_from_uniforms([rng.random(), rng.random(), rng.random()])
}

/// Uniformly distributed rotation as a homogeneous matrix.
pub fn random_rotation_matrix<R: Rng + ?Sized>(rng: &mut R) -> DMat4 {
    quaternion_matrix(random_quaternion(rng))
}

/// `n` uniform samples from `[0, 1)`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DMat3;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_from_uniforms() {
        assert_eq!(
            quaternion_from_uniforms([0.0, 0.0, 0.0]).to_array(),
            [0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(
            quaternion_from_uniforms([1.0, 0.0, 0.0]).to_array(),
            [1.0, 0.0, 0.0, 0.0]
        );
        for u in [[0.2, 0.7, 0.1], [0.9, 0.05, 0.5], [0.5, 0.5, 0.5]] {
            assert_relative_eq!(quaternion_from_uniforms(u).norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_random_quaternion_seeded() {
        let a = random_quaternion(&mut StdRng::seed_from_u64(99));
        let b = random_quaternion(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
        assert_relative_eq!(a.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_random_rotation_matrix() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..10 {
            let m = random_rotation_matrix(&mut rng);
            let r = DMat3::from_mat4(m);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
            let rtr = r.transpose() * r;
            assert!(rtr.abs_diff_eq(DMat3::IDENTITY, 1e-12));
        }
    }

    #[test]
    fn test_random_vector() {
        let mut rng = StdRng::seed_from_u64(5);
        let v = random_vector(&mut rng, 1000);
        assert_eq!(v.len(), 1000);
        assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
        let mean = v.iter().sum::<f64>() / v.len() as f64;
        assert!((mean - 0.5).abs() < 0.05);
        assert!(random_vector(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_dyn_rng() {
        let mut rng = StdRng::seed_from_u64(6);
        let dyn_rng: &mut dyn rand::RngCore = &mut rng;
        let q = random_quaternion(dyn_rng);
        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
    }
}
