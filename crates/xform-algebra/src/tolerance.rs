use serde::{Deserialize, Serialize};

/// Threshold below which a magnitude is treated as zero.
///
/// Four machine epsilons; used for every "is this degenerate" decision in the
/// workspace (zero norms, gimbal lock, singular determinants).
pub const EPS: f64 = f64::EPSILON * 4.0;

/// Element-wise closeness tolerance: `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Relative tolerance, scaled by the magnitude of the reference value.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    /// Whether every pair `(a[i], b[i])` is within tolerance.
    ///
    /// Slices of different lengths are never close.
    pub fn all_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x - y).abs() <= self.atol + self.rtol * y.abs())
    }
}
