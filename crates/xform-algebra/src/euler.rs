use serde::{Deserialize, Serialize};

use crate::axes::AxisConvention;

/// Three rotation angles in radians, tagged with the convention they follow.
///
/// `ai`, `aj` and `ak` are the angles about the first, second and third axis
/// of the convention key. Angles of different conventions are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Angle about the first axis.
    pub ai: f64,
    /// Angle about the second axis.
    pub aj: f64,
    /// Angle about the third axis.
    pub ak: f64,
    /// Axis convention of the angles.
    pub axes: AxisConvention,
}

impl EulerAngles {
    /// Create Euler angles for the given convention.
    #[inline]
    pub const fn new(ai: f64, aj: f64, ak: f64, axes: AxisConvention) -> Self {
        Self { ai, aj, ak, axes }
    }

    /// Angles as an array `[ai, aj, ak]`.
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.ai, self.aj, self.ak]
    }
}
