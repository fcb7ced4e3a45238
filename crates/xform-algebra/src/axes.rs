//! # Euler axis conventions
//!
//! An Euler convention is named by a four letter key such as `"sxyz"` or
//! `"rzyx"`: the first letter selects a **s**tatic (extrinsic) or **r**otating
//! (intrinsic) frame, the remaining three the axis sequence. Internally each of
//! the 24 valid conventions maps to an [`AxisTuple`]
//! `(first_axis, parity, repetition, frame)` which is all the conversion
//! routines need to build or extract the three elementary rotations.
//!
//! A rotating convention is the static convention with the axis sequence
//! reversed, e.g. `rzyx` and `sxyz` describe the same rotation for the same
//! three angles (with the first and last angle swapped).

use std::fmt;
use std::str::FromStr;

use crate::error::AlgebraError;

/// Successor axis lookup: `NEXT_AXIS[i]` is the axis following `i` in the
/// cyclic order x → y → z → x.
pub const NEXT_AXIS: [usize; 4] = [1, 2, 0, 1];

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Zero-based index of the axis.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Whether the inner axis follows the first axis in cyclic (even) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Inner axis is the cyclic successor of the first axis.
    Even,
    /// Inner axis is the cyclic predecessor of the first axis.
    Odd,
}

/// Reference frame the three rotations are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Rotations about the fixed axes of the original frame (extrinsic).
    Static,
    /// Rotations about the axes of the moving frame (intrinsic).
    Rotating,
}

/// Decomposed form of an Euler convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisTuple {
    /// First rotation axis (for static frames) in the convention key.
    pub first_axis: Axis,
    /// Order of the inner axis relative to the first.
    pub parity: Parity,
    /// Whether the last axis repeats the first (e.g. `zxz`).
    pub repetition: bool,
    /// Static or rotating frame.
    pub frame: Frame,
}

impl AxisTuple {
    /// Row/column indices `(i, j, k)` of the three axes used when building or
    /// reading a rotation matrix.
    pub fn matrix_indices(&self) -> (usize, usize, usize) {
        let i = self.first_axis.index();
        let p = self.parity_index();
        let j = NEXT_AXIS[i + p];
        let k = NEXT_AXIS[i + 1 - p];
        (i, j, k)
    }

    /// `0` for even parity, `1` for odd parity.
    #[inline]
    pub fn parity_index(&self) -> usize {
        match self.parity {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

macro_rules! axis_conventions {
    ($($(#[$meta:meta])* $variant:ident => $key:literal, ($axis:ident, $parity:ident, $rep:literal, $frame:ident);)*) => {
        /// The 24 Euler axis conventions.
        ///
        /// Variants are named after their string key, e.g. [`AxisConvention::Sxyz`]
        /// parses from and displays as `"sxyz"`. The default is `sxyz`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum AxisConvention {
            $(
                #[doc = concat!("Convention `", $key, "`.")]
                $(#[$meta])*
                $variant,
            )*
        }

        impl AxisConvention {
            /// Every convention, static frames first.
            pub const ALL: [AxisConvention; 24] = [$(AxisConvention::$variant,)*];

            /// Short string key, e.g. `"sxyz"`.
            pub const fn key(self) -> &'static str {
                match self {
                    $(AxisConvention::$variant => $key,)*
                }
            }

            /// The `(first_axis, parity, repetition, frame)` tuple of the convention.
            pub const fn tuple(self) -> AxisTuple {
                match self {
                    $(AxisConvention::$variant => AxisTuple {
                        first_axis: Axis::$axis,
                        parity: Parity::$parity,
                        repetition: $rep,
                        frame: Frame::$frame,
                    },)*
                }
            }
        }
    };
}

axis_conventions! {
    #[default]
    Sxyz => "sxyz", (X, Even, false, Static);
    Sxyx => "sxyx", (X, Even, true, Static);
    Sxzy => "sxzy", (X, Odd, false, Static);
    Sxzx => "sxzx", (X, Odd, true, Static);
    Syzx => "syzx", (Y, Even, false, Static);
    Syzy => "syzy", (Y, Even, true, Static);
    Syxz => "syxz", (Y, Odd, false, Static);
    Syxy => "syxy", (Y, Odd, true, Static);
    Szxy => "szxy", (Z, Even, false, Static);
    Szxz => "szxz", (Z, Even, true, Static);
    Szyx => "szyx", (Z, Odd, false, Static);
    Szyz => "szyz", (Z, Odd, true, Static);
    Rzyx => "rzyx", (X, Even, false, Rotating);
    Rxyx => "rxyx", (X, Even, true, Rotating);
    Ryzx => "ryzx", (X, Odd, false, Rotating);
    Rxzx => "rxzx", (X, Odd, true, Rotating);
    Rxzy => "rxzy", (Y, Even, false, Rotating);
    Ryzy => "ryzy", (Y, Even, true, Rotating);
    Rzxy => "rzxy", (Y, Odd, false, Rotating);
    Ryxy => "ryxy", (Y, Odd, true, Rotating);
    Ryxz => "ryxz", (Z, Even, false, Rotating);
    Rzxz => "rzxz", (Z, Even, true, Rotating);
    Rxyz => "rxyz", (Z, Odd, false, Rotating);
    Rzyz => "rzyz", (Z, Odd, true, Rotating);
}

impl FromStr for AxisConvention {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| AlgebraError::UnknownAxisConvention(s.to_string()))
    }
}

impl fmt::Display for AxisConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<AxisTuple> for AxisConvention {
    fn from(tuple: AxisTuple) -> Self {
        // the table is a bijection over all 3 * 2 * 2 * 2 tuples
        Self::ALL
            .into_iter()
            .find(|c| c.tuple() == tuple)
            .unwrap_or_default()
    }
}

impl From<AxisConvention> for AxisTuple {
    fn from(c: AxisConvention) -> Self {
        c.tuple()
    }
}

impl serde::Serialize for AxisConvention {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> serde::Deserialize<'de> for AxisConvention {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = <String as serde::Deserialize>::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
