use std::fmt;

use glam::DMat4;
use serde::{Deserialize, Serialize};
use xform_algebra::Quaternion;
use xform_linalg::utils::mat4_to_rows;

/// Formatting preferences for printing matrices and quaternions.
///
/// Only affects [`MatrixDisplay`] and [`QuaternionDisplay`]; computations never
/// read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// Digits after the decimal point.
    pub precision: usize,
    /// Print values that round to zero as an unsigned zero.
    pub suppress: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 5,
            suppress: true,
        }
    }
}

impl PrintOptions {
    /// Display adapter for a homogeneous matrix.
    pub fn matrix<'a>(&self, matrix: &'a DMat4) -> MatrixDisplay<'a> {
        MatrixDisplay {
            matrix,
            options: *self,
        }
    }

    /// Display adapter for a quaternion.
    pub fn quaternion<'a>(&self, quaternion: &'a Quaternion) -> QuaternionDisplay<'a> {
        QuaternionDisplay {
            quaternion,
            options: *self,
        }
    }

    fn format_value(&self, v: f64) -> String {
        let half_unit = 0.5 * 10f64.powi(-(self.precision as i32));
        let v = if self.suppress && v.abs() < half_unit {
            0.0
        } else {
            v
        };
        format!("{:.*}", self.precision, v)
    }

    fn format_row(&self, values: &[f64], width: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:>width$}", self.format_value(*v))?;
        }
        f.write_str("]")
    }
}

/// Row-major, column-aligned rendering of a [`DMat4`].
///
/// Example:
/// ```
/// use glam::DMat4;
/// use xform_geometry::PrintOptions;
///
/// let options = PrintOptions { precision: 1, suppress: true };
/// let text = options.matrix(&DMat4::IDENTITY).to_string();
/// assert_eq!(text, "[[1.0 0.0 0.0 0.0]\n [0.0 1.0 0.0 0.0]\n [0.0 0.0 1.0 0.0]\n [0.0 0.0 0.0 1.0]]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatrixDisplay<'a> {
    matrix: &'a DMat4,
    options: PrintOptions,
}

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = mat4_to_rows(self.matrix);
        let width = rows
            .iter()
            .flatten()
            .map(|v| self.options.format_value(*v).len())
            .max()
            .unwrap_or(0);

        f.write_str("[")?;
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n ")?;
            }
            self.options.format_row(row, width, f)?;
        }
        f.write_str("]")
    }
}

/// Rendering of a [`Quaternion`] as `[w x y z]`.
#[derive(Debug, Clone, Copy)]
pub struct QuaternionDisplay<'a> {
    quaternion: &'a Quaternion,
    options: PrintOptions,
}

impl fmt::Display for QuaternionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.quaternion.to_array();
        let width = values
            .iter()
            .map(|v| self.options.format_value(*v).len())
            .max()
            .unwrap_or(0);
        self.options.format_row(&values, width, f)
    }
}
