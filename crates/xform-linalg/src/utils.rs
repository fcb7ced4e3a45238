use glam::{DMat3, DMat4};
use nalgebra::{Matrix3, Matrix4};

// nalgebra and glam both store matrices column-major, so the raw slices line up.

/// Convert a glam 3x3 matrix to nalgebra.
#[inline]
pub fn dmat3_to_na(m: &DMat3) -> Matrix3<f64> {
    Matrix3::from_column_slice(&m.to_cols_array())
}

/// Convert a nalgebra 3x3 matrix to glam.
#[inline]
pub fn na_to_dmat3(m: &Matrix3<f64>) -> DMat3 {
    DMat3::from_cols_slice(m.as_slice())
}

/// Convert a glam 4x4 matrix to nalgebra.
#[inline]
pub fn dmat4_to_na(m: &DMat4) -> Matrix4<f64> {
    Matrix4::from_column_slice(&m.to_cols_array())
}

/// Convert a nalgebra 4x4 matrix to glam.
#[inline]
pub fn na_to_dmat4(m: &Matrix4<f64>) -> DMat4 {
    DMat4::from_cols_slice(m.as_slice())
}

/// Build a 4x4 matrix from its rows.
#[inline]
pub fn mat4_from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Rows of a 4x4 matrix.
#[inline]
pub fn mat4_to_rows(m: &DMat4) -> [[f64; 4]; 4] {
    m.transpose().to_cols_array_2d()
}
