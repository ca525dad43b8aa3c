//! Pre-defined type aliases for common `FlatMatrix` element types.

use super::FlatMatrix;

/// Flat matrix with `f32` elements.
pub type FlatMatrixf32 = FlatMatrix<f32>;
/// Flat matrix with `f64` elements.
pub type FlatMatrixf64 = FlatMatrix<f64>;
