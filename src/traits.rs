use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`FlatMatrix`](crate::FlatMatrix).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements.
///
/// Required by everything that needs `sqrt`, `ln`, `exp`, ordering or a
/// machine epsilon: the SVD, the log-space reductions, medians and
/// Theil-Sen. Implemented for `f32` and `f64`; tolerances inside the
/// algorithms are scaled by [`Float::epsilon`] of the chosen type.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` literal into `Self`, saturating to zero when the
    /// value is not representable (e.g. `1e-64` as `f32`).
    #[inline]
    fn lit(v: f64) -> Self {
        <Self as num_traits::NumCast>::from(v).unwrap_or_else(Self::zero)
    }

    /// Convert a count into `Self`.
    #[inline]
    fn from_usize(n: usize) -> Self {
        <Self as num_traits::NumCast>::from(n).unwrap_or_else(Self::nan)
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a 2-D matrix-like type.
///
/// Lets the SVD kernel operate on any row/column addressable storage.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a 2-D matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling the in-place
/// rotations of the SVD to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap columns `a` and `b`.
    fn swap_cols(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for row in 0..self.nrows() {
            let tmp = *self.get(row, a);
            *self.get_mut(row, a) = *self.get(row, b);
            *self.get_mut(row, b) = tmp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_saturates_to_zero() {
        assert_eq!(<f32 as FloatScalar>::lit(1e-64), 0.0);
        assert_eq!(<f64 as FloatScalar>::lit(1e-64), 1e-64);
    }

    #[test]
    fn from_usize() {
        assert_eq!(<f64 as FloatScalar>::from_usize(12), 12.0);
        assert_eq!(<f32 as FloatScalar>::from_usize(3), 3.0);
    }
}
