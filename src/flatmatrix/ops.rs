use alloc::vec::Vec;
use core::ops::{Add, Div, Mul, Sub};

use crate::traits::Scalar;

use super::{FlatMatrix, ShapeError};

fn check_same_shape<T>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<(), ShapeError> {
    if !a.same_shape(b) {
        return Err(ShapeError::Mismatch {
            expected: a.shape.clone(),
            got: b.shape.clone(),
        });
    }
    Ok(())
}

#[inline]
fn zip_into<T: Copy>(a: &[T], b: &[T], out: &mut [T], f: impl Fn(T, T) -> T) {
    for ((o, &x), &y) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = f(x, y);
    }
}

// ── Element-wise kernels ────────────────────────────────────────────

macro_rules! direct_op {
    ($name:ident, $inplace:ident, $op:tt, $verb:literal) => {
        #[doc = concat!("Element-wise `a ", stringify!($op), " b` into a new matrix.")]
        ///
        /// Both operands must have the same shape. Float edge cases follow
        /// IEEE semantics (no error on division by zero).
        pub fn $name<T: Scalar>(
            a: &FlatMatrix<T>,
            b: &FlatMatrix<T>,
        ) -> Result<FlatMatrix<T>, ShapeError> {
            check_same_shape(a, b)?;
            let data: Vec<T> = a
                .data
                .iter()
                .zip(b.data.iter())
                .map(|(&x, &y)| x $op y)
                .collect();
            Ok(FlatMatrix::from_parts(a.shape.clone(), data))
        }

        #[doc = concat!("Element-wise `a ", stringify!($op), " b` into the caller-owned `out`.")]
        ///
        /// `a`, `b` and `out` must share a shape; this is only verified in
        /// debug builds. `out` is never reallocated.
        pub fn $inplace<T: Scalar>(a: &FlatMatrix<T>, b: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
            debug_assert!(
                a.same_shape(b) && a.same_shape(out),
                concat!("shape mismatch in ", $verb, ": {:?}, {:?} -> {:?}"),
                a.shape,
                b.shape,
                out.shape,
            );
            zip_into(&a.data, &b.data, &mut out.data, |x, y| x $op y);
        }
    };
}

direct_op!(direct_add, direct_add_inplace, +, "add");
direct_op!(direct_sub, direct_sub_inplace, -, "sub");
direct_op!(direct_mul, direct_mul_inplace, *, "mul");
direct_op!(direct_div, direct_div_inplace, /, "div");

// ── Operator sugar ──────────────────────────────────────────────────

macro_rules! operator_impl {
    ($trait:ident, $method:ident) => {
        impl<T: Scalar> $trait<&FlatMatrix<T>> for &FlatMatrix<T> {
            type Output = FlatMatrix<T>;

            fn $method(self, rhs: &FlatMatrix<T>) -> FlatMatrix<T> {
                assert_eq!(
                    self.shape, rhs.shape,
                    "dimension mismatch: {:?} vs {:?}",
                    self.shape, rhs.shape,
                );
                let data = self
                    .data
                    .iter()
                    .zip(rhs.data.iter())
                    .map(|(&a, &b)| a.$method(b))
                    .collect();
                FlatMatrix::from_parts(self.shape.clone(), data)
            }
        }

        impl<T: Scalar> $trait<T> for &FlatMatrix<T> {
            type Output = FlatMatrix<T>;

            fn $method(self, rhs: T) -> FlatMatrix<T> {
                let data = self.data.iter().map(|&a| a.$method(rhs)).collect();
                FlatMatrix::from_parts(self.shape.clone(), data)
            }
        }
    };
}

operator_impl!(Add, add);
operator_impl!(Sub, sub);
operator_impl!(Mul, mul);
operator_impl!(Div, div);
