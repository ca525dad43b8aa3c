use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::FloatScalar;

use super::FlatMatrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> FlatMatrix<T> {
    /// Apply a function to every element, producing a new matrix of the
    /// same shape.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::from_vec(vec![1.0_f64, 4.0, 9.0]);
    /// assert_eq!(m.map(|x: f64| x.sqrt()).data(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> FlatMatrix<U>
    where
        T: Copy,
    {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        FlatMatrix {
            shape: self.shape.clone(),
            data,
        }
    }
}

// ── Approximate equality ────────────────────────────────────────────

impl<T: FloatScalar> FlatMatrix<T> {
    /// Shape-exact, value-approximate equality.
    ///
    /// Elements match when `|a - b| <= atol + rtol * |b|`. NaN never matches.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let a = FlatMatrix::from_vec(vec![1.0_f64, 100.0]);
    /// let b = FlatMatrix::from_vec(vec![1.0 + 1e-12, 100.0 + 1e-9]);
    /// assert!(a.approx_eq(&b, 1e-10, 1e-10));
    /// assert!(!a.approx_eq(&b, 0.0, 1e-12));
    /// ```
    pub fn approx_eq(&self, other: &Self, rtol: T, atol: T) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for FlatMatrix<T> {
    /// Column-aligned rows of the leading dimension. Vectors print on one
    /// line; matrices of rank > 2 print their trailing dimensions flattened,
    /// after a shape header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ndim() > 2 {
            writeln!(f, "shape {:?}", self.shape)?;
        }

        let cells: Vec<Vec<String>> = if self.ndim() == 1 {
            alloc::vec![self.data.iter().map(|x| format!("{}", x)).collect()]
        } else {
            self.rows()
                .map(|row| row.iter().map(|x| format!("{}", x)).collect())
                .collect()
        };

        let ncols = cells.first().map_or(0, Vec::len);
        let widths: Vec<usize> = (0..ncols)
            .map(|j| cells.iter().map(|r| r[j].chars().count()).max().unwrap_or(0))
            .collect();

        for (i, row) in cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_char('│')?;
            for (j, (cell, &w)) in row.iter().zip(widths.iter()).enumerate() {
                if j > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{:>w$}", cell, w = w)?;
            }
            f.write_char('│')?;
        }
        Ok(())
    }
}
