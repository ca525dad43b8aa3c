use alloc::vec::Vec;

use crate::flatmatrix::{direct_div, pair_count, pairs, FlatMatrix, PairOp, ShapeError};
use crate::stats::{median_mut, StatsError};
use crate::traits::FloatScalar;

// ── Free functions ──────────────────────────────────────────────────

/// Theil-Sen fit of `y ≈ m·x + b` for one explanatory variable.
///
/// `m` is the median of the slopes over every pair of observations and
/// `b` the median of `y_i - m·x_i`. Pairs with equal `x` produce infinite
/// slopes, which take part in the median like any other value. A repeated
/// observation (equal `x` and equal `y`) gives a `0/0` slope, and the NaN
/// carries through to both `m` and `b`.
///
/// ```
/// use flatmat::regress::fit_1d;
///
/// let x = [1.0_f64, 2.0, 3.0, 4.0];
/// let y = [-1.0_f64, -3.5, -6.0, -8.5];
/// let (m, b) = fit_1d(&y, &x).unwrap();
/// assert!((m + 2.5).abs() < 1e-12);
/// assert!((b - 1.5).abs() < 1e-12);
/// ```
pub fn fit_1d<T: FloatScalar>(y: &[T], x: &[T]) -> Result<(T, T), StatsError> {
    let n = y.len();
    if x.len() != n {
        return Err(StatsError::LengthMismatch {
            expected: n,
            got: x.len(),
        });
    }
    if n < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: n });
    }

    let dy = pairs(PairOp::Sub, &FlatMatrix::from_vec(y.to_vec()));
    let dx = pairs(PairOp::Sub, &FlatMatrix::from_vec(x.to_vec()));
    let degenerate = dx.data().iter().filter(|&&d| d == T::zero()).count();
    if degenerate > 0 {
        log::debug!(
            "theil-sen: {} of {} pairs share an x value",
            degenerate,
            pair_count(n)
        );
    }

    let mut slopes = direct_div(&dy, &dx)?.into_data();
    let m = median_mut(&mut slopes).ok_or(StatsError::Empty)?;

    let mut residuals: Vec<T> = y.iter().zip(x.iter()).map(|(&yi, &xi)| yi - m * xi).collect();
    let b = median_mut(&mut residuals).ok_or(StatsError::Empty)?;
    Ok((m, b))
}

/// Number of explanatory dimensions implied by `n` responses and a flat
/// `x` of length `n·d`.
fn dims_of(n: usize, x_len: usize) -> Result<usize, StatsError> {
    if n == 0 {
        return Err(StatsError::Empty);
    }
    if x_len % n != 0 || x_len == 0 {
        return Err(ShapeError::Indivisible {
            len: x_len,
            known: n,
        }
        .into());
    }
    Ok(x_len / n)
}

/// Independent Theil-Sen fits of `y` against each column of the row-major
/// `n × d` buffer `x`.
///
/// Returns `(m, b)`, one slope and intercept per dimension. With `d == 1`
/// this is exactly [`fit_1d`].
pub fn fit_nd<T: FloatScalar>(y: &[T], x: &[T]) -> Result<(Vec<T>, Vec<T>), StatsError> {
    let n = y.len();
    let d = dims_of(n, x.len())?;
    if n < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: n });
    }

    let mut m = Vec::with_capacity(d);
    let mut b = Vec::with_capacity(d);
    let mut column = Vec::with_capacity(n);
    for k in 0..d {
        column.clear();
        column.extend(x.iter().skip(k).step_by(d).copied());
        let (mk, bk) = fit_1d(y, &column)?;
        m.push(mk);
        b.push(bk);
    }
    Ok((m, b))
}

/// Predict each row of the row-major `n × d` buffer `x` as the median over
/// dimensions of `m[k]·x[i, k] + b[k]`.
pub fn apply<T: FloatScalar>(x: &[T], m: &[T], b: &[T]) -> Result<Vec<T>, StatsError> {
    let d = m.len();
    if b.len() != d {
        return Err(StatsError::LengthMismatch {
            expected: d,
            got: b.len(),
        });
    }
    if d == 0 {
        return Err(StatsError::Empty);
    }
    if x.len() % d != 0 {
        return Err(ShapeError::Indivisible {
            len: x.len(),
            known: d,
        }
        .into());
    }

    let mut candidates = Vec::with_capacity(d);
    x.chunks_exact(d)
        .map(|row| {
            candidates.clear();
            candidates.extend(
                row.iter()
                    .zip(m.iter().zip(b.iter()))
                    .map(|(&xk, (&mk, &bk))| mk * xk + bk),
            );
            median_mut(&mut candidates).ok_or(StatsError::Empty)
        })
        .collect()
}

// ── Model ───────────────────────────────────────────────────────────

/// A fitted Theil-Sen model: one slope and intercept per dimension.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::regress::TheilSen;
///
/// // Two views of the same signal t: x0 = t, x1 = (t - 4) / 2
/// let t = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
/// let x = FlatMatrix::from_fn(5, 2, |i, k| if k == 0 { t[i] } else { (t[i] - 4.0) / 2.0 });
/// let fit = TheilSen::fit_matrix(&t, &x).unwrap();
/// assert_eq!(fit.dims(), 2);
/// assert!((fit.slopes()[1] - 2.0).abs() < 1e-12);
/// assert!((fit.intercepts()[1] - 4.0).abs() < 1e-12);
///
/// let pred = fit.predict_matrix(&x).unwrap();
/// for (p, e) in pred.iter().zip(t.iter()) {
///     assert!((p - e).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TheilSen<T> {
    slopes: Vec<T>,
    intercepts: Vec<T>,
}

impl<T: FloatScalar> TheilSen<T> {
    /// Fit against a flat row-major `n × d` buffer. See [`fit_nd`].
    pub fn fit(y: &[T], x: &[T]) -> Result<Self, StatsError> {
        let (slopes, intercepts) = fit_nd(y, x)?;
        Ok(Self { slopes, intercepts })
    }

    /// Fit against an `n × d` matrix, or a length-`n` vector for `d == 1`.
    pub fn fit_matrix(y: &[T], x: &FlatMatrix<T>) -> Result<Self, StatsError> {
        check_rows(x, y.len())?;
        Self::fit(y, x.data())
    }

    /// Build a model from known coefficients.
    pub fn from_coefficients(slopes: Vec<T>, intercepts: Vec<T>) -> Result<Self, StatsError> {
        if slopes.len() != intercepts.len() {
            return Err(StatsError::LengthMismatch {
                expected: slopes.len(),
                got: intercepts.len(),
            });
        }
        Ok(Self { slopes, intercepts })
    }

    /// Predict from a flat row-major buffer with [`dims`](Self::dims)
    /// columns. See [`apply`].
    pub fn predict(&self, x: &[T]) -> Result<Vec<T>, StatsError> {
        apply(x, &self.slopes, &self.intercepts)
    }

    /// Predict from an `n × d` matrix.
    pub fn predict_matrix(&self, x: &FlatMatrix<T>) -> Result<Vec<T>, StatsError> {
        if x.ndim() == 2 && x.shape()[1] != self.dims() {
            return Err(StatsError::LengthMismatch {
                expected: self.dims(),
                got: x.shape()[1],
            });
        }
        self.predict(x.data())
    }

    #[inline]
    pub fn slopes(&self) -> &[T] {
        &self.slopes
    }

    #[inline]
    pub fn intercepts(&self) -> &[T] {
        &self.intercepts
    }

    /// Number of explanatory dimensions.
    #[inline]
    pub fn dims(&self) -> usize {
        self.slopes.len()
    }
}

fn check_rows<T>(x: &FlatMatrix<T>, n: usize) -> Result<(), StatsError> {
    match x.ndim() {
        1 | 2 if x.shape()[0] == n => Ok(()),
        1 | 2 => Err(StatsError::LengthMismatch {
            expected: n,
            got: x.shape()[0],
        }),
        r => Err(ShapeError::Rank {
            expected: 2,
            got: r,
        }
        .into()),
    }
}
