use alloc::vec::Vec;

use crate::flatmatrix::{FlatMatrix, ShapeError};
use crate::traits::FloatScalar;

use super::{nan_last_cmp, StatsError};

/// `ln(eᵃ + eᵇ)` with the exponent argument kept non-positive.
#[inline]
fn log_add<T: FloatScalar>(a: T, b: T) -> T {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if hi.is_infinite() {
        // -inf + -inf is an empty sum; +inf dominates anything
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// `ln(x₁ + … + xₙ)` given `ln x₁, …, ln xₙ`.
///
/// The values are sorted ascending and then combined pairwise at doubling
/// strides, so every addition sees operands of similar magnitude. An empty
/// input is the log of an empty sum, `-inf`.
///
/// ```
/// use flatmat::stats::logsum;
///
/// // ln(e^1000 + e^1000) without overflow
/// assert!((logsum(&[1000.0_f64, 1000.0]) - (1000.0 + 2.0_f64.ln())).abs() < 1e-12);
/// assert_eq!(logsum::<f64>(&[]), f64::NEG_INFINITY);
/// ```
pub fn logsum<T: FloatScalar>(log_values: &[T]) -> T {
    let mut scratch = log_values.to_vec();
    logsum_mut(&mut scratch)
}

/// [`logsum`] that uses `log_values` as its scratch space.
///
/// The contents of `log_values` afterwards are unspecified.
pub fn logsum_mut<T: FloatScalar>(log_values: &mut [T]) -> T {
    let n = log_values.len();
    if n == 0 {
        return T::neg_infinity();
    }
    log_values.sort_unstable_by(nan_last_cmp);

    let mut stride = 1;
    while stride < n {
        let mut i = 0;
        while i + stride < n {
            log_values[i] = log_add(log_values[i], log_values[i + stride]);
            i += 2 * stride;
        }
        stride *= 2;
    }
    log_values[0]
}

/// `Σ aᵢ·wᵢ` given `aᵢ` and `ln wᵢ`.
///
/// Positive and negative terms are summed separately in log space and
/// only exponentiated at the end, so weights far outside the float range
/// still combine correctly. Terms with `aᵢ == 0` are skipped.
///
/// ```
/// use flatmat::stats::e_w_logsum;
///
/// let a = [2.0_f64, -1.0, 0.0];
/// let log_w = [0.5_f64.ln(), 3.0_f64.ln(), 1e6];
/// let s = e_w_logsum(&a, &log_w).unwrap();
/// assert!((s - (2.0 * 0.5 - 3.0)).abs() < 1e-12);
/// ```
pub fn e_w_logsum<T: FloatScalar>(a: &[T], log_w: &[T]) -> Result<T, StatsError> {
    if a.len() != log_w.len() {
        return Err(StatsError::LengthMismatch {
            expected: a.len(),
            got: log_w.len(),
        });
    }

    let mut pos = Vec::with_capacity(a.len());
    let mut neg = Vec::new();
    for (&ai, &lw) in a.iter().zip(log_w.iter()) {
        if ai == T::zero() {
            continue;
        }
        if ai < T::zero() {
            neg.push((-ai).ln() + lw);
        } else {
            // NaN lands here and propagates
            pos.push(ai.ln() + lw);
        }
    }
    Ok(logsum_mut(&mut pos).exp() - logsum_mut(&mut neg).exp())
}

/// [`logsum`] over each leading-dimension row of a rank ≥ 2 matrix.
///
/// For a buffer of per-sample log-likelihoods shaped `[n, k, ...]` this
/// yields the `n` log-marginals.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::stats::logsum_rows;
///
/// let ll = FlatMatrix::new(&[2, 2], vec![0.0_f64, 0.0, 1.0, f64::NEG_INFINITY]).unwrap();
/// let out = logsum_rows(&ll).unwrap();
/// assert!((out[0] - 2.0_f64.ln()).abs() < 1e-15);
/// assert_eq!(out[1], 1.0);
/// ```
pub fn logsum_rows<T: FloatScalar>(m: &FlatMatrix<T>) -> Result<Vec<T>, StatsError> {
    if m.ndim() < 2 {
        return Err(ShapeError::Rank {
            expected: 2,
            got: m.ndim(),
        }
        .into());
    }
    let mut scratch = Vec::with_capacity(m.row_len());
    Ok(m
        .rows()
        .map(|row| {
            scratch.clear();
            scratch.extend_from_slice(row);
            logsum_mut(&mut scratch)
        })
        .collect())
}
