use alloc::vec;
use alloc::vec::Vec;

use crate::flatmatrix::{FlatMatrix, ShapeError};
use crate::linalg::{LinalgError, Svd};
use crate::traits::FloatScalar;

/// Minimum-norm least-squares solution of `x · β ≈ y` via the SVD
/// pseudo-inverse.
///
/// `x` is `n × p` with `n >= p`. Singular values at or below
/// `rcond · σ_max` are treated as zero, so rank-deficient designs get the
/// minimum-norm solution instead of blowing up.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::linalg::least_squares;
///
/// // Fit y = c0 + c1·t to (0,1), (1,2), (2,4)
/// let x = FlatMatrix::new(&[3, 2], vec![1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]).unwrap();
/// let beta = least_squares(&x, &[1.0, 2.0, 4.0], 1e-12).unwrap();
/// assert!((beta[0] - 5.0 / 6.0).abs() < 1e-12);
/// assert!((beta[1] - 1.5).abs() < 1e-12);
/// ```
pub fn least_squares<T: FloatScalar>(
    x: &FlatMatrix<T>,
    y: &[T],
    rcond: T,
) -> Result<Vec<T>, LinalgError> {
    x.require_rank(2)?;
    let (n, p) = (x.shape()[0], x.shape()[1]);
    if y.len() != n {
        return Err(ShapeError::Inner {
            left: n,
            right: y.len(),
        }
        .into());
    }

    let svd = Svd::new(x)?;
    let (u, s, v) = (svd.u(), svd.singular_values(), svd.v());
    let cutoff = match s.first() {
        Some(&s_max) => rcond * s_max,
        None => T::zero(),
    };

    // β = Σ_k (u_kᵀ y / σ_k) v_k over the retained singular values
    let mut beta = vec![T::zero(); p];
    for (k, &sk) in s.iter().enumerate() {
        if sk <= cutoff {
            // Sorted descending: everything after is dropped too
            break;
        }
        let mut uty = T::zero();
        for i in 0..n {
            uty = uty + u[(i, k)] * y[i];
        }
        let w = uty / sk;
        for (j, b) in beta.iter_mut().enumerate() {
            *b = *b + w * v[(j, k)];
        }
    }
    Ok(beta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_system() {
        let x = FlatMatrix::new(&[2, 2], vec![2.0_f64, 0.0, 0.0, 4.0]).unwrap();
        let beta = least_squares(&x, &[2.0, 2.0], 1e-12).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-12);
        assert!((beta[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn residual_is_orthogonal_to_columns() {
        let x = FlatMatrix::new(
            &[5, 2],
            vec![1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0],
        )
        .unwrap();
        let y = [0.9_f64, 3.1, 4.8, 7.2, 9.0];
        let beta = least_squares(&x, &y, 1e-12).unwrap();
        let fitted = x.dot_vec(&beta).unwrap();
        for j in 0..2 {
            let mut dot = 0.0;
            for i in 0..5 {
                dot += x[(i, j)] * (y[i] - fitted[i]);
            }
            assert!(dot.abs() < 1e-10, "column {}: {}", j, dot);
        }
    }

    #[test]
    fn rank_deficient_gives_minimum_norm() {
        // Two identical columns: the solution splits the weight evenly
        let x = FlatMatrix::new(&[3, 2], vec![1.0_f64, 1.0, 2.0, 2.0, 3.0, 3.0]).unwrap();
        let beta = least_squares(&x, &[2.0, 4.0, 6.0], 1e-10).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-10);
        assert!((beta[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn length_mismatch() {
        let x = FlatMatrix::<f64>::zeros(&[3, 2]).unwrap();
        assert_eq!(
            least_squares(&x, &[1.0, 2.0], 1e-12).unwrap_err(),
            LinalgError::Shape(ShapeError::Inner { left: 3, right: 2 })
        );
    }
}
