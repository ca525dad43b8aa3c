use alloc::vec;
use alloc::vec::Vec;

use crate::flatmatrix::{dot, transpose, FlatMatrix, ShapeError};
use crate::traits::FloatScalar;

use super::StatsError;

/// Sample mean and unbiased covariance of `n × d` samples (one per row).
///
/// Returns `(mu, sigma)` with `mu` of length `d` and `sigma` a `d × d`
/// matrix normalized by `n - 1`.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::stats::mean_cov;
///
/// let s = FlatMatrix::new(&[3, 2], vec![1.0_f64, 2.0, 2.0, 4.0, 3.0, 6.0]).unwrap();
/// let (mu, sigma) = mean_cov(&s).unwrap();
/// assert_eq!(mu, vec![2.0, 4.0]);
/// assert_eq!(sigma.data(), &[1.0, 2.0, 2.0, 4.0]);
/// ```
pub fn mean_cov<T: FloatScalar>(
    samples: &FlatMatrix<T>,
) -> Result<(Vec<T>, FlatMatrix<T>), StatsError> {
    let (n, d) = match samples.shape() {
        &[n, d] => (n, d),
        s => {
            return Err(ShapeError::Rank {
                expected: 2,
                got: s.len(),
            }
            .into())
        }
    };
    if n < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: n });
    }

    let count = T::from_usize(n);
    let mut mu = vec![T::zero(); d];
    for row in samples.rows() {
        for (m, &x) in mu.iter_mut().zip(row.iter()) {
            *m = *m + x;
        }
    }
    for m in mu.iter_mut() {
        *m = *m / count;
    }

    let centered = FlatMatrix::from_fn(n, d, |i, j| samples[(i, j)] - mu[j]);
    let scatter = dot(&transpose(&centered)?, &centered)?;
    let sigma = &scatter / (count - T::one());
    Ok((mu, sigma))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_moments() {
        let s = FlatMatrix::new(
            &[4, 2],
            vec![1.0_f64, 0.0, -1.0, 0.0, 0.0, 2.0, 0.0, -2.0],
        )
        .unwrap();
        let (mu, sigma) = mean_cov(&s).unwrap();
        assert_eq!(mu, vec![0.0, 0.0]);
        // var(x) = 2/3, var(y) = 8/3, independent
        assert!((sigma[(0, 0)] - 2.0 / 3.0).abs() < 1e-15);
        assert!((sigma[(1, 1)] - 8.0 / 3.0).abs() < 1e-15);
        assert_eq!(sigma[(0, 1)], 0.0);
        assert_eq!(sigma[(1, 0)], 0.0);
    }

    #[test]
    fn covariance_is_symmetric() {
        let s = FlatMatrix::from_fn(6, 3, |i, j| ((i * 7 + j * 3) % 5) as f64 + 0.25 * j as f64);
        let (_, sigma) = mean_cov(&s).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(sigma[(i, j)], sigma[(j, i)]);
            }
        }
    }

    #[test]
    fn needs_two_samples() {
        let s = FlatMatrix::new(&[1, 2], vec![1.0_f64, 2.0]).unwrap();
        assert_eq!(
            mean_cov(&s).unwrap_err(),
            StatsError::InsufficientData { needed: 2, got: 1 }
        );
    }

    #[test]
    fn rejects_rank1() {
        let s = FlatMatrix::from_vec(vec![1.0_f64, 2.0, 3.0]);
        assert_eq!(
            mean_cov(&s).unwrap_err(),
            StatsError::Shape(ShapeError::Rank { expected: 2, got: 1 })
        );
    }
}
