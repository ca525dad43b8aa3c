mod lstsq;
mod svd;

pub use lstsq::least_squares;
pub use svd::{pythag, Svd, SvdWorkspace, MAX_SWEEPS};

use crate::flatmatrix::ShapeError;

/// Errors from linear algebra operations.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::linalg::LinalgError;
///
/// let wide = FlatMatrix::new(&[2, 3], vec![1.0_f64; 6]).unwrap();
/// assert_eq!(
///     wide.svd().unwrap_err(),
///     LinalgError::Dimension { nrows: 2, ncols: 3 },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand has the wrong rank or disagreeing dimensions.
    Shape(ShapeError),
    /// The SVD needs at least as many rows as columns.
    Dimension { nrows: usize, ncols: usize },
    /// The QR sweeps for singular value `index` did not converge within
    /// `sweeps` iterations. Usually caused by non-finite input.
    ConvergenceFailure { index: usize, sweeps: usize },
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Shape(e) => write!(f, "{}", e),
            LinalgError::Dimension { nrows, ncols } => write!(
                f,
                "need more rows than columns: got {}x{} (transpose first)",
                nrows, ncols
            ),
            LinalgError::ConvergenceFailure { index, sweeps } => write!(
                f,
                "singular value {} did not converge after {} sweeps",
                index, sweeps
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinalgError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for LinalgError {
    fn from(e: ShapeError) -> Self {
        LinalgError::Shape(e)
    }
}
