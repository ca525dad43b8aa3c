//! Numerically careful reductions.
//!
//! | Function | Computes |
//! |---|---|
//! | [`median`] / [`median_mut`] | middle value; mean of the two central values for even lengths |
//! | [`logsum`] | `ln(Σ xᵢ)` from `ln xᵢ`, sort-then-tree reduction |
//! | [`e_w_logsum`] | `Σ aᵢ wᵢ` from `aᵢ` and `ln wᵢ`, split by sign |
//! | [`logsum_rows`] | [`logsum`] over each row of a matrix |
//! | [`mean_cov`] | sample mean and unbiased covariance of `n × d` samples |
//! | [`subset_indices_of_sorted`] | exact or closest index lookup in an ascending slice |
//!
//! # Example
//!
//! ```
//! use flatmat::stats::{logsum, median};
//!
//! let x = [1.0_f64, 2.0, 3.0, 4.0];
//! let logs: Vec<f64> = x.iter().map(|v| v.ln()).collect();
//! assert!((logsum(&logs).exp() - 10.0).abs() < 1e-12);
//! assert_eq!(median(&x), Some(2.5));
//! ```

mod logsum;
mod median;
mod moments;
mod search;


pub use logsum::{e_w_logsum, logsum, logsum_mut, logsum_rows};
pub use median::{median, median_mut};
pub use moments::mean_cov;
pub use search::{subset_indices_of_sorted, Match};

use core::cmp::Ordering;

use crate::flatmatrix::ShapeError;
use crate::traits::FloatScalar;

/// Errors from statistical reductions and robust regression.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Input has no elements where at least one is needed.
    Empty,
    /// Fewer observations than the estimator needs.
    InsufficientData { needed: usize, got: usize },
    /// Two inputs that must agree in length do not.
    LengthMismatch { expected: usize, got: usize },
    /// Matrix input has the wrong shape.
    Shape(ShapeError),
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::Empty => write!(f, "input is empty"),
            StatsError::InsufficientData { needed, got } => {
                write!(f, "need at least {} observations, got {}", needed, got)
            }
            StatsError::LengthMismatch { expected, got } => {
                write!(f, "length mismatch: expected {}, got {}", expected, got)
            }
            StatsError::Shape(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for StatsError {
    fn from(e: ShapeError) -> Self {
        StatsError::Shape(e)
    }
}

/// Total order on floats with every NaN after every number.
#[inline]
pub(crate) fn nan_last_cmp<T: FloatScalar>(a: &T, b: &T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}
