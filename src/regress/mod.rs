//! Robust linear regression.
//!
//! [`TheilSen`] fits each explanatory dimension independently against the
//! same response using the median of all pairwise slopes, then predicts by
//! taking the median across dimensions. A minority of corrupted
//! dimensions, or up to roughly 29% outlying rows, barely moves the fit.
//!
//! ```
//! use flatmat::regress::TheilSen;
//!
//! // y = 2x + 1 with one wild observation
//! let x = [0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [1.0_f64, 3.0, 5.0, 7.0, 400.0, 11.0];
//! let fit = TheilSen::fit(&y, &x).unwrap();
//! assert!((fit.slopes()[0] - 2.0).abs() < 1e-12);
//! assert!((fit.intercepts()[0] - 1.0).abs() < 1e-12);
//! ```

mod theil_sen;

pub use theil_sen::{apply, fit_1d, fit_nd, TheilSen};
