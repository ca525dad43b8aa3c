//! # flatmat
//!
//! Flat matrices (a shape descriptor plus one contiguous row-major buffer)
//! and the numerical kernels built on them: a thin Golub-Reinsch SVD,
//! Theil-Sen robust regression and log-space reductions. no-std compatible
//! (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use flatmat::FlatMatrix;
//! use flatmat::flatmatrix::{pairs, PairOp};
//!
//! // Shape [0, 2] infers the row count from the data length
//! let m = FlatMatrix::new(&[0, 2], vec![1.0_f64, 10.0, 3.0, 30.0, 7.0, 70.0]).unwrap();
//! assert_eq!(m.shape(), &[3, 2]);
//!
//! // Every pair of rows, later minus earlier
//! let d = pairs(PairOp::Sub, &m);
//! assert_eq!(d.data(), &[2.0, 20.0, 6.0, 60.0, 4.0, 40.0]);
//!
//! // Thin SVD of a tall matrix
//! let svd = m.svd().unwrap();
//! assert!(svd.reconstruct().approx_eq(&m, 1e-10, 1e-10));
//! ```
//!
//! ## Modules
//!
//! - [`flatmatrix`]: `FlatMatrix<T>` with shape inference, element-wise
//!   kernels (`direct_add` … and their `*_inplace` forms), `dot`,
//!   `transpose`, `diag` and the pairwise-row combinators (`pairs`,
//!   `pairs_map`, `pairs_with`). Allocating entry points return
//!   [`ShapeError`]; the `*_inplace` forms only check shapes in debug builds.
//!
//! - [`linalg`]: [`Svd`] and the buffer-reusing [`SvdWorkspace`]
//!   (`A = U · diag(S) · Vᵀ`, `S` descending), plus an SVD-based
//!   `least_squares`.
//!
//! - [`regress`]: [`TheilSen`], per-dimension median-of-slopes fits and
//!   median-across-dimensions prediction.
//!
//! - [`stats`]: `median`, `logsum`, `e_w_logsum`, `logsum_rows`,
//!   `mean_cov` and sorted-slice index lookup.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by everything numerical
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for the SVD kernel
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade: `trace`
//! for SVD convergence, `debug` for degenerate Theil-Sen pairs, `warn`
//! when an SVD gives up. Install any logger to see them.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm; `std::error::Error` impls |
//! | `libm`  | baseline | Pure-Rust software float fallback for `no_std` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod flatmatrix;
pub mod linalg;
pub mod regress;
pub mod stats;
pub mod traits;

pub use flatmatrix::{FlatMatrix, FlatMatrixf32, FlatMatrixf64, ShapeError};
pub use linalg::{LinalgError, Svd, SvdWorkspace};
pub use regress::TheilSen;
pub use stats::StatsError;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
