use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{LinalgError, Svd};
use crate::traits::{FloatScalar, Scalar};

use super::{FlatMatrix, ShapeError};

// ── Transpose ───────────────────────────────────────────────────────

/// Transpose of a rank-2 matrix.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::transpose;
///
/// let a = FlatMatrix::new(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let t = transpose(&a).unwrap();
/// assert_eq!(t.shape(), &[3, 2]);
/// assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn transpose<T: Scalar>(a: &FlatMatrix<T>) -> Result<FlatMatrix<T>, ShapeError> {
    a.require_rank(2)?;
    let (m, n) = (a.shape[0], a.shape[1]);
    let mut out = FlatMatrix::from_parts(vec![n, m], vec![T::zero(); m * n]);
    transpose_inplace(a, &mut out);
    Ok(out)
}

/// Transpose `a` (`m x n`) into the caller-owned `out` (`n x m`).
pub fn transpose_inplace<T: Scalar>(a: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
    debug_assert!(a.ndim() == 2 && out.ndim() == 2, "transpose requires rank 2");
    debug_assert_eq!(
        (out.shape[0], out.shape[1]),
        (a.shape[1], a.shape[0]),
        "transpose output has the wrong shape",
    );
    let (m, n) = (a.shape[0], a.shape[1]);
    for i in 0..m {
        for j in 0..n {
            out.data[j * m + i] = a.data[i * n + j];
        }
    }
}

// ── Diagonal ────────────────────────────────────────────────────────

/// Square matrix with `v` on the main diagonal and zeros elsewhere.
///
/// ```
/// use flatmat::flatmatrix::diag;
/// let d = diag(&[1.0_f64, 2.0]);
/// assert_eq!(d.data(), &[1.0, 0.0, 0.0, 2.0]);
/// ```
pub fn diag<T: Scalar>(v: &[T]) -> FlatMatrix<T> {
    let n = v.len();
    let mut data = vec![T::zero(); n * n];
    for (i, &x) in v.iter().enumerate() {
        data[i * n + i] = x;
    }
    FlatMatrix::from_parts(vec![n, n], data)
}

// ── Products ────────────────────────────────────────────────────────

/// Matrix-vector product `a · v`.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::dot_vec;
///
/// let m = FlatMatrix::new(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(dot_vec(&m, &[10.0, 100.0, 1000.0]).unwrap(), vec![3210.0, 6540.0]);
/// ```
pub fn dot_vec<T: Scalar>(a: &FlatMatrix<T>, v: &[T]) -> Result<Vec<T>, ShapeError> {
    a.require_rank(2)?;
    if a.shape[1] != v.len() {
        return Err(ShapeError::Inner {
            left: a.shape[1],
            right: v.len(),
        });
    }
    let mut out = vec![T::zero(); a.shape[0]];
    dot_vec_inplace(a, v, &mut out);
    Ok(out)
}

/// Matrix-vector product into the caller-owned `out` (length `a.nrow()`).
pub fn dot_vec_inplace<T: Scalar>(a: &FlatMatrix<T>, v: &[T], out: &mut [T]) {
    debug_assert_eq!(a.ndim(), 2, "dot requires a rank-2 matrix");
    debug_assert_eq!(a.shape[1], v.len(), "inner dimensions disagree");
    debug_assert_eq!(a.shape[0], out.len(), "output length mismatch");
    let n = v.len();
    for (i, o) in out.iter_mut().enumerate() {
        let mut sum = T::zero();
        for (&x, &y) in a.data[i * n..(i + 1) * n].iter().zip(v.iter()) {
            sum = sum + x * y;
        }
        *o = sum;
    }
}

/// Matrix-matrix product `a · b`.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::dot;
///
/// let a = FlatMatrix::new(&[2, 2], vec![1.0_f64, 2.0, 3.0, 4.0]).unwrap();
/// let b = FlatMatrix::new(&[2, 1], vec![1.0_f64, 1.0]).unwrap();
/// assert_eq!(dot(&a, &b).unwrap().data(), &[3.0, 7.0]);
/// ```
pub fn dot<T: Scalar>(a: &FlatMatrix<T>, b: &FlatMatrix<T>) -> Result<FlatMatrix<T>, ShapeError> {
    a.require_rank(2)?;
    b.require_rank(2)?;
    if a.shape[1] != b.shape[0] {
        return Err(ShapeError::Inner {
            left: a.shape[1],
            right: b.shape[0],
        });
    }
    let (m, p) = (a.shape[0], b.shape[1]);
    let mut out = FlatMatrix::from_parts(vec![m, p], vec![T::zero(); m * p]);
    dot_inplace(a, b, &mut out);
    Ok(out)
}

/// Matrix-matrix product into the caller-owned `out` (`a.nrow() x b.ncol()`).
pub fn dot_inplace<T: Scalar>(a: &FlatMatrix<T>, b: &FlatMatrix<T>, out: &mut FlatMatrix<T>) {
    debug_assert!(a.ndim() == 2 && b.ndim() == 2, "dot requires rank-2 matrices");
    debug_assert_eq!(a.shape[1], b.shape[0], "inner dimensions disagree");
    debug_assert_eq!(
        out.shape,
        [a.shape[0], b.shape[1]],
        "dot output has the wrong shape",
    );
    let m = a.shape[0];
    let n = a.shape[1];
    let p = b.shape[1];
    for o in out.data.iter_mut() {
        *o = T::zero();
    }
    for i in 0..m {
        for k in 0..n {
            let a_ik = a.data[i * n + k];
            for j in 0..p {
                out.data[i * p + j] = out.data[i * p + j] + a_ik * b.data[k * p + j];
            }
        }
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: Scalar> FlatMatrix<T> {
    /// Transpose of a rank-2 matrix. See [`transpose`].
    pub fn transpose(&self) -> Result<Self, ShapeError> {
        transpose(self)
    }

    /// Matrix product `self · rhs`. See [`dot`].
    pub fn dot(&self, rhs: &Self) -> Result<Self, ShapeError> {
        dot(self, rhs)
    }

    /// Matrix-vector product `self · v`. See [`dot_vec`].
    pub fn dot_vec(&self, v: &[T]) -> Result<Vec<T>, ShapeError> {
        dot_vec(self, v)
    }
}

impl<T: FloatScalar> FlatMatrix<T> {
    /// Thin singular value decomposition (requires `nrow >= ncol`).
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    ///
    /// let a = FlatMatrix::new(&[3, 2], vec![1.0_f64, 0.0, 0.0, 2.0, 0.0, 0.0]).unwrap();
    /// let svd = a.svd().unwrap();
    /// assert_eq!(svd.u().shape(), &[3, 2]);
    /// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-12);
    /// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn svd(&self) -> Result<Svd<T>, LinalgError> {
        Svd::new(self)
    }

    /// Singular values only, sorted descending.
    pub fn singular_values_only(&self) -> Result<Vec<T>, LinalgError> {
        Svd::singular_values_only(self)
    }
}
