pub mod aliases;
mod linalg;
mod ops;
mod pairwise;
mod util;

pub use aliases::*;
pub use linalg::{diag, dot, dot_inplace, dot_vec, dot_vec_inplace, transpose, transpose_inplace};
pub use ops::{
    direct_add, direct_add_inplace, direct_div, direct_div_inplace, direct_mul,
    direct_mul_inplace, direct_sub, direct_sub_inplace,
};
pub use pairwise::{pair_count, pair_indices, pairs, pairs_map, pairs_with, PairIndices, PairOp};

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Shape errors for construction and shape-checked operations.
///
/// Returned at API boundaries (constructors, allocating operations). The
/// `*_inplace` kernels only verify their shapes with debug assertions.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::ShapeError;
///
/// let err = FlatMatrix::new(&[0, 0], vec![1.0_f64; 4]).unwrap_err();
/// assert_eq!(err, ShapeError::MultipleUnknown);
///
/// let err = FlatMatrix::new(&[3, 0], vec![1.0_f64; 8]).unwrap_err();
/// assert_eq!(err, ShapeError::Indivisible { len: 8, known: 3 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A shape with no dimensions at all.
    NoDimensions,
    /// More than one dimension was left as `0` for inference.
    MultipleUnknown,
    /// A dimension was left as `0` with no data length to infer it from.
    UnknownWithoutData,
    /// The data length is not a multiple of the product of the known dimensions.
    Indivisible { len: usize, known: usize },
    /// Operand shapes must be equal.
    Mismatch { expected: Vec<usize>, got: Vec<usize> },
    /// The operation requires a matrix of a specific rank.
    Rank { expected: usize, got: usize },
    /// Inner dimensions of a product disagree.
    Inner { left: usize, right: usize },
    /// The product of the dimensions does not fit in `usize`.
    Overflow,
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::NoDimensions => write!(f, "shape must have at least one dimension"),
            ShapeError::MultipleUnknown => {
                write!(f, "at most one dimension may be inferred (given as 0)")
            }
            ShapeError::UnknownWithoutData => {
                write!(f, "cannot infer a dimension without a data length")
            }
            ShapeError::Indivisible { len, known } => write!(
                f,
                "data length {} is not divisible by the known dimensions ({})",
                len, known
            ),
            ShapeError::Mismatch { expected, got } => {
                write!(f, "shape mismatch: expected {:?}, got {:?}", expected, got)
            }
            ShapeError::Rank { expected, got } => {
                write!(f, "expected a rank-{} matrix, got rank {}", expected, got)
            }
            ShapeError::Inner { left, right } => {
                write!(f, "inner dimensions disagree: {} vs {}", left, right)
            }
            ShapeError::Overflow => write!(f, "shape size overflows usize"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShapeError {}

/// Resolve a shape against a data length.
///
/// At most one entry may be `0`; it is replaced by `len / product(others)`.
pub(crate) fn complete_shape(shape: &[usize], len: usize) -> Result<Vec<usize>, ShapeError> {
    if shape.is_empty() {
        return Err(ShapeError::NoDimensions);
    }
    let mut unknown = None;
    let mut known = 1usize;
    for (i, &d) in shape.iter().enumerate() {
        if d == 0 {
            if unknown.is_some() {
                return Err(ShapeError::MultipleUnknown);
            }
            unknown = Some(i);
        } else {
            known = known.checked_mul(d).ok_or(ShapeError::Overflow)?;
        }
    }

    let mut out = shape.to_vec();
    match unknown {
        Some(i) => {
            if len % known != 0 {
                return Err(ShapeError::Indivisible { len, known });
            }
            out[i] = len / known;
        }
        None => {
            if known != len {
                return Err(ShapeError::Mismatch {
                    expected: shape.to_vec(),
                    got: vec![len],
                });
            }
        }
    }
    Ok(out)
}

/// Dense matrix of any rank stored as a shape plus one contiguous buffer.
///
/// Row-major storage: for a rank-2 matrix, element `(i, j)` lives at
/// `data[i * ncol + j]`. For higher ranks the trailing dimensions are
/// flattened into each "row" of the leading dimension.
///
/// `data.len() == product(shape)` always holds.
///
/// # Examples
///
/// ```
/// use flatmat::FlatMatrix;
///
/// // One dimension may be given as 0 and is inferred from the data length.
/// let a = FlatMatrix::new(&[2, 0], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(a.shape(), &[2, 3]);
/// assert_eq!(a[(1, 0)], 4.0);
/// assert_eq!(a.row(0), &[1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlatMatrix<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> FlatMatrix<T> {
    /// Create a matrix from a shape and an owned buffer.
    ///
    /// At most one entry of `shape` may be `0`; it is inferred from
    /// `data.len()`. Without a `0` entry the product of `shape` must equal
    /// `data.len()`.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::new(&[0, 4], vec![0.0_f64; 8]).unwrap();
    /// assert_eq!(m.shape(), &[2, 4]);
    /// ```
    pub fn new(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let shape = complete_shape(shape, data.len())?;
        Ok(Self { shape, data })
    }

    /// Create a rank-1 matrix (a vector) from an owned buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element of an
    /// `nrow x ncol` matrix, in row-major order.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
    /// assert_eq!(m.data(), &[0.0, 1.0, 2.0, 3.0]);
    /// ```
    pub fn from_fn(nrow: usize, ncol: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrow * ncol);
        for i in 0..nrow {
            for j in 0..ncol {
                data.push(f(i, j));
            }
        }
        Self {
            shape: vec![nrow, ncol],
            data,
        }
    }

    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }
}

impl<T: Copy> FlatMatrix<T> {
    /// Overwrite with the shape and contents of `src`, reusing this
    /// matrix's allocations.
    pub(crate) fn assign(&mut self, src: &FlatMatrix<T>) {
        self.shape.clear();
        self.shape.extend_from_slice(&src.shape);
        self.data.clear();
        self.data.extend_from_slice(&src.data);
    }

    /// Reset to `shape` with every element equal to `value`, reusing
    /// this matrix's allocations.
    pub(crate) fn reset(&mut self, shape: &[usize], value: T) {
        self.shape.clear();
        self.shape.extend_from_slice(shape);
        self.data.clear();
        self.data.resize(shape.iter().product(), value);
    }
}

impl<T: Clone> FlatMatrix<T> {
    /// Create a matrix with every element set to `value`.
    ///
    /// Every dimension must be given; a `0` entry has no data length to be
    /// inferred from and is rejected.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::filled(&[2, 3], 7.0_f64).unwrap();
    /// assert_eq!(m.len(), 6);
    /// assert!(FlatMatrix::filled(&[2, 0], 7.0_f64).is_err());
    /// ```
    pub fn filled(shape: &[usize], value: T) -> Result<Self, ShapeError> {
        if shape.is_empty() {
            return Err(ShapeError::NoDimensions);
        }
        if shape.contains(&0) {
            return Err(ShapeError::UnknownWithoutData);
        }
        let len = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or(ShapeError::Overflow)?;
        Ok(Self {
            shape: shape.to_vec(),
            data: vec![value; len],
        })
    }

    /// Build a rank-2 matrix from equally long rows.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::from_rows(&[&[1.0_f64, 2.0][..], &[3.0, 4.0][..]]).unwrap();
    /// assert_eq!(m.shape(), &[2, 2]);
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows(rows: &[&[T]]) -> Result<Self, ShapeError> {
        let ncol = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * ncol);
        for r in rows {
            if r.len() != ncol {
                return Err(ShapeError::Mismatch {
                    expected: vec![ncol],
                    got: vec![r.len()],
                });
            }
            data.extend_from_slice(r);
        }
        Ok(Self {
            shape: vec![rows.len(), ncol],
            data,
        })
    }
}

impl<T: Scalar> FlatMatrix<T> {
    /// Create a zero-filled matrix.
    pub fn zeros(shape: &[usize]) -> Result<Self, ShapeError> {
        Self::filled(shape, T::zero())
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let id = FlatMatrix::<f64>::eye(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self {
            shape: vec![n, n],
            data: vec![T::zero(); n * n],
        };
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }
}

// ── Shape accessors ─────────────────────────────────────────────────

impl<T> FlatMatrix<T> {
    /// The (completed) shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Size of the leading dimension.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has rank < 2.
    #[inline]
    pub fn nrow(&self) -> usize {
        assert!(self.ndim() >= 2, "nrow requires rank >= 2, got {}", self.ndim());
        self.shape[0]
    }

    /// Size of the second dimension.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has rank < 2.
    #[inline]
    pub fn ncol(&self) -> usize {
        assert!(self.ndim() >= 2, "ncol requires rank >= 2, got {}", self.ndim());
        self.shape[1]
    }

    /// Number of elements in one slice of the leading dimension
    /// (the product of all trailing dimensions; 1 for a vector).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The flat buffer, mutably. The shape cannot change through it.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return its buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Change the shape without touching the data. Follows the same
    /// completion rule as [`FlatMatrix::new`].
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let mut m = FlatMatrix::from_vec(vec![1.0_f64; 6]);
    /// m.reshape(&[0, 2]).unwrap();
    /// assert_eq!(m.shape(), &[3, 2]);
    /// ```
    pub fn reshape(&mut self, shape: &[usize]) -> Result<(), ShapeError> {
        self.shape = complete_shape(shape, self.data.len())?;
        Ok(())
    }

    /// Whether `other` has the same shape.
    #[inline]
    pub fn same_shape<U>(&self, other: &FlatMatrix<U>) -> bool {
        self.shape == other.shape
    }

    /// Return a `Rank` error unless the matrix has exactly `rank` dimensions.
    pub(crate) fn require_rank(&self, rank: usize) -> Result<(), ShapeError> {
        if self.ndim() != rank {
            return Err(ShapeError::Rank {
                expected: rank,
                got: self.ndim(),
            });
        }
        Ok(())
    }
}

// ── Row access ──────────────────────────────────────────────────────

impl<T> FlatMatrix<T> {
    /// Row `i` of the leading dimension as a slice of `row_len()` elements.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        let w = self.row_len();
        &self.data[i * w..(i + 1) * w]
    }

    /// Row `i` of the leading dimension as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let w = self.row_len();
        &mut self.data[i * w..(i + 1) * w]
    }

    /// Iterate over the rows of the leading dimension.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::new(&[3, 0], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let sums: Vec<f64> = m.rows().map(|r| r.iter().sum()).collect();
    /// assert_eq!(sums, vec![3.0, 7.0, 11.0]);
    /// ```
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.shape[0]).map(move |i| self.row(i))
    }
}

impl<T: Copy> FlatMatrix<T> {
    /// Copy of column `j` of a rank-2 matrix.
    ///
    /// ```
    /// use flatmat::FlatMatrix;
    /// let m = FlatMatrix::new(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.col(1), vec![2.0, 5.0]);
    /// ```
    pub fn col(&self, j: usize) -> Vec<T> {
        let w = self.row_len();
        assert!(j < w, "column {} out of range for row length {}", j, w);
        self.data.iter().skip(j).step_by(w).copied().collect()
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for FlatMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.shape[0]
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.row_len()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.row_len() + col]
    }
}

impl<T> MatrixMut<T> for FlatMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        let w = self.row_len();
        &mut self.data[row * w + col]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for FlatMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.row_len() + col]
    }
}

impl<T> IndexMut<(usize, usize)> for FlatMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let w = self.row_len();
        &mut self.data[row * w + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 1.5 - 2.0).collect()
    }

    #[test]
    fn infers_leading_dimension() {
        let a = FlatMatrix::new(&[0, 4], seq(8)).unwrap();
        let b = FlatMatrix::new(&[2, 4], seq(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn infers_trailing_dimension() {
        let a = FlatMatrix::new(&[2, 0], seq(8)).unwrap();
        let b = FlatMatrix::new(&[2, 4], seq(8)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nrow(), 2);
        assert_eq!(a.ncol(), 4);
    }

    #[test]
    fn infers_middle_dimension_rank3() {
        let a = FlatMatrix::new(&[2, 0, 3], seq(12)).unwrap();
        assert_eq!(a.shape(), &[2, 2, 3]);
        assert_eq!(a.row_len(), 6);
    }

    #[test]
    fn rejects_two_unknowns() {
        assert_eq!(
            FlatMatrix::new(&[0, 0], seq(8)).unwrap_err(),
            ShapeError::MultipleUnknown
        );
    }

    #[test]
    fn rejects_indivisible() {
        assert_eq!(
            FlatMatrix::new(&[3, 0], seq(8)).unwrap_err(),
            ShapeError::Indivisible { len: 8, known: 3 }
        );
    }

    #[test]
    fn rejects_wrong_total() {
        assert!(matches!(
            FlatMatrix::new(&[3, 3], seq(8)),
            Err(ShapeError::Mismatch { .. })
        ));
    }

    #[test]
    fn rejects_empty_shape() {
        assert_eq!(
            FlatMatrix::new(&[], seq(1)).unwrap_err(),
            ShapeError::NoDimensions
        );
    }

    #[test]
    fn filled_requires_full_shape() {
        let m = FlatMatrix::filled(&[2, 3], 1.5_f64).unwrap();
        assert!(m.data().iter().all(|&x| x == 1.5));
        assert_eq!(
            FlatMatrix::filled(&[0, 3], 1.5_f64).unwrap_err(),
            ShapeError::UnknownWithoutData
        );
    }

    #[test]
    fn clone_is_deep() {
        let a = FlatMatrix::new(&[2, 2], seq(4)).unwrap();
        let mut b = a.clone();
        b[(0, 0)] = 100.0;
        assert_ne!(a, b);
        assert_eq!(a[(0, 0)], -2.0);
    }

    #[test]
    fn equality_checks_shape() {
        let a = FlatMatrix::new(&[2, 3], seq(6)).unwrap();
        let b = FlatMatrix::new(&[3, 2], seq(6)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rows_and_cols() {
        let m = FlatMatrix::new(&[3, 2], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.row(2), &[5.0, 6.0]);
        assert_eq!(m.col(0), vec![1.0, 3.0, 5.0]);
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn from_rows_ragged() {
        let r = FlatMatrix::from_rows(&[&[1.0_f64, 2.0][..], &[3.0][..]]);
        assert!(r.is_err());
    }

    #[test]
    #[should_panic(expected = "nrow requires rank >= 2")]
    fn nrow_on_vector_panics() {
        let v = FlatMatrix::from_vec(vec![1.0_f64, 2.0]);
        let _ = v.nrow();
    }

    #[test]
    fn reshape_keeps_data() {
        let mut m = FlatMatrix::new(&[2, 3], seq(6)).unwrap();
        m.reshape(&[3, 0]).unwrap();
        assert_eq!(m.shape(), &[3, 2]);
        assert_eq!(m.data(), seq(6).as_slice());
        assert!(m.reshape(&[4, 0]).is_err());
    }

    #[test]
    fn oversized_shape_is_an_error() {
        let big = 1usize << 63;
        assert_eq!(
            FlatMatrix::<f64>::new(&[big, 2], vec![]).unwrap_err(),
            ShapeError::Overflow
        );
        assert_eq!(
            FlatMatrix::<f64>::new(&[0, big, 2], vec![]).unwrap_err(),
            ShapeError::Overflow
        );
        assert_eq!(
            FlatMatrix::filled(&[big, 4], 1.0_f64).unwrap_err(),
            ShapeError::Overflow
        );
        assert_eq!(
            FlatMatrix::<f64>::zeros(&[usize::MAX, usize::MAX]).unwrap_err(),
            ShapeError::Overflow
        );
    }

    #[test]
    fn rows_of_empty_trailing_dimension() {
        let m = FlatMatrix::<f64>::new(&[3, 0], vec![]).unwrap();
        assert_eq!(m.shape(), &[3, 0]);
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(m.rows().len(), 3);
        assert!(rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn matrix_mut_swap_cols() {
        let mut m = FlatMatrix::new(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        m.swap_cols(0, 1);
        assert_eq!(m.data(), &[2.0, 1.0, 4.0, 3.0]);
    }
}
