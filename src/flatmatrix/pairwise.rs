//! Pairwise combinations along the leading dimension.
//!
//! For an input of shape `[n, ...rest]` the output has shape
//! `[n*(n-1)/2, ...rest]`. Pairs are enumerated with the earlier index in
//! the outer loop and the later index in the inner loop, and every operator
//! receives `(later, earlier)`:
//!
//! ```text
//! (0,1) (0,2) ... (0,n-1) (1,2) ... (n-2,n-1)
//! ```
//!
//! With [`PairOp::Sub`] this yields "later row minus earlier row".

use alloc::vec;
use alloc::vec::Vec;

use crate::traits::Scalar;

use super::FlatMatrix;

/// Built-in element-wise operators for [`pairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl PairOp {
    /// Apply the operator as `later <op> earlier`.
    #[inline]
    pub fn apply<T: Scalar>(self, later: T, earlier: T) -> T {
        match self {
            PairOp::Add => later + earlier,
            PairOp::Sub => later - earlier,
            PairOp::Mul => later * earlier,
            PairOp::Div => later / earlier,
        }
    }
}

/// Number of unordered pairs among `n` items.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Iterator over `(earlier, later)` index pairs in output order.
///
/// ```
/// use flatmat::flatmatrix::pair_indices;
/// let p: Vec<_> = pair_indices(3).collect();
/// assert_eq!(p, vec![(0, 1), (0, 2), (1, 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct PairIndices {
    n: usize,
    i: usize,
    j: usize,
}

/// Pair indices for `n` rows; see [`PairIndices`].
pub fn pair_indices(n: usize) -> PairIndices {
    PairIndices { n, i: 0, j: 1 }
}

impl Iterator for PairIndices {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
            if self.j >= self.n {
                return None;
            }
        }
        let item = (self.i, self.j);
        self.j += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.i + 1 >= self.n {
            0
        } else {
            let rows_after = pair_count(self.n - self.i - 1);
            rows_after + self.n.saturating_sub(self.j)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PairIndices {}

fn pair_shape<T>(m: &FlatMatrix<T>) -> Vec<usize> {
    let mut shape = m.shape.clone();
    shape[0] = pair_count(shape[0]);
    shape
}

/// Pairwise combination with a built-in operator.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::{pairs, PairOp};
///
/// let m = FlatMatrix::new(&[4, 1], vec![1.0_f64, 3.0, 7.0, 13.0]).unwrap();
/// let d = pairs(PairOp::Sub, &m);
/// assert_eq!(d.shape(), &[6, 1]);
/// assert_eq!(d.data(), &[2.0, 6.0, 12.0, 4.0, 10.0, 6.0]);
/// ```
pub fn pairs<T: Scalar>(op: PairOp, m: &FlatMatrix<T>) -> FlatMatrix<T> {
    pairs_map(m, |later, earlier| op.apply(later, earlier))
}

/// Pairwise combination with an element-wise function `f(later, earlier)`
/// applied independently to every element of the trailing sub-vectors.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::pairs_map;
///
/// let m = FlatMatrix::from_vec(vec![1.0_f64, 2.0, 4.0]);
/// let sq = pairs_map(&m, |a, b| (a - b) * (a - b));
/// assert_eq!(sq.data(), &[1.0, 9.0, 4.0]);
/// ```
pub fn pairs_map<T: Scalar>(m: &FlatMatrix<T>, f: impl Fn(T, T) -> T) -> FlatMatrix<T> {
    let n = m.shape[0];
    let w = m.row_len();
    let mut data = Vec::with_capacity(pair_count(n) * w);

    if w == 1 {
        // Scalar rows: skip the sub-vector slicing entirely.
        for i in 0..n {
            let earlier = m.data[i];
            for &later in &m.data[i + 1..n] {
                data.push(f(later, earlier));
            }
        }
    } else {
        for (i, j) in pair_indices(n) {
            let earlier = m.row(i);
            let later = m.row(j);
            data.extend(later.iter().zip(earlier.iter()).map(|(&a, &b)| f(a, b)));
        }
    }

    FlatMatrix::from_parts(pair_shape(m), data)
}

/// Pairwise combination with a vector function
/// `f(later_row, earlier_row, out_row)`.
///
/// Each `out_row` has the same length as the input rows and starts out
/// zeroed.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::flatmatrix::pairs_with;
///
/// let m = FlatMatrix::new(&[3, 2], vec![0.0_f64, 0.0, 3.0, 4.0, 6.0, 8.0]).unwrap();
/// // Euclidean distance written into the first slot of each pair row.
/// let d = pairs_with(&m, |later, earlier, out| {
///     let dx = later[0] - earlier[0];
///     let dy = later[1] - earlier[1];
///     out[0] = (dx * dx + dy * dy).sqrt();
/// });
/// assert_eq!(d.col(0), vec![5.0, 10.0, 5.0]);
/// ```
pub fn pairs_with<T: Scalar>(
    m: &FlatMatrix<T>,
    mut f: impl FnMut(&[T], &[T], &mut [T]),
) -> FlatMatrix<T> {
    let n = m.shape[0];
    let w = m.row_len();
    let mut data = vec![T::zero(); pair_count(n) * w];

    if w > 0 {
        for ((i, j), out) in pair_indices(n).zip(data.chunks_mut(w)) {
            f(m.row(j), m.row(i), out);
        }
    }

    FlatMatrix::from_parts(pair_shape(m), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtraction_order_is_later_minus_earlier() {
        let m = FlatMatrix::new(&[4, 1], vec![1.0_f64, 3.0, 7.0, 13.0]).unwrap();
        let d = pairs(PairOp::Sub, &m);
        assert_eq!(
            d.data(),
            &[3.0 - 1.0, 7.0 - 1.0, 13.0 - 1.0, 7.0 - 3.0, 13.0 - 3.0, 13.0 - 7.0]
        );
    }

    #[test]
    fn vector_rows() {
        let m = FlatMatrix::new(&[3, 2], vec![1.0_f64, 10.0, 2.0, 20.0, 4.0, 40.0]).unwrap();
        let d = pairs(PairOp::Sub, &m);
        assert_eq!(d.shape(), &[3, 2]);
        assert_eq!(d.data(), &[1.0, 10.0, 3.0, 30.0, 2.0, 20.0]);
    }

    #[test]
    fn division_uses_later_over_earlier() {
        let m = FlatMatrix::from_vec(vec![2.0_f64, 8.0]);
        assert_eq!(pairs(PairOp::Div, &m).data(), &[4.0]);
    }

    #[test]
    fn scalar_fast_path_matches_vector_path() {
        let data = vec![0.5_f64, -1.0, 3.25, 8.0, 2.0];
        let rank1 = FlatMatrix::from_vec(data.clone());
        let fast = pairs(PairOp::Mul, &rank1);
        let general = pairs_with(&rank1, |l, e, o| o[0] = PairOp::Mul.apply(l[0], e[0]));
        assert_eq!(fast.data(), general.data());
        assert_eq!(fast.shape(), &[10]);
    }

    #[test]
    fn rank3_keeps_trailing_shape() {
        let m = FlatMatrix::new(&[3, 2, 2], (0..12).map(|x| x as f64).collect()).unwrap();
        let d = pairs(PairOp::Add, &m);
        assert_eq!(d.shape(), &[3, 2, 2]);
        // rows 0 and 1 summed
        assert_eq!(d.row(0), &[4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn fewer_than_two_rows() {
        let one = FlatMatrix::new(&[1, 3], vec![1.0_f64, 2.0, 3.0]).unwrap();
        let d = pairs(PairOp::Sub, &one);
        assert_eq!(d.shape(), &[0, 3]);
        assert!(d.is_empty());
    }

    #[test]
    fn indices_cover_every_pair_once() {
        let n = 7;
        let idx: Vec<_> = pair_indices(n).collect();
        assert_eq!(idx.len(), pair_count(n));
        assert_eq!(pair_indices(n).len(), pair_count(n));
        for (i, j) in &idx {
            assert!(i < j && *j < n);
        }
        let mut sorted = idx.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), idx.len());
    }

    #[test]
    fn indices_empty() {
        assert_eq!(pair_indices(0).count(), 0);
        assert_eq!(pair_indices(1).count(), 0);
        assert_eq!(pair_count(0), 0);
    }
}
