use alloc::vec;
use alloc::vec::Vec;

use crate::flatmatrix::FlatMatrix;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut};

/// QR sweeps allowed per singular value before giving up.
pub const MAX_SWEEPS: usize = 50;

/// `sqrt(a² + b²)` without destructive overflow or underflow.
///
/// The larger magnitude is factored out before squaring.
///
/// ```
/// use flatmat::linalg::pythag;
/// assert_eq!(pythag(3.0_f64, 4.0), 5.0);
/// assert_eq!(pythag(1e200_f64, 0.0), 1e200);
/// assert!((pythag(3e200_f64, 4e200) - 5e200).abs() < 1e186);
/// ```
#[inline]
pub fn pythag<T: FloatScalar>(a: T, b: T) -> T {
    let a = a.abs();
    let b = b.abs();
    if a > b {
        let r = b / a;
        a * (T::one() + r * r).sqrt()
    } else if b == T::zero() {
        a
    } else {
        let r = a / b;
        b * (T::one() + r * r).sqrt()
    }
}

/// Plane rotation of columns `a` and `b`:
/// `(x, y) -> (x·c + y·s, y·c - x·s)`.
#[inline]
fn rotate_cols<T: FloatScalar>(m: &mut impl MatrixMut<T>, a: usize, b: usize, c: T, s: T) {
    for row in 0..m.nrows() {
        let x = *m.get(row, a);
        let y = *m.get(row, b);
        *m.get_mut(row, a) = x * c + y * s;
        *m.get_mut(row, b) = y * c - x * s;
    }
}

// ── Golub-Reinsch ───────────────────────────────────────────────────

/// One-sided Golub-Reinsch SVD of an M×N matrix (M ≥ N ≥ 1).
///
/// On entry `u` holds A. On return:
/// - `u` holds the left singular vectors (M×N, orthonormal columns)
/// - `q` holds the singular values, sorted descending
/// - `v` (N×N) holds the right singular vectors as columns
/// - `e` is scratch (length N)
///
/// so that `A = U · diag(q) · Vᵀ`.
pub(crate) fn golub_reinsch<T: FloatScalar>(
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    q: &mut [T],
    e: &mut [T],
) -> Result<(), LinalgError> {
    let m = u.nrows();
    let n = u.ncols();
    debug_assert!(m >= n && n >= 1);
    debug_assert!(v.nrows() == n && v.ncols() == n);
    debug_assert!(q.len() == n && e.len() == n);

    let zero = T::zero();
    let one = T::one();
    let two = one + one;
    let eps = T::epsilon();
    // Column/row norms at or below this are treated as already reduced.
    let tolerance = (T::lit(1e-64) / eps).max(T::min_positive_value() / eps);

    // ── Householder reduction to bidiagonal form ──
    let mut g = zero;
    let mut anorm = zero;
    let mut l = 0;
    for i in 0..n {
        e[i] = g;
        l = i + 1;

        // Left reflection: zero u[i+1.., i]
        let mut s = zero;
        for j in i..m {
            let x = *u.get(j, i);
            s = s + x * x;
        }
        if s <= tolerance {
            g = zero;
        } else {
            let f = *u.get(i, i);
            g = if f < zero { s.sqrt() } else { -s.sqrt() };
            let h = f * g - s;
            *u.get_mut(i, i) = f - g;
            for j in l..n {
                let mut s = zero;
                for k in i..m {
                    s = s + *u.get(k, i) * *u.get(k, j);
                }
                let f = s / h;
                for k in i..m {
                    let x = *u.get(k, i);
                    *u.get_mut(k, j) = *u.get(k, j) + f * x;
                }
            }
        }
        q[i] = g;

        // Right reflection: zero u[i, i+2..]
        let mut s = zero;
        for j in l..n {
            let x = *u.get(i, j);
            s = s + x * x;
        }
        if s <= tolerance {
            g = zero;
        } else {
            let f = *u.get(i, i + 1);
            g = if f < zero { s.sqrt() } else { -s.sqrt() };
            let h = f * g - s;
            *u.get_mut(i, i + 1) = f - g;
            for j in l..n {
                e[j] = *u.get(i, j) / h;
            }
            for j in l..m {
                let mut s = zero;
                for k in l..n {
                    s = s + *u.get(j, k) * *u.get(i, k);
                }
                for k in l..n {
                    *u.get_mut(j, k) = *u.get(j, k) + s * e[k];
                }
            }
        }

        let y = q[i].abs() + e[i].abs();
        if y > anorm {
            anorm = y;
        }
    }

    // ── Accumulate right-hand transforms into V ──
    for i in (0..n).rev() {
        if i + 1 < n {
            if g != zero {
                let h = g * *u.get(i, i + 1);
                for j in l..n {
                    *v.get_mut(j, i) = *u.get(i, j) / h;
                }
                for j in l..n {
                    let mut s = zero;
                    for k in l..n {
                        s = s + *u.get(i, k) * *v.get(k, j);
                    }
                    for k in l..n {
                        let x = *v.get(k, i);
                        *v.get_mut(k, j) = *v.get(k, j) + s * x;
                    }
                }
            }
            for j in l..n {
                *v.get_mut(i, j) = zero;
                *v.get_mut(j, i) = zero;
            }
        }
        *v.get_mut(i, i) = one;
        g = e[i];
        l = i;
    }

    // ── Accumulate left-hand transforms into U ──
    for i in (0..n).rev() {
        let l = i + 1;
        let g = q[i];
        for j in l..n {
            *u.get_mut(i, j) = zero;
        }
        if g != zero {
            let h = *u.get(i, i) * g;
            for j in l..n {
                let mut s = zero;
                for k in l..m {
                    s = s + *u.get(k, i) * *u.get(k, j);
                }
                let f = s / h;
                for k in i..m {
                    let x = *u.get(k, i);
                    *u.get_mut(k, j) = *u.get(k, j) + f * x;
                }
            }
            for j in i..m {
                *u.get_mut(j, i) = *u.get(j, i) / g;
            }
        } else {
            for j in i..m {
                *u.get_mut(j, i) = zero;
            }
        }
        *u.get_mut(i, i) = *u.get(i, i) + one;
    }

    // ── Diagonalize the bidiagonal form ──
    let prec = eps * anorm;
    for k in (0..n).rev() {
        let mut sweep = 0;
        loop {
            // Split point: e[l] negligible (converged block) or q[l-1]
            // negligible (e[l] must be cancelled first). e[0] is always 0.
            let mut l = k;
            let mut split = false;
            loop {
                if l == 0 || e[l].abs() <= prec {
                    split = true;
                    break;
                }
                if q[l - 1].abs() <= prec {
                    break;
                }
                l -= 1;
            }

            if !split {
                // Cancel e[l] by rotations against the zero q[l-1]
                let l1 = l - 1;
                let mut c = zero;
                let mut s = one;
                for i in l..=k {
                    let f = s * e[i];
                    e[i] = c * e[i];
                    if f.abs() <= prec {
                        break;
                    }
                    let g = q[i];
                    let h = pythag(f, g);
                    q[i] = h;
                    c = g / h;
                    s = -f / h;
                    rotate_cols(u, l1, i, c, s);
                }
            }

            let z = q[k];
            if l == k {
                if z < zero {
                    q[k] = -z;
                    for j in 0..n {
                        *v.get_mut(j, k) = -*v.get(j, k);
                    }
                }
                log::trace!("svd: singular value {} converged after {} sweeps", k, sweep);
                break;
            }

            if sweep + 1 >= MAX_SWEEPS {
                log::warn!(
                    "svd: singular value {} did not converge after {} sweeps",
                    k,
                    MAX_SWEEPS
                );
                return Err(LinalgError::ConvergenceFailure {
                    index: k,
                    sweeps: MAX_SWEEPS,
                });
            }
            sweep += 1;

            // Shift from the trailing 2×2 minor
            let mut x = q[l];
            let y = q[k - 1];
            let g = e[k - 1];
            let h = e[k];
            let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (two * h * y);
            let g = pythag(f, one);
            let fg = if f < zero { f - g } else { f + g };
            f = ((x - z) * (x + z) + h * (y / fg - h)) / x;

            // Implicit QR sweep over l..=k
            let mut c = one;
            let mut s = one;
            for i in (l + 1)..=k {
                let mut g = e[i];
                let mut y = q[i];
                let mut h = s * g;
                g = c * g;
                let mut z = pythag(f, h);
                e[i - 1] = z;
                c = f / z;
                s = h / z;
                f = x * c + g * s;
                g = g * c - x * s;
                h = y * s;
                y = y * c;
                rotate_cols(v, i - 1, i, c, s);

                z = pythag(f, h);
                q[i - 1] = z;
                if z != zero {
                    c = f / z;
                    s = h / z;
                }
                f = c * g + s * y;
                x = c * y - s * g;
                rotate_cols(u, i - 1, i, c, s);
            }
            e[l] = zero;
            e[k] = f;
            q[k] = x;
        }
    }

    // ── Clamp and sort ──
    for qi in q.iter_mut() {
        if *qi < prec {
            *qi = zero;
        }
    }
    for i in 1..n {
        let mut j = i;
        while j > 0 && q[j - 1] < q[j] {
            q.swap(j - 1, j);
            u.swap_cols(j - 1, j);
            v.swap_cols(j - 1, j);
            j -= 1;
        }
    }

    Ok(())
}

// ── Workspace ───────────────────────────────────────────────────────

/// Reusable buffers for repeated SVDs.
///
/// Each [`decompose`](SvdWorkspace::decompose) overwrites the previous
/// result and only grows the allocations when the input is larger than
/// anything seen before. After an error the buffer contents are
/// unspecified.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::linalg::SvdWorkspace;
///
/// let mut ws = SvdWorkspace::new();
/// for scale in [1.0_f64, 2.0, 3.0] {
///     let a = FlatMatrix::new(&[2, 2], vec![scale, 0.0, 0.0, 2.0 * scale]).unwrap();
///     ws.decompose(&a).unwrap();
///     assert!((ws.singular_values()[0] - 2.0 * scale).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SvdWorkspace<T> {
    u: FlatMatrix<T>,
    v: FlatMatrix<T>,
    q: Vec<T>,
    e: Vec<T>,
}

impl<T: FloatScalar> Default for SvdWorkspace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatScalar> SvdWorkspace<T> {
    /// Empty workspace; buffers are sized on first use.
    pub fn new() -> Self {
        Self {
            u: FlatMatrix::from_parts(vec![0, 0], Vec::new()),
            v: FlatMatrix::from_parts(vec![0, 0], Vec::new()),
            q: Vec::new(),
            e: Vec::new(),
        }
    }

    /// Decompose `a` (rank 2, `nrow >= ncol`) into the workspace buffers.
    pub fn decompose(&mut self, a: &FlatMatrix<T>) -> Result<(), LinalgError> {
        a.require_rank(2)?;
        let (m, n) = (a.shape()[0], a.shape()[1]);
        if m < n {
            return Err(LinalgError::Dimension { nrows: m, ncols: n });
        }

        self.u.assign(a);
        self.v.reset(&[n, n], T::zero());
        self.q.clear();
        self.q.resize(n, T::zero());
        self.e.clear();
        self.e.resize(n, T::zero());

        if n == 0 {
            return Ok(());
        }
        golub_reinsch(&mut self.u, &mut self.v, &mut self.q, &mut self.e)
    }

    /// Left singular vectors (M×N) from the last decomposition.
    #[inline]
    pub fn u(&self) -> &FlatMatrix<T> {
        &self.u
    }

    /// Singular values from the last decomposition, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.q
    }

    /// Right singular vectors (N×N, as columns) from the last decomposition.
    #[inline]
    pub fn v(&self) -> &FlatMatrix<T> {
        &self.v
    }

    /// Move the last result out, leaving the workspace empty.
    pub fn into_svd(self) -> Svd<T> {
        Svd {
            u: self.u,
            s: self.q,
            v: self.v,
        }
    }
}

// ── Svd ─────────────────────────────────────────────────────────────

/// Thin singular value decomposition of an M×N matrix (M ≥ N).
///
/// `A = U · diag(S) · Vᵀ` with U M×N, S of length N sorted descending
/// and non-negative, and V N×N. Columns of U and V are orthonormal.
///
/// ```
/// use flatmat::FlatMatrix;
/// use flatmat::linalg::Svd;
///
/// let a = FlatMatrix::new(&[2, 2], vec![3.0_f64, 2.0, 2.0, 3.0]).unwrap();
/// let svd = Svd::new(&a).unwrap();
/// let s = svd.singular_values();
/// assert!((s[0] - 5.0).abs() < 1e-12);
/// assert!((s[1] - 1.0).abs() < 1e-12);
/// assert!(svd.reconstruct().approx_eq(&a, 0.0, 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T> {
    u: FlatMatrix<T>,
    s: Vec<T>,
    v: FlatMatrix<T>,
}

impl<T: FloatScalar> Svd<T> {
    /// Decompose `a`.
    ///
    /// Fails with [`LinalgError::Shape`] unless `a` has rank 2, with
    /// [`LinalgError::Dimension`] when it has fewer rows than columns, and
    /// with [`LinalgError::ConvergenceFailure`] when the QR sweeps give up.
    pub fn new(a: &FlatMatrix<T>) -> Result<Self, LinalgError> {
        let mut ws = SvdWorkspace::new();
        ws.decompose(a)?;
        Ok(ws.into_svd())
    }

    /// Singular values only, sorted descending.
    pub fn singular_values_only(a: &FlatMatrix<T>) -> Result<Vec<T>, LinalgError> {
        Self::new(a).map(|svd| svd.s)
    }

    /// Left singular vectors U (M×N).
    #[inline]
    pub fn u(&self) -> &FlatMatrix<T> {
        &self.u
    }

    /// Singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.s
    }

    /// Right singular vectors V (N×N). Columns are the vectors; this is
    /// not Vᵀ.
    #[inline]
    pub fn v(&self) -> &FlatMatrix<T> {
        &self.v
    }

    /// Split into `(U, S, V)`.
    pub fn into_parts(self) -> (FlatMatrix<T>, Vec<T>, FlatMatrix<T>) {
        (self.u, self.s, self.v)
    }

    /// Numerical rank: number of singular values above `tol`.
    pub fn rank(&self, tol: T) -> usize {
        self.s.iter().filter(|&&s| s > tol).count()
    }

    /// Condition number σ_max / σ_min.
    ///
    /// Infinity when the smallest singular value is zero, one for an
    /// empty decomposition.
    pub fn condition_number(&self) -> T {
        match (self.s.first(), self.s.last()) {
            (Some(&s_max), Some(&s_min)) => {
                if s_min == T::zero() {
                    T::infinity()
                } else {
                    s_max / s_min
                }
            }
            _ => T::one(),
        }
    }

    /// Rebuild `U · diag(S) · Vᵀ`.
    pub fn reconstruct(&self) -> FlatMatrix<T> {
        let m = self.u.shape()[0];
        let n = self.s.len();
        FlatMatrix::from_fn(m, n, |i, j| {
            let mut sum = T::zero();
            for k in 0..n {
                sum = sum + self.u[(i, k)] * self.s[k] * self.v[(j, k)];
            }
            sum
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!(
            (a - b).abs() < tol,
            "{}: {} vs {} (diff {})",
            msg,
            a,
            b,
            (a - b).abs()
        );
    }

    fn m(shape: &[usize], data: &[f64]) -> FlatMatrix<f64> {
        FlatMatrix::new(shape, data.to_vec()).unwrap()
    }

    fn assert_orthonormal_cols(q: &FlatMatrix<f64>, tol: f64, name: &str) {
        let (rows, cols) = (q.shape()[0], q.shape()[1]);
        for a in 0..cols {
            for b in 0..cols {
                let mut dot = 0.0;
                for r in 0..rows {
                    dot += q[(r, a)] * q[(r, b)];
                }
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_near(dot, expected, tol, &format!("{}ᵀ{}[({},{})]", name, name, a, b));
            }
        }
    }

    fn assert_reconstructs(a: &FlatMatrix<f64>, tol: f64) {
        let svd = a.svd().unwrap();
        let r = svd.reconstruct();
        for i in 0..a.shape()[0] {
            for j in 0..a.shape()[1] {
                assert_near(r[(i, j)], a[(i, j)], tol, &format!("UΣVᵀ[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn pythag_edge_cases() {
        assert_eq!(pythag(0.0_f64, 0.0), 0.0);
        assert_eq!(pythag(-3.0_f64, 4.0), 5.0);
        assert_eq!(pythag(0.0_f64, -2.0), 2.0);
        assert!(pythag(1e-200_f64, 1e-200) > 0.0);
    }

    #[test]
    fn identity_3x3() {
        let a = FlatMatrix::<f64>::eye(3);
        let svd = a.svd().unwrap();
        for i in 0..3 {
            assert_near(svd.singular_values()[i], 1.0, TOL, &format!("σ[{}]", i));
        }
        assert_orthonormal_cols(svd.u(), TOL, "U");
        assert_orthonormal_cols(svd.v(), TOL, "V");
    }

    #[test]
    fn diagonal_unsorted() {
        let a = m(&[3, 3], &[1.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let sv = a.singular_values_only().unwrap();
        assert_near(sv[0], 5.0, TOL, "σ[0]");
        assert_near(sv[1], 3.0, TOL, "σ[1]");
        assert_near(sv[2], 1.0, TOL, "σ[2]");
        assert_reconstructs(&a, TOL);
    }

    #[test]
    fn known_2x2() {
        // AᵀA = [[13, 12], [12, 13]], eigenvalues 25 and 1
        let a = m(&[2, 2], &[3.0, 2.0, 2.0, 3.0]);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ[0]");
        assert_near(svd.singular_values()[1], 1.0, TOL, "σ[1]");
    }

    #[test]
    fn diagonal_with_negative() {
        let a = m(&[2, 2], &[-3.0, 0.0, 0.0, 2.0]);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 3.0, TOL, "σ[0]");
        assert_near(svd.singular_values()[1], 2.0, TOL, "σ[1]");
        assert_reconstructs(&a, TOL);
    }

    #[test]
    fn reconstruction_3x3() {
        let a = m(&[3, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0]);
        assert_reconstructs(&a, 1e-9);
    }

    #[test]
    fn reconstruction_5x3() {
        let a = m(
            &[5, 3],
            &[
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0, 10.0, 11.0, 1.0, 13.0, 14.0, 2.0,
            ],
        );
        let svd = a.svd().unwrap();
        assert_eq!(svd.u().shape(), &[5, 3]);
        assert_eq!(svd.v().shape(), &[3, 3]);
        assert_orthonormal_cols(svd.u(), 1e-9, "U");
        assert_orthonormal_cols(svd.v(), 1e-9, "V");
        assert_reconstructs(&a, 1e-9);
    }

    #[test]
    fn orthogonality_symmetric() {
        let a = m(&[3, 3], &[4.0, 1.0, -1.0, 1.0, 3.0, 2.0, -1.0, 2.0, 5.0]);
        let svd = a.svd().unwrap();
        assert_orthonormal_cols(svd.u(), 1e-9, "U");
        assert_orthonormal_cols(svd.v(), 1e-9, "V");
    }

    #[test]
    fn sorted_descending() {
        let a = m(
            &[4, 4],
            &[
                10.0, 3.0, 0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 7.0, 2.0, 0.0, 0.0, 2.0, 4.0,
            ],
        );
        let svd = a.svd().unwrap();
        let sv = svd.singular_values();
        for i in 0..3 {
            assert!(
                sv[i] >= sv[i + 1],
                "not descending: σ[{}]={} < σ[{}]={}",
                i,
                sv[i],
                i + 1,
                sv[i + 1]
            );
        }
        assert_reconstructs(&a, 1e-9);
    }

    #[test]
    fn rank_deficient() {
        let a = m(&[3, 3], &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0]);
        let svd = a.svd().unwrap();
        let sv = svd.singular_values();
        assert!(sv[0] > 1.0, "σ[0] should be large");
        assert!(sv[1].abs() < 1e-9, "σ[1] should be ≈ 0");
        assert!(sv[2].abs() < 1e-9, "σ[2] should be ≈ 0");
        assert_eq!(svd.rank(1e-9), 1);
        assert!(sv.iter().all(|&s| s >= 0.0));
        assert_reconstructs(&a, 1e-9);
    }

    #[test]
    fn zero_matrix() {
        let a = FlatMatrix::<f64>::zeros(&[3, 2]).unwrap();
        let svd = a.svd().unwrap();
        assert_eq!(svd.singular_values(), &[0.0, 0.0]);
        assert_eq!(svd.condition_number(), f64::INFINITY);
    }

    #[test]
    fn rectangular_tall() {
        let a = m(&[4, 2], &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
        let svd = a.svd().unwrap();
        // AᵀA = [[2, 1], [1, 2]], eigenvalues 3 and 1
        assert_near(svd.singular_values()[0], 3.0_f64.sqrt(), TOL, "σ[0]");
        assert_near(svd.singular_values()[1], 1.0, TOL, "σ[1]");
        assert_reconstructs(&a, 1e-9);
    }

    #[test]
    fn single_column() {
        let a = m(&[3, 1], &[3.0, 0.0, -4.0]);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ[0]");
        assert_reconstructs(&a, TOL);
    }

    #[test]
    fn size_1x1_negative() {
        let a = m(&[1, 1], &[-5.0]);
        let svd = a.svd().unwrap();
        assert_near(svd.singular_values()[0], 5.0, TOL, "σ[0]");
        assert_near(svd.u()[(0, 0)] * 5.0 * svd.v()[(0, 0)], -5.0, TOL, "UΣVᵀ");
    }

    #[test]
    fn no_columns() {
        let a = FlatMatrix::<f64>::new(&[3, 0], alloc::vec![]).unwrap();
        let svd = a.svd().unwrap();
        assert!(svd.singular_values().is_empty());
        assert_eq!(svd.u().shape(), &[3, 0]);
        assert_eq!(svd.v().shape(), &[0, 0]);
        assert_eq!(svd.condition_number(), 1.0);
    }

    #[test]
    fn rank_and_condition() {
        let a = m(&[2, 2], &[2.0, 0.0, 0.0, 0.5]);
        let svd = a.svd().unwrap();
        assert_eq!(svd.rank(1e-10), 2);
        assert_near(svd.condition_number(), 4.0, TOL, "cond");
    }

    #[test]
    fn f32_support() {
        let a = FlatMatrix::new(&[2, 2], alloc::vec![3.0_f32, 1.0, 1.0, 3.0]).unwrap();
        let svd = a.svd().unwrap();
        assert!((svd.singular_values()[0] - 4.0).abs() < 1e-5);
        assert!((svd.singular_values()[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn wide_is_rejected() {
        let a = m(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            a.svd().unwrap_err(),
            LinalgError::Dimension { nrows: 2, ncols: 3 }
        );
        // Transposing fixes it
        let sv = a.transpose().unwrap().singular_values_only().unwrap();
        assert_eq!(sv.len(), 2);
    }

    #[test]
    fn rank1_input_is_rejected() {
        let a = FlatMatrix::from_vec(alloc::vec![1.0_f64, 2.0]);
        assert!(matches!(a.svd().unwrap_err(), LinalgError::Shape(_)));
    }

    #[test]
    fn nan_input_fails_to_converge() {
        let a = FlatMatrix::filled(&[3, 2], f64::NAN).unwrap();
        assert!(matches!(
            a.svd().unwrap_err(),
            LinalgError::ConvergenceFailure { sweeps: MAX_SWEEPS, .. }
        ));
    }

    #[test]
    fn workspace_reuse_shrinks_and_grows() {
        let mut ws = SvdWorkspace::new();
        let big = m(&[4, 3], &[1.0, 2.0, 0.5, 0.0, 1.0, 3.0, 2.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        let small = m(&[2, 2], &[3.0, 2.0, 2.0, 3.0]);

        ws.decompose(&big).unwrap();
        let first: Vec<f64> = ws.singular_values().to_vec();

        ws.decompose(&small).unwrap();
        assert_eq!(ws.u().shape(), &[2, 2]);
        assert_near(ws.singular_values()[0], 5.0, TOL, "σ[0]");

        ws.decompose(&big).unwrap();
        assert_eq!(ws.singular_values(), first.as_slice());

        let svd = ws.into_svd();
        assert_eq!(svd.singular_values().len(), 3);
    }
}
