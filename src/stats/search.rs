use alloc::vec::Vec;

use crate::traits::FloatScalar;

/// Lookup mode for [`subset_indices_of_sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Only an element equal to the needle matches.
    Exact,
    /// The nearest element matches. On an exact tie the earlier index wins.
    Closest,
}

/// For each needle, the index of its match in the ascending slice `sorted`.
///
/// `Exact` yields the first index holding an equal value, or `None`.
/// `Closest` yields the index of the nearest value, preferring the earlier
/// index when two are equidistant; it is `None` only for an empty
/// haystack or a NaN needle.
///
/// ```
/// use flatmat::stats::{subset_indices_of_sorted, Match};
///
/// let hay = [1.0_f64, 2.0, 4.0, 8.0];
/// assert_eq!(
///     subset_indices_of_sorted(&hay, &[4.0, 5.0], Match::Exact),
///     vec![Some(2), None],
/// );
/// assert_eq!(
///     subset_indices_of_sorted(&hay, &[3.0, 7.0, 100.0], Match::Closest),
///     vec![Some(1), Some(3), Some(3)],
/// );
/// ```
pub fn subset_indices_of_sorted<T: FloatScalar>(
    sorted: &[T],
    needles: &[T],
    mode: Match,
) -> Vec<Option<usize>> {
    debug_assert!(
        sorted.windows(2).all(|w| !(w[1] < w[0])),
        "haystack must be sorted ascending"
    );
    needles
        .iter()
        .map(|&needle| locate(sorted, needle, mode))
        .collect()
}

fn locate<T: FloatScalar>(sorted: &[T], needle: T, mode: Match) -> Option<usize> {
    if needle.is_nan() {
        return None;
    }
    // First index whose value is >= needle
    let idx = sorted.partition_point(|&x| x < needle);
    match mode {
        Match::Exact => (idx < sorted.len() && sorted[idx] == needle).then_some(idx),
        Match::Closest => {
            let below = idx.checked_sub(1);
            let above = (idx < sorted.len()).then_some(idx);
            match (below, above) {
                (Some(b), Some(a)) => {
                    if needle - sorted[b] <= sorted[a] - needle {
                        Some(b)
                    } else {
                        Some(a)
                    }
                }
                (b, a) => b.or(a),
            }
        }
    }
}
