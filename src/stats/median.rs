use crate::traits::FloatScalar;

use super::nan_last_cmp;

/// Median of `values`.
///
/// Even lengths average the two central values. Returns `None` for an
/// empty slice and the element itself for a single element. Any NaN in
/// the input makes the result NaN.
///
/// ```
/// use flatmat::stats::median;
///
/// assert_eq!(median(&[5.0_f64, 1.0, 3.0, 2.0, 4.0]), Some(3.0));
/// assert_eq!(median(&[6.0_f64, 1.0, 3.0, 2.0, 4.0, 5.0]), Some(3.5));
/// assert_eq!(median(&[7.0_f64]), Some(7.0));
/// assert_eq!(median::<f64>(&[]), None);
/// ```
pub fn median<T: FloatScalar>(values: &[T]) -> Option<T> {
    let mut scratch = values.to_vec();
    median_mut(&mut scratch)
}

/// Median that reorders `values` in place instead of copying.
///
/// The order of `values` afterwards is unspecified.
pub fn median_mut<T: FloatScalar>(values: &mut [T]) -> Option<T> {
    let n = values.len();
    if values.iter().any(|v| v.is_nan()) {
        return Some(T::nan());
    }
    match n {
        0 => None,
        1 => Some(values[0]),
        _ => {
            let mid = n / 2;
            let (lower, &mut upper, _) = values.select_nth_unstable_by(mid, nan_last_cmp);
            if n % 2 == 1 {
                return Some(upper);
            }
            // lower holds the mid smallest values; its maximum is the other
            // central element
            let below = lower.iter().copied().max_by(nan_last_cmp)?;
            Some((below + upper) / (T::one() + T::one()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_and_even() {
        assert_eq!(median(&[1.0_f64, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(median(&[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]), Some(3.5));
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(median::<f64>(&[]), None);
        assert_eq!(median(&[-2.5_f64]), Some(-2.5));
        assert_eq!(median_mut::<f32>(&mut []), None);
    }

    #[test]
    fn two_elements() {
        assert_eq!(median(&[10.0_f64, 0.0]), Some(5.0));
    }

    #[test]
    fn duplicates() {
        assert_eq!(median(&[2.0_f64, 2.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn unsorted_input_not_modified() {
        let v = [3.0_f64, 1.0, 2.0];
        assert_eq!(median(&v), Some(2.0));
        assert_eq!(v, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn infinities_and_nan() {
        assert_eq!(
            median(&[f64::NEG_INFINITY, 0.0, f64::INFINITY]),
            Some(0.0)
        );
    }

    #[test]
    fn nan_propagates() {
        assert!(median(&[f64::NAN, 1.0, 2.0]).map_or(false, |m| m.is_nan()));
        assert!(median(&[1.0_f32, 2.0, 3.0, f32::NAN]).map_or(false, |m| m.is_nan()));
        assert!(median(&[f64::NAN, f64::NAN]).map_or(false, |m| m.is_nan()));
        let mut v = [4.0_f64, f64::NAN, 0.0, 1.0, 9.0];
        assert!(median_mut(&mut v).map_or(false, |m| m.is_nan()));
    }
}
