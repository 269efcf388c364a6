use crate::{IndexRange, Integrand};

/// Sums the integrand over one worker's index range, in ascending index
/// order, without scaling by the step width.
///
/// `x = lower + i * step` for each index `i` in the range. The result is a
/// raw partial sum; multiplying by the step width happens exactly once,
/// after the cross-worker reduction, so that the numeric result does not
/// depend on how the domain was partitioned.
///
/// Pure and free of shared state, so disjoint ranges can be accumulated
/// concurrently with no synchronization until the reduction boundary.
///
/// # Example
///
/// ```
/// use riemann_bench::{IndexRange, accumulate};
///
/// fn one(_x: f64) -> f64 {
///     1.0
/// }
///
/// let range = IndexRange { start: 0, end: 100 };
/// assert_eq!(accumulate(range, one, 0.0, 0.01), 100.0);
/// ```
#[must_use]
pub fn accumulate(range: IndexRange, integrand: Integrand, lower: f64, step: f64) -> f64 {
    let mut sum = 0.0;

    for i in range.start..range.end {
        let x = lower + i as f64 * step;
        sum += integrand(x);
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_sums_to_zero() {
        let range = IndexRange { start: 10, end: 10 };
        assert_eq!(accumulate(range, f64::sin, 0.0, 0.1), 0.0);
    }

    #[test]
    fn offset_range_evaluates_at_shifted_points() {
        // f(x) = x over indexes [2, 4) with step 0.5 evaluates at 1.0 and 1.5.
        fn identity(x: f64) -> f64 {
            x
        }

        let range = IndexRange { start: 2, end: 4 };
        assert_eq!(accumulate(range, identity, 0.0, 0.5), 2.5);
    }

    #[test]
    fn split_ranges_sum_to_the_full_range() {
        let full = IndexRange { start: 0, end: 1000 };
        let left = IndexRange { start: 0, end: 400 };
        let right = IndexRange { start: 400, end: 1000 };

        let step = std::f64::consts::PI / 1000.0;

        let whole = accumulate(full, f64::sin, 0.0, step);
        let pieces = accumulate(left, f64::sin, 0.0, step) + accumulate(right, f64::sin, 0.0, step);

        assert!((whole - pieces).abs() <= 1e-9 * whole.abs());
    }
}
