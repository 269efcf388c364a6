use std::num::NonZero;

use num_integer::Integer;

/// A half-open range of sample indexes `[start, end)` assigned to one worker.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IndexRange {
    /// First sample index in the range (inclusive).
    pub start: usize,

    /// One past the last sample index in the range (exclusive).
    pub end: usize,
}

impl IndexRange {
    /// The number of sample indexes in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range contains no sample indexes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `[0, samples)` into exactly `workers` contiguous ranges.
///
/// Every worker except the last receives `samples / workers` (floor) indexes;
/// the last worker absorbs the remainder. This asymmetric policy is load-
/// bearing: timing comparisons across worker counts assume it, so it must not
/// be replaced with a balanced split.
///
/// When `workers > samples` the leading ranges are empty, which is valid
/// input for the accumulator.
///
/// # Example
///
/// ```
/// use new_zealand::nz;
/// use riemann_bench::partition;
///
/// let ranges = partition(nz!(10), nz!(3));
///
/// assert_eq!(ranges.len(), 3);
/// assert_eq!((ranges[0].start, ranges[0].end), (0, 3));
/// assert_eq!((ranges[1].start, ranges[1].end), (3, 6));
/// assert_eq!((ranges[2].start, ranges[2].end), (6, 10));
/// ```
#[must_use]
pub fn partition(samples: NonZero<usize>, workers: NonZero<usize>) -> Vec<IndexRange> {
    let (chunk, _remainder) = samples.get().div_rem(&workers.get());

    (0..workers.get())
        .map(|worker| {
            let start = worker * chunk;
            let end = if worker == workers.get() - 1 {
                samples.get()
            } else {
                start + chunk
            };

            IndexRange { start, end }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use new_zealand::nz;

    use super::*;

    /// Union must be exactly `[0, samples)` with no gaps or overlaps.
    fn assert_covers(ranges: &[IndexRange], samples: usize) {
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, samples);

        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn even_division() {
        let ranges = partition(nz!(100), nz!(4));

        assert_eq!(ranges.len(), 4);
        assert_covers(&ranges, 100);
        assert!(ranges.iter().all(|range| range.len() == 25));
    }

    #[test]
    fn last_range_absorbs_remainder() {
        let ranges = partition(nz!(103), nz!(4));

        assert_covers(&ranges, 103);
        assert_eq!(ranges[0].len(), 25);
        assert_eq!(ranges[1].len(), 25);
        assert_eq!(ranges[2].len(), 25);
        assert_eq!(ranges[3].len(), 28);
    }

    #[test]
    fn single_worker_takes_everything() {
        let ranges = partition(nz!(17), nz!(1));

        assert_eq!(ranges, vec![IndexRange { start: 0, end: 17 }]);
    }

    #[test]
    fn one_sample_per_worker() {
        let ranges = partition(nz!(5), nz!(5));

        assert_covers(&ranges, 5);
        assert!(ranges.iter().all(|range| range.len() == 1));
    }

    #[test]
    fn more_workers_than_samples_yields_empty_ranges() {
        let ranges = partition(nz!(3), nz!(5));

        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges.last().unwrap().end, 3);
        assert_eq!(ranges.iter().filter(|range| range.is_empty()).count(), 4);
        assert_eq!(ranges.iter().map(IndexRange::len).sum::<usize>(), 3);
    }

    #[test]
    fn sine_scenario_quarters() {
        let ranges = partition(nz!(1000), nz!(4));

        let expected = [(0, 250), (250, 500), (500, 750), (750, 1000)];
        for (range, (start, end)) in ranges.iter().zip(expected) {
            assert_eq!((range.start, range.end), (start, end));
        }
    }

    #[test]
    fn non_last_ranges_are_uniform() {
        for samples in [1_usize, 7, 64, 1000, 1001] {
            for workers in [1_usize, 2, 3, 7, 16] {
                let ranges = partition(
                    NonZero::new(samples).unwrap(),
                    NonZero::new(workers).unwrap(),
                );

                assert_eq!(ranges.len(), workers);
                assert_covers(&ranges, samples);

                let chunk = samples / workers;
                assert!(
                    ranges[..workers - 1].iter().all(|range| range.len() == chunk),
                    "uneven non-last range for N={samples} W={workers}"
                );
            }
        }
    }
}
