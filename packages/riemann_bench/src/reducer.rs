use std::num::NonZero;
use std::time::Duration;

use crate::{Integrand, Integration};

/// The outcome of one parallel-reduction trial: the fully reduced and
/// step-scaled total, and the wall-clock time the trial took.
///
/// What the elapsed time covers differs by execution model and the asymmetry
/// is deliberate: the message-passing model brackets only the barrier-to-
/// barrier compute+reduce interval, while the pooled model also pays for pool
/// creation. See the respective reducer types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// The Riemann-sum approximation of the integral.
    pub total: f64,

    /// Wall-clock duration of the trial.
    pub elapsed: Duration,
}

/// A parallel sum-reduction strategy over an integration domain.
///
/// Both execution models implement the same capability — partition the
/// domain, dispatch one chunk per worker, collect the partial sums, combine
/// them into one scaled total — so the harness selects a substrate by
/// configuration instead of duplicating control flow.
pub trait ParallelReducer {
    /// The number of workers that will participate in a trial.
    fn worker_count(&self) -> NonZero<usize>;

    /// Runs one trial: partition, dispatch, collect, combine.
    ///
    /// The partial sums are combined by summation, which is commutative up to
    /// floating-point rounding; callers comparing totals across worker counts
    /// must use a small relative tolerance, never exact equality.
    ///
    /// # Errors
    ///
    /// Returns an error if a worker fails mid-trial or the substrate cannot
    /// field the configured worker count. There is no retry; a failed trial
    /// produces no result.
    fn reduce(&self, integration: Integration, integrand: Integrand) -> crate::Result<Measurement>;
}
