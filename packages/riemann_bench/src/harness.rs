use std::num::NonZero;
use std::path::Path;

use many_cpus::ProcessorSet;

use crate::reducer::{Measurement, ParallelReducer};
use crate::timing_log::{self, TimingRecord};
use crate::{Error, Integrand, Integration, MessagePassingReducer, PooledReducer};

/// Drives benchmark trials and turns each completed trial into one appended
/// timing record and one console report.
///
/// The integration problem, the integrand and the reference value are fixed
/// for the harness's lifetime and passed into every trial by value.
#[derive(Clone, Copy, Debug)]
pub struct Harness {
    integration: Integration,
    integrand: Integrand,
    reference: f64,
}

impl Harness {
    /// Creates a harness for one benchmark session.
    ///
    /// `reference` is the externally supplied exact value of the integral,
    /// used only to report the discrepancy of each trial's total.
    #[must_use]
    pub fn new(integration: Integration, integrand: Integrand, reference: f64) -> Self {
        Self {
            integration,
            integrand,
            reference,
        }
    }

    /// Runs one pooled trial per worker count in `sweep`, ascending, and
    /// appends one record per completed trial to the log at `log`.
    ///
    /// A count exceeding the available hardware parallelism is skipped
    /// silently: no record, no error, matching the source behavior this
    /// benchmark reproduces. A worker failure aborts only the current trial;
    /// the sweep continues with the next count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a completed trial's record cannot be
    /// appended. Trial-level failures are reported to stderr and are not
    /// errors of the sweep itself.
    pub fn run_pooled_sweep(
        &self,
        sweep: &[NonZero<usize>],
        log: &Path,
    ) -> crate::Result<Vec<TimingRecord>> {
        let available = ProcessorSet::default().len();

        let mut records = Vec::new();

        for &workers in sweep {
            if workers.get() > available {
                continue;
            }

            let reducer = PooledReducer::new(workers);

            match reducer.reduce(self.integration, self.integrand) {
                Ok(measurement) => {
                    let record = self.record_trial(reducer.worker_count(), measurement, log)?;
                    records.push(record);
                }
                // Lost the capacity race after the check above; same silent
                // skip as the pre-check.
                Err(Error::InsufficientParallelism { .. }) => {}
                Err(error) => {
                    eprintln!("trial with {workers} workers failed: {error}");
                }
            }
        }

        Ok(records)
    }

    /// Runs the single message-passing trial this launch is entitled to and
    /// appends its record to the log at `log`.
    ///
    /// The participant count is fixed by how the process was launched;
    /// sweeping it requires separate launches.
    ///
    /// # Errors
    ///
    /// A participant failure is fatal here — with one trial per launch there
    /// is no next count to continue with.
    pub fn run_message_passing(
        &self,
        participants: NonZero<usize>,
        log: &Path,
    ) -> crate::Result<TimingRecord> {
        let reducer = MessagePassingReducer::new(participants);

        let measurement = reducer.reduce(self.integration, self.integrand)?;

        self.record_trial(reducer.worker_count(), measurement, log)
    }

    fn record_trial(
        &self,
        workers: NonZero<usize>,
        measurement: Measurement,
        log: &Path,
    ) -> crate::Result<TimingRecord> {
        let record = TimingRecord::new(workers.get(), measurement.elapsed);
        timing_log::append(log, &record)?;

        self.report(workers, measurement);

        Ok(record)
    }

    fn report(&self, workers: NonZero<usize>, measurement: Measurement) {
        println!("{workers} workers:");
        println!("  Exact integral : {:.10}", self.reference);
        println!("  Riemann sum    : {:.10}", measurement.total);
        println!(
            "  Error          : {:.1e}",
            (self.reference - measurement.total).abs()
        );
        println!(
            "  Runtime        : {:.4} seconds",
            measurement.elapsed.as_secs_f64()
        );
    }
}
