use std::num::NonZero;
use std::time::Instant;

use many_cpus::ProcessorSet;

use crate::reducer::{Measurement, ParallelReducer};
use crate::worker_pool::WorkerPool;
use crate::{Error, Integrand, Integration, accumulate, partition};

/// Reduction over a bounded worker pool created for a single trial.
///
/// The orchestrator partitions the domain into exactly as many chunks as
/// pool workers, dispatches one chunk per worker, collects every partial
/// sum, adds them up and scales by the step width once.
///
/// Unlike [`MessagePassingReducer`][crate::MessagePassingReducer], the
/// measured interval starts before pool creation, so worker startup cost is
/// part of the trial. That asymmetry mirrors how the two models are used in
/// practice and is deliberately not compensated for.
#[derive(Clone, Copy, Debug)]
pub struct PooledReducer {
    workers: NonZero<usize>,
}

impl PooledReducer {
    /// Creates a reducer that will field a pool of `workers` workers per
    /// trial.
    #[must_use]
    pub fn new(workers: NonZero<usize>) -> Self {
        Self { workers }
    }
}

impl ParallelReducer for PooledReducer {
    fn worker_count(&self) -> NonZero<usize> {
        self.workers
    }

    fn reduce(&self, integration: Integration, integrand: Integrand) -> crate::Result<Measurement> {
        let lower = integration.lower();
        let step = integration.step();

        let ranges = partition(integration.samples(), self.workers);

        // Pool creation is inside the measured interval.
        let started = Instant::now();

        let Some(processors) = ProcessorSet::builder().take(self.workers) else {
            return Err(Error::InsufficientParallelism {
                requested: self.workers.get(),
                available: ProcessorSet::default().len(),
            });
        };

        let mut pool = WorkerPool::new(&processors);

        let tasks: Vec<_> = ranges
            .into_iter()
            .map(|range| move || accumulate(range, integrand, lower, step))
            .collect();

        let partials = pool.dispatch_collect(tasks)?;
        let elapsed = started.elapsed();

        // Torn down before the next trial; drop joins the workers even when
        // collection failed above.
        drop(pool);

        let total = partials.iter().sum::<f64>() * step;

        Ok(Measurement { total, elapsed })
    }
}
