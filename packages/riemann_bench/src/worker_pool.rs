use std::num::NonZero;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};
use std::{iter, mem};

use many_cpus::ProcessorSet;

use crate::Error;

/// A bounded pool with one worker thread per processor in the provided
/// processor set, each pinned to its processor.
///
/// The pool exists for exactly one trial: it is created after the trial's
/// clock starts, executes one task per worker, and is torn down when dropped
/// at the end of the trial. Dropping the pool joins all workers
/// unconditionally, including on failure paths.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    command_txs: Vec<mpsc::Sender<Command>>,
    join_handles: Vec<JoinHandle<()>>,
    worker_count: NonZero<usize>,
}

impl WorkerPool {
    /// Creates a pool with one pinned worker per processor in the set.
    pub(crate) fn new(processors: &ProcessorSet) -> Self {
        let (txs, rxs): (Vec<_>, Vec<_>) = iter::repeat_with(mpsc::channel)
            .take(processors.len())
            .unzip();

        let rxs = Arc::new(Mutex::new(rxs));

        let join_handles = processors
            .spawn_threads({
                let rxs = Arc::clone(&rxs);
                move |_| {
                    let rx = rxs
                        .lock()
                        .expect("only held briefly at startup, never poisoned")
                        .pop()
                        .expect("type invariant - one receiver per spawned worker");
                    worker_entrypoint(&rx);
                }
            })
            .into_vec();

        Self {
            worker_count: NonZero::new(txs.len())
                .expect("guarded by fact that ProcessorSet is never empty"),
            command_txs: txs,
            join_handles,
        }
    }

    /// Returns the number of worker threads in the pool.
    pub(crate) fn worker_count(&self) -> NonZero<usize> {
        self.worker_count
    }

    /// Dispatches one task per worker and blocks until every worker has
    /// returned its result.
    ///
    /// Workers may finish in any order; the returned results are paired with
    /// their originating tasks by position, so position `i` always holds the
    /// result of `tasks[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPanicked`] naming the first worker whose
    /// result channel closed without delivering a value.
    ///
    /// # Panics
    ///
    /// Panics if the number of tasks differs from the number of workers.
    pub(crate) fn dispatch_collect<F, R>(&mut self, tasks: Vec<F>) -> crate::Result<Vec<R>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        assert_eq!(
            tasks.len(),
            self.worker_count().get(),
            "static assignment requires exactly one chunk per pool worker"
        );

        let mut result_rxs = Vec::with_capacity(tasks.len());

        for (tx, task) in self.command_txs.iter().zip(tasks) {
            let (result_tx, result_rx) = oneshot::channel::<R>();
            result_rxs.push(result_rx);

            tx.send(Command::Execute(Box::new(move || {
                let result = task();

                // The collecting side waits on every channel, so the receiver
                // can only be gone if the trial already failed.
                result_tx.send(result).ok();
            })))
            .expect("worker thread must still exist - pool cannot operate without workers");
        }

        let mut results = Vec::with_capacity(result_rxs.len());

        for (worker, rx) in result_rxs.into_iter().enumerate() {
            results.push(rx.recv().map_err(|_| Error::WorkerPanicked { worker })?);
        }

        Ok(results)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for tx in self.command_txs.drain(..) {
            // A worker that panicked has already dropped its receiver.
            tx.send(Command::Shutdown).ok();
        }

        for handle in mem::take(&mut self.join_handles) {
            // Worker panics surface through the result channel; nothing
            // useful is left to report here.
            handle.join().ok();
        }
    }
}

enum Command {
    Execute(Box<dyn FnOnce() + Send>),
    Shutdown,
}

#[cfg_attr(test, mutants::skip)] // Impractical to test that things do not happen after shutdown.
fn worker_entrypoint(rx: &mpsc::Receiver<Command>) {
    while let Ok(Command::Execute(task)) = rx.recv() {
        task();
    }
}

#[cfg(test)]
mod tests {
    use new_zealand::nz;

    use super::*;

    #[test]
    fn one_result_per_worker_in_dispatch_order() {
        let Some(processors) = ProcessorSet::builder().take(nz!(1)) else {
            return;
        };

        let mut pool = WorkerPool::new(&processors);
        assert_eq!(pool.worker_count().get(), 1);

        let results = pool.dispatch_collect(vec![|| 42_usize]).unwrap();
        assert_eq!(results, vec![42]);
    }

    #[test]
    fn results_pair_with_their_tasks() {
        let Some(processors) = ProcessorSet::builder().take(nz!(2)) else {
            return;
        };

        let mut pool = WorkerPool::new(&processors);

        let tasks: Vec<Box<dyn FnOnce() -> usize + Send>> =
            vec![Box::new(|| 10), Box::new(|| 20)];

        let results = pool.dispatch_collect(tasks).unwrap();
        assert_eq!(results, vec![10, 20]);
    }

    #[test]
    fn panicking_worker_is_reported_by_index() {
        let Some(processors) = ProcessorSet::builder().take(nz!(1)) else {
            return;
        };

        let mut pool = WorkerPool::new(&processors);

        let tasks: Vec<Box<dyn FnOnce() -> usize + Send>> =
            vec![Box::new(|| panic!("accumulation failure"))];

        let result = pool.dispatch_collect(tasks);

        assert!(matches!(result, Err(Error::WorkerPanicked { worker: 0 })));
    }
}
