use thiserror::Error;

/// Errors that can occur while running the benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller supplied a run configuration that cannot be benchmarked,
    /// such as non-finite integration bounds.
    #[error("invalid configuration: {problem}")]
    InvalidConfiguration {
        /// A human-readable description of the problem.
        problem: String,
    },

    /// More workers were requested than there are processors available to
    /// this process.
    ///
    /// The sweep harness treats this as a silent skip; it only surfaces to
    /// callers that invoke a reducer directly.
    #[error("requested {requested} workers but only {available} processors are available")]
    InsufficientParallelism {
        /// The number of workers the trial asked for.
        requested: usize,

        /// The number of processors available to this process.
        available: usize,
    },

    /// A pool worker panicked while accumulating its chunk. Fatal to the
    /// trial; there is no partial-result recovery.
    #[error("worker {worker} panicked while accumulating its chunk")]
    WorkerPanicked {
        /// Zero-based index of the worker whose chunk was lost.
        worker: usize,
    },

    /// A participant disconnected before delivering its partial sum to the
    /// root, so the collective reduction cannot complete.
    #[error("a participant disconnected before delivering its partial sum")]
    ParticipantLost,

    /// A timing log line did not match the `<worker_count> <elapsed_seconds>`
    /// record format.
    #[error("malformed timing record: '{line}'")]
    MalformedRecord {
        /// The offending log line, verbatim.
        line: String,
    },

    /// An I/O failure while appending to a timing log or writing the chart.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for benchmark operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn worker_panic_names_the_worker() {
        let error = Error::WorkerPanicked { worker: 3 };
        assert!(error.to_string().contains('3'));
    }

    #[test]
    fn io_error_converts() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let result: Result<()> = Err(inner.into());
        assert!(result.is_err());
    }
}
