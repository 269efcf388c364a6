//! Append-only timing logs, one per execution model.
//!
//! Each completed trial appends one `<worker_count> <elapsed_seconds>` line.
//! The files are never truncated; repeated benchmark sessions accumulate,
//! and the comparator reads whatever history is present.

use std::fmt::{self, Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// Fixed log path for the message-passing model, relative to the working
/// directory.
pub const MESSAGE_PASSING_LOG: &str = "time_message_passing.txt";

/// Fixed log path for the pooled model, relative to the working directory.
pub const POOLED_LOG: &str = "time_pooled.txt";

/// One completed trial: the worker count and the elapsed wall-clock time.
///
/// Records are append-only; the logs accumulate across process runs and are
/// never truncated. Record order in the file is run order.
///
/// The display form is the log line format:
/// `<worker_count> <elapsed_seconds to six decimal places>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingRecord {
    /// Number of workers (or participants) in the trial.
    pub workers: usize,

    /// Wall-clock duration of the trial.
    pub elapsed: Duration,
}

impl TimingRecord {
    /// Creates a record for one completed trial.
    #[must_use]
    pub fn new(workers: usize, elapsed: Duration) -> Self {
        Self { workers, elapsed }
    }
}

impl Display for TimingRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.6}", self.workers, self.elapsed.as_secs_f64())
    }
}

/// Appends one record to the log at `path`, creating the file if needed.
///
/// # Errors
///
/// Returns [`Error::Io`] if the log cannot be opened or written.
pub fn append(path: &Path, record: &TimingRecord) -> crate::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    writeln!(file, "{record}")?;

    Ok(())
}

/// Loads every record from the log at `path`, preserving file order.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and
/// [`Error::MalformedRecord`] if a line does not parse as
/// `<worker_count> <elapsed_seconds>`.
pub fn load(path: &Path) -> crate::Result<Vec<TimingRecord>> {
    let contents = fs::read_to_string(path)?;

    contents.lines().map(parse_line).collect()
}

fn parse_line(line: &str) -> crate::Result<TimingRecord> {
    let malformed = || Error::MalformedRecord {
        line: line.to_string(),
    };

    let (workers, elapsed) = line.split_once(' ').ok_or_else(malformed)?;

    let workers: usize = workers.parse().map_err(|_| malformed())?;
    let elapsed: f64 = elapsed.trim().parse().map_err(|_| malformed())?;

    // Rejects non-finite, negative and Duration-overflowing values alike.
    let elapsed = Duration::try_from_secs_f64(elapsed).map_err(|_| malformed())?;

    Ok(TimingRecord::new(workers, elapsed))
}
