//! Wall-clock scaling comparison of two parallel reduction strategies.
//!
//! The same embarrassingly-parallel workload — a fixed-step Riemann-sum
//! approximation of a definite integral — is executed under two substrates:
//!
//! - **Message passing**: a fixed set of share-nothing participants, one per
//!   rank, synchronizing at two barrier points and gathering partial sums to
//!   a single root ([`MessagePassingReducer`]).
//! - **Pooled workers**: a bounded pool created per trial, one statically
//!   assigned chunk per worker, collected by a single orchestrator
//!   ([`PooledReducer`]).
//!
//! Both implement [`ParallelReducer`], so the algorithm — partition,
//! dispatch, collect, combine — is shared and only the execution substrate
//! differs. The [`Harness`] runs trials across worker counts, appends one
//! record per completed trial to a per-model append-only log, and the
//! comparator in [`chart`] renders the two logs into one scaling chart.
//!
//! # Example
//!
//! ```
//! use new_zealand::nz;
//! use riemann_bench::{Integration, MessagePassingReducer, ParallelReducer};
//!
//! # fn main() -> Result<(), riemann_bench::Error> {
//! let integration = Integration::new(0.0, std::f64::consts::PI, nz!(1000))?;
//!
//! let measurement = MessagePassingReducer::new(nz!(2)).reduce(integration, f64::sin)?;
//!
//! // ∫ sin over [0, π] = 2.
//! assert!((measurement.total - 2.0).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```

mod accumulate;
pub mod chart;
mod error;
mod harness;
mod integration;
mod message_passing;
mod partition;
mod pooled;
mod reducer;
mod reference;
pub mod timing_log;
mod worker_pool;

pub use accumulate::accumulate;
pub use error::Error;
pub use harness::Harness;
pub use integration::{Integrand, Integration};
pub use message_passing::MessagePassingReducer;
pub use partition::{IndexRange, partition};
pub use pooled::PooledReducer;
pub use reducer::{Measurement, ParallelReducer};
pub use reference::reference_value;

pub(crate) use error::Result;
