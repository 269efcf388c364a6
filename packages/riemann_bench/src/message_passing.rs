use std::num::NonZero;
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use crate::reducer::{Measurement, ParallelReducer};
use crate::{Error, Integrand, Integration, accumulate, partition};

/// Share-nothing reduction with a fixed participant count.
///
/// One participant per rank, each owning its chunk outright and communicating
/// only at two barrier points and one gather point: all ranks synchronize at
/// a pre-compute barrier, accumulate independently, deliver their partial sum
/// to rank 0 over a channel, then synchronize again. Only rank 0 holds a
/// meaningful final value.
///
/// Timing is captured at the root between the pre-barrier and the post-
/// reduction barrier, so the cost of the reduction is included but the cost
/// of spawning participants is not.
///
/// The participant count is a property of how the run was launched and is
/// fixed for the lifetime of this value; a launch produces exactly one
/// timing record. There is no cancellation: a participant that never reaches
/// a barrier blocks the trial indefinitely, and if the root abandons the
/// gather because a participant was lost, the surviving ranks never pass the
/// final barrier and are leaked as blocked threads for the rest of the
/// process.
#[derive(Clone, Copy, Debug)]
pub struct MessagePassingReducer {
    participants: NonZero<usize>,
}

impl MessagePassingReducer {
    /// Creates a reducer for the participant count this run was launched
    /// with.
    #[must_use]
    pub fn new(participants: NonZero<usize>) -> Self {
        Self { participants }
    }
}

impl ParallelReducer for MessagePassingReducer {
    fn worker_count(&self) -> NonZero<usize> {
        self.participants
    }

    fn reduce(&self, integration: Integration, integrand: Integrand) -> crate::Result<Measurement> {
        let lower = integration.lower();
        let step = integration.step();

        // A lone participant is its own root: the local sum is the total and
        // no collective channel is required.
        if self.participants.get() == 1 {
            let full = partition(integration.samples(), self.participants)[0];

            let started = Instant::now();
            let total = accumulate(full, integrand, lower, step) * step;
            let elapsed = started.elapsed();

            return Ok(Measurement { total, elapsed });
        }

        let ranges = partition(integration.samples(), self.participants);
        let barrier = Arc::new(Barrier::new(self.participants.get()));
        let (partial_tx, partial_rx) = mpsc::channel();

        // Ranks 1.. run on spawned participants; rank 0 is the calling
        // thread. Spawn cost stays outside the measured interval because the
        // root only starts its clock once every rank has reached the
        // pre-compute barrier.
        let mut participants = Vec::with_capacity(self.participants.get() - 1);

        for (rank, range) in ranges.iter().copied().enumerate().skip(1) {
            let barrier = Arc::clone(&barrier);
            let partial_tx = partial_tx.clone();

            let handle = thread::Builder::new()
                .name(format!("participant-{rank}"))
                .spawn(move || {
                    barrier.wait();

                    let partial = accumulate(range, integrand, lower, step);

                    // The root may already have bailed out on another rank's
                    // failure; a closed channel is its problem to report.
                    partial_tx.send(partial).ok();

                    // The root must observe disconnection if any rank dies,
                    // so no sender may outlive the gather phase.
                    drop(partial_tx);

                    barrier.wait();
                })?;

            participants.push(handle);
        }

        drop(partial_tx);

        // Rank 0: compute, gather, reduce.
        barrier.wait();
        let started = Instant::now();

        let mut total = accumulate(ranges[0], integrand, lower, step);

        for _ in 1..self.participants.get() {
            total += partial_rx.recv().map_err(|_| Error::ParticipantLost)?;
        }

        barrier.wait();
        let elapsed = started.elapsed();

        // Scaled exactly once, after the full reduction.
        total *= step;

        for (rank, handle) in (1..).zip(participants) {
            handle
                .join()
                .map_err(|_| Error::WorkerPanicked { worker: rank })?;
        }

        Ok(Measurement { total, elapsed })
    }
}
