//! Binary entry point for the scaling benchmark.
//!
//! The workload is fixed to match the system this benchmark reproduces:
//! sine over `[0, π]`. The pooled mode sweeps a fixed set of worker counts
//! in one launch; the message-passing participant count is a property of the
//! launch itself, so that mode produces exactly one timing record per run.

use std::num::NonZero;
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use argh::FromArgs;
use new_zealand::nz;
use riemann_bench::chart::{self, ChartOutcome};
use riemann_bench::{Error, Harness, Integration, reference_value, timing_log};

/// Worker counts attempted by the pooled sweep; counts beyond the available
/// hardware parallelism are skipped silently.
const POOLED_SWEEP: [NonZero<usize>; 10] = [
    nz!(2),
    nz!(4),
    nz!(6),
    nz!(8),
    nz!(10),
    nz!(12),
    nz!(14),
    nz!(16),
    nz!(18),
    nz!(20),
];

const DEFAULT_SAMPLES: usize = 100_000_000;

/// Compare the wall-clock scaling of message-passing and pooled-worker
/// parallel reduction on a fixed-step Riemann-sum workload.
#[derive(FromArgs)]
struct Args {
    /// execution model to benchmark: pooled (default), message-passing, or
    /// compare to only render the chart
    #[argh(option, default = "Mode::Pooled")]
    mode: Mode,

    /// participant count for the message-passing mode; fixed for the whole
    /// launch, one timing record per run
    #[argh(option)]
    participants: Option<usize>,

    /// number of Riemann sample steps
    #[argh(option, default = "DEFAULT_SAMPLES")]
    samples: usize,
}

enum Mode {
    Pooled,
    MessagePassing,
    Compare,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pooled" => Ok(Self::Pooled),
            "message-passing" => Ok(Self::MessagePassing),
            "compare" => Ok(Self::Compare),
            other => Err(format!(
                "unknown mode '{other}'; expected pooled, message-passing or compare"
            )),
        }
    }
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let samples = NonZero::new(args.samples).ok_or_else(|| Error::InvalidConfiguration {
        problem: "sample count must be positive".to_string(),
    })?;

    let integration = Integration::new(0.0, std::f64::consts::PI, samples)?;
    let reference = reference_value(f64::sin, integration.lower(), integration.upper());
    let harness = Harness::new(integration, f64::sin, reference);

    match args.mode {
        Mode::Pooled => {
            println!("====== Pooled ======");
            harness.run_pooled_sweep(&POOLED_SWEEP, Path::new(timing_log::POOLED_LOG))?;
        }
        Mode::MessagePassing => {
            let participants = args
                .participants
                .and_then(NonZero::new)
                .ok_or_else(|| Error::InvalidConfiguration {
                    problem: "message-passing mode requires a positive --participants launch parameter"
                        .to_string(),
                })?;

            println!("====== Message passing ======");
            harness.run_message_passing(participants, Path::new(timing_log::MESSAGE_PASSING_LOG))?;
        }
        Mode::Compare => {}
    }

    // Once both models have logged at least one trial, render the chart;
    // until then this quietly does nothing.
    let outcome = chart::render_comparison(
        Path::new(timing_log::MESSAGE_PASSING_LOG),
        Path::new(timing_log::POOLED_LOG),
        Path::new(chart::CHART_PATH),
    )?;

    if outcome == ChartOutcome::Rendered {
        println!("comparison chart written to {}", chart::CHART_PATH);
    }

    Ok(())
}
