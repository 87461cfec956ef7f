#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Run and compare multi-objective evolutionary optimizers on the ZDT
//! benchmark suite.
//!
//! The crate configures NSGA-II and MOEA/D, runs each for a fixed
//! generation budget with a shared seed, scores the obtained fronts with
//! IGD and hypervolume, and reports which configuration wins per
//! indicator. Results can be printed as a table, exported to CSV/JSON, and
//! drawn as SVG or HTML charts.
//!
//! # Getting Started
//!
//! ```
//! use moea_bench::prelude::*;
//!
//! let comparison = Experiment::builder()
//!     .problem("zdt1")
//!     .n_gen(30)
//!     .seed(1)
//!     .algorithm("NSGA-II", Nsga2::builder().pop_size(40).build().unwrap())
//!     .algorithm("MOEA/D", Moead::builder().n_partitions(39).n_neighbors(10).build().unwrap())
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! println!("{comparison}");
//! let winner = comparison.verdict(Metric::Hypervolume);
//! assert_ne!(winner, Verdict::NotAvailable);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Problem`](problem::Problem) | Benchmark problem: bounds, objective evaluation, optional true front. |
//! | [`Optimizer`](algorithm::Optimizer) | Black-box optimizer returning a final population. |
//! | [`minimize`](algorithm::minimize) | One timed optimizer run reduced to its non-dominated set. |
//! | [`Indicator`](indicator::Indicator) | Quality measure of an obtained front (IGD, GD, hypervolume). |
//! | [`Experiment`](experiment::Experiment) | Runs several optimizers under identical settings. |
//! | [`Comparison`](experiment::Comparison) | Scored runs with per-metric verdicts. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public data types, `Comparison::to_json` | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for runs, generations and verdicts | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod algorithm;
mod error;
pub mod experiment;
pub mod indicator;
pub mod pareto;
pub mod problem;
mod rng_util;
mod types;
pub mod visualization;

pub use algorithm::{RunResult, Termination, minimize};
pub use error::{Error, Result};
pub use experiment::{Comparison, Experiment, Metric, Verdict};
pub use types::Direction;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use moea_bench::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algorithm::{
        Decomposition, Moead, Nsga2, Optimizer, PolynomialMutation, RunResult, Sampling, Sbx,
        Termination, minimize,
    };
    pub use crate::error::{Error, Result};
    pub use crate::experiment::{Comparison, Experiment, Metric, RunRecord, Verdict};
    pub use crate::indicator::{Gd, Hypervolume, Igd, Indicator};
    pub use crate::problem::{Problem, get_problem};
    pub use crate::types::Direction;
}
