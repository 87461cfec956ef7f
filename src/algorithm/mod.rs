//! Optimizer trait, termination criteria and the [`minimize`] entry point.
//!
//! An [`Optimizer`] is a black box: given a problem, a termination
//! criterion and a seed it returns its final population. [`minimize`]
//! wraps one such call, measures its wall-clock time, and reduces the
//! population to the non-dominated set reported in a [`RunResult`].
//!
//! # Optimizers
//!
//! | Optimizer | Algorithm | Population size |
//! |-----------|-----------|-----------------|
//! | [`Nsga2`] | NSGA-II (rank + crowding distance) | `pop_size` |
//! | [`Moead`] | MOEA/D (decomposition, neighborhoods) | number of reference directions |
//!
//! # Examples
//!
//! ```
//! use moea_bench::algorithm::{Nsga2, Termination, minimize};
//! use moea_bench::problem::get_problem;
//!
//! let problem = get_problem("zdt1").unwrap();
//! let nsga2 = Nsga2::builder().pop_size(20).build().unwrap();
//!
//! let res = minimize(problem.as_ref(), &nsga2, Termination::Generations(10), 1).unwrap();
//! assert!(res.len() <= 20);
//! assert_eq!(res.n_gen, 10);
//! ```

pub mod moead;
pub mod nsga2;
pub mod operators;

use core::time::Duration;
use std::time::Instant;

pub use moead::{Decomposition, Moead, MoeadBuilder};
pub use nsga2::{Nsga2, Nsga2Builder};
pub use operators::{PolynomialMutation, Sampling, Sbx, das_dennis};

use crate::error::{Error, Result};
use crate::pareto;
use crate::problem::Problem;

/// When an optimizer stops.
///
/// The initial population counts as the first generation, so
/// `Generations(1)` evaluates the initial population only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Stop after this many generations.
    Generations(usize),
    /// Stop after the generation during which this many evaluations were reached.
    Evaluations(usize),
}

impl Termination {
    pub(crate) fn validate(self) -> Result<()> {
        match self {
            Termination::Generations(0) | Termination::Evaluations(0) => Err(Error::InvalidBudget),
            _ => Ok(()),
        }
    }
}

/// Progress counters checked against a [`Termination`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Budget {
    termination: Termination,
    pub(crate) n_gen: usize,
    pub(crate) n_evals: usize,
}

impl Budget {
    pub(crate) fn new(termination: Termination) -> Self {
        Self {
            termination,
            n_gen: 0,
            n_evals: 0,
        }
    }

    /// Record one completed generation of `evals` evaluations.
    pub(crate) fn record(&mut self, evals: usize) {
        self.n_gen += 1;
        self.n_evals += evals;
    }

    pub(crate) fn exhausted(&self) -> bool {
        match self.termination {
            Termination::Generations(n) => self.n_gen >= n,
            Termination::Evaluations(n) => self.n_evals >= n,
        }
    }
}

/// Final population handed back by an [`Optimizer`].
#[derive(Clone, Debug, Default)]
pub struct Population {
    /// Decision vectors, one per member.
    pub decisions: Vec<Vec<f64>>,
    /// Objective vectors, aligned with `decisions`.
    pub objectives: Vec<Vec<f64>>,
    /// Generations performed, the initial population included.
    pub n_gen: usize,
    /// Objective evaluations performed.
    pub n_evals: usize,
}

/// A multi-objective optimizer treated as a black box.
pub trait Optimizer: Send + Sync {
    /// Display name of the algorithm, e.g. `"NSGA-II"`.
    fn name(&self) -> &str;

    /// Number of members the optimizer keeps for `problem`.
    ///
    /// A run never returns more objective vectors than this.
    fn population_size(&self, problem: &dyn Problem) -> usize;

    /// Run the optimizer until `termination` and return its final population.
    ///
    /// Identical arguments must produce identical populations.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBudget` for a zero budget, and propagates
    /// errors from problem evaluation.
    fn run(&self, problem: &dyn Problem, termination: Termination, seed: u64) -> Result<Population>;
}

/// Outcome of one [`minimize`] call.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Name of the optimizer that produced the result.
    pub algorithm: String,
    /// Name of the problem that was solved.
    pub problem: String,
    /// Seed used for the run.
    pub seed: u64,
    /// Objective vectors of the final non-dominated set, in population order.
    pub objectives: Vec<Vec<f64>>,
    /// Decision vectors aligned with `objectives`.
    pub decisions: Vec<Vec<f64>>,
    /// Generations performed.
    pub n_gen: usize,
    /// Objective evaluations performed.
    pub n_evals: usize,
    /// Wall-clock time of the optimizer call alone.
    pub elapsed: Duration,
}

impl RunResult {
    /// Number of returned objective vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    /// Returns `true` if the run returned no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }
}

/// Run `optimizer` on `problem` and return its non-dominated set.
///
/// Only the optimizer call is timed. The reduction to the non-dominated
/// set keeps population order; the claimed non-dominance is taken from
/// the optimizer's own sorting and not cross-checked.
///
/// # Errors
///
/// Returns `Error::InvalidBudget` for a zero budget and propagates any
/// optimizer error.
pub fn minimize(
    problem: &dyn Problem,
    optimizer: &dyn Optimizer,
    termination: Termination,
    seed: u64,
) -> Result<RunResult> {
    termination.validate()?;

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!(
        "minimize",
        algorithm = optimizer.name(),
        problem = problem.name(),
        seed
    )
    .entered();
    trace_info!(?termination, "run started");

    let start = Instant::now();
    let population = optimizer.run(problem, termination, seed)?;
    let elapsed = start.elapsed();

    let front = pareto::pareto_front_indices(&population.objectives);
    let objectives: Vec<Vec<f64>> = front
        .iter()
        .map(|&i| population.objectives[i].clone())
        .collect();
    let decisions: Vec<Vec<f64>> = front
        .iter()
        .map(|&i| population.decisions[i].clone())
        .collect();

    trace_info!(
        n_gen = population.n_gen,
        n_evals = population.n_evals,
        front_size = objectives.len(),
        elapsed_ms = elapsed.as_millis(),
        "run finished"
    );

    Ok(RunResult {
        algorithm: optimizer.name().to_string(),
        problem: problem.name().to_string(),
        seed,
        objectives,
        decisions,
        n_gen: population.n_gen,
        n_evals: population.n_evals,
        elapsed,
    })
}

/// Variable bounds of `problem`, one pair per decision variable.
pub(crate) fn bounds_of(problem: &dyn Problem) -> Vec<(f64, f64)> {
    (0..problem.n_var()).map(|i| problem.bounds(i)).collect()
}

/// Evaluate one decision vector, checking the objective count.
pub(crate) fn evaluate(problem: &dyn Problem, x: &[f64]) -> Result<Vec<f64>> {
    let f = problem.evaluate(x)?;
    if f.len() != problem.n_obj() {
        return Err(Error::DimensionMismatch {
            expected: problem.n_obj(),
            got: f.len(),
        });
    }
    Ok(f)
}

pub(crate) fn evaluate_all(problem: &dyn Problem, xs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    xs.iter().map(|x| evaluate(problem, x)).collect()
}
