//! Experiment runner and comparator.
//!
//! An [`Experiment`] runs every configured optimizer once on the same
//! problem with the same seed and generation budget, then scores each
//! obtained front with IGD (when the problem knows its true front) and
//! hypervolume. The resulting [`Comparison`] answers which configuration
//! is better per [`Metric`].
//!
//! # Examples
//!
//! ```
//! use moea_bench::prelude::*;
//!
//! let comparison = Experiment::builder()
//!     .problem("zdt1")
//!     .n_gen(20)
//!     .seed(1)
//!     .algorithm("NSGA-II", Nsga2::builder().pop_size(20).build().unwrap())
//!     .algorithm(
//!         "MOEA/D",
//!         Moead::builder().n_partitions(19).n_neighbors(5).build().unwrap(),
//!     )
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(comparison.runs().len(), 2);
//! assert!(comparison.runs().iter().all(|r| r.igd.is_some()));
//! println!("{comparison}");
//! ```

mod export;
mod summary;

use core::fmt;

use crate::algorithm::{Optimizer, RunResult, Termination, minimize};
use crate::error::{Error, Result};
use crate::indicator::{Hypervolume, Igd, Indicator};
use crate::problem::{DEFAULT_FRONT_POINTS, Problem, get_problem};
use crate::types::Direction;

/// Where the experiment's problem comes from.
enum ProblemSource {
    Named(String),
    Instance(Box<dyn Problem>),
}

/// A configured comparison of one or more optimizers on a single problem.
///
/// Created with [`Experiment::builder`].
pub struct Experiment {
    problem: Box<dyn Problem>,
    n_gen: usize,
    seed: u64,
    reference_point: Vec<f64>,
    front_points: usize,
    algorithms: Vec<(String, Box<dyn Optimizer>)>,
}

impl fmt::Debug for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.algorithms.iter().map(|(l, _)| l.as_str()).collect();
        f.debug_struct("Experiment")
            .field("problem", &self.problem.name())
            .field("n_gen", &self.n_gen)
            .field("seed", &self.seed)
            .field("reference_point", &self.reference_point)
            .field("front_points", &self.front_points)
            .field("algorithms", &labels)
            .finish()
    }
}

/// Builder for [`Experiment`].
///
/// # Defaults
///
/// - Problem: `zdt1`
/// - Generations: 250
/// - Seed: 1
/// - Hypervolume reference point: `1.1` in every objective
/// - Reference-front points: 100
pub struct ExperimentBuilder {
    problem: ProblemSource,
    n_gen: usize,
    seed: u64,
    reference_point: Option<Vec<f64>>,
    front_points: usize,
    algorithms: Vec<(String, Box<dyn Optimizer>)>,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            problem: ProblemSource::Named("zdt1".to_string()),
            n_gen: 250,
            seed: 1,
            reference_point: None,
            front_points: DEFAULT_FRONT_POINTS,
            algorithms: Vec::new(),
        }
    }
}

impl ExperimentBuilder {
    /// Sets the benchmark problem by registry name.
    #[must_use]
    pub fn problem(mut self, name: impl Into<String>) -> Self {
        self.problem = ProblemSource::Named(name.into());
        self
    }

    /// Uses a custom problem instead of a registered one.
    #[must_use]
    pub fn problem_instance(mut self, problem: impl Problem + 'static) -> Self {
        self.problem = ProblemSource::Instance(Box::new(problem));
        self
    }

    /// Sets the generation budget shared by every run.
    #[must_use]
    pub fn n_gen(mut self, n_gen: usize) -> Self {
        self.n_gen = n_gen;
        self
    }

    /// Sets the seed shared by every run.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the hypervolume reference point.
    #[must_use]
    pub fn reference_point(mut self, point: Vec<f64>) -> Self {
        self.reference_point = Some(point);
        self
    }

    /// Sets how many points of the true front the IGD reference uses.
    #[must_use]
    pub fn front_points(mut self, n: usize) -> Self {
        self.front_points = n;
        self
    }

    /// Adds an optimizer under a display label. Runs happen in insertion order.
    #[must_use]
    pub fn algorithm(
        mut self,
        label: impl Into<String>,
        optimizer: impl Optimizer + 'static,
    ) -> Self {
        self.algorithms.push((label.into(), Box::new(optimizer)));
        self
    }

    /// Resolves the problem and validates the settings.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownProblem` if the problem name is not registered.
    /// - `Error::InvalidBudget` for a zero generation budget.
    /// - `Error::DimensionMismatch` if the reference point does not have
    ///   one coordinate per objective.
    /// - `Error::InvalidConfig` if no optimizer was added or
    ///   `front_points` is zero.
    pub fn build(self) -> Result<Experiment> {
        let problem = match self.problem {
            ProblemSource::Named(name) => get_problem(&name)?,
            ProblemSource::Instance(problem) => problem,
        };
        if self.n_gen == 0 {
            return Err(Error::InvalidBudget);
        }
        let n_obj = problem.n_obj();
        let reference_point = self.reference_point.unwrap_or_else(|| vec![1.1; n_obj]);
        if reference_point.len() != n_obj {
            return Err(Error::DimensionMismatch {
                expected: n_obj,
                got: reference_point.len(),
            });
        }
        if self.algorithms.is_empty() {
            return Err(Error::config("algorithms", "at least one optimizer is required"));
        }
        if self.front_points == 0 {
            return Err(Error::config("front_points", "must be at least 1"));
        }

        Ok(Experiment {
            problem,
            n_gen: self.n_gen,
            seed: self.seed,
            reference_point,
            front_points: self.front_points,
            algorithms: self.algorithms,
        })
    }
}

impl Experiment {
    /// Creates a builder with the documented defaults.
    #[must_use]
    pub fn builder() -> ExperimentBuilder {
        ExperimentBuilder::default()
    }

    /// The resolved problem.
    #[must_use]
    pub fn problem(&self) -> &dyn Problem {
        self.problem.as_ref()
    }

    /// Run every optimizer once and score the results.
    ///
    /// # Errors
    ///
    /// Any optimizer or indicator error aborts the whole comparison. A
    /// problem without a known true front is not an error: IGD is then
    /// reported as `None`.
    pub fn run(&self) -> Result<Comparison> {
        let problem = self.problem.as_ref();
        let termination = Termination::Generations(self.n_gen);
        let reference_front = problem.pareto_front(self.front_points);
        let igd = reference_front.clone().map(Igd::new).transpose()?;
        let hv = Hypervolume::new(self.reference_point.clone())?;

        let mut runs = Vec::with_capacity(self.algorithms.len());
        for (label, optimizer) in &self.algorithms {
            let result = minimize(problem, optimizer.as_ref(), termination, self.seed)?;
            let igd_value = igd.as_ref().map(|i| i.score(&result.objectives)).transpose()?;
            let hv_value = hv.score(&result.objectives)?;
            runs.push(RunRecord {
                label: label.clone(),
                result,
                igd: igd_value,
                hv: hv_value,
            });
        }

        let comparison = Comparison {
            problem: ProblemInfo {
                name: problem.name().to_string(),
                n_var: problem.n_var(),
                n_obj: problem.n_obj(),
            },
            n_gen: self.n_gen,
            seed: self.seed,
            reference_point: self.reference_point.clone(),
            reference_front,
            runs,
        };

        #[cfg(feature = "tracing")]
        for metric in Metric::ALL {
            trace_info!(metric = metric.name(), verdict = %comparison.verdict(metric), "verdict");
        }

        Ok(comparison)
    }
}

/// Identity of the problem a comparison was run on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInfo {
    /// Registry name.
    pub name: String,
    /// Number of decision variables.
    pub n_var: usize,
    /// Number of objectives.
    pub n_obj: usize,
}

/// One optimizer run with its indicator values.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// Label the optimizer was added under.
    pub label: String,
    /// Raw run output.
    pub result: RunResult,
    /// IGD against the true front, `None` when the problem has none.
    pub igd: Option<f64>,
    /// Hypervolume against the experiment's reference point.
    pub hv: f64,
}

impl RunRecord {
    /// Value of `metric` for this run, `None` when undefined.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let v = match metric {
            Metric::Igd => self.igd?,
            Metric::Hypervolume => self.hv,
            Metric::Time => self.result.elapsed.as_secs_f64(),
        };
        if v.is_nan() { None } else { Some(v) }
    }
}

/// A quantity runs are compared on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Inverted generational distance, lower is better.
    Igd,
    /// Hypervolume, higher is better.
    Hypervolume,
    /// Wall-clock time of the optimizer call, lower is better.
    Time,
}

impl Metric {
    /// Every metric, in report order.
    pub const ALL: [Metric; 3] = [Metric::Igd, Metric::Hypervolume, Metric::Time];

    /// Short display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::Igd => "IGD",
            Metric::Hypervolume => "HV",
            Metric::Time => "Time (s)",
        }
    }

    /// Whether lower or higher values win.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Metric::Hypervolume => Direction::Maximize,
            Metric::Igd | Metric::Time => Direction::Minimize,
        }
    }
}

/// Outcome of comparing runs on one [`Metric`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// A single run has the best value.
    Winner {
        /// Position of the run in [`Comparison::runs`].
        index: usize,
        /// Its label.
        label: String,
    },
    /// Two or more runs share the best value exactly.
    Tie,
    /// No run has a defined value.
    NotAvailable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Winner { label, .. } => f.write_str(label),
            Verdict::Tie => f.write_str("tie"),
            Verdict::NotAvailable => f.write_str("n/a"),
        }
    }
}

/// Scored runs of one [`Experiment`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    problem: ProblemInfo,
    n_gen: usize,
    seed: u64,
    reference_point: Vec<f64>,
    reference_front: Option<Vec<Vec<f64>>>,
    runs: Vec<RunRecord>,
}

impl Comparison {
    /// Runs in the order the optimizers were added.
    #[must_use]
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// The run added under `label`, if any.
    #[must_use]
    pub fn run(&self, label: &str) -> Option<&RunRecord> {
        self.runs.iter().find(|r| r.label == label)
    }

    /// The problem the runs were performed on.
    #[must_use]
    pub fn problem_info(&self) -> &ProblemInfo {
        &self.problem
    }

    /// Generation budget of every run.
    #[must_use]
    pub fn n_gen(&self) -> usize {
        self.n_gen
    }

    /// Seed shared by every run.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Hypervolume reference point.
    #[must_use]
    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }

    /// Sampled true front used for IGD, if the problem has one.
    #[must_use]
    pub fn reference_front(&self) -> Option<&[Vec<f64>]> {
        self.reference_front.as_deref()
    }

    /// Which run is better on `metric`.
    ///
    /// Undefined values never win. An exact tie for the best value gives
    /// [`Verdict::Tie`].
    #[must_use]
    pub fn verdict(&self, metric: Metric) -> Verdict {
        let direction = metric.direction();
        let mut best: Option<(usize, f64)> = None;
        let mut tied = false;

        for (i, run) in self.runs.iter().enumerate() {
            let Some(v) = run.value(metric) else {
                continue;
            };
            match best {
                None => best = Some((i, v)),
                Some((_, b)) if direction.is_better(v, b) => {
                    best = Some((i, v));
                    tied = false;
                }
                #[allow(clippy::float_cmp)]
                Some((_, b)) if v == b => tied = true,
                Some(_) => {}
            }
        }

        match best {
            None => Verdict::NotAvailable,
            Some(_) if tied => Verdict::Tie,
            Some((index, _)) => Verdict::Winner {
                index,
                label: self.runs[index].label.clone(),
            },
        }
    }

    /// Verdicts for every metric, in report order.
    #[must_use]
    pub fn verdicts(&self) -> Vec<(Metric, Verdict)> {
        Metric::ALL.iter().map(|&m| (m, self.verdict(m))).collect()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;

    pub(super) fn record(label: &str, igd: Option<f64>, hv: f64, millis: u64) -> RunRecord {
        RunRecord {
            label: label.to_string(),
            result: RunResult {
                algorithm: label.to_string(),
                problem: "zdt1".to_string(),
                seed: 1,
                objectives: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
                decisions: vec![vec![0.0], vec![1.0]],
                n_gen: 1,
                n_evals: 2,
                elapsed: Duration::from_millis(millis),
            },
            igd,
            hv,
        }
    }

    pub(super) fn comparison(runs: Vec<RunRecord>) -> Comparison {
        Comparison {
            problem: ProblemInfo {
                name: "zdt1".to_string(),
                n_var: 30,
                n_obj: 2,
            },
            n_gen: 10,
            seed: 1,
            reference_point: vec![1.1, 1.1],
            reference_front: None,
            runs,
        }
    }

    #[test]
    fn test_verdict_directions() {
        let c = comparison(vec![
            record("a", Some(0.1), 0.8, 50),
            record("b", Some(0.2), 0.9, 10),
        ]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::Winner { index: 0, label: "a".into() });
        assert_eq!(
            c.verdict(Metric::Hypervolume),
            Verdict::Winner { index: 1, label: "b".into() }
        );
        assert_eq!(c.verdict(Metric::Time), Verdict::Winner { index: 1, label: "b".into() });
    }

    #[test]
    fn test_exact_tie() {
        let c = comparison(vec![record("a", Some(0.1), 0.8, 5), record("b", Some(0.1), 0.8, 5)]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::Tie);
        assert_eq!(c.verdict(Metric::Hypervolume), Verdict::Tie);
    }

    #[test]
    fn test_tie_broken_by_later_better_run() {
        let c = comparison(vec![
            record("a", Some(0.2), 0.5, 5),
            record("b", Some(0.2), 0.5, 5),
            record("c", Some(0.1), 0.6, 5),
        ]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::Winner { index: 2, label: "c".into() });
    }

    #[test]
    fn test_undefined_never_wins() {
        let c = comparison(vec![record("a", None, 0.8, 5), record("b", Some(0.3), 0.7, 5)]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::Winner { index: 1, label: "b".into() });

        let c = comparison(vec![record("a", None, 0.8, 5), record("b", None, 0.7, 5)]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::NotAvailable);
    }

    #[test]
    fn test_nan_is_undefined() {
        let c = comparison(vec![
            record("a", Some(f64::NAN), 0.8, 5),
            record("b", Some(0.5), 0.7, 5),
        ]);
        assert_eq!(c.verdict(Metric::Igd), Verdict::Winner { index: 1, label: "b".into() });
    }

    #[test]
    fn test_builder_validation() {
        let nsga2 = || crate::algorithm::Nsga2::builder().pop_size(4).build().unwrap();

        let err = Experiment::builder()
            .problem("nope")
            .algorithm("x", nsga2())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownProblem(_)));

        let err = Experiment::builder().n_gen(0).algorithm("x", nsga2()).build().unwrap_err();
        assert!(matches!(err, Error::InvalidBudget));

        let err = Experiment::builder()
            .reference_point(vec![1.1, 1.1, 1.1])
            .algorithm("x", nsga2())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, got: 3 }));

        let err = Experiment::builder().build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "algorithms", .. }));
    }
}
