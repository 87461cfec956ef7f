//! Benchmark problems and the problem registry.
//!
//! A [`Problem`] maps a decision vector to a vector of objective values,
//! all of which are minimized. Problems may also know their true Pareto
//! front, which the distance-style indicators need as a reference.
//!
//! # Available problems
//!
//! | Name | Variables | Front shape |
//! |------|-----------|-------------|
//! | `zdt1` | 30 | convex |
//! | `zdt2` | 30 | concave |
//! | `zdt3` | 30 | five disconnected pieces |
//! | `zdt4` | 10 | convex, many local fronts |
//! | `zdt5` | 80 (binary) | convex, deceptive |
//! | `zdt6` | 10 | concave, non-uniform |
//!
//! # Examples
//!
//! ```
//! use moea_bench::problem::get_problem;
//!
//! let problem = get_problem("ZDT1").unwrap();
//! assert_eq!(problem.n_var(), 30);
//! assert_eq!(problem.n_obj(), 2);
//!
//! let f = problem.evaluate(&vec![0.0; 30]).unwrap();
//! assert_eq!(f, vec![0.0, 1.0]);
//! ```

mod zdt;

pub use zdt::{Zdt1, Zdt2, Zdt3, Zdt4, Zdt5, Zdt6};

use crate::error::{Error, Result};

/// Number of reference-front points used when none is requested.
pub const DEFAULT_FRONT_POINTS: usize = 100;

/// A multi-objective benchmark problem with box-bounded decision variables.
///
/// Implementations must be deterministic: the same decision vector always
/// evaluates to the same objective vector.
pub trait Problem: Send + Sync {
    /// The registry name of the problem, e.g. `"zdt1"`.
    fn name(&self) -> &str;

    /// Number of decision variables.
    fn n_var(&self) -> usize;

    /// Number of objectives.
    fn n_obj(&self) -> usize;

    /// Lower and upper bound of decision variable `i`.
    fn bounds(&self, i: usize) -> (f64, f64);

    /// Evaluate the objectives of one decision vector.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if `x` does not have
    /// [`n_var`](Self::n_var) components.
    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>>;

    /// Sample of the true Pareto front with about `n_points` vectors.
    ///
    /// Returns `None` when the problem has no known front.
    fn pareto_front(&self, _n_points: usize) -> Option<Vec<Vec<f64>>> {
        None
    }
}

/// Resolve a benchmark problem by name (case-insensitive).
///
/// # Errors
///
/// Returns `Error::UnknownProblem` if the name is not registered.
pub fn get_problem(name: &str) -> Result<Box<dyn Problem>> {
    let problem: Box<dyn Problem> = match name.to_ascii_lowercase().as_str() {
        "zdt1" => Box::new(Zdt1::default()),
        "zdt2" => Box::new(Zdt2::default()),
        "zdt3" => Box::new(Zdt3::default()),
        "zdt4" => Box::new(Zdt4::default()),
        "zdt5" => Box::new(Zdt5::default()),
        "zdt6" => Box::new(Zdt6::default()),
        _ => return Err(Error::UnknownProblem(name.to_string())),
    };
    Ok(problem)
}

/// Names accepted by [`get_problem`].
#[must_use]
pub fn problem_names() -> &'static [&'static str] {
    &["zdt1", "zdt2", "zdt3", "zdt4", "zdt5", "zdt6"]
}

pub(crate) fn check_len(x: &[f64], expected: usize) -> Result<()> {
    if x.len() == expected {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected,
            got: x.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_all_names() {
        for name in problem_names() {
            let problem = get_problem(name).unwrap();
            assert_eq!(problem.name(), *name);
            assert_eq!(problem.n_obj(), 2);
        }
    }

    #[test]
    fn test_registry_is_case_insensitive() {
        assert_eq!(get_problem("Zdt3").unwrap().name(), "zdt3");
    }

    #[test]
    fn test_unknown_problem() {
        let err = get_problem("dtlz9").err().unwrap();
        assert!(matches!(err, Error::UnknownProblem(ref n) if n == "dtlz9"));
    }
}
