//! MOEA/D (Multi-Objective Evolutionary Algorithm based on Decomposition).
//!
//! MOEA/D **decomposes** the problem into one scalar subproblem per
//! Das-Dennis reference direction and solves them together. Each
//! subproblem keeps a single solution; the population size is therefore
//! the number of reference directions.
//!
//! # Algorithm
//!
//! 1. **Decompose**: one reference direction per subproblem, and the `T`
//!    nearest directions (Euclidean distance) form its neighborhood.
//! 2. **Mate**: visit the subproblems in a random order. With probability
//!    `delta` the mating pool is the neighborhood, otherwise the whole
//!    population. Two parents from the pool produce one child via SBX
//!    and polynomial mutation.
//! 3. **Update**: the ideal point absorbs the child, then the child
//!    replaces every neighbor of the visited subproblem whose scalarized
//!    value it improves. Members outside the neighborhood are left alone
//!    even when they served as parents.
//!
//! # Scalarization methods
//!
//! | Method | Formula | Best for |
//! |--------|---------|----------|
//! | [`Tchebycheff`](Decomposition::Tchebycheff) (default) | `max(wᵢ * \|fᵢ - zᵢ*\|)` | General purpose, handles non-convex fronts |
//! | [`WeightedSum`](Decomposition::WeightedSum) | `Σ(wᵢ * fᵢ)` | Convex Pareto fronts only |
//! | [`Pbi`](Decomposition::Pbi) | `d₁ + θ * d₂` | Fine-grained convergence/diversity control |
//!
//! # Configuration
//!
//! | Parameter | Builder method | Default |
//! |-----------|---------------|---------|
//! | Partitions per objective | [`n_partitions`](MoeadBuilder::n_partitions) | 99 |
//! | Neighborhood size (T) | [`n_neighbors`](MoeadBuilder::n_neighbors) | 20 |
//! | Neighbor mating probability | [`delta`](MoeadBuilder::delta) | 0.9 |
//! | Decomposition method | [`decomposition`](MoeadBuilder::decomposition) | Tchebycheff |
//! | Initial sampling | [`sampling`](MoeadBuilder::sampling) | Latin hypercube |
//! | Crossover | [`crossover`](MoeadBuilder::crossover) | SBX, prob 1.0, eta 20 |
//! | Mutation | [`mutation`](MoeadBuilder::mutation) | polynomial, eta 20, prob `1 / n_var` |
//!
//! # Examples
//!
//! ```
//! use moea_bench::algorithm::{Moead, Optimizer};
//! use moea_bench::problem::get_problem;
//!
//! let moead = Moead::builder().n_partitions(49).n_neighbors(10).build().unwrap();
//! let problem = get_problem("zdt1").unwrap();
//! assert_eq!(moead.population_size(problem.as_ref()), 50);
//! ```

use core::cmp::Ordering;

use super::operators::{
    PolynomialMutation, Sampling, Sbx, check_positive, check_probability, das_dennis,
};
use super::{Budget, Optimizer, Population, Termination, bounds_of, evaluate, evaluate_all};
use crate::error::{Error, Result};
use crate::problem::Problem;

/// Decomposition (scalarization) method for [`Moead`].
///
/// Control how an objective vector is reduced to a single scalar for
/// each subproblem. The default is [`Tchebycheff`](Self::Tchebycheff),
/// which handles both convex and non-convex Pareto fronts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decomposition {
    /// Weighted sum: `Σ(wᵢ * fᵢ)`.
    ///
    /// Can only find solutions on convex regions of the Pareto front.
    WeightedSum,
    /// Tchebycheff: `max(wᵢ * |fᵢ - zᵢ*|)`.
    #[default]
    Tchebycheff,
    /// Penalty-based Boundary Intersection: `d₁ + θ * d₂`.
    ///
    /// Higher `theta` favors solutions closer to the weight direction.
    Pbi {
        /// Penalty on the perpendicular distance `d₂`.
        theta: f64,
    },
}

impl Decomposition {
    /// Scalar value of `values` for the subproblem with weight `weight`.
    #[must_use]
    pub fn scalarize(&self, values: &[f64], weight: &[f64], ideal: &[f64]) -> f64 {
        match *self {
            Decomposition::WeightedSum => scalarize_weighted_sum(values, weight),
            Decomposition::Tchebycheff => scalarize_tchebycheff(values, weight, ideal),
            Decomposition::Pbi { theta } => scalarize_pbi(values, weight, ideal, theta),
        }
    }
}

/// MOEA/D optimizer.
///
/// Create with [`Moead::builder`].
#[derive(Clone, Debug)]
pub struct Moead {
    n_partitions: usize,
    n_neighbors: usize,
    delta: f64,
    decomposition: Decomposition,
    sampling: Sampling,
    crossover: Sbx,
    mutation: PolynomialMutation,
}

impl Moead {
    /// Creates a builder for configuring a `Moead`.
    #[must_use]
    pub fn builder() -> MoeadBuilder {
        MoeadBuilder::default()
    }

    /// Configured neighborhood size.
    #[must_use]
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Configured decomposition method.
    #[must_use]
    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }

    /// Reference directions for a problem with `n_obj` objectives.
    #[must_use]
    pub fn ref_dirs(&self, n_obj: usize) -> Vec<Vec<f64>> {
        das_dennis(n_obj, self.n_partitions)
    }
}

/// Builder for [`Moead`].
#[derive(Debug, Clone, Default)]
pub struct MoeadBuilder {
    n_partitions: Option<usize>,
    n_neighbors: Option<usize>,
    delta: Option<f64>,
    decomposition: Decomposition,
    sampling: Sampling,
    crossover: Option<Sbx>,
    mutation: Option<PolynomialMutation>,
}

impl MoeadBuilder {
    /// Sets the Das-Dennis partitions per objective. Default: 99, which
    /// gives 100 directions for two objectives.
    #[must_use]
    pub fn n_partitions(mut self, partitions: usize) -> Self {
        self.n_partitions = Some(partitions);
        self
    }

    /// Sets the neighborhood size (T). Default: 20. Capped at the
    /// population size when the optimizer runs.
    #[must_use]
    pub fn n_neighbors(mut self, size: usize) -> Self {
        self.n_neighbors = Some(size);
        self
    }

    /// Sets the probability of mating inside the neighborhood. Default: 0.9.
    #[must_use]
    pub fn delta(mut self, prob: f64) -> Self {
        self.delta = Some(prob);
        self
    }

    /// Sets the decomposition method. Default: Tchebycheff.
    #[must_use]
    pub fn decomposition(mut self, decomp: Decomposition) -> Self {
        self.decomposition = decomp;
        self
    }

    /// Sets the initial sampling strategy. Default: Latin hypercube.
    #[must_use]
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the crossover operator. Default: `Sbx::new(1.0, 20.0)`.
    #[must_use]
    pub fn crossover(mut self, sbx: Sbx) -> Self {
        self.crossover = Some(sbx);
        self
    }

    /// Sets the mutation operator. Default: `PolynomialMutation::new(20.0)`.
    #[must_use]
    pub fn mutation(mut self, pm: PolynomialMutation) -> Self {
        self.mutation = Some(pm);
        self
    }

    /// Builds the configured [`Moead`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for zero partitions, an empty
    /// neighborhood, or an out-of-range probability or operator setting.
    pub fn build(self) -> Result<Moead> {
        let n_partitions = self.n_partitions.unwrap_or(99);
        if n_partitions == 0 {
            return Err(Error::config("n_partitions", "must be at least 1"));
        }
        let n_neighbors = self.n_neighbors.unwrap_or(20);
        if n_neighbors < 2 {
            return Err(Error::config(
                "n_neighbors",
                format!("must be at least 2, got {n_neighbors}"),
            ));
        }
        let delta = self.delta.unwrap_or(0.9);
        check_probability("delta", delta)?;
        if let Decomposition::Pbi { theta } = self.decomposition {
            check_positive("decomposition.theta", theta)?;
        }
        let crossover = self.crossover.unwrap_or_else(|| Sbx::new(1.0, 20.0));
        crossover.validate()?;
        let mutation = self.mutation.unwrap_or_default();
        mutation.validate()?;

        Ok(Moead {
            n_partitions,
            n_neighbors,
            delta,
            decomposition: self.decomposition,
            sampling: self.sampling,
            crossover,
            mutation,
        })
    }
}

impl Optimizer for Moead {
    fn name(&self) -> &str {
        "MOEA/D"
    }

    fn population_size(&self, problem: &dyn Problem) -> usize {
        self.ref_dirs(problem.n_obj()).len()
    }

    fn run(
        &self,
        problem: &dyn Problem,
        termination: Termination,
        seed: u64,
    ) -> Result<Population> {
        termination.validate()?;

        let ref_dirs = self.ref_dirs(problem.n_obj());
        let pop_size = ref_dirs.len();
        if pop_size < 2 {
            return Err(Error::config(
                "n_partitions",
                format!("yields {pop_size} reference directions, need at least 2"),
            ));
        }
        let neighborhoods = compute_neighborhoods(&ref_dirs, self.n_neighbors.min(pop_size));

        let mut rng = fastrand::Rng::with_seed(seed);
        let bounds = bounds_of(problem);
        let mut budget = Budget::new(termination);

        let mut decisions = self.sampling.sample(&mut rng, &bounds, pop_size);
        let mut objectives = evaluate_all(problem, &decisions)?;
        budget.record(pop_size);

        let mut ideal = vec![f64::INFINITY; problem.n_obj()];
        for f in &objectives {
            update_ideal(&mut ideal, f);
        }

        let all: Vec<usize> = (0..pop_size).collect();
        let mut order: Vec<usize> = (0..pop_size).collect();

        while !budget.exhausted() {
            rng.shuffle(&mut order);

            for &i in &order {
                let pool = if rng.f64() < self.delta {
                    &neighborhoods[i]
                } else {
                    &all
                };

                let (p1, p2) = pick_parents(&mut rng, pool);
                let (c1, c2) = self
                    .crossover
                    .apply(&mut rng, &decisions[p1], &decisions[p2], &bounds);
                let mut child = if rng.bool() { c1 } else { c2 };
                self.mutation.apply(&mut rng, &mut child, &bounds);

                let child_f = evaluate(problem, &child)?;
                update_ideal(&mut ideal, &child_f);

                let improved = improved_neighbors(
                    self.decomposition,
                    &neighborhoods[i],
                    &child_f,
                    &objectives,
                    &ref_dirs,
                    &ideal,
                );
                for j in improved {
                    decisions[j].clone_from(&child);
                    objectives[j].clone_from(&child_f);
                }
            }

            budget.record(pop_size);
            trace_debug!(generation = budget.n_gen, ideal = ?ideal, "moead generation");
        }

        Ok(Population {
            decisions,
            objectives,
            n_gen: budget.n_gen,
            n_evals: budget.n_evals,
        })
    }
}

/// Members of `neighbors` on whose subproblem `child_f` scalarizes strictly
/// lower than the current solution.
fn improved_neighbors(
    decomposition: Decomposition,
    neighbors: &[usize],
    child_f: &[f64],
    objectives: &[Vec<f64>],
    ref_dirs: &[Vec<f64>],
    ideal: &[f64],
) -> Vec<usize> {
    neighbors
        .iter()
        .copied()
        .filter(|&j| {
            let current = decomposition.scalarize(&objectives[j], &ref_dirs[j], ideal);
            decomposition.scalarize(child_f, &ref_dirs[j], ideal) < current
        })
        .collect()
}

/// Two distinct members of `pool`, or the same one twice for a pool of one.
fn pick_parents(rng: &mut fastrand::Rng, pool: &[usize]) -> (usize, usize) {
    let n = pool.len();
    if n < 2 {
        return (pool[0], pool[0]);
    }
    let a = rng.usize(0..n);
    let mut b = rng.usize(0..n - 1);
    if b >= a {
        b += 1;
    }
    (pool[a], pool[b])
}

fn update_ideal(ideal: &mut [f64], f: &[f64]) {
    for (z, &v) in ideal.iter_mut().zip(f) {
        if v < *z {
            *z = v;
        }
    }
}

/// Compute T-nearest neighborhoods by Euclidean distance between weight vectors.
fn compute_neighborhoods(weights: &[Vec<f64>], t: usize) -> Vec<Vec<usize>> {
    weights
        .iter()
        .map(|wi| {
            let mut distances: Vec<(usize, f64)> = weights
                .iter()
                .enumerate()
                .map(|(j, wj)| {
                    let d = wi
                        .iter()
                        .zip(wj)
                        .map(|(&a, &b)| (a - b).powi(2))
                        .sum::<f64>()
                        .sqrt();
                    (j, d)
                })
                .collect();
            distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
            distances.into_iter().take(t).map(|(idx, _)| idx).collect()
        })
        .collect()
}

fn scalarize_weighted_sum(values: &[f64], weight: &[f64]) -> f64 {
    values.iter().zip(weight).map(|(&v, &w)| w * v).sum()
}

/// Zero weights are lifted to `1e-6` so no objective is ignored.
fn scalarize_tchebycheff(values: &[f64], weight: &[f64], ideal: &[f64]) -> f64 {
    values
        .iter()
        .zip(weight)
        .zip(ideal)
        .map(|((&v, &w), &z)| w.max(1e-6) * (v - z).abs())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// `d1` is the projection onto the weight direction, `d2` the
/// perpendicular distance to it.
fn scalarize_pbi(values: &[f64], weight: &[f64], ideal: &[f64], theta: f64) -> f64 {
    let diff: Vec<f64> = values.iter().zip(ideal).map(|(&v, &z)| v - z).collect();

    let w_norm: f64 = weight.iter().map(|&w| w * w).sum::<f64>().sqrt();
    if w_norm < 1e-30 {
        return f64::INFINITY;
    }
    let w_unit: Vec<f64> = weight.iter().map(|&w| w / w_norm).collect();

    let d1: f64 = diff.iter().zip(&w_unit).map(|(&d, &w)| d * w).sum();
    let d2 = diff
        .iter()
        .zip(&w_unit)
        .map(|(&d, &w)| (d - d1 * w).powi(2))
        .sum::<f64>()
        .sqrt();

    d1 + theta * d2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Zdt1;

    #[test]
    fn test_scalarize_weighted_sum() {
        let values = [1.0, 2.0, 3.0];
        let weight = [0.5, 0.3, 0.2];
        let result = scalarize_weighted_sum(&values, &weight);
        assert!((result - (0.5 + 0.6 + 0.6)).abs() < 1e-10);
    }

    #[test]
    fn test_scalarize_tchebycheff() {
        let values = [3.0, 2.0];
        let weight = [0.5, 0.5];
        let ideal = [1.0, 1.0];
        let result = scalarize_tchebycheff(&values, &weight, &ideal);
        // max(0.5 * |3-1|, 0.5 * |2-1|) = 1.0
        assert!((result - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_tchebycheff_zero_weight_still_counts() {
        let a = scalarize_tchebycheff(&[0.0, 5.0], &[1.0, 0.0], &[0.0, 0.0]);
        let b = scalarize_tchebycheff(&[0.0, 6.0], &[1.0, 0.0], &[0.0, 0.0]);
        assert!(a < b);
    }

    #[test]
    fn test_scalarize_pbi() {
        let values = [2.0, 2.0];
        let weight = [1.0, 1.0];
        let ideal = [0.0, 0.0];
        let result = scalarize_pbi(&values, &weight, &ideal, 5.0);
        // On the weight direction, so d2 = 0 and d1 = 2√2.
        let expected_d1 = 2.0 * (2.0_f64).sqrt();
        assert!((result - expected_d1).abs() < 1e-10);
    }

    #[test]
    fn test_compute_neighborhoods() {
        let weights = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]];
        let neighborhoods = compute_neighborhoods(&weights, 2);
        assert_eq!(neighborhoods.len(), 3);
        for n in &neighborhoods {
            assert_eq!(n.len(), 2);
        }
        assert_eq!(neighborhoods[0], vec![0, 1]);
    }

    #[test]
    fn test_improvement_stays_in_neighborhood() {
        let ref_dirs = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]];
        let objectives = vec![vec![5.0, 5.0]; 3];
        let ideal = [0.0, 0.0];
        let child_f = [0.1, 0.1];

        // The child beats every subproblem, only the neighbors take it.
        let improved = improved_neighbors(
            Decomposition::Tchebycheff,
            &[0, 1],
            &child_f,
            &objectives,
            &ref_dirs,
            &ideal,
        );
        assert_eq!(improved, vec![0, 1]);

        let worse = improved_neighbors(
            Decomposition::Tchebycheff,
            &[0, 1, 2],
            &[9.0, 9.0],
            &objectives,
            &ref_dirs,
            &ideal,
        );
        assert!(worse.is_empty());
    }

    #[test]
    fn test_pick_parents_distinct() {
        let mut rng = fastrand::Rng::with_seed(4);
        let pool = [7, 8, 9];
        for _ in 0..100 {
            let (a, b) = pick_parents(&mut rng, &pool);
            assert_ne!(a, b);
            assert!(pool.contains(&a) && pool.contains(&b));
        }
        assert_eq!(pick_parents(&mut rng, &[3]), (3, 3));
    }

    #[test]
    fn test_population_is_number_of_ref_dirs() {
        let moead = Moead::builder().n_partitions(11).n_neighbors(5).build().unwrap();
        let problem = Zdt1::with_n_var(5);
        assert_eq!(moead.population_size(&problem), 12);

        let pop = moead.run(&problem, Termination::Generations(3), 1).unwrap();
        assert_eq!(pop.objectives.len(), 12);
        assert_eq!(pop.n_gen, 3);
        assert_eq!(pop.n_evals, 36);
    }

    #[test]
    fn test_ideal_point_tracks_minimum() {
        let mut ideal = vec![f64::INFINITY; 2];
        update_ideal(&mut ideal, &[0.4, 0.9]);
        update_ideal(&mut ideal, &[0.6, 0.1]);
        assert_eq!(ideal, vec![0.4, 0.1]);
    }

    #[test]
    fn test_builder_validation() {
        assert!(Moead::builder().n_neighbors(1).build().is_err());
        assert!(Moead::builder().n_partitions(0).build().is_err());
        assert!(Moead::builder().delta(1.5).build().is_err());
        assert!(
            Moead::builder()
                .decomposition(Decomposition::Pbi { theta: -1.0 })
                .build()
                .is_err()
        );
        let moead = Moead::builder().build().unwrap();
        assert_eq!(moead.n_neighbors(), 20);
        assert_eq!(moead.decomposition(), Decomposition::Tchebycheff);
    }
}
