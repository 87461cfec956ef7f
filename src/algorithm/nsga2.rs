//! NSGA-II (Non-dominated Sorting Genetic Algorithm II).
//!
//! Each generation creates `pop_size` offspring by binary tournament,
//! SBX crossover and polynomial mutation, merges them with the parents,
//! and keeps the best `pop_size` members by non-dominated rank, breaking
//! ties on the last admitted front by crowding distance.
//!
//! # Configuration
//!
//! | Parameter | Builder method | Default |
//! |-----------|---------------|---------|
//! | Population size | [`pop_size`](Nsga2Builder::pop_size) | 100 |
//! | Initial sampling | [`sampling`](Nsga2Builder::sampling) | Latin hypercube |
//! | Crossover | [`crossover`](Nsga2Builder::crossover) | SBX, prob 0.9, eta 15 |
//! | Mutation | [`mutation`](Nsga2Builder::mutation) | polynomial, eta 20, prob `1 / n_var` |
//! | Duplicate elimination | [`eliminate_duplicates`](Nsga2Builder::eliminate_duplicates) | on |
//!
//! # Examples
//!
//! ```
//! use moea_bench::algorithm::{Nsga2, PolynomialMutation, Sbx};
//!
//! let nsga2 = Nsga2::builder()
//!     .pop_size(300)
//!     .crossover(Sbx::new(0.8, 8.0))
//!     .mutation(PolynomialMutation::new(12.0))
//!     .build()
//!     .unwrap();
//! # let _ = nsga2;
//! ```

use core::cmp::Ordering;

use super::operators::{PolynomialMutation, Sampling, Sbx, SeenSet};
use super::{Budget, Optimizer, Population, Termination, bounds_of, evaluate_all};
use crate::error::{Error, Result};
use crate::pareto;
use crate::problem::Problem;

/// Mating attempts per offspring before duplicates are let through.
const MAX_MATING_ATTEMPTS: usize = 100;

/// NSGA-II optimizer.
///
/// Create with [`Nsga2::builder`].
#[derive(Clone, Debug)]
pub struct Nsga2 {
    pop_size: usize,
    sampling: Sampling,
    crossover: Sbx,
    mutation: PolynomialMutation,
    eliminate_duplicates: bool,
}

impl Nsga2 {
    /// Creates a builder for configuring an `Nsga2`.
    #[must_use]
    pub fn builder() -> Nsga2Builder {
        Nsga2Builder::default()
    }

    /// Configured population size.
    #[must_use]
    pub fn pop_size(&self) -> usize {
        self.pop_size
    }

    /// Configured crossover.
    #[must_use]
    pub fn crossover(&self) -> &Sbx {
        &self.crossover
    }

    /// Configured mutation.
    #[must_use]
    pub fn mutation(&self) -> &PolynomialMutation {
        &self.mutation
    }
}

/// Builder for [`Nsga2`].
#[derive(Clone, Debug, Default)]
pub struct Nsga2Builder {
    pop_size: Option<usize>,
    sampling: Sampling,
    crossover: Option<Sbx>,
    mutation: Option<PolynomialMutation>,
    keep_duplicates: bool,
}

impl Nsga2Builder {
    /// Sets the population size. Default: 100.
    #[must_use]
    pub fn pop_size(mut self, size: usize) -> Self {
        self.pop_size = Some(size);
        self
    }

    /// Sets the initial sampling strategy. Default: Latin hypercube.
    #[must_use]
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the crossover operator. Default: `Sbx::new(0.9, 15.0)`.
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

    /// Rejects offspring identical to a parent or a sibling. Default: on.
    #[must_use]
    pub fn eliminate_duplicates(mut self, on: bool) -> Self {
        self.keep_duplicates = !on;
        self
    }

    /// Builds the configured [`Nsga2`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the population has fewer than two
    /// members or an operator setting is out of range.
    pub fn build(self) -> Result<Nsga2> {
        let pop_size = self.pop_size.unwrap_or(100);
        if pop_size < 2 {
            return Err(Error::config(
                "pop_size",
                format!("must be at least 2, got {pop_size}"),
            ));
        }
        let crossover = self.crossover.unwrap_or_default();
        crossover.validate()?;
        let mutation = self.mutation.unwrap_or_default();
        mutation.validate()?;

        Ok(Nsga2 {
            pop_size,
            sampling: self.sampling,
            crossover,
            mutation,
            eliminate_duplicates: !self.keep_duplicates,
        })
    }
}

impl Optimizer for Nsga2 {
    fn name(&self) -> &str {
        "NSGA-II"
    }

    fn population_size(&self, _problem: &dyn Problem) -> usize {
        self.pop_size
    }

    fn run(
        &self,
        problem: &dyn Problem,
        termination: Termination,
        seed: u64,
    ) -> Result<Population> {
        termination.validate()?;

        let mut rng = fastrand::Rng::with_seed(seed);
        let bounds = bounds_of(problem);
        let mut budget = Budget::new(termination);

        let mut decisions = self.sampling.sample(&mut rng, &bounds, self.pop_size);
        let mut objectives = evaluate_all(problem, &decisions)?;
        budget.record(decisions.len());

        let mut survivors = rank_and_crowd(&objectives);

        while !budget.exhausted() {
            let offspring = self.mate(&mut rng, &decisions, &survivors, &bounds);
            let offspring_f = evaluate_all(problem, &offspring)?;
            budget.record(offspring.len());

            decisions.extend(offspring);
            objectives.extend(offspring_f);

            let selection = survive(&objectives, self.pop_size);
            decisions = selection.indices.iter().map(|&i| decisions[i].clone()).collect();
            objectives = selection.indices.iter().map(|&i| objectives[i].clone()).collect();
            survivors = selection;

            trace_debug!(
                generation = budget.n_gen,
                first_front = survivors.rank.iter().filter(|&&r| r == 0).count(),
                "nsga2 generation"
            );
        }

        Ok(Population {
            decisions,
            objectives,
            n_gen: budget.n_gen,
            n_evals: budget.n_evals,
        })
    }
}

impl Nsga2 {
    /// Produce `pop_size` offspring from the current population.
    fn mate(
        &self,
        rng: &mut fastrand::Rng,
        population: &[Vec<f64>],
        survivors: &Selection,
        bounds: &[(f64, f64)],
    ) -> Vec<Vec<f64>> {
        let n = self.pop_size;
        let mut seen = SeenSet::from_population(population);
        let mut offspring = Vec::with_capacity(n);
        let mut attempts = 0;

        while offspring.len() < n {
            attempts += 1;
            let p1 = tournament_select(rng, &survivors.rank, &survivors.crowding);
            let p2 = tournament_select(rng, &survivors.rank, &survivors.crowding);

            let (mut c1, mut c2) = self
                .crossover
                .apply(rng, &population[p1], &population[p2], bounds);
            self.mutation.apply(rng, &mut c1, bounds);
            self.mutation.apply(rng, &mut c2, bounds);

            let give_up = attempts > n * MAX_MATING_ATTEMPTS;
            for child in [c1, c2] {
                if offspring.len() == n {
                    break;
                }
                if seen.insert(&child) || !self.eliminate_duplicates || give_up {
                    offspring.push(child);
                }
            }
        }

        offspring
    }
}

/// Survivors of one generation with the rank and crowding distance they
/// were selected with.
#[derive(Debug, Default)]
struct Selection {
    indices: Vec<usize>,
    rank: Vec<usize>,
    crowding: Vec<f64>,
}

/// Rank and crowding distance of a whole population, no truncation.
fn rank_and_crowd(objectives: &[Vec<f64>]) -> Selection {
    survive(objectives, objectives.len())
}

/// Keep the best `n` members by rank, then crowding distance.
fn survive(objectives: &[Vec<f64>], n: usize) -> Selection {
    let fronts = pareto::non_dominated_sort(objectives);
    let mut selection = Selection::default();

    for (rank, front) in fronts.iter().enumerate() {
        let remaining = n - selection.indices.len();
        if remaining == 0 {
            break;
        }

        let cd = pareto::crowding_distance_indexed(front, objectives);
        let mut members: Vec<(usize, f64)> = front.iter().copied().zip(cd).collect();
        if members.len() > remaining {
            members.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            members.truncate(remaining);
        }

        for (idx, dist) in members {
            selection.indices.push(idx);
            selection.rank.push(rank);
            selection.crowding.push(dist);
        }
    }

    selection
}

/// Binary tournament: lower rank wins, ties go to the larger crowding distance.
fn tournament_select(rng: &mut fastrand::Rng, ranks: &[usize], crowding: &[f64]) -> usize {
    let n = ranks.len();
    let a = rng.usize(0..n);
    let b = rng.usize(0..n);

    match ranks[a].cmp(&ranks[b]) {
        Ordering::Less => a,
        Ordering::Greater => b,
        Ordering::Equal => {
            if crowding[a] >= crowding[b] {
                a
            } else {
                b
            }
        }
    }
}
