//! Variation operators shared by the evolutionary optimizers.
//!
//! This module holds the building blocks NSGA-II and MOEA/D have in
//! common: initial sampling, SBX crossover, polynomial mutation,
//! duplicate detection, and Das-Dennis reference directions.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::rng_util;

/// How the initial population is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sampling {
    /// Independent uniform draws inside the variable bounds.
    Random,
    /// Latin hypercube: each variable's range is cut into `n` equal
    /// strata and every stratum is used exactly once.
    #[default]
    LatinHypercube,
}

impl Sampling {
    /// Draw `n` decision vectors inside `bounds`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn sample(
        self,
        rng: &mut fastrand::Rng,
        bounds: &[(f64, f64)],
        n: usize,
    ) -> Vec<Vec<f64>> {
        match self {
            Sampling::Random => (0..n)
                .map(|_| {
                    bounds
                        .iter()
                        .map(|&(lo, hi)| rng_util::f64_range(rng, lo, hi))
                        .collect()
                })
                .collect(),
            Sampling::LatinHypercube => {
                let mut population = vec![Vec::with_capacity(bounds.len()); n];
                for &(lo, hi) in bounds {
                    let mut strata: Vec<usize> = (0..n).collect();
                    rng.shuffle(&mut strata);
                    for (individual, &s) in population.iter_mut().zip(&strata) {
                        let u = (s as f64 + rng.f64()) / n as f64;
                        individual.push(lo + u * (hi - lo));
                    }
                }
                population
            }
        }
    }
}

/// Simulated binary crossover (SBX) settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sbx {
    /// Probability that a mating pair is recombined at all.
    pub prob: f64,
    /// Distribution index; larger values keep children closer to parents.
    pub eta: f64,
    /// Probability that an individual variable is recombined.
    pub prob_var: f64,
}

impl Sbx {
    /// SBX with the given pair probability and distribution index.
    #[must_use]
    pub fn new(prob: f64, eta: f64) -> Self {
        Self {
            prob,
            eta,
            prob_var: 0.5,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_probability("crossover.prob", self.prob)?;
        check_probability("crossover.prob_var", self.prob_var)?;
        check_positive("crossover.eta", self.eta)
    }

    /// Recombine two parents into two children.
    pub(crate) fn apply(
        &self,
        rng: &mut fastrand::Rng,
        parent1: &[f64],
        parent2: &[f64],
        bounds: &[(f64, f64)],
    ) -> (Vec<f64>, Vec<f64>) {
        let mut child1 = parent1.to_vec();
        let mut child2 = parent2.to_vec();

        if rng_util::coin(rng) >= self.prob {
            return (child1, child2);
        }

        for (i, &(lo, hi)) in bounds.iter().enumerate() {
            if rng_util::coin(rng) >= self.prob_var || (parent1[i] - parent2[i]).abs() < 1e-14 {
                continue;
            }
            let (c1, c2) = sbx_pair(rng, parent1[i], parent2[i], lo, hi, self.eta);
            // Children swap sides half the time.
            if rng_util::coin(rng) < 0.5 {
                child1[i] = c2;
                child2[i] = c1;
            } else {
                child1[i] = c1;
                child2[i] = c2;
            }
        }

        (child1, child2)
    }
}

impl Default for Sbx {
    fn default() -> Self {
        Self::new(0.9, 15.0)
    }
}

fn sbx_pair(
    rng: &mut fastrand::Rng,
    p1: f64,
    p2: f64,
    low: f64,
    high: f64,
    eta: f64,
) -> (f64, f64) {
    let u = rng_util::coin(rng);

    let beta = if u <= 0.5 {
        (2.0 * u).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
    };

    let c1 = 0.5 * ((1.0 + beta) * p1 + (1.0 - beta) * p2);
    let c2 = 0.5 * ((1.0 - beta) * p1 + (1.0 + beta) * p2);

    (c1.clamp(low, high), c2.clamp(low, high))
}

/// Polynomial mutation settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolynomialMutation {
    /// Distribution index; larger values give smaller perturbations.
    pub eta: f64,
    /// Per-variable mutation probability. `None` means `1 / n_var`.
    pub prob: Option<f64>,
}

impl PolynomialMutation {
    /// Polynomial mutation with per-variable probability `1 / n_var`.
    #[must_use]
    pub fn new(eta: f64) -> Self {
        Self { eta, prob: None }
    }

    /// Sets an explicit per-variable mutation probability.
    #[must_use]
    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = Some(prob);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_positive("mutation.eta", self.eta)?;
        match self.prob {
            Some(p) => check_probability("mutation.prob", p),
            None => Ok(()),
        }
    }

    /// Mutate `individual` in place.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn apply(
        &self,
        rng: &mut fastrand::Rng,
        individual: &mut [f64],
        bounds: &[(f64, f64)],
    ) {
        let n = individual.len();
        if n == 0 {
            return;
        }
        let prob = self.prob.unwrap_or(1.0 / n as f64);

        for (value, &(lo, hi)) in individual.iter_mut().zip(bounds) {
            if rng_util::coin(rng) >= prob {
                continue;
            }
            *value = polynomial_mutation_f64(rng, *value, lo, hi, self.eta);
        }
    }
}

impl Default for PolynomialMutation {
    fn default() -> Self {
        Self::new(20.0)
    }
}

fn polynomial_mutation_f64(rng: &mut fastrand::Rng, x: f64, low: f64, high: f64, eta: f64) -> f64 {
    let u = rng_util::coin(rng);
    let range = high - low;
    if range <= 0.0 {
        return x;
    }

    let delta1 = (x - low) / range;
    let delta2 = (high - x) / range;

    let delta_q = if u < 0.5 {
        let xy = 1.0 - delta1;
        let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
        val.powf(1.0 / (eta + 1.0)) - 1.0
    } else {
        let xy = 1.0 - delta2;
        let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
        1.0 - val.powf(1.0 / (eta + 1.0))
    };

    (x + delta_q * range).clamp(low, high)
}

/// Exact-match set of decision vectors, keyed by their bit patterns.
#[derive(Default)]
pub(crate) struct SeenSet(HashSet<Vec<u64>>);

impl SeenSet {
    pub(crate) fn from_population(population: &[Vec<f64>]) -> Self {
        let mut seen = Self::default();
        for x in population {
            seen.insert(x);
        }
        seen
    }

    /// Returns `true` if `x` was not present before.
    pub(crate) fn insert(&mut self, x: &[f64]) -> bool {
        self.0.insert(x.iter().map(|v| v.to_bits()).collect())
    }
}

/// Generate Das-Dennis (simplex-lattice) reference directions.
///
/// Returns `C(H + M - 1, M - 1)` evenly spaced points on the
/// `M`-dimensional unit simplex, where `M = n_objectives` and
/// `H = partitions`.
#[must_use]
pub fn das_dennis(n_objectives: usize, partitions: usize) -> Vec<Vec<f64>> {
    if n_objectives == 0 || partitions == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(n_combinations(
        partitions + n_objectives - 1,
        n_objectives - 1,
    ));
    let mut point = vec![0.0_f64; n_objectives];
    das_dennis_recursive(n_objectives, partitions, 0, partitions, &mut point, &mut points);
    points
}

#[allow(clippy::cast_precision_loss)]
fn das_dennis_recursive(
    n_objectives: usize,
    partitions: usize,
    depth: usize,
    remaining: usize,
    current: &mut Vec<f64>,
    result: &mut Vec<Vec<f64>>,
) {
    if depth == n_objectives - 1 {
        current[depth] = remaining as f64 / partitions as f64;
        result.push(current.clone());
        return;
    }

    for i in 0..=remaining {
        current[depth] = i as f64 / partitions as f64;
        das_dennis_recursive(n_objectives, partitions, depth + 1, remaining - i, current, result);
    }
}

/// `C(n, k)`.
pub(crate) fn n_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

pub(crate) fn check_probability(field: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::config(field, format!("must be in [0, 1], got {p}")))
    }
}

pub(crate) fn check_positive(field: &'static str, v: f64) -> Result<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(Error::config(field, format!("must be a positive number, got {v}")))
    }
}
