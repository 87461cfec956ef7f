//! Integration tests for the optimizers and `minimize`.

use moea_bench::algorithm::{
    Decomposition, Moead, Nsga2, Optimizer, PolynomialMutation, Sampling, Sbx, Termination,
    minimize,
};
use moea_bench::pareto::dominates;
use moea_bench::problem::{Problem, Zdt1, Zdt2, Zdt4, get_problem};
use moea_bench::{Error, Result};

fn small_nsga2() -> Nsga2 {
    Nsga2::builder().pop_size(20).build().unwrap()
}

fn small_moead() -> Moead {
    Moead::builder().n_partitions(19).n_neighbors(5).build().unwrap()
}

// ---------------------------------------------------------------------------
// Reproducibility
// ---------------------------------------------------------------------------

#[test]
fn test_nsga2_same_seed_same_result() {
    let problem = get_problem("zdt1").unwrap();
    let a = minimize(problem.as_ref(), &small_nsga2(), Termination::Generations(15), 42).unwrap();
    let b = minimize(problem.as_ref(), &small_nsga2(), Termination::Generations(15), 42).unwrap();
    assert_eq!(a.objectives, b.objectives, "Same seed should produce same results");
    assert_eq!(a.decisions, b.decisions);
}

#[test]
fn test_moead_same_seed_same_result() {
    let problem = get_problem("zdt2").unwrap();
    let a = minimize(problem.as_ref(), &small_moead(), Termination::Generations(15), 7).unwrap();
    let b = minimize(problem.as_ref(), &small_moead(), Termination::Generations(15), 7).unwrap();
    assert_eq!(a.objectives, b.objectives, "Same seed should produce same results");
}

#[test]
fn test_different_seeds_differ() {
    let problem = Zdt1::default();
    for optimizer in [&small_nsga2() as &dyn Optimizer, &small_moead()] {
        let a = minimize(&problem, optimizer, Termination::Generations(10), 1).unwrap();
        let b = minimize(&problem, optimizer, Termination::Generations(10), 2).unwrap();
        assert_ne!(
            a.objectives, b.objectives,
            "Different seeds should produce different results for {}",
            optimizer.name()
        );
    }
}

#[test]
fn test_seed_does_not_change_converged_count() {
    let problem = Zdt1::with_n_var(10);
    let nsga2 = Nsga2::builder().pop_size(24).build().unwrap();
    let a = minimize(&problem, &nsga2, Termination::Generations(250), 1).unwrap();
    let b = minimize(&problem, &nsga2, Termination::Generations(250), 2).unwrap();
    assert_eq!(a.len(), 24);
    assert_eq!(a.len(), b.len());
    assert_ne!(a.objectives, b.objectives);
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

#[test]
fn test_result_never_exceeds_population() {
    let problem = get_problem("zdt3").unwrap();
    for optimizer in [&small_nsga2() as &dyn Optimizer, &small_moead()] {
        let limit = optimizer.population_size(problem.as_ref());
        let res = minimize(problem.as_ref(), optimizer, Termination::Generations(20), 3).unwrap();
        assert!(!res.is_empty());
        assert!(res.len() <= limit, "{} returned {} > {limit}", res.algorithm, res.len());
        assert_eq!(res.decisions.len(), res.len());
    }
}

#[test]
fn test_result_is_mutually_non_dominated() {
    let problem = get_problem("zdt1").unwrap();
    let res = minimize(problem.as_ref(), &small_nsga2(), Termination::Generations(30), 5).unwrap();
    for a in &res.objectives {
        for b in &res.objectives {
            assert!(!dominates(a, b), "{a:?} dominates {b:?}");
        }
    }
}

#[test]
fn test_result_metadata() {
    let problem = get_problem("zdt1").unwrap();
    let res = minimize(problem.as_ref(), &small_moead(), Termination::Generations(4), 9).unwrap();
    assert_eq!(res.algorithm, "MOEA/D");
    assert_eq!(res.problem, "zdt1");
    assert_eq!(res.seed, 9);
    assert_eq!(res.n_gen, 4);
    assert_eq!(res.n_evals, 80);
}

#[test]
fn test_decisions_respect_bounds() {
    let problem = Zdt4::default();
    let res = minimize(&problem, &small_nsga2(), Termination::Generations(20), 11).unwrap();
    for x in &res.decisions {
        for (i, &v) in x.iter().enumerate() {
            let (lo, hi) = problem.bounds(i);
            assert!((lo..=hi).contains(&v), "x[{i}] = {v} outside [{lo}, {hi}]");
        }
    }
}

#[test]
fn test_evaluation_budget() {
    let problem = get_problem("zdt1").unwrap();
    let res = minimize(problem.as_ref(), &small_nsga2(), Termination::Evaluations(90), 1).unwrap();
    // Whole generations only: 20 initial + 4 * 20 offspring.
    assert_eq!(res.n_evals, 100);
    assert_eq!(res.n_gen, 5);
}

#[test]
fn test_single_generation_is_initial_population() {
    let problem = get_problem("zdt1").unwrap();
    let res = minimize(problem.as_ref(), &small_nsga2(), Termination::Generations(1), 1).unwrap();
    assert_eq!(res.n_evals, 20);
}

// ---------------------------------------------------------------------------
// Convergence smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_nsga2_approaches_zdt1_front() {
    let problem = Zdt1::with_n_var(10);
    let nsga2 = Nsga2::builder().pop_size(40).build().unwrap();
    let res = minimize(&problem, &nsga2, Termination::Generations(150), 1).unwrap();
    // On the front f2 = 1 - sqrt(f1); allow a loose band.
    for f in &res.objectives {
        assert!(f[1] < 1.0 - f[0].sqrt() + 0.2, "point {f:?} far from front");
    }
}

#[test]
fn test_moead_decompositions_all_run() {
    let problem = Zdt2::with_n_var(6);
    for decomposition in [
        Decomposition::Tchebycheff,
        Decomposition::WeightedSum,
        Decomposition::Pbi { theta: 5.0 },
    ] {
        let moead = Moead::builder()
            .n_partitions(9)
            .n_neighbors(4)
            .decomposition(decomposition)
            .sampling(Sampling::Random)
            .build()
            .unwrap();
        let res = minimize(&problem, &moead, Termination::Generations(10), 1).unwrap();
        assert!(!res.is_empty() && res.len() <= 10);
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_zero_budget_rejected() {
    let problem = get_problem("zdt1").unwrap();
    for termination in [Termination::Generations(0), Termination::Evaluations(0)] {
        let err = minimize(problem.as_ref(), &small_nsga2(), termination, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidBudget));
    }
}

#[test]
fn test_invalid_configs_rejected() {
    let cases: Vec<Result<()>> = vec![
        Nsga2::builder().pop_size(1).build().map(drop),
        Nsga2::builder().crossover(Sbx::new(1.5, 15.0)).build().map(drop),
        Nsga2::builder().crossover(Sbx::new(0.9, -1.0)).build().map(drop),
        Nsga2::builder().mutation(PolynomialMutation::new(20.0).with_prob(2.0)).build().map(drop),
        Moead::builder().delta(-0.1).build().map(drop),
        Moead::builder().n_neighbors(1).build().map(drop),
        Moead::builder().n_partitions(0).build().map(drop),
    ];
    for (i, case) in cases.into_iter().enumerate() {
        assert!(
            matches!(case, Err(Error::InvalidConfig { .. })),
            "case {i} was not rejected: {case:?}"
        );
    }
}

/// Claims two objectives but returns one.
struct Broken;

impl Problem for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn n_var(&self) -> usize {
        3
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        Ok(vec![x.iter().sum()])
    }
}

#[test]
fn test_wrong_objective_count_aborts_run() {
    let err = minimize(&Broken, &small_nsga2(), Termination::Generations(3), 1).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, got: 1 }));
}
