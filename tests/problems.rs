//! Integration tests for the ZDT problems and the registry.

use moea_bench::Error;
use moea_bench::pareto::pareto_front_indices;
use moea_bench::problem::{Problem, Zdt5, get_problem, problem_names};

#[test]
fn test_registry_dimensions() {
    let expected = [
        ("zdt1", 30),
        ("zdt2", 30),
        ("zdt3", 30),
        ("zdt4", 10),
        ("zdt5", 80),
        ("zdt6", 10),
    ];
    for (name, n_var) in expected {
        let p = get_problem(name).unwrap();
        assert_eq!(p.n_var(), n_var, "{name}");
        assert_eq!(p.n_obj(), 2, "{name}");
    }
    assert_eq!(problem_names().len(), expected.len());
}

#[test]
fn test_unknown_problem_name() {
    assert!(matches!(get_problem("zdt7"), Err(Error::UnknownProblem(_))));
}

#[test]
fn test_wrong_length_rejected() {
    for name in problem_names() {
        let p = get_problem(name).unwrap();
        let err = p.evaluate(&[0.5; 3]).unwrap_err();
        assert!(
            matches!(err, Error::DimensionMismatch { got: 3, .. }),
            "{name}: {err}"
        );
    }
}

#[test]
fn test_reference_fronts_are_non_dominated() {
    for name in problem_names() {
        let p = get_problem(name).unwrap();
        let front = p.pareto_front(100).unwrap();
        assert!(!front.is_empty(), "{name}");
        assert!(front.iter().all(|f| f.len() == 2));
        let nd = pareto_front_indices(&front);
        let dominated: Vec<usize> = (0..front.len()).filter(|i| !nd.contains(i)).collect();
        if *name == "zdt3" {
            // The first sample of each later piece is weakly dominated by
            // the end of the piece before it.
            let per_region = front.len() / 5;
            assert!(
                dominated.iter().all(|&i| i > 0 && i % per_region == 0),
                "zdt3 dominated samples {dominated:?}"
            );
        } else {
            assert!(
                dominated.is_empty(),
                "{name} reference front has dominated points {dominated:?}"
            );
        }
    }
}

#[test]
fn test_optimal_decisions_land_on_front() {
    // Tail at its optimum (all zeros); ZDT3 is left out because points
    // between its pieces are dominated.
    for name in ["zdt1", "zdt2", "zdt4", "zdt6"] {
        let p = get_problem(name).unwrap();
        let front = p.pareto_front(1000).unwrap();
        for x1 in [0.1, 0.45, 0.9] {
            let mut x = vec![0.0; p.n_var()];
            x[0] = x1;
            let f = p.evaluate(&x).unwrap();
            let nearest = front
                .iter()
                .map(|r| ((r[0] - f[0]).powi(2) + (r[1] - f[1]).powi(2)).sqrt())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 0.02, "{name} x1={x1}: {f:?} is {nearest} from front");
        }
    }
}

#[test]
fn test_zdt5_normalized_range_on_front() {
    let p = Zdt5::default();
    // Tail bits all set puts g at its minimum; the head bit count walks
    // along the front.
    for ones in 0..=30 {
        let mut x = vec![1.0; 80];
        for gene in &mut x[ones..30] {
            *gene = 0.0;
        }
        let f = p.evaluate(&x).unwrap();
        for v in &f {
            assert!((-1e-12..=1.0 + 1e-12).contains(v), "{ones} head bits: {f:?}");
        }
    }

    // Off the front, f2 exceeds the normalized range.
    let zeros = p.evaluate(&vec![0.0; 80]).unwrap();
    assert!(zeros[1] > 1.0);

    let raw = Zdt5::raw().evaluate(&vec![1.0; 80]).unwrap();
    assert_eq!(raw, vec![31.0, 10.0 / 31.0]);
}
