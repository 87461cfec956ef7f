//! MOEA/D on one ZDT problem: prints the run summary and writes
//! `moead_<problem>.svg`.

use moea_bench::prelude::*;
use moea_bench::problem::DEFAULT_FRONT_POINTS;
use moea_bench::visualization;

const PROBLEM: &str = "zdt1";
const N_PARTITIONS: usize = 200;
const N_GEN: usize = 250;
const SEED: u64 = 1;
const REF_POINT: [f64; 2] = [1.1, 1.1];

fn main() -> moea_bench::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let problem = get_problem(PROBLEM)?;
    let moead = Moead::builder()
        .n_partitions(N_PARTITIONS)
        .n_neighbors(10)
        .delta(0.7)
        .decomposition(Decomposition::Tchebycheff)
        .sampling(Sampling::LatinHypercube)
        .crossover(Sbx::new(0.8, 8.0))
        .mutation(PolynomialMutation::new(12.0))
        .build()?;

    let res = minimize(problem.as_ref(), &moead, Termination::Generations(N_GEN), SEED)?;
    let front = problem.pareto_front(DEFAULT_FRONT_POINTS);

    println!("MOEA/D on {PROBLEM}: {} points x {} objectives", res.len(), problem.n_obj());
    if let Some(pf) = &front {
        println!("IGD:      {:.6}", Igd::new(pf.clone())?.score(&res.objectives)?);
    } else {
        println!("IGD:      n/a");
    }
    println!("HV:       {:.6}", Hypervolume::new(REF_POINT.to_vec())?.score(&res.objectives)?);
    println!("Time (s): {:.2}", res.elapsed.as_secs_f64());

    let svg = format!("moead_{PROBLEM}.svg");
    visualization::save_front_svg(&res, front.as_deref(), &svg)?;
    println!("Saved {svg}");

    Ok(())
}
