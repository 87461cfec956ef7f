//! NSGA-II against MOEA/D on one ZDT problem: prints the comparison table
//! and writes `nsga2_vs_moead_<problem>.svg` plus an HTML report.

use moea_bench::prelude::*;
use moea_bench::visualization;

const PROBLEM: &str = "zdt1";
const POP_SIZE: usize = 250;
const N_GEN: usize = 250;
const SEED: u64 = 1;
const REF_POINT: [f64; 2] = [1.1, 1.1];

fn main() -> moea_bench::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let nsga2 = Nsga2::builder()
        .pop_size(POP_SIZE)
        .crossover(Sbx::new(1.0, 2.0))
        .mutation(PolynomialMutation::new(5.0))
        .build()?;

    let moead = Moead::builder()
        .n_partitions(POP_SIZE - 1)
        .n_neighbors(10)
        .delta(0.8)
        .crossover(Sbx::new(1.0, 2.0))
        .mutation(PolynomialMutation::new(5.0))
        .build()?;

    let comparison = Experiment::builder()
        .problem(PROBLEM)
        .n_gen(N_GEN)
        .seed(SEED)
        .reference_point(REF_POINT.to_vec())
        .algorithm("NSGA-II", nsga2)
        .algorithm("MOEA/D", moead)
        .build()?
        .run()?;

    println!("{comparison}");

    let svg = format!("nsga2_vs_moead_{PROBLEM}.svg");
    let html = format!("nsga2_vs_moead_{PROBLEM}.html");
    visualization::save_svg(&comparison, &svg)?;
    visualization::generate_html_report(&comparison, &html)?;
    println!("\nSaved {svg} and {html}");

    Ok(())
}
