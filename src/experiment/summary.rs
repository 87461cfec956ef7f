use core::fmt::{self, Write as _};

use super::{Comparison, Metric};

impl Comparison {
    /// Return a human-readable comparison table.
    ///
    /// The summary lists, per run, the number of returned points and their
    /// dimensionality, followed by one row per [`Metric`] with each run's
    /// value and the verdict.
    ///
    /// ```text
    /// Problem: zdt1 (30 variables, 2 objectives) | 250 generations | seed 1
    /// NSGA-II: 250 points x 2 objectives
    /// MOEA/D: 100 points x 2 objectives
    ///
    /// Metric    NSGA-II     MOEA/D      Better
    /// IGD       0.004731    0.004102    MOEA/D
    /// HV        0.870112    0.871034    MOEA/D
    /// Time (s)  2.310000    0.902000    MOEA/D
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        let mut s = format!(
            "Problem: {} ({} variables, {} objectives) | {} generations | seed {}",
            self.problem.name, self.problem.n_var, self.problem.n_obj, self.n_gen, self.seed
        );
        for run in &self.runs {
            let dims = run.result.objectives.first().map_or(self.problem.n_obj, Vec::len);
            let _ = write!(s, "\n{}: {} points x {dims} objectives", run.label, run.result.len());
        }

        let metric_w = Metric::ALL.iter().map(|m| m.name().len()).max().unwrap_or(0) + 2;
        let col_w = self
            .runs
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0)
            .max(10)
            + 2;

        let _ = write!(s, "\n\n{:<metric_w$}", "Metric");
        for run in &self.runs {
            let _ = write!(s, "{:<col_w$}", run.label);
        }
        s.push_str("Better");

        for metric in Metric::ALL {
            let _ = write!(s, "\n{:<metric_w$}", metric.name());
            for run in &self.runs {
                match run.value(metric) {
                    Some(v) => {
                        let _ = write!(s, "{v:<col_w$.6}");
                    }
                    None => {
                        let _ = write!(s, "{:<col_w$}", "n/a");
                    }
                }
            }
            let _ = write!(s, "{}", self.verdict(metric));
        }

        s
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{comparison, record};

    #[test]
    fn test_summary_lists_runs_and_verdicts() {
        let c = comparison(vec![
            record("NSGA-II", Some(0.01), 0.86, 30),
            record("MOEA/D", Some(0.02), 0.87, 10),
        ]);
        let s = c.summary();
        assert!(s.starts_with("Problem: zdt1 (30 variables, 2 objectives)"));
        assert!(s.contains("NSGA-II: 2 points x 2 objectives"));

        let igd_row = s.lines().find(|l| l.starts_with("IGD")).unwrap();
        assert!(igd_row.contains("0.010000"));
        assert!(igd_row.trim_end().ends_with("NSGA-II"));

        let hv_row = s.lines().find(|l| l.starts_with("HV")).unwrap();
        assert!(hv_row.trim_end().ends_with("MOEA/D"));
    }

    #[test]
    fn test_summary_marks_missing_igd() {
        let c = comparison(vec![record("a", None, 0.5, 1), record("b", None, 0.4, 1)]);
        let igd_row = c.to_string().lines().find(|l| l.starts_with("IGD")).unwrap().to_string();
        assert!(igd_row.contains("n/a"));
        assert!(igd_row.trim_end().ends_with("n/a"));
    }
}
