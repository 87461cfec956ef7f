use std::io::Write;
use std::path::Path;

use super::Comparison;
use crate::error::Result;

impl Comparison {
    /// Write every obtained point in CSV format.
    ///
    /// Columns: `algorithm`, then `f1` to `fM`. One row per point, runs in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if writing fails.
    pub fn to_csv(&self, mut writer: impl Write) -> Result<()> {
        write!(writer, "algorithm")?;
        for m in 1..=self.problem.n_obj {
            write!(writer, ",f{m}")?;
        }
        writeln!(writer)?;

        for run in &self.runs {
            let label = csv_escape(&run.label);
            for point in &run.result.objectives {
                write!(writer, "{label}")?;
                for v in point {
                    write!(writer, ",{v}")?;
                }
                writeln!(writer)?;
            }
        }

        Ok(())
    }

    /// Export every obtained point to a CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be created or written.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.to_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Whole comparison as pretty-printed JSON. Requires the `serde` feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::Error::Serialization(e.to_string()))
    }

    /// Write [`to_json`](Self::to_json) output to `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` or `Error::Io`.
    #[cfg(feature = "serde")]
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Quote a CSV cell if it contains a comma, quote or line break.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{comparison, record};
    use super::*;

    #[test]
    fn test_csv_layout() {
        let c = comparison(vec![record("NSGA-II", Some(0.1), 0.5, 1), record("a,b", None, 0.4, 1)]);
        let mut buf = Vec::new();
        c.to_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "algorithm,f1,f2");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "NSGA-II,0,1");
        assert_eq!(lines[3], "\"a,b\",0,1");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_contains_runs() {
        let c = comparison(vec![record("NSGA-II", Some(0.1), 0.5, 1)]);
        let json = c.to_json().unwrap();
        assert!(json.contains("\"label\": \"NSGA-II\""));
        assert!(json.contains("\"hv\": 0.5"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_floats_survive_exactly() {
        let mut r = record("NSGA-II", Some(0.098_819_965_965_155_2), 0.5, 1);
        r.result.objectives = vec![vec![0.925_306_034_610_420_4, 0.098_819_965_965_155_2]];
        let c = comparison(vec![r]);
        let back: Comparison = serde_json::from_str(&c.to_json().unwrap()).unwrap();
        assert_eq!(back.runs()[0].result.objectives, c.runs()[0].result.objectives);
        assert_eq!(back.runs()[0].igd, c.runs()[0].igd);
    }
}
