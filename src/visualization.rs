//! Chart rendering for obtained fronts.
//!
//! Two output formats are available:
//!
//! | Function | Output |
//! |---|---|
//! | [`save_svg`] | Static SVG scatter of every run's front over the true front |
//! | [`save_front_svg`] | The same for a single [`RunResult`] |
//! | [`generate_html_report`] | Self-contained HTML page with an interactive [Plotly.js](https://plotly.com/javascript/) scatter and the comparison table |
//!
//! Charts show the first two objectives. An internet connection is needed
//! on first load of the HTML report to fetch `Plotly.js` from a CDN.
//!
//! ```no_run
//! use moea_bench::prelude::*;
//! use moea_bench::visualization;
//!
//! let comparison = Experiment::builder()
//!     .algorithm("NSGA-II", Nsga2::builder().build().unwrap())
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//! visualization::save_svg(&comparison, "nsga2_zdt1.svg").unwrap();
//! visualization::generate_html_report(&comparison, "nsga2_zdt1.html").unwrap();
//! ```

use core::fmt::{Display, Write as _};
use core::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::algorithm::RunResult;
use crate::error::{Error, Result};
use crate::experiment::{Comparison, Metric};

const SIZE: (u32, u32) = (1024, 768);
const COLORS: [RGBColor; 5] = [RED, BLUE, GREEN, MAGENTA, CYAN];
const HTML_COLORS: [&str; 5] = ["#e74c3c", "#3498db", "#2ecc71", "#9b59b6", "#1abc9c"];

/// A named set of objective vectors to scatter.
struct Series<'a> {
    label: &'a str,
    points: &'a [Vec<f64>],
}

/// Save every run of `comparison` as an SVG scatter at `path`.
///
/// The title reads `"<label> vs <label> on <problem>"`. The true front,
/// when known, is drawn in black underneath.
///
/// # Errors
///
/// Returns `Error::Plot` if the backend fails or the problem has fewer
/// than two objectives.
pub fn save_svg(comparison: &Comparison, path: impl AsRef<Path>) -> Result<()> {
    let labels: Vec<&str> = comparison.runs().iter().map(|r| r.label.as_str()).collect();
    let title = format!("{} on {}", labels.join(" vs "), comparison.problem_info().name);
    let series: Vec<Series<'_>> = comparison
        .runs()
        .iter()
        .map(|r| Series {
            label: &r.label,
            points: &r.result.objectives,
        })
        .collect();
    render_svg(path.as_ref(), &title, &series, comparison.reference_front())
}

/// Save a single run as an SVG scatter at `path`.
///
/// # Errors
///
/// Same as [`save_svg`].
pub fn save_front_svg(
    result: &RunResult,
    reference_front: Option<&[Vec<f64>]>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let title = format!("{} on {}", result.algorithm, result.problem);
    let series = [Series {
        label: &result.algorithm,
        points: &result.objectives,
    }];
    render_svg(path.as_ref(), &title, &series, reference_front)
}

fn render_svg(
    path: &Path,
    title: &str,
    series: &[Series<'_>],
    reference: Option<&[Vec<f64>]>,
) -> Result<()> {
    let all = series
        .iter()
        .flat_map(|s| s.points.iter())
        .chain(reference.into_iter().flatten());
    if let Some(p) = all.clone().find(|p| p.len() < 2) {
        return Err(Error::Plot(format!(
            "need at least two objectives to plot, got {}",
            p.len()
        )));
    }
    let (x_range, y_range) = axis_ranges(all.map(|p| (p[0], p[1])));

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("f1")
        .y_desc("f2")
        .draw()
        .map_err(plot_err)?;

    if let Some(front) = reference {
        chart
            .draw_series(front.iter().map(|p| Circle::new((p[0], p[1]), 1, BLACK.filled())))
            .map_err(plot_err)?
            .label("Pareto front")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));
    }

    for (s, &color) in series.iter().zip(COLORS.iter().cycle()) {
        chart
            .draw_series(s.points.iter().map(|p| Circle::new((p[0], p[1]), 3, color.filled())))
            .map_err(plot_err)?
            .label(s.label)
            .legend(move |(x, y)| Circle::new((x + 10, y), 3, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err(e: impl Display) -> Error {
    Error::Plot(e.to_string())
}

/// Padded bounds of the points, unit ranges when there are none.
fn axis_ranges(points: impl Iterator<Item = (f64, f64)>) -> (Range<f64>, Range<f64>) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (px, py) in points {
        if px.is_finite() {
            x = (x.0.min(px), x.1.max(px));
        }
        if py.is_finite() {
            y = (y.0.min(py), y.1.max(py));
        }
    }
    (pad(x), pad(y))
}

fn pad((lo, hi): (f64, f64)) -> Range<f64> {
    if lo > hi {
        return 0.0..1.0;
    }
    let margin = if hi - lo < 1e-12 { 0.5 } else { (hi - lo) * 0.05 };
    (lo - margin)..(hi + margin)
}

/// Generate a self-contained HTML report for `comparison` at `path`.
///
/// The page holds an interactive scatter of every run over the true front
/// and the metric table with verdicts.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be written.
pub fn generate_html_report(comparison: &Comparison, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, build_html(comparison))?;
    Ok(())
}

fn build_html(comparison: &Comparison) -> String {
    let mut html = String::with_capacity(8192);
    let info = comparison.problem_info();
    let labels: Vec<&str> = comparison.runs().iter().map(|r| r.label.as_str()).collect();
    let title = escape_html(&format!("{} on {}", labels.join(" vs "), info.name));

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f6fa; color: #2c3e50; padding: 24px; }}
  h1 {{ text-align: center; margin-bottom: 8px; font-size: 1.8em; }}
  .subtitle {{ text-align: center; color: #7f8c8d; margin-bottom: 24px; }}
  .chart {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
            margin-bottom: 24px; padding: 16px; }}
  .chart-title {{ font-size: 1.1em; font-weight: 600; margin-bottom: 8px; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ padding: 6px 12px; border-bottom: 1px solid #ecf0f1; text-align: right; }}
  th:first-child, td:first-child {{ text-align: left; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p class="subtitle">{n_var} variables &middot; {n_obj} objectives &middot;
  {n_gen} generations &middot; seed {seed}</p>
"#,
        n_var = info.n_var,
        n_obj = info.n_obj,
        n_gen = comparison.n_gen(),
        seed = comparison.seed(),
    );

    html.push_str("<div class=\"chart\"><div class=\"chart-title\">Obtained Fronts</div>\n");
    html.push_str("<div id=\"fronts\"></div></div>\n");
    write_front_chart(&mut html, comparison);

    html.push_str("<div class=\"chart\"><div class=\"chart-title\">Indicators</div>\n");
    write_metric_table(&mut html, comparison);
    html.push_str("</div>\n");

    html.push_str("</body>\n</html>\n");
    html
}

fn write_front_chart(html: &mut String, comparison: &Comparison) {
    let mut traces = Vec::new();

    if let Some(front) = comparison.reference_front() {
        let (xs, ys) = first_two(front);
        traces.push(format!(
            r##"{{ x: {xs:?}, y: {ys:?}, mode: "markers", name: "Pareto front", type: "scatter",
     marker: {{ color: "#2c3e50", size: 3 }} }}"##,
        ));
    }

    for (run, color) in comparison.runs().iter().zip(HTML_COLORS.iter().cycle()) {
        let (xs, ys) = first_two(&run.result.objectives);
        traces.push(format!(
            r#"{{ x: {xs:?}, y: {ys:?}, mode: "markers", name: "{name}", type: "scatter",
     marker: {{ color: "{color}", size: 6 }} }}"#,
            name = escape_js(&run.label),
        ));
    }

    let _ = write!(
        html,
        r#"<script>
Plotly.newPlot("fronts", [
  {traces}
], {{ xaxis: {{ title: "f1" }}, yaxis: {{ title: "f2" }},
     margin: {{ t: 10 }}, legend: {{ x: 1, xanchor: "right", y: 1 }} }},
   {{ responsive: true }});
</script>
"#,
        traces = traces.join(",\n  "),
    );
}

fn write_metric_table(html: &mut String, comparison: &Comparison) {
    html.push_str("<table>\n<tr><th>Metric</th>");
    for run in comparison.runs() {
        let _ = write!(html, "<th>{}</th>", escape_html(&run.label));
    }
    html.push_str("<th>Better</th></tr>\n");

    html.push_str("<tr><td>Points</td>");
    for run in comparison.runs() {
        let _ = write!(html, "<td>{}</td>", run.result.len());
    }
    html.push_str("<td></td></tr>\n");

    for metric in Metric::ALL {
        let _ = write!(html, "<tr><td>{}</td>", metric.name());
        for run in comparison.runs() {
            match run.value(metric) {
                Some(v) => {
                    let _ = write!(html, "<td>{v:.6}</td>");
                }
                None => html.push_str("<td>n/a</td>"),
            }
        }
        let _ = writeln!(
            html,
            "<td>{}</td></tr>",
            escape_html(&comparison.verdict(metric).to_string())
        );
    }
    html.push_str("</table>\n");
}

/// Finite `(f1, f2)` columns of `points`.
fn first_two(points: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    points
        .iter()
        .filter(|p| p.len() >= 2 && p[0].is_finite() && p[1].is_finite())
        .map(|p| (p[0], p[1]))
        .unzip()
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_degenerate_and_empty() {
        assert_eq!(pad((f64::INFINITY, f64::NEG_INFINITY)), 0.0..1.0);
        assert_eq!(pad((2.0, 2.0)), 1.5..2.5);
        let r = pad((0.0, 1.0));
        assert!((r.start + 0.05).abs() < 1e-12 && (r.end - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_axis_ranges_skip_infinite() {
        let (x, y) = axis_ranges([(0.0, 1.0), (f64::INFINITY, 0.0), (1.0, 0.0)].into_iter());
        assert!(x.end < 2.0);
        assert!(y.start < 0.0 && y.end > 1.0);
    }

    #[test]
    fn test_first_two_drops_nonfinite() {
        let (xs, ys) = first_two(&[vec![0.1, 0.9, 5.0], vec![f64::NAN, 0.0]]);
        assert_eq!(xs, vec![0.1]);
        assert_eq!(ys, vec![0.9]);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_js("a\"b"), "a\\\"b");
        assert_eq!(escape_html("<NSGA-II & co>"), "&lt;NSGA-II &amp; co&gt;");
    }
}
