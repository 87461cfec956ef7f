//! The ZDT bi-objective test suite (Zitzler, Deb & Thiele, 2000).

use core::f64::consts::PI;

use super::{Problem, check_len};
use crate::error::Result;

/// Evenly spaced values from `start` to `end` inclusive.
#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// `g(x) = 1 + 9 * sum(x[1..]) / (n - 1)`, shared by ZDT1-3.
#[allow(clippy::cast_precision_loss)]
fn g_linear(x: &[f64]) -> f64 {
    1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64
}

macro_rules! zdt_struct {
    ($(#[$doc:meta])* $name:ident, $label:literal, $n_var:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            n_var: usize,
        }

        impl $name {
            /// Creates the problem with a custom number of decision variables.
            ///
            /// Values below 2 are raised to 2.
            #[must_use]
            pub fn with_n_var(n_var: usize) -> Self {
                Self { n_var: n_var.max(2) }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self { n_var: $n_var }
            }
        }

        impl $name {
            const NAME: &'static str = $label;
        }
    };
}

zdt_struct!(
    /// ZDT1: convex front `f2 = 1 - sqrt(f1)`, 30 variables in `[0, 1]`.
    Zdt1, "zdt1", 30
);
zdt_struct!(
    /// ZDT2: concave front `f2 = 1 - f1²`, 30 variables in `[0, 1]`.
    Zdt2, "zdt2", 30
);
zdt_struct!(
    /// ZDT3: front split into five disconnected pieces, 30 variables in `[0, 1]`.
    Zdt3, "zdt3", 30
);
zdt_struct!(
    /// ZDT4: multimodal variant of ZDT1 with `21^9` local fronts.
    ///
    /// `x1` lies in `[0, 1]`, the remaining 9 variables in `[-5, 5]`.
    Zdt4, "zdt4", 10
);
zdt_struct!(
    /// ZDT6: concave front with a non-uniform density, 10 variables in `[0, 1]`.
    Zdt6, "zdt6", 10
);

impl Problem for Zdt1 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn n_var(&self) -> usize {
        self.n_var
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var)?;
        let f1 = x[0];
        let g = g_linear(x);
        Ok(vec![f1, g * (1.0 - (f1 / g).sqrt())])
    }

    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        Some(
            linspace(0.0, 1.0, n_points)
                .into_iter()
                .map(|f1| vec![f1, 1.0 - f1.sqrt()])
                .collect(),
        )
    }
}

impl Problem for Zdt2 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn n_var(&self) -> usize {
        self.n_var
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var)?;
        let f1 = x[0];
        let g = g_linear(x);
        Ok(vec![f1, g * (1.0 - (f1 / g).powi(2))])
    }

    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        Some(
            linspace(0.0, 1.0, n_points)
                .into_iter()
                .map(|f1| vec![f1, 1.0 - f1 * f1])
                .collect(),
        )
    }
}

/// `f1` intervals on which the ZDT3 front lives.
const ZDT3_REGIONS: [(f64, f64); 5] = [
    (0.0, 0.083_001_534_9),
    (0.182_228_780, 0.257_762_363_4),
    (0.409_313_674_8, 0.453_882_104_1),
    (0.618_396_794_4, 0.652_511_703_8),
    (0.823_331_798_3, 0.851_832_865_4),
];

impl Problem for Zdt3 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn n_var(&self) -> usize {
        self.n_var
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var)?;
        let f1 = x[0];
        let g = g_linear(x);
        let r = f1 / g;
        Ok(vec![f1, g * (1.0 - r.sqrt() - r * (10.0 * PI * f1).sin())])
    }

    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        let per_region = (n_points / ZDT3_REGIONS.len()).max(1);
        Some(
            ZDT3_REGIONS
                .iter()
                .flat_map(|&(lo, hi)| linspace(lo, hi, per_region))
                .map(|f1| vec![f1, 1.0 - f1.sqrt() - f1 * (10.0 * PI * f1).sin()])
                .collect(),
        )
    }
}

impl Problem for Zdt4 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn n_var(&self) -> usize {
        self.n_var
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, i: usize) -> (f64, f64) {
        if i == 0 { (0.0, 1.0) } else { (-5.0, 5.0) }
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var)?;
        let f1 = x[0];
        let g = 1.0
            + 10.0 * (x.len() - 1) as f64
            + x[1..]
                .iter()
                .map(|&xi| xi * xi - 10.0 * (4.0 * PI * xi).cos())
                .sum::<f64>();
        Ok(vec![f1, g * (1.0 - (f1 / g).sqrt())])
    }

    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        Zdt1::default().pareto_front(n_points)
    }
}

impl Problem for Zdt6 {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn n_var(&self) -> usize {
        self.n_var
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var)?;
        let f1 = 1.0 - (-4.0 * x[0]).exp() * (6.0 * PI * x[0]).sin().powi(6);
        let g = 1.0 + 9.0 * (x[1..].iter().sum::<f64>() / (x.len() - 1) as f64).powf(0.25);
        Ok(vec![f1, g * (1.0 - (f1 / g).powi(2))])
    }

    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        Some(
            linspace(0.280_775_319_1, 1.0, n_points)
                .into_iter()
                .map(|f1| vec![f1, 1.0 - f1 * f1])
                .collect(),
        )
    }
}

/// ZDT5: deceptive binary problem.
///
/// The genome is one 30-bit substring followed by `m - 1` substrings of
/// `n` bits each (`m = 11`, `n = 5`, 80 bits in total). Each bit is stored
/// as a real gene in `[0, 1]` and reads as set when the gene is at least
/// `0.5`, so real-coded operators can search the space.
///
/// Objectives are normalized by default so the Pareto front spans
/// `[0, 1]` on both axes. Points off the front can exceed 1 in `f2`.
#[derive(Clone, Debug)]
pub struct Zdt5 {
    m: usize,
    n: usize,
    normalize: bool,
}

impl Default for Zdt5 {
    fn default() -> Self {
        Self {
            m: 11,
            n: 5,
            normalize: true,
        }
    }
}

impl Zdt5 {
    /// Creates the problem with raw (unnormalized) objective values.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            normalize: false,
            ..Self::default()
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn f2_bounds(&self) -> (f64, f64) {
        let k = (self.m - 1) as f64;
        (k / 31.0, k)
    }
}

fn count_bits(genes: &[f64]) -> usize {
    genes.iter().filter(|&&g| g >= 0.5).count()
}

impl Problem for Zdt5 {
    fn name(&self) -> &str {
        "zdt5"
    }

    fn n_var(&self) -> usize {
        30 + self.n * (self.m - 1)
    }

    fn n_obj(&self) -> usize {
        2
    }

    fn bounds(&self, _i: usize) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        check_len(x, self.n_var())?;
        let f1 = 1.0 + count_bits(&x[..30]) as f64;
        let g: f64 = x[30..]
            .chunks(self.n)
            .map(|chunk| {
                let u = count_bits(chunk);
                if u < self.n { 2.0 + u as f64 } else { 1.0 }
            })
            .sum();
        let f2 = g / f1;

        if !self.normalize {
            return Ok(vec![f1, f2]);
        }
        let (lo, hi) = self.f2_bounds();
        Ok(vec![(f1 - 1.0) / 30.0, (f2 - lo) / (hi - lo)])
    }

    #[allow(clippy::cast_precision_loss)]
    fn pareto_front(&self, n_points: usize) -> Option<Vec<Vec<f64>>> {
        let k = (self.m - 1) as f64;
        let (lo, hi) = self.f2_bounds();
        Some(
            linspace(1.0, 31.0, n_points)
                .into_iter()
                .map(|f1| {
                    let f2 = k / f1;
                    if self.normalize {
                        vec![(f1 - 1.0) / 30.0, (f2 - lo) / (hi - lo)]
                    } else {
                        vec![f1, f2]
                    }
                })
                .collect(),
        )
    }
}
