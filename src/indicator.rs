//! Quality indicators for obtained Pareto fronts.
//!
//! | Indicator | Reference | Better |
//! |-----------|-----------|--------|
//! | [`Igd`] | true Pareto front | lower |
//! | [`Gd`] | true Pareto front | lower |
//! | [`Hypervolume`] | reference point | higher |
//!
//! # Examples
//!
//! ```
//! use moea_bench::indicator::{Hypervolume, Igd, Indicator};
//!
//! let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
//! let igd = Igd::new(reference.clone()).unwrap();
//! assert_eq!(igd.score(&reference).unwrap(), 0.0);
//!
//! let hv = Hypervolume::new(vec![1.1, 1.1]).unwrap();
//! assert!(hv.score(&[vec![0.5, 0.5]]).unwrap() > 0.0);
//! ```

use crate::error::{Error, Result};
use crate::pareto;
use crate::types::Direction;

/// A scalar quality measure of an obtained front.
pub trait Indicator {
    /// Short display name, e.g. `"IGD"`.
    fn name(&self) -> &'static str;

    /// Whether lower or higher scores are better.
    fn direction(&self) -> Direction;

    /// Score `front`, a set of objective vectors.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if a vector of `front` does not
    /// match the indicator's reference dimension.
    fn score(&self, front: &[Vec<f64>]) -> Result<f64>;
}

/// Inverted generational distance.
///
/// Mean over reference points of the Euclidean distance to the closest
/// obtained point. Zero exactly when every reference point is matched.
#[derive(Clone, Debug)]
pub struct Igd {
    reference: Vec<Vec<f64>>,
}

impl Igd {
    /// IGD against `reference_front`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an empty reference front and
    /// `Error::DimensionMismatch` for ragged vectors.
    pub fn new(reference_front: Vec<Vec<f64>>) -> Result<Self> {
        check_reference(&reference_front)?;
        Ok(Self {
            reference: reference_front,
        })
    }
}

impl Indicator for Igd {
    fn name(&self) -> &'static str {
        "IGD"
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn score(&self, front: &[Vec<f64>]) -> Result<f64> {
        check_dims(front, self.reference[0].len())?;
        Ok(mean_min_distance(&self.reference, front))
    }
}

/// Generational distance.
///
/// Mean over obtained points of the Euclidean distance to the closest
/// reference point.
#[derive(Clone, Debug)]
pub struct Gd {
    reference: Vec<Vec<f64>>,
}

impl Gd {
    /// GD against `reference_front`.
    ///
    /// # Errors
    ///
    /// Same as [`Igd::new`].
    pub fn new(reference_front: Vec<Vec<f64>>) -> Result<Self> {
        check_reference(&reference_front)?;
        Ok(Self {
            reference: reference_front,
        })
    }
}

impl Indicator for Gd {
    fn name(&self) -> &'static str {
        "GD"
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn score(&self, front: &[Vec<f64>]) -> Result<f64> {
        check_dims(front, self.reference[0].len())?;
        Ok(mean_min_distance(front, &self.reference))
    }
}

/// Hypervolume dominated by a front, bounded by a reference point.
#[derive(Clone, Debug)]
pub struct Hypervolume {
    reference_point: Vec<f64>,
}

impl Hypervolume {
    /// Hypervolume with respect to `reference_point`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an empty or non-finite reference point.
    pub fn new(reference_point: Vec<f64>) -> Result<Self> {
        if reference_point.is_empty() {
            return Err(Error::config("reference_point", "must not be empty"));
        }
        if reference_point.iter().any(|v| !v.is_finite()) {
            return Err(Error::config(
                "reference_point",
                format!("must be finite, got {reference_point:?}"),
            ));
        }
        Ok(Self { reference_point })
    }

    /// The reference point.
    #[must_use]
    pub fn reference_point(&self) -> &[f64] {
        &self.reference_point
    }
}

impl Indicator for Hypervolume {
    fn name(&self) -> &'static str {
        "HV"
    }

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn score(&self, front: &[Vec<f64>]) -> Result<f64> {
        check_dims(front, self.reference_point.len())?;
        Ok(pareto::hypervolume(front, &self.reference_point))
    }
}

/// Mean over `from` of the distance to the nearest member of `to`.
/// Infinite when `to` is empty.
#[allow(clippy::cast_precision_loss)]
fn mean_min_distance(from: &[Vec<f64>], to: &[Vec<f64>]) -> f64 {
    if to.is_empty() {
        return f64::INFINITY;
    }
    if from.is_empty() {
        return 0.0;
    }
    let total: f64 = from
        .iter()
        .map(|a| {
            to.iter()
                .map(|b| euclidean(a, b))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / from.len() as f64
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn check_reference(front: &[Vec<f64>]) -> Result<()> {
    let Some(first) = front.first() else {
        return Err(Error::config("reference_front", "must not be empty"));
    };
    check_dims(front, first.len())
}

fn check_dims(front: &[Vec<f64>], expected: usize) -> Result<()> {
    match front.iter().find(|p| p.len() != expected) {
        Some(p) => Err(Error::DimensionMismatch {
            expected,
            got: p.len(),
        }),
        None => Ok(()),
    }
}
