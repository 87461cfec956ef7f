//! Pareto dominance, non-dominated sorting and hypervolume.
//!
//! All functions work in **minimize space**: every objective is assumed
//! to be minimized, which is how the benchmark problems are stated.
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pairwise Pareto dominance test |
//! | [`non_dominated_sort`] | Rank solutions into successive fronts (front 0, 1, …) |
//! | [`pareto_front_indices`] | Indices of the non-dominated solutions only |
//! | [`crowding_distance`] | Spread of the members of one front |
//! | [`hypervolume`] | Volume dominated by a front, bounded by a reference point |
//!
//! # Example
//!
//! ```
//! use moea_bench::pareto::{hypervolume, non_dominated_sort, pareto_front_indices};
//!
//! let points = vec![
//!     vec![1.0, 5.0], // non-dominated
//!     vec![5.0, 1.0], // non-dominated
//!     vec![3.0, 3.0], // non-dominated
//!     vec![4.0, 4.0], // dominated by (3, 3)
//! ];
//!
//! let fronts = non_dominated_sort(&points);
//! assert_eq!(fronts.len(), 2);
//!
//! let mut front = pareto_front_indices(&points);
//! front.sort_unstable();
//! assert_eq!(front, vec![0, 1, 2]);
//!
//! let hv = hypervolume(&points, &[6.0, 6.0]);
//! assert!(hv > 0.0);
//! ```

use core::cmp::Ordering;

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// `a` dominates `b` when it is no worse in every objective and strictly
/// better in at least one.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Returns the fronts in rank order; `fronts[0]` is the non-dominated set.
/// Each inner vec holds indices into `values`, in ascending index order
/// for front 0.
///
/// Complexity: O(M * N^2) for M objectives and N solutions.
#[must_use]
pub fn non_dominated_sort(values: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    // S_p: solutions dominated by p
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    // n_p: how many solutions dominate p
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&values[i], &values[j]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&values[j], &values[i]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current.is_empty() {
        let mut next: Vec<usize> = Vec::new();
        for &p in &current {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Indices of the non-dominated solutions, in ascending order.
///
/// Shortcut for `non_dominated_sort(values)[0]` that skips ranking the
/// dominated remainder.
#[must_use]
pub fn pareto_front_indices(values: &[Vec<f64>]) -> Vec<usize> {
    (0..values.len())
        .filter(|&i| {
            !values
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && dominates(other, &values[i]))
        })
        .collect()
}

/// Crowding distance of the members of one front, indexed into `values`.
///
/// Boundary members get `f64::INFINITY`. Returns one distance per entry
/// of `front`, in the same order.
#[must_use]
pub(crate) fn crowding_distance_indexed(front: &[usize], values: &[Vec<f64>]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = values[front[0]].len();
    let mut distances = vec![0.0_f64; n];
    let val = |pos: usize, obj: usize| -> f64 { values[front[pos]][obj] };

    for obj in 0..m {
        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by(|&a, &b| val(a, obj).partial_cmp(&val(b, obj)).unwrap_or(Ordering::Equal));

        distances[sorted[0]] = f64::INFINITY;
        distances[sorted[n - 1]] = f64::INFINITY;

        let range = val(sorted[n - 1], obj) - val(sorted[0], obj);
        if range > 0.0 {
            for i in 1..(n - 1) {
                distances[sorted[i]] += (val(sorted[i + 1], obj) - val(sorted[i - 1], obj)) / range;
            }
        }
    }

    distances
}

/// Crowding distance of every member of `front`.
///
/// Boundary members (best or worst in any objective) get
/// [`f64::INFINITY`]; interior members get the normalized gap between
/// their neighbors summed over objectives.
#[must_use]
pub fn crowding_distance(front: &[Vec<f64>]) -> Vec<f64> {
    let all: Vec<usize> = (0..front.len()).collect();
    crowding_distance_indexed(&all, front)
}

/// Hypervolume of `front` with respect to `reference_point`.
///
/// The volume of objective space dominated by at least one member of
/// `front` and bounded above by `reference_point`. Points that are not
/// strictly better than the reference point in every objective are
/// ignored. Two objectives use an O(N log N) sweep; higher dimensions
/// use recursive slicing on the last objective.
///
/// Callers are expected to pass vectors of equal length; see
/// [`Hypervolume`](crate::indicator::Hypervolume) for the checked version.
#[must_use]
pub fn hypervolume(front: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    let inside: Vec<Vec<f64>> = front
        .iter()
        .filter(|p| p.iter().zip(reference_point).all(|(&v, &r)| v < r))
        .cloned()
        .collect();

    if inside.is_empty() {
        return 0.0;
    }

    match reference_point.len() {
        0 => 0.0,
        2 => hv_2d(&inside, reference_point),
        _ => hv_recursive(&inside, reference_point),
    }
}

/// Sweep along the first objective, keeping the best second objective seen.
fn hv_2d(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| {
        a[0].partial_cmp(&b[0])
            .unwrap_or(Ordering::Equal)
            .then(a[1].partial_cmp(&b[1]).unwrap_or(Ordering::Equal))
    });

    let mut volume = 0.0;
    let mut best_f2 = reference[1];
    for (i, p) in sorted.iter().enumerate() {
        if p[1] >= best_f2 {
            continue;
        }
        best_f2 = p[1];
        // Strip width runs to the next point that improves f2, or the reference.
        let next_x = sorted[i + 1..]
            .iter()
            .find(|q| q[1] < best_f2)
            .map_or(reference[0], |q| q[0]);
        volume += (next_x - p[0]) * (reference[1] - best_f2);
    }
    volume
}

fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    if d == 1 {
        let best = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - best).max(0.0);
    }

    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| a[d - 1].partial_cmp(&b[d - 1]).unwrap_or(Ordering::Equal));

    let sub_ref = &reference[..d - 1];
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let upper = sorted.get(i + 1).map_or(reference[d - 1], |p| p[d - 1]);
        let height = upper - sorted[i][d - 1];
        if height <= 0.0 {
            continue;
        }

        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let slice: Vec<Vec<f64>> = pareto_front_indices(&projected)
            .into_iter()
            .map(|k| projected[k].clone())
            .collect();

        result += height
            * if d - 1 == 2 {
                hv_2d(&slice, sub_ref)
            } else {
                hv_recursive(&slice, sub_ref)
            };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates_basic() {
        assert!(dominates(&[1.0, 1.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[1.0, 1.0]));
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_dominates_incomparable() {
        assert!(!dominates(&[1.0, 3.0], &[3.0, 1.0]));
        assert!(!dominates(&[3.0, 1.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_nds_known() {
        let values = vec![
            vec![1.0, 5.0],
            vec![5.0, 1.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
            vec![6.0, 6.0],
        ];
        let fronts = non_dominated_sort(&values);

        assert_eq!(fronts.len(), 3);
        assert_eq!(fronts[0], vec![0, 1, 2]);
        assert_eq!(fronts[1], vec![3]);
        assert_eq!(fronts[2], vec![4]);
    }

    #[test]
    fn test_pareto_front_indices_matches_first_front() {
        let values = vec![
            vec![0.2, 0.9],
            vec![0.5, 0.5],
            vec![0.6, 0.6],
            vec![0.9, 0.1],
            vec![0.5, 0.5],
        ];
        assert_eq!(pareto_front_indices(&values), non_dominated_sort(&values)[0]);
        // Duplicates do not dominate each other.
        assert_eq!(pareto_front_indices(&values), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_pareto_front_indices_empty() {
        assert!(pareto_front_indices(&[]).is_empty());
        assert!(non_dominated_sort(&[]).is_empty());
    }

    #[test]
    fn test_crowding_boundaries() {
        let front = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
        let cd = crowding_distance(&front);
        assert!(cd[0].is_infinite());
        assert!(cd[2].is_infinite());
        // (5-1)/4 + (5-1)/4
        assert!((cd[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_small_fronts() {
        assert_eq!(crowding_distance(&[vec![2.0, 3.0]]).len(), 1);
        assert!(crowding_distance(&[vec![2.0, 3.0]])[0].is_infinite());
    }

    #[test]
    fn test_hypervolume_2d_staircase() {
        let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
        // Strips: [1,2)x1 + [2,3)x2 + [3,4)x3
        assert!((hypervolume(&front, &[4.0, 4.0]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_2d_ignores_dominated() {
        let front = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0], vec![3.0, 3.0]];
        assert!((hypervolume(&front, &[4.0, 4.0]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_point_on_reference() {
        let front = vec![vec![5.0, 5.0], vec![5.0, 1.0]];
        assert!(hypervolume(&front, &[5.0, 5.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hypervolume_3d_matches_box() {
        let front = vec![vec![1.0, 1.0, 1.0]];
        assert!((hypervolume(&front, &[2.0, 2.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_3d_two_points() {
        // Boxes [0,2]x[0,1]x[0,1] and [0,1]x[0,2]x[0,1] overlap in [0,1]^3.
        let front = vec![vec![0.0, 1.0, 1.0], vec![1.0, 0.0, 1.0]];
        assert!((hypervolume(&front, &[2.0, 2.0, 2.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_2d_agrees_with_recursive() {
        let front = vec![
            vec![0.1, 0.9],
            vec![0.25, 0.6],
            vec![0.4, 0.5],
            vec![0.7, 0.2],
            vec![0.95, 0.05],
        ];
        let reference = [1.1, 1.1];
        let sweep = hv_2d(&front, &reference);
        let sliced = {
            // Force the generic path by slicing on f2 manually.
            let mut sorted = front.clone();
            sorted.sort_by(|a, b| a[1].partial_cmp(&b[1]).unwrap());
            let mut total = 0.0;
            for i in 0..sorted.len() {
                let upper = sorted.get(i + 1).map_or(reference[1], |p| p[1]);
                let best_f1 = sorted[..=i].iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
                total += (upper - sorted[i][1]) * (reference[0] - best_f1);
            }
            total
        };
        assert!((sweep - sliced).abs() < 1e-12);
    }
}
