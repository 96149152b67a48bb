//! What to do with a cluster that lost all of its members.

use ndarray::ArrayView2;

use crate::metric::{Metric, SquaredEuclidean};
use crate::stats::ClusterStats;

/// Repairs (or tolerates) an empty cluster between two iterations.
///
/// Implementations may move points into `empty` and must keep `stats`
/// consistent with `assignments` for every point they move. The return value
/// is the number of moved points.
pub trait EmptyClusterPolicy: Send + Sync {
    fn repair(
        &self,
        data: ArrayView2<f64>,
        assignments: &mut [usize],
        empty: usize,
        stats: &mut ClusterStats,
        metric: &dyn Metric,
    ) -> usize;

    fn name(&self) -> &'static str;
}

/// Steal the outermost point of the cluster with the largest within-cluster
/// variance and make it the seed of the empty cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxVarianceNewCluster;

/// Leave empty clusters empty; their centroid stays where it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowEmptyClusters;

impl EmptyClusterPolicy for MaxVarianceNewCluster {
    fn repair(
        &self,
        data: ArrayView2<f64>,
        assignments: &mut [usize],
        empty: usize,
        stats: &mut ClusterStats,
        metric: &dyn Metric,
    ) -> usize {
        if stats.counts[empty] > 0 {
            return 0;
        }

        // Only a cluster with two or more members can donate without
        // becoming empty itself.
        let variances = stats.dispersion(data, assignments, &SquaredEuclidean);
        let mut donor = None;
        let mut best = f64::NEG_INFINITY;
        for (ci, &v) in variances.iter().enumerate() {
            if stats.counts[ci] >= 2 && v > best {
                best = v;
                donor = Some(ci);
            }
        }
        let Some(donor) = donor else {
            tracing::warn!(cluster = empty, "no cluster can donate a point; leaving it empty");
            return 0;
        };

        let centroid = stats.centroids.row(donor);
        let mut furthest = None;
        let mut max_dist = f64::NEG_INFINITY;
        for (i, row) in data.outer_iter().enumerate() {
            if assignments[i] != donor {
                continue;
            }
            let d = metric.evaluate(row, centroid);
            if d > max_dist {
                max_dist = d;
                furthest = Some(i);
            }
        }
        let Some(point) = furthest else {
            return 0;
        };

        stats.move_point(data, point, donor, empty);
        assignments[point] = empty;
        tracing::debug!(cluster = empty, donor, point, "reseeded empty cluster");
        1
    }

    fn name(&self) -> &'static str {
        "max-variance"
    }
}

impl EmptyClusterPolicy for AllowEmptyClusters {
    fn repair(
        &self,
        _data: ArrayView2<f64>,
        _assignments: &mut [usize],
        _empty: usize,
        _stats: &mut ClusterStats,
        _metric: &dyn Metric,
    ) -> usize {
        0
    }

    fn name(&self) -> &'static str {
        "allow-empty"
    }
}
