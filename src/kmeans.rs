//! The clustering engine: Lloyd iterations, empty cluster repair and the
//! overclustering merge.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::empty::{EmptyClusterPolicy, MaxVarianceNewCluster};
use crate::error::{invalid, Result};
use crate::metric::{Metric, SquaredEuclidean};
use crate::partition::{Partitioner, RandomPartition};
use crate::prune::PruningTable;
use crate::stats::ClusterStats;
use crate::tree::{BallTree, DEFAULT_LEAF_SIZE};

/// Outcome of one reassignment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignPass {
    pub changed: usize,
    pub evaluations: u64,
}

/// Summary of a finished clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterReport {
    /// Reassignment passes performed.
    pub iterations: usize,
    /// True when the last pass moved no point.
    pub converged: bool,
    /// Cluster count the iterations ran with, before merging.
    pub working_clusters: usize,
    pub merges: usize,
    pub empty_cluster_repairs: usize,
    /// Distance evaluations spent on reassignment, bound checks included.
    pub distance_evaluations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Naive,
    Tree,
}

/// Index and distance of the centroid nearest to `point`; ties go to the
/// lowest cluster index.
pub fn nearest_centroid(
    point: ArrayView1<f64>,
    centroids: ArrayView2<f64>,
    metric: &dyn Metric,
) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (ci, centroid) in centroids.outer_iter().enumerate() {
        let d = metric.evaluate(point, centroid);
        if d < best_dist {
            best_dist = d;
            best = ci;
        }
    }
    (best, best_dist)
}

fn naive_pass(
    data: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
    metric: &dyn Metric,
    assignments: &mut [usize],
) -> AssignPass {
    let mut pass = AssignPass::default();
    for (row, a) in data.outer_iter().zip(assignments.iter_mut()) {
        let (best, _) = nearest_centroid(row, centroids, metric);
        if *a != best {
            *a = best;
            pass.changed += 1;
        }
    }
    pass.evaluations = (data.nrows() * centroids.nrows()) as u64;
    pass
}

fn fingerprint(assignments: &[usize]) -> u64 {
    let mut hasher = DefaultHasher::new();
    assignments.hash(&mut hasher);
    hasher.finish()
}

/// Assignment vectors seen so far, bucketed by fingerprint. A fingerprint hit
/// only counts as a repeat when the stored vector matches as well.
#[derive(Debug, Default)]
struct AssignmentHistory {
    buckets: HashMap<u64, Vec<Vec<usize>>>,
}

impl AssignmentHistory {
    /// Returns false if `assignments` was already recorded.
    fn insert(&mut self, assignments: &[usize]) -> bool {
        let bucket = self.buckets.entry(fingerprint(assignments)).or_default();
        if bucket.iter().any(|seen| seen.as_slice() == assignments) {
            return false;
        }
        bucket.push(assignments.to_vec());
        true
    }
}

/// K-means clustering with pluggable metric, initial partition and empty
/// cluster policies.
///
/// With an overclustering factor above 1 the iterations run with
/// `round(clusters * factor)` clusters, and the closest clusters are merged
/// afterwards until the requested count is left.
///
/// ```
/// use ndarray::array;
/// use overkmeans::{KMeans, RandomPartition};
///
/// let data = array![[0.0], [1.0], [2.0], [10.0], [11.0], [12.0]];
/// let kmeans = KMeans::new().with_partitioner(RandomPartition::seeded(1));
/// let mut labels = Vec::new();
/// let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
/// assert!(report.converged);
/// assert_eq!(labels[0], labels[2]);
/// assert_ne!(labels[0], labels[3]);
/// ```
#[derive(Clone)]
pub struct KMeans {
    max_iterations: usize,
    overclustering_factor: f64,
    leaf_size: usize,
    metric: Arc<dyn Metric>,
    partitioner: Arc<dyn Partitioner>,
    empty_cluster_action: Arc<dyn EmptyClusterPolicy>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            overclustering_factor: 1.0,
            leaf_size: DEFAULT_LEAF_SIZE,
            metric: Arc::new(SquaredEuclidean),
            partitioner: Arc::new(RandomPartition::default()),
            empty_cluster_action: Arc::new(MaxVarianceNewCluster),
        }
    }
}

impl fmt::Debug for KMeans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeans")
            .field("max_iterations", &self.max_iterations)
            .field("overclustering_factor", &self.overclustering_factor)
            .field("leaf_size", &self.leaf_size)
            .field("metric", &self.metric.name())
            .field("partitioner", &self.partitioner.name())
            .field("empty_cluster_action", &self.empty_cluster_action.name())
            .finish()
    }
}

impl KMeans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap; 0 runs until the assignments stop changing.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_overclustering_factor(mut self, factor: f64) -> Self {
        self.overclustering_factor = factor;
        self
    }

    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    pub fn with_metric(mut self, metric: impl Metric + 'static) -> Self {
        self.metric = Arc::new(metric);
        self
    }

    pub fn with_partitioner(mut self, partitioner: impl Partitioner + 'static) -> Self {
        self.partitioner = Arc::new(partitioner);
        self
    }

    pub fn with_empty_cluster_action(mut self, action: impl EmptyClusterPolicy + 'static) -> Self {
        self.empty_cluster_action = Arc::new(action);
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn overclustering_factor(&self) -> f64 {
        self.overclustering_factor
    }

    /// Values above 1 enable overclustering; 1 disables it.
    pub fn set_overclustering_factor(&mut self, factor: f64) {
        self.overclustering_factor = factor;
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn set_leaf_size(&mut self, leaf_size: usize) {
        self.leaf_size = leaf_size;
    }

    pub fn metric(&self) -> &dyn Metric {
        self.metric.as_ref()
    }

    pub fn set_metric(&mut self, metric: impl Metric + 'static) {
        self.metric = Arc::new(metric);
    }

    pub fn partitioner(&self) -> &dyn Partitioner {
        self.partitioner.as_ref()
    }

    pub fn set_partitioner(&mut self, partitioner: impl Partitioner + 'static) {
        self.partitioner = Arc::new(partitioner);
    }

    pub fn empty_cluster_action(&self) -> &dyn EmptyClusterPolicy {
        self.empty_cluster_action.as_ref()
    }

    pub fn set_empty_cluster_action(&mut self, action: impl EmptyClusterPolicy + 'static) {
        self.empty_cluster_action = Arc::new(action);
    }

    /// Cluster `data` (one point per row) into `clusters` clusters.
    ///
    /// An empty `assignments` asks the partitioner for a starting point; a
    /// filled one is used as a warm start and must hold one label per point,
    /// each below the working cluster count. On return it holds a label in
    /// `0..clusters` for every point.
    pub fn cluster(
        &self,
        data: ArrayView2<f64>,
        clusters: usize,
        assignments: &mut Vec<usize>,
    ) -> Result<ClusterReport> {
        self.run(data, clusters, assignments, Strategy::Naive)
    }

    /// Same result as [`KMeans::cluster`], with reassignment passes pruned
    /// through a ball tree built over a reordered copy of `data`.
    ///
    /// The pruning is exact only if the metric's `bound_distance` satisfies
    /// the triangle inequality; this is not checked.
    pub fn fast_cluster(
        &self,
        data: ArrayView2<f64>,
        clusters: usize,
        assignments: &mut Vec<usize>,
    ) -> Result<ClusterReport> {
        self.run(data, clusters, assignments, Strategy::Tree)
    }

    /// Mean of every cluster for a finished assignment. Clusters without
    /// members get infinite coordinates.
    pub fn centroids(
        &self,
        data: ArrayView2<f64>,
        clusters: usize,
        assignments: &[usize],
    ) -> Result<Array2<f64>> {
        if assignments.len() != data.nrows() {
            return invalid(format!(
                "{} assignments for {} points",
                assignments.len(),
                data.nrows()
            ));
        }
        if let Some(&bad) = assignments.iter().find(|&&a| a >= clusters) {
            return invalid(format!("assignment {bad} outside 0..{clusters}"));
        }
        let mut stats = ClusterStats::new(clusters, data.ncols());
        stats.recompute(data, assignments);
        Ok(stats.centroids)
    }

    fn working_clusters(&self, clusters: usize, points: usize) -> Result<usize> {
        let factor = self.overclustering_factor;
        if !factor.is_finite() || factor < 1.0 {
            return invalid(format!("overclustering factor must be >= 1, got {factor}"));
        }
        let working = ((clusters as f64 * factor).round() as usize).max(clusters);
        if working > points {
            tracing::warn!(
                working,
                points,
                "overclustered count exceeds the number of points; clamping"
            );
            return Ok(points);
        }
        Ok(working)
    }

    fn validate(&self, data: ArrayView2<f64>, clusters: usize) -> Result<()> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return invalid(format!("empty dataset of shape {:?}", data.shape()));
        }
        if clusters == 0 {
            return invalid("number of clusters must be at least 1");
        }
        if clusters > data.nrows() {
            return invalid(format!(
                "not enough data points ({}) for {} clusters",
                data.nrows(),
                clusters
            ));
        }
        if data.iter().any(|x| !x.is_finite()) {
            return invalid("dataset contains non-finite values");
        }
        Ok(())
    }

    fn initial_assignments(
        &self,
        data: ArrayView2<f64>,
        working: usize,
        assignments: &mut Vec<usize>,
    ) -> Result<()> {
        let initial = if assignments.is_empty() {
            let labels = self.partitioner.partition(data, working)?;
            if labels.len() != data.nrows() {
                return invalid(format!(
                    "partitioner {} returned {} labels for {} points",
                    self.partitioner.name(),
                    labels.len(),
                    data.nrows()
                ));
            }
            Some(labels)
        } else if assignments.len() != data.nrows() {
            return invalid(format!(
                "warm start has {} assignments for {} points",
                assignments.len(),
                data.nrows()
            ));
        } else {
            None
        };

        let labels = initial.as_deref().unwrap_or(assignments.as_slice());
        if let Some(&bad) = labels.iter().find(|&&a| a >= working) {
            return invalid(format!("initial assignment {bad} outside 0..{working}"));
        }
        if let Some(labels) = initial {
            *assignments = labels;
        }
        Ok(())
    }

    fn repair_empty_clusters(
        &self,
        data: ArrayView2<f64>,
        assignments: &mut [usize],
        stats: &mut ClusterStats,
    ) -> usize {
        let mut moved = 0;
        for empty in stats.empty_clusters() {
            moved += self.empty_cluster_action.repair(
                data,
                assignments,
                empty,
                stats,
                self.metric.as_ref(),
            );
        }
        moved
    }

    fn run(
        &self,
        data: ArrayView2<f64>,
        clusters: usize,
        assignments: &mut Vec<usize>,
        strategy: Strategy,
    ) -> Result<ClusterReport> {
        self.validate(data, clusters)?;
        let working = self.working_clusters(clusters, data.nrows())?;
        self.initial_assignments(data, working, assignments)?;

        let metric = self.metric.as_ref();
        let mut report = ClusterReport {
            working_clusters: working,
            ..ClusterReport::default()
        };

        let mut accelerated = match strategy {
            Strategy::Naive => None,
            Strategy::Tree => {
                let tree = BallTree::build(data, self.leaf_size, metric);
                let table = PruningTable::new(&tree);
                tracing::debug!(nodes = tree.node_count(), "built ball tree");
                Some((tree, table))
            }
        };

        let mut stats = ClusterStats::new(working, data.ncols());
        stats.recompute(data, assignments);
        report.empty_cluster_repairs += self.repair_empty_clusters(data, assignments, &mut stats);

        let mut seen = AssignmentHistory::default();
        seen.insert(assignments);

        loop {
            stats.recompute(data, assignments);
            let pass = match accelerated.as_mut() {
                None => naive_pass(data, stats.centroids.view(), metric, assignments),
                Some((tree, table)) => table.assign(tree, stats.centroids.view(), metric, assignments),
            };
            report.iterations += 1;
            report.distance_evaluations += pass.evaluations;

            stats.recount(assignments);
            let repaired = self.repair_empty_clusters(data, assignments, &mut stats);
            report.empty_cluster_repairs += repaired;

            tracing::debug!(
                iteration = report.iterations,
                changed = pass.changed,
                repaired,
                evaluations = pass.evaluations,
                "k-means pass"
            );

            if pass.changed == 0 {
                report.converged = true;
                break;
            }
            if self.max_iterations > 0 && report.iterations >= self.max_iterations {
                break;
            }
            if !seen.insert(assignments) {
                tracing::debug!(iteration = report.iterations, "assignments cycle; stopping");
                break;
            }
        }

        if working > clusters {
            stats.recompute(data, assignments);
            report.merges = merge_clusters(&mut stats, assignments, clusters, metric);
        }

        tracing::info!(
            iterations = report.iterations,
            converged = report.converged,
            working_clusters = working,
            merges = report.merges,
            "k-means finished"
        );
        Ok(report)
    }
}

/// Merge the two closest clusters until `target` are left, returning the
/// number of merges. Empty clusters are dropped first.
pub fn merge_clusters(
    stats: &mut ClusterStats,
    assignments: &mut [usize],
    target: usize,
    metric: &dyn Metric,
) -> usize {
    let mut merges = 0;
    while stats.clusters() > target.max(1) {
        let k = stats.clusters();
        let pair = match stats.counts.iter().position(|&c| c == 0) {
            Some(e) if e + 1 < k => (e, e + 1),
            Some(e) => (e - 1, e),
            None => closest_pair(stats, metric),
        };
        stats.merge(pair.0, pair.1, assignments);
        merges += 1;
    }
    merges
}

fn closest_pair(stats: &ClusterStats, metric: &dyn Metric) -> (usize, usize) {
    let k = stats.clusters();
    let mut pair = (0, 1);
    let mut best = f64::INFINITY;
    for i in 0..k {
        for j in i + 1..k {
            let d = metric.evaluate(stats.centroids.row(i), stats.centroids.row(j));
            if d < best {
                best = d;
                pair = (i, j);
            }
        }
    }
    pair
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::empty::AllowEmptyClusters;
    use crate::error::KMeansError;
    use crate::partition::FixedPartition;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn line() -> Array2<f64> {
        array![[0.0], [1.0], [2.0], [10.0], [11.0], [12.0]]
    }

    #[test]
    fn test_nearest_centroid_ties() {
        let centroids = array![[0.0], [2.0]];
        let p = array![1.0];
        assert_eq!(nearest_centroid(p.view(), centroids.view(), &SquaredEuclidean), (0, 1.0));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let data = line();
        let kmeans = KMeans::new();
        let mut labels = Vec::new();
        assert!(matches!(
            kmeans.cluster(data.view(), 0, &mut labels),
            Err(KMeansError::InvalidArgument(_))
        ));
        assert!(matches!(
            kmeans.cluster(data.view(), 7, &mut labels),
            Err(KMeansError::InvalidArgument(_))
        ));
        let mut short = vec![0, 1];
        assert!(matches!(
            kmeans.cluster(data.view(), 2, &mut short),
            Err(KMeansError::InvalidArgument(_))
        ));
        let mut out_of_range = vec![0, 0, 0, 1, 1, 2];
        assert!(kmeans.cluster(data.view(), 2, &mut out_of_range).is_err());
        // nothing was touched
        assert_eq!(out_of_range, vec![0, 0, 0, 1, 1, 2]);

        let below_one = KMeans::new().with_overclustering_factor(0.5);
        assert!(below_one.cluster(data.view(), 2, &mut Vec::new()).is_err());

        let nan = array![[0.0], [f64::NAN]];
        assert!(kmeans.cluster(nan.view(), 1, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_warm_start_is_a_fixed_point() {
        let data = line();
        let kmeans = KMeans::new();
        let mut labels = vec![0, 0, 0, 1, 1, 1];
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(report.iterations, 1);
        assert!(report.converged);
    }

    #[test]
    fn test_bad_start_converges() {
        let data = line();
        let kmeans = KMeans::new().with_partitioner(FixedPartition(vec![0, 1, 0, 1, 0, 1]));
        let mut labels = Vec::new();
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert!(report.converged);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_iteration_cap_is_not_an_error() {
        let data = line();
        let kmeans = KMeans::new()
            .with_max_iterations(1)
            .with_partitioner(FixedPartition(vec![0, 1, 0, 1, 0, 1]));
        let mut labels = Vec::new();
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert_eq!(report.iterations, 1);
        assert!(!report.converged);
    }

    #[test]
    fn test_empty_cluster_is_repaired() {
        let data = array![[0.0], [0.0], [0.0], [100.0]];
        let kmeans = KMeans::new();
        let mut labels = vec![0, 0, 0, 0];
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 1]);
        assert_eq!(report.empty_cluster_repairs, 1);
        assert!(report.converged);
    }

    #[test]
    fn test_allow_empty_keeps_cluster_empty() {
        let data = array![[0.0], [0.0], [0.0], [100.0]];
        let kmeans = KMeans::new().with_empty_cluster_action(AllowEmptyClusters);
        let mut labels = vec![0, 0, 0, 0];
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert_eq!(labels, vec![0, 0, 0, 0]);
        assert_eq!(report.empty_cluster_repairs, 0);
    }

    #[test]
    fn test_overclustering_merges_down() {
        let data = line();
        let kmeans = KMeans::new()
            .with_overclustering_factor(3.0)
            .with_partitioner(RandomPartition::seeded(9));
        let mut labels = Vec::new();
        let report = kmeans.cluster(data.view(), 2, &mut labels).unwrap();
        assert_eq!(report.working_clusters, 6);
        assert_eq!(report.merges, 4);
        assert!(labels.iter().all(|&l| l < 2));
        assert!(labels[..3].iter().all(|&l| l == labels[0]));
        assert!(labels[3..].iter().all(|&l| l == labels[3]));
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_merge_prefers_lowest_pair_on_ties() {
        let data = array![[0.0], [1.0], [2.0], [3.0]];
        let mut assignments = vec![0, 1, 2, 3];
        let mut stats = ClusterStats::new(4, 1);
        stats.recompute(data.view(), &assignments);
        let merges = merge_clusters(&mut stats, &mut assignments, 3, &SquaredEuclidean);
        assert_eq!(merges, 1);
        assert_eq!(assignments, vec![0, 0, 1, 2]);
        assert_abs_diff_eq!(stats.centroids[[0, 0]], 0.5);
    }

    #[test]
    fn test_merge_drops_empty_clusters_first() {
        let data = array![[0.0], [1.0], [50.0]];
        let mut assignments = vec![0, 0, 2];
        let mut stats = ClusterStats::new(3, 1);
        stats.recompute(data.view(), &assignments);
        merge_clusters(&mut stats, &mut assignments, 2, &SquaredEuclidean);
        assert_eq!(assignments, vec![0, 0, 1]);
        assert_eq!(stats.counts, vec![2, 1]);
    }

    #[test]
    fn test_centroids_of_result() {
        let data = line();
        let kmeans = KMeans::new();
        let c = kmeans.centroids(data.view(), 2, &[0, 0, 0, 1, 1, 1]).unwrap();
        assert_abs_diff_eq!(c[[0, 0]], 1.0);
        assert_abs_diff_eq!(c[[1, 0]], 11.0);
        assert!(kmeans.centroids(data.view(), 1, &[0, 0, 0, 1, 1, 1]).is_err());
    }

    #[test]
    fn test_fast_cluster_matches() {
        let data = line();
        let kmeans = KMeans::new()
            .with_leaf_size(2)
            .with_partitioner(FixedPartition(vec![1, 0, 1, 0, 1, 0]));
        let mut slow = Vec::new();
        let mut fast = Vec::new();
        let a = kmeans.cluster(data.view(), 2, &mut slow).unwrap();
        let b = kmeans.fast_cluster(data.view(), 2, &mut fast).unwrap();
        assert_eq!(slow, fast);
        assert_eq!(a.iterations, b.iterations);
    }

    /// Hands back whatever it was built with, without any checks.
    struct UncheckedPartition(Vec<usize>);

    impl Partitioner for UncheckedPartition {
        fn partition(&self, _data: ArrayView2<f64>, _clusters: usize) -> Result<Vec<usize>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "unchecked"
        }
    }

    #[test]
    fn test_malformed_partition_leaves_assignments_untouched() {
        let data = array![[0.0], [1.0], [2.0], [3.0]];
        for labels in [vec![0, 1], vec![0, 1, 5, 0]] {
            let kmeans = KMeans::new().with_partitioner(UncheckedPartition(labels));
            for fast in [false, true] {
                let mut assignments = Vec::new();
                let result = if fast {
                    kmeans.fast_cluster(data.view(), 2, &mut assignments)
                } else {
                    kmeans.cluster(data.view(), 2, &mut assignments)
                };
                assert!(matches!(result, Err(KMeansError::InvalidArgument(_))));
                assert!(assignments.is_empty());
            }
        }
    }

    #[test]
    fn test_several_empty_clusters_repaired_in_turn() {
        let data = array![[0.0], [1.0], [2.0], [50.0], [51.0], [100.0]];
        let mut assignments = vec![0; 6];
        let mut stats = ClusterStats::new(4, 1);
        stats.recompute(data.view(), &assignments);

        let moved = KMeans::new().repair_empty_clusters(data.view(), &mut assignments, &mut stats);
        // cluster 1 takes 100 (mean 34), cluster 2 takes 51 (mean 20.8),
        // cluster 3 takes 50 (mean 13.25)
        assert_eq!(moved, 3);
        assert_eq!(assignments, vec![0, 0, 0, 3, 2, 1]);
        assert!(stats.empty_clusters().is_empty());
        assert_eq!(stats.counts, vec![3, 1, 1, 1]);
        assert_abs_diff_eq!(stats.centroids[[0, 0]], 1.0, epsilon = 1e-12);

        let kmeans = KMeans::new().with_partitioner(FixedPartition(vec![0; 6]));
        for fast in [false, true] {
            let mut labels = Vec::new();
            let report = if fast {
                kmeans.fast_cluster(data.view(), 4, &mut labels).unwrap()
            } else {
                kmeans.cluster(data.view(), 4, &mut labels).unwrap()
            };
            assert_eq!(labels, vec![0, 0, 0, 3, 2, 1]);
            assert_eq!(report.empty_cluster_repairs, 3);
            assert!(report.converged);
        }
    }

    #[test]
    fn test_history_compares_full_vectors() {
        let mut history = AssignmentHistory::default();
        assert!(history.insert(&[0, 1, 1]));
        assert!(history.insert(&[1, 0, 1]));
        assert!(!history.insert(&[0, 1, 1]));

        // a different vector stored under the same fingerprint is not a repeat
        let mut colliding = AssignmentHistory::default();
        colliding
            .buckets
            .insert(fingerprint(&[2, 2, 2]), vec![vec![9, 9, 9]]);
        assert!(colliding.insert(&[2, 2, 2]));
        assert!(!colliding.insert(&[2, 2, 2]));
    }

    #[test]
    fn test_debug_names_policies() {
        let text = format!("{:?}", KMeans::new());
        assert!(text.contains("squared-euclidean"));
        assert!(text.contains("max-variance"));
    }
}
