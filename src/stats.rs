//! Per-cluster centroids and member counts for one clustering run.

use ndarray::{Array2, ArrayView2, Axis};

use crate::metric::Metric;

/// Centroid and member count of every working cluster.
///
/// A cluster that never had a member holds `f64::INFINITY` in every
/// coordinate, so no point is ever nearer to it than to a real centroid.
#[derive(Debug, Clone)]
pub struct ClusterStats {
    pub centroids: Array2<f64>,
    pub counts: Vec<usize>,
}

impl ClusterStats {
    pub fn new(clusters: usize, dims: usize) -> Self {
        Self {
            centroids: Array2::from_elem((clusters, dims), f64::INFINITY),
            counts: vec![0; clusters],
        }
    }

    pub fn clusters(&self) -> usize {
        self.counts.len()
    }

    pub fn recount(&mut self, assignments: &[usize]) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        for &a in assignments {
            self.counts[a] += 1;
        }
    }

    pub fn empty_clusters(&self) -> Vec<usize> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Recompute counts and means from scratch, summing in point order.
    /// Empty clusters keep their previous centroid.
    pub fn recompute(&mut self, data: ArrayView2<f64>, assignments: &[usize]) {
        let mut sums = Array2::<f64>::zeros(self.centroids.raw_dim());
        self.counts.iter_mut().for_each(|c| *c = 0);

        for (row, &c) in data.outer_iter().zip(assignments) {
            let mut target = sums.row_mut(c);
            target += &row;
            self.counts[c] += 1;
        }

        for (ci, (mut centroid, sum)) in self
            .centroids
            .outer_iter_mut()
            .zip(sums.outer_iter())
            .enumerate()
        {
            let n = self.counts[ci];
            if n > 0 {
                centroid.assign(&sum);
                centroid.mapv_inplace(|x| x / n as f64);
            }
        }
    }

    /// Sum of member distances to their centroid, per cluster.
    pub fn dispersion(
        &self,
        data: ArrayView2<f64>,
        assignments: &[usize],
        metric: &dyn Metric,
    ) -> Vec<f64> {
        let mut out = vec![0.0; self.clusters()];
        for (row, &c) in data.outer_iter().zip(assignments) {
            out[c] += metric.evaluate(row, self.centroids.row(c));
        }
        out
    }

    /// Move one point out of `from` into `to`, updating both means in place.
    pub fn move_point(&mut self, data: ArrayView2<f64>, point: usize, from: usize, to: usize) {
        let p = data.row(point);

        let n_from = self.counts[from];
        if n_from > 1 {
            let scale = n_from as f64;
            let mut c = self.centroids.row_mut(from);
            c.zip_mut_with(&p, |m, &x| *m = (*m * scale - x) / (scale - 1.0));
        }
        self.counts[from] = n_from.saturating_sub(1);

        let n_to = self.counts[to];
        let mut c = self.centroids.row_mut(to);
        if n_to == 0 {
            c.assign(&p);
        } else {
            let scale = n_to as f64;
            c.zip_mut_with(&p, |m, &x| *m = (*m * scale + x) / (scale + 1.0));
        }
        self.counts[to] = n_to + 1;
    }

    /// Merge cluster `j` into cluster `i` (`i < j`) and drop `j`, shifting every
    /// later cluster id down by one.
    pub fn merge(&mut self, i: usize, j: usize, assignments: &mut [usize]) {
        debug_assert!(i < j);
        let (ni, nj) = (self.counts[i] as f64, self.counts[j] as f64);
        let total = ni + nj;
        if total > 0.0 {
            let cj = self.centroids.row(j).to_owned();
            let mut ci = self.centroids.row_mut(i);
            ci.zip_mut_with(&cj, |a, &b| *a = (*a * ni + b * nj) / total);
        }
        self.counts[i] += self.counts[j];
        self.counts.remove(j);

        let keep: Vec<usize> = (0..self.centroids.nrows()).filter(|&r| r != j).collect();
        self.centroids = self.centroids.select(Axis(0), &keep);

        for a in assignments.iter_mut() {
            if *a == j {
                *a = i;
            } else if *a > j {
                *a -= 1;
            }
        }
    }
}
