//! Initial partition policies: where the iterations start from.

use ndarray::{Array2, ArrayView2, Axis};
use rand::prelude::*;
use rand::seq::index::sample;

use crate::error::{invalid, Result};
use crate::kmeans::{nearest_centroid, KMeans};
use crate::metric::SquaredEuclidean;

/// Produces a first assignment of every point to one of `clusters` clusters.
pub trait Partitioner: Send + Sync {
    fn partition(&self, data: ArrayView2<f64>, clusters: usize) -> Result<Vec<usize>>;

    fn name(&self) -> &'static str;
}

/// Assigns every point to a uniformly random cluster.
///
/// With a seed the partition is reproducible; without one it draws from the
/// thread local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPartition {
    pub seed: Option<u64>,
}

impl RandomPartition {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

fn random_labels<R: Rng>(rng: &mut R, n: usize, clusters: usize) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..clusters)).collect()
}

impl Partitioner for RandomPartition {
    fn partition(&self, data: ArrayView2<f64>, clusters: usize) -> Result<Vec<usize>> {
        if clusters == 0 {
            return invalid("cannot partition into zero clusters");
        }
        let n = data.nrows();
        Ok(match self.seed {
            Some(seed) => random_labels(&mut StdRng::seed_from_u64(seed), n, clusters),
            None => random_labels(&mut thread_rng(), n, clusters),
        })
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Use a known assignment as the starting point.
#[derive(Debug, Clone, Default)]
pub struct FixedPartition(pub Vec<usize>);

impl Partitioner for FixedPartition {
    fn partition(&self, data: ArrayView2<f64>, clusters: usize) -> Result<Vec<usize>> {
        if self.0.len() != data.nrows() {
            return invalid(format!(
                "fixed partition has {} labels for {} points",
                self.0.len(),
                data.nrows()
            ));
        }
        if let Some(&bad) = self.0.iter().find(|&&a| a >= clusters) {
            return invalid(format!("fixed partition label {bad} >= {clusters} clusters"));
        }
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Bradley and Fayyad refined start.
///
/// Clusters `samplings` random subsets of `percentage` of the data, pools the
/// centroids found on every subset, clusters that pool and labels each point
/// with its nearest pooled centroid.
#[derive(Debug, Clone, Copy)]
pub struct RefinedStart {
    pub samplings: usize,
    pub percentage: f64,
    pub seed: Option<u64>,
}

impl Default for RefinedStart {
    fn default() -> Self {
        Self {
            samplings: 100,
            percentage: 0.02,
            seed: None,
        }
    }
}

impl RefinedStart {
    fn run<R: Rng>(&self, rng: &mut R, data: ArrayView2<f64>, clusters: usize) -> Result<Vec<usize>> {
        let n = data.nrows();
        let dims = data.ncols();
        let sample_size = ((self.percentage * n as f64) as usize).clamp(clusters, n);

        let mut pool = Array2::<f64>::zeros((self.samplings * clusters, dims));
        for s in 0..self.samplings {
            let picked = sample(rng, n, sample_size).into_vec();
            let subset = data.select(Axis(0), &picked);

            let engine = KMeans::new().with_partitioner(RandomPartition::seeded(rng.gen()));
            let mut labels = Vec::new();
            engine.cluster(subset.view(), clusters, &mut labels)?;
            let centroids = engine.centroids(subset.view(), clusters, &labels)?;
            pool.slice_mut(ndarray::s![s * clusters..(s + 1) * clusters, ..])
                .assign(&centroids);
        }

        let engine = KMeans::new().with_partitioner(RandomPartition::seeded(rng.gen()));
        let mut pool_labels = Vec::new();
        engine.cluster(pool.view(), clusters, &mut pool_labels)?;
        let refined = engine.centroids(pool.view(), clusters, &pool_labels)?;

        Ok(data
            .outer_iter()
            .map(|row| nearest_centroid(row, refined.view(), &SquaredEuclidean).0)
            .collect())
    }
}

impl Partitioner for RefinedStart {
    fn partition(&self, data: ArrayView2<f64>, clusters: usize) -> Result<Vec<usize>> {
        if clusters == 0 || clusters > data.nrows() {
            return invalid(format!(
                "refined start needs 1..={} clusters, got {clusters}",
                data.nrows()
            ));
        }
        if self.samplings == 0 || !(self.percentage > 0.0 && self.percentage <= 1.0) {
            return invalid("refined start needs samplings > 0 and percentage in (0, 1]");
        }
        match self.seed {
            Some(seed) => self.run(&mut StdRng::seed_from_u64(seed), data, clusters),
            None => self.run(&mut thread_rng(), data, clusters),
        }
    }

    fn name(&self) -> &'static str {
        "refined-start"
    }
}
