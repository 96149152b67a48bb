//! Distance metrics used to compare points and centroids.

use ndarray::ArrayView1;

/// A pairwise distance between two points of equal dimension.
///
/// `evaluate` drives every assignment decision. `bound_distance` is only used
/// by the tree accelerated path: it has to satisfy the triangle inequality and
/// be a strictly increasing function of `evaluate`, so that ordering centroids
/// by either value gives the same answer.
pub trait Metric: Send + Sync {
    fn evaluate(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64;

    fn bound_distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        self.evaluate(a, b)
    }

    fn name(&self) -> &'static str;
}

/// Squared euclidean distance. Not a metric in the strict sense, so pruning
/// bounds are taken on the plain euclidean distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

/// L-infinity distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

#[inline]
fn squared_sum(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

impl Metric for SquaredEuclidean {
    #[inline]
    fn evaluate(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        squared_sum(a, b)
    }

    #[inline]
    fn bound_distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        squared_sum(a, b).sqrt()
    }

    fn name(&self) -> &'static str {
        "squared-euclidean"
    }
}

impl Metric for Euclidean {
    #[inline]
    fn evaluate(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        squared_sum(a, b).sqrt()
    }

    fn name(&self) -> &'static str {
        "euclidean"
    }
}

impl Metric for Manhattan {
    #[inline]
    fn evaluate(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

impl Metric for Chebyshev {
    #[inline]
    fn evaluate(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    fn name(&self) -> &'static str {
        "chebyshev"
    }
}
