//! K-means clustering on `Array2<f64>` datasets (one point per row).
//!
//! The engine runs Lloyd iterations with a pluggable [`Metric`], a pluggable
//! [`Partitioner`] for the starting assignment and a pluggable
//! [`EmptyClusterPolicy`]. Optionally it overclusters and merges the closest
//! clusters afterwards, and [`KMeans::fast_cluster`] prunes the reassignment
//! passes through a ball tree while producing the same labels as
//! [`KMeans::cluster`].

pub mod dataset;
pub mod empty;
pub mod error;
pub mod kmeans;
pub mod metric;
pub mod partition;
pub mod prune;
pub mod stats;
pub mod tree;

pub use dataset::DataSet;
pub use empty::{AllowEmptyClusters, EmptyClusterPolicy, MaxVarianceNewCluster};
pub use error::{KMeansError, Result};
pub use kmeans::{ClusterReport, KMeans};
pub use metric::{Chebyshev, Euclidean, Manhattan, Metric, SquaredEuclidean};
pub use partition::{FixedPartition, Partitioner, RandomPartition, RefinedStart};
pub use stats::ClusterStats;
