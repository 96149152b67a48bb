//! Property tests: label range, cluster count, determinism and
//! equivalence of the tree accelerated path.

use ndarray::Array2;
use overkmeans::{KMeans, RandomPartition};
use proptest::prelude::*;

fn dataset() -> impl Strategy<Value = Array2<f64>> {
    (6usize..60, 1usize..4).prop_flat_map(|(n, d)| {
        prop::collection::vec(-100.0f64..100.0, n * d)
            .prop_map(move |v| Array2::from_shape_vec((n, d), v).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every label is below the requested count and every cluster is used
    #[test]
    fn prop_labels_in_range(data in dataset(), k in 1usize..6, factor in 1.0f64..3.0, seed in any::<u64>()) {
        let k = k.min(data.nrows());
        let kmeans = KMeans::new()
            .with_overclustering_factor(factor)
            .with_partitioner(RandomPartition::seeded(seed));
        let mut labels = Vec::new();
        kmeans.cluster(data.view(), k, &mut labels).unwrap();

        prop_assert_eq!(labels.len(), data.nrows());
        prop_assert!(labels.iter().all(|&l| l < k));
        for c in 0..k {
            prop_assert!(labels.contains(&c), "cluster {} unused", c);
        }
    }

    /// Tree pruning never changes the outcome
    #[test]
    fn prop_fast_matches_naive(data in dataset(), k in 1usize..6, leaf in 1usize..10, seed in any::<u64>()) {
        let k = k.min(data.nrows());
        let kmeans = KMeans::new()
            .with_leaf_size(leaf)
            .with_partitioner(RandomPartition::seeded(seed));
        let mut slow = Vec::new();
        let mut fast = Vec::new();
        let a = kmeans.cluster(data.view(), k, &mut slow).unwrap();
        let b = kmeans.fast_cluster(data.view(), k, &mut fast).unwrap();
        prop_assert_eq!(slow, fast);
        prop_assert_eq!(a.iterations, b.iterations);
    }

    /// Identical inputs give identical outputs
    #[test]
    fn prop_deterministic(data in dataset(), k in 1usize..6, seed in any::<u64>()) {
        let k = k.min(data.nrows());
        let kmeans = KMeans::new()
            .with_overclustering_factor(2.0)
            .with_partitioner(RandomPartition::seeded(seed));
        let mut first = Vec::new();
        let mut second = Vec::new();
        kmeans.cluster(data.view(), k, &mut first).unwrap();
        kmeans.cluster(data.view(), k, &mut second).unwrap();
        prop_assert_eq!(first, second);
    }
}
