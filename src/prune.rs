//! Nearest-centroid search over the ball tree with distance-bound pruning.
//!
//! A centroid is dropped for a node only when its lower bound is strictly
//! larger than the best upper bound among the node's candidates, so every
//! point under that node is provably closer to another centroid. The result
//! is identical to scanning every centroid for every point.

use ndarray::ArrayView2;

use crate::kmeans::AssignPass;
use crate::metric::Metric;
use crate::tree::BallTree;

/// Relative tolerance absorbing rounding in the bound arithmetic.
const PRUNE_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub cluster: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Per node annotation, rebuilt on every pass.
#[derive(Debug, Clone, Default)]
pub struct NodeBounds {
    pub candidates: Vec<Candidate>,
}

/// Side table of [`NodeBounds`] keyed by node index in the tree arena.
#[derive(Debug, Clone)]
pub struct PruningTable {
    nodes: Vec<NodeBounds>,
}

fn dominated(c: &Candidate, min_upper: f64) -> bool {
    if !c.lower.is_finite() {
        return min_upper.is_finite();
    }
    c.lower > min_upper + PRUNE_SLACK * (c.upper + min_upper)
}

impl PruningTable {
    pub fn new(tree: &BallTree) -> Self {
        Self {
            nodes: vec![NodeBounds::default(); tree.node_count()],
        }
    }

    pub fn bounds(&self, node: usize) -> &NodeBounds {
        &self.nodes[node]
    }

    /// Reassign every point to its nearest centroid. `assignments` is indexed
    /// by the caller's original point order.
    pub fn assign(
        &mut self,
        tree: &BallTree,
        centroids: ArrayView2<f64>,
        metric: &dyn Metric,
        assignments: &mut [usize],
    ) -> AssignPass {
        let mut pass = AssignPass::default();
        if tree.node_count() == 0 {
            return pass;
        }
        let all: Vec<usize> = (0..centroids.nrows()).collect();
        self.visit(tree, tree.root(), &all, centroids, metric, assignments, &mut pass);
        pass
    }

    #[allow(clippy::too_many_arguments)]
    fn visit(
        &mut self,
        tree: &BallTree,
        index: usize,
        parent: &[usize],
        centroids: ArrayView2<f64>,
        metric: &dyn Metric,
        assignments: &mut [usize],
        pass: &mut AssignPass,
    ) {
        let node = tree.node(index);
        let entry = &mut self.nodes[index];
        entry.candidates.clear();

        let mut min_upper = f64::INFINITY;
        for &cluster in parent {
            let d = metric.bound_distance(node.center.view(), centroids.row(cluster));
            pass.evaluations += 1;
            let upper = d + node.radius;
            min_upper = min_upper.min(upper);
            entry.candidates.push(Candidate {
                cluster,
                lower: (d - node.radius).max(0.0),
                upper,
            });
        }
        entry.candidates.retain(|c| !dominated(c, min_upper));
        let survivors: Vec<usize> = entry.candidates.iter().map(|c| c.cluster).collect();

        if let [owner] = survivors[..] {
            for i in node.range() {
                let old = tree.old_from_new()[i];
                if assignments[old] != owner {
                    assignments[old] = owner;
                    pass.changed += 1;
                }
            }
            return;
        }

        if node.is_leaf() {
            for i in node.range() {
                let point = tree.point(i);
                let mut best = survivors[0];
                let mut best_dist = f64::INFINITY;
                for &c in &survivors {
                    let d = metric.evaluate(point, centroids.row(c));
                    if d < best_dist {
                        best_dist = d;
                        best = c;
                    }
                }
                pass.evaluations += survivors.len() as u64;

                let old = tree.old_from_new()[i];
                if assignments[old] != best {
                    assignments[old] = best;
                    pass.changed += 1;
                }
            }
            return;
        }

        if let Some((left, right)) = node.children {
            self.visit(tree, left, &survivors, centroids, metric, assignments, pass);
            self.visit(tree, right, &survivors, centroids, metric, assignments, pass);
        }
    }
}
