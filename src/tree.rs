//! Ball tree over a reordered copy of the dataset.
//!
//! Nodes live in an arena and own a contiguous range of the reordered
//! points. `old_from_new[i]` is the row of the caller's dataset that ended up
//! at row `i` of the tree's copy.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::metric::Metric;

pub const DEFAULT_LEAF_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub begin: usize,
    pub count: usize,
    pub center: Array1<f64>,
    /// Largest `bound_distance` from `center` to a member point.
    pub radius: f64,
    pub children: Option<(usize, usize)>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.begin..self.begin + self.count
    }
}

#[derive(Debug, Clone)]
pub struct BallTree {
    points: Array2<f64>,
    old_from_new: Vec<usize>,
    nodes: Vec<TreeNode>,
}

impl BallTree {
    /// Build the tree, splitting every node with more than `leaf_size` points
    /// at the median of its widest dimension.
    pub fn build(data: ArrayView2<f64>, leaf_size: usize, metric: &dyn Metric) -> Self {
        let leaf_size = leaf_size.max(1);
        let mut order: Vec<usize> = (0..data.nrows()).collect();
        let mut nodes = Vec::new();
        if !order.is_empty() {
            Self::build_recursive(data, &mut order, 0, data.nrows(), leaf_size, metric, &mut nodes);
        }
        let points = data.select(Axis(0), &order);
        Self {
            points,
            old_from_new: order,
            nodes,
        }
    }

    fn build_recursive(
        data: ArrayView2<f64>,
        order: &mut [usize],
        begin: usize,
        count: usize,
        leaf_size: usize,
        metric: &dyn Metric,
        nodes: &mut Vec<TreeNode>,
    ) -> usize {
        let members = &order[begin..begin + count];
        let (center, radius) = bounding_ball(data, members, metric);
        let index = nodes.len();
        nodes.push(TreeNode {
            begin,
            count,
            center,
            radius,
            children: None,
        });

        if count <= leaf_size {
            return index;
        }
        let Some(dim) = widest_dimension(data, members) else {
            // every member sits on the same spot
            return index;
        };

        let slice = &mut order[begin..begin + count];
        slice.sort_by(|&a, &b| {
            data[[a, dim]]
                .total_cmp(&data[[b, dim]])
                .then(a.cmp(&b))
        });
        let half = count / 2;
        let left = Self::build_recursive(data, order, begin, half, leaf_size, metric, nodes);
        let right = Self::build_recursive(
            data,
            order,
            begin + half,
            count - half,
            leaf_size,
            metric,
            nodes,
        );
        nodes[index].children = Some((left, right));
        index
    }

    pub const fn root(&self) -> usize {
        0
    }

    pub fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn point(&self, new_index: usize) -> ArrayView1<f64> {
        self.points.row(new_index)
    }

    pub fn old_from_new(&self) -> &[usize] {
        &self.old_from_new
    }
}

fn bounding_ball(data: ArrayView2<f64>, members: &[usize], metric: &dyn Metric) -> (Array1<f64>, f64) {
    let mut center = Array1::<f64>::zeros(data.ncols());
    for &i in members {
        center += &data.row(i);
    }
    center.mapv_inplace(|x| x / members.len() as f64);

    let radius = members
        .iter()
        .map(|&i| metric.bound_distance(center.view(), data.row(i)))
        .fold(0.0, f64::max);
    (center, radius)
}

fn widest_dimension(data: ArrayView2<f64>, members: &[usize]) -> Option<usize> {
    let mut best = None;
    let mut best_width = 0.0;
    for dim in 0..data.ncols() {
        let (lo, hi) = members.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
            let x = data[[i, dim]];
            (lo.min(x), hi.max(x))
        });
        if hi - lo > best_width {
            best_width = hi - lo;
            best = Some(dim);
        }
    }
    best
}
