use super::point_set::{distance_squared, Point3};

/// Leaf capacity used when no explicit tree height is requested.
const DEFAULT_LEAF_SIZE: usize = 16;

/// Axis-aligned bounding box over a set of points.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    fn of(points: &[Point3], indices: &[usize]) -> Aabb {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for &i in indices {
            for axis in 0..3 {
                min[axis] = min[axis].min(points[i][axis]);
                max[axis] = max[axis].max(points[i][axis]);
            }
        }
        Aabb { min, max }
    }

    fn widest_axis(&self) -> usize {
        let mut axis = 0;
        let mut widest = self.max[0] - self.min[0];
        for a in 1..3 {
            let extent = self.max[a] - self.min[a];
            if extent > widest {
                widest = extent;
                axis = a;
            }
        }
        axis
    }

    /// Squared distance from `p` to the closest point of the box.
    ///
    /// Zero when `p` lies inside; a valid lower bound on the distance from
    /// `p` to any point contained in the box.
    pub fn min_distance_squared(&self, p: &Point3) -> f64 {
        let mut sum = 0.0;
        for axis in 0..3 {
            let d = if p[axis] < self.min[axis] {
                self.min[axis] - p[axis]
            } else if p[axis] > self.max[axis] {
                p[axis] - self.max[axis]
            } else {
                0.0
            };
            sum += d * d;
        }
        sum
    }
}

enum Node {
    Leaf {
        indices: Vec<usize>,
        bounds: Aabb,
    },
    Split {
        left: Box<Node>,
        right: Box<Node>,
        bounds: Aabb,
    },
}

/// A leaf bucket of the tree: member indices plus their bounding box.
pub struct Bucket<'t> {
    pub indices: &'t [usize],
    pub bounds: &'t Aabb,
}

/// Balanced kd-tree over a point slice, split at the median of the widest
/// axis. Indices stored in the tree refer to positions in the original slice.
pub struct KdTree<'a> {
    points: &'a [Point3],
    root: Node,
}

impl<'a> KdTree<'a> {
    /// Build with the default leaf capacity, suitable for nearest-neighbor
    /// queries.
    pub fn build(points: &'a [Point3]) -> Self {
        let indices: Vec<usize> = (0..points.len()).collect();
        let root = build_node(points, indices, None, DEFAULT_LEAF_SIZE);
        Self { points, root }
    }

    /// Build to a fixed height `h`, yielding up to 2^h leaf buckets.
    pub fn with_height(points: &'a [Point3], h: usize) -> Self {
        let indices: Vec<usize> = (0..points.len()).collect();
        let root = build_node(points, indices, Some(h), 1);
        Self { points, root }
    }

    /// The `k` nearest indices to `query`, closest first, excluding
    /// `exclude` if given. Returns fewer than `k` when the tree is smaller.
    pub fn k_nearest(&self, query: &Point3, k: usize, exclude: Option<usize>) -> Vec<usize> {
        if k == 0 {
            return Vec::new();
        }
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(k + 1);
        self.search(&self.root, query, k, exclude, &mut best);
        best.into_iter().map(|(_, i)| i).collect()
    }

    /// All leaf buckets of the tree.
    pub fn buckets(&self) -> Vec<Bucket<'_>> {
        let mut out = Vec::new();
        collect_buckets(&self.root, &mut out);
        out
    }

    fn search(
        &self,
        node: &Node,
        query: &Point3,
        k: usize,
        exclude: Option<usize>,
        best: &mut Vec<(f64, usize)>,
    ) {
        match node {
            Node::Leaf { indices, .. } => {
                for &i in indices {
                    if exclude == Some(i) {
                        continue;
                    }
                    let d = distance_squared(query, &self.points[i]);
                    if best.len() < k {
                        let pos = best.partition_point(|&(bd, _)| bd < d);
                        best.insert(pos, (d, i));
                    } else if d < best[k - 1].0 {
                        let pos = best.partition_point(|&(bd, _)| bd < d);
                        best.insert(pos, (d, i));
                        best.pop();
                    }
                }
            }
            Node::Split { left, right, .. } => {
                let dl = bounds_of(left).min_distance_squared(query);
                let dr = bounds_of(right).min_distance_squared(query);
                let (first, d_first, second, d_second) = if dl <= dr {
                    (left, dl, right, dr)
                } else {
                    (right, dr, left, dl)
                };
                if best.len() < k || d_first < best[k - 1].0 {
                    self.search(first, query, k, exclude, best);
                }
                if best.len() < k || d_second < best[k - 1].0 {
                    self.search(second, query, k, exclude, best);
                }
            }
        }
    }
}

fn bounds_of(node: &Node) -> &Aabb {
    match node {
        Node::Leaf { bounds, .. } => bounds,
        Node::Split { bounds, .. } => bounds,
    }
}

fn collect_buckets<'t>(node: &'t Node, out: &mut Vec<Bucket<'t>>) {
    match node {
        Node::Leaf { indices, bounds } => out.push(Bucket { indices, bounds }),
        Node::Split { left, right, .. } => {
            collect_buckets(left, out);
            collect_buckets(right, out);
        }
    }
}

fn build_node(
    points: &[Point3],
    mut indices: Vec<usize>,
    depth_left: Option<usize>,
    leaf_size: usize,
) -> Node {
    let bounds = Aabb::of(points, &indices);
    let at_bottom = depth_left == Some(0) || indices.len() <= leaf_size.max(1);
    if at_bottom {
        return Node::Leaf { indices, bounds };
    }

    let axis = bounds.widest_axis();
    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| points[a][axis].total_cmp(&points[b][axis]));
    let right_indices = indices.split_off(mid);

    let next_depth = depth_left.map(|d| d - 1);
    let left = Box::new(build_node(points, indices, next_depth, leaf_size));
    let right = Box::new(build_node(points, right_indices, next_depth, leaf_size));
    Node::Split {
        left,
        right,
        bounds,
    }
}
