use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cloud::{distance_squared, KdTree, PointSet};

/// Exact farthest-point sampling.
///
/// Starts from a random seed point, then repeatedly selects the point whose
/// distance to the already-selected set is largest, updating every
/// unselected point's min-distance after each selection. O(target · N).
pub fn vanilla(points: &PointSet, target: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let n = points.len();
    let mut min_dist = vec![f64::INFINITY; n];
    let mut chosen = vec![false; n];
    let mut selected = Vec::with_capacity(target);

    let mut current = rng.gen_range(0..n);
    chosen[current] = true;
    selected.push(current);

    while selected.len() < target {
        for i in 0..n {
            if chosen[i] {
                continue;
            }
            let d = distance_squared(&points[i], &points[current]);
            if d < min_dist[i] {
                min_dist[i] = d;
            }
        }
        current = farthest_unchosen(&min_dist, &chosen);
        chosen[current] = true;
        selected.push(current);
    }
    selected
}

/// Windowed farthest-point sampling (index-locality heuristic).
///
/// The first pass measures every point against the seed; after that, a
/// selection only refreshes the min-distances of the `window` indices on
/// either side of it. Points outside the window keep stale (over-estimated)
/// distances, trading exactness for locality.
pub fn windowed(points: &PointSet, target: usize, window: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let n = points.len();
    let mut min_dist = vec![f64::INFINITY; n];
    let mut chosen = vec![false; n];
    let mut selected = Vec::with_capacity(target);

    let mut current = rng.gen_range(0..n);
    chosen[current] = true;
    selected.push(current);

    let mut first_pass = true;
    while selected.len() < target {
        if first_pass {
            for i in 0..n {
                if !chosen[i] {
                    min_dist[i] = distance_squared(&points[i], &points[current]);
                }
            }
            first_pass = false;
        } else {
            let lo = current.saturating_sub(window);
            let hi = (current + window + 1).min(n);
            for i in lo..hi {
                if chosen[i] {
                    continue;
                }
                let d = distance_squared(&points[i], &points[current]);
                if d < min_dist[i] {
                    min_dist[i] = d;
                }
            }
        }
        current = farthest_unchosen(&min_dist, &chosen);
        chosen[current] = true;
        selected.push(current);
    }
    selected
}

/// Windowed farthest-point sampling with a spatial window.
///
/// Same shape as [`windowed`], but the refresh window is the selected
/// point's `window` nearest neighbors from a kd-tree, so the locality
/// assumption holds regardless of the input's index order.
pub fn windowed_tree(
    points: &PointSet,
    target: usize,
    window: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<usize> {
    let n = points.len();
    let tree = KdTree::build(points.as_slice());
    let mut min_dist = vec![f64::INFINITY; n];
    let mut chosen = vec![false; n];
    let mut selected = Vec::with_capacity(target);

    let mut current = rng.gen_range(0..n);
    chosen[current] = true;
    selected.push(current);

    let mut first_pass = true;
    while selected.len() < target {
        if first_pass {
            for i in 0..n {
                if !chosen[i] {
                    min_dist[i] = distance_squared(&points[i], &points[current]);
                }
            }
            first_pass = false;
        } else {
            for i in tree.k_nearest(&points[current], window, Some(current)) {
                if chosen[i] {
                    continue;
                }
                let d = distance_squared(&points[i], &points[current]);
                if d < min_dist[i] {
                    min_dist[i] = d;
                }
            }
        }
        current = farthest_unchosen(&min_dist, &chosen);
        chosen[current] = true;
        selected.push(current);
    }
    selected
}

/// Index of the unchosen point with the largest min-distance.
///
/// Only called while at least one point is unchosen.
pub(super) fn farthest_unchosen(min_dist: &[f64], chosen: &[bool]) -> usize {
    let mut best = usize::MAX;
    let mut best_dist = f64::NEG_INFINITY;
    for i in 0..min_dist.len() {
        if !chosen[i] && min_dist[i] > best_dist {
            best = i;
            best_dist = min_dist[i];
        }
    }
    best
}
