use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cloud::{distance_squared, KdTree, PointSet};

/// Exact farthest-point sampling over kd-tree buckets (QuickFPS scheme).
///
/// Points are bucketed by a kd-tree of the given height. Each bucket tracks
/// the largest min-distance among its unchosen members. After a selection,
/// a bucket whose bounding box is farther from the new point than its
/// tracked maximum cannot have any member's min-distance reduced, so the
/// whole bucket skips the update. Selection scans buckets by their tracked
/// maxima instead of every point.
pub fn bucket_fps(points: &PointSet, target: usize, height: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let pts = points.as_slice();
    let n = pts.len();
    let tree = KdTree::with_height(pts, height);
    let buckets = tree.buckets();

    let mut min_dist = vec![f64::INFINITY; n];
    let mut chosen = vec![false; n];
    // Largest min-distance among each bucket's unchosen members
    let mut bounds = vec![f64::INFINITY; buckets.len()];
    let mut selected = Vec::with_capacity(target);

    let mut current = rng.gen_range(0..n);
    chosen[current] = true;
    min_dist[current] = 0.0;
    selected.push(current);

    // First pass is unpruned: every point gets a real distance to the seed
    for (b, bucket) in buckets.iter().enumerate() {
        for &i in bucket.indices {
            if !chosen[i] {
                min_dist[i] = distance_squared(&pts[i], &pts[current]);
            }
        }
        bounds[b] = bucket_bound(bucket.indices, &min_dist, &chosen);
    }

    while selected.len() < target {
        // Pick the bucket holding the globally farthest unchosen point
        let mut best_bucket = 0;
        for b in 1..buckets.len() {
            if bounds[b] > bounds[best_bucket] {
                best_bucket = b;
            }
        }
        let mut next = usize::MAX;
        let mut next_dist = f64::NEG_INFINITY;
        for &i in buckets[best_bucket].indices {
            if !chosen[i] && min_dist[i] > next_dist {
                next = i;
                next_dist = min_dist[i];
            }
        }

        current = next;
        chosen[current] = true;
        min_dist[current] = 0.0;
        selected.push(current);
        // The selection changed this bucket's membership, not just its
        // distances, so its bound is refreshed unconditionally
        bounds[best_bucket] = bucket_bound(buckets[best_bucket].indices, &min_dist, &chosen);

        for (b, bucket) in buckets.iter().enumerate() {
            // No member's min-distance can drop below the box's distance to
            // the new point, so a bucket entirely beyond its own bound is a
            // guaranteed no-op.
            if bucket.bounds.min_distance_squared(&pts[current]) >= bounds[b] {
                continue;
            }
            for &i in bucket.indices {
                if chosen[i] {
                    continue;
                }
                let d = distance_squared(&pts[i], &pts[current]);
                if d < min_dist[i] {
                    min_dist[i] = d;
                }
            }
            bounds[b] = bucket_bound(bucket.indices, &min_dist, &chosen);
        }
    }
    selected
}

fn bucket_bound(indices: &[usize], min_dist: &[f64], chosen: &[bool]) -> f64 {
    let mut bound = f64::NEG_INFINITY;
    for &i in indices {
        if !chosen[i] && min_dist[i] > bound {
            bound = min_dist[i];
        }
    }
    bound
}
