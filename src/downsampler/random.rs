use rand::seq::index;
use rand_chacha::ChaCha8Rng;

/// Uniform sample of `target` distinct indices out of `0..n`.
pub fn sample_indices(n: usize, target: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
    index::sample(rng, n, target).into_vec()
}
