//! In-place uniform shuffle

use rand::Rng;

/// Backward Fisher-Yates: for i from the last index down to 1, swap slot i
/// with a uniformly drawn slot in [0, i].
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}
