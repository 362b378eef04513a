//! Random short key generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Generates a random key of `len` characters drawn from `[a-zA-Z0-9]`.
///
/// Collisions are accepted best-effort: a later write under the same key
/// overwrites the earlier mapping in the store.
pub fn generate_key(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
