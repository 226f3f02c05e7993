//! Source of randomness for reply selection

use rand::Rng;

/// Picks an index into a reply pool.
///
/// Implementations must return a value in `0..len`; anything else is reported
/// as a selection error by the policy.
pub trait RandomSource: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}
