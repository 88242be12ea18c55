//! Deterministic random number generation for the tick loop.
//!
//! ## Key Features
//!
//! - **Deterministic**: one seed, one sequence, on every platform
//! - **Forkable**: Each tick forks a private stream off the match RNG
//! - **Serializable**: O(1) state capture and restore, stored in the snapshot
//! - **Context streams**: Independent sequences for deck shuffles per team
//!
//! ## Tick Usage
//!
//! The master RNG lives in the snapshot as a [`GameRngState`]. Every tick
//! restores it, forks exactly once, and writes the advanced state back. All
//! randomness inside the tick (bot jitter, coinflips, auras) draws from the
//! fork, so the master only ever moves by one fork per tick.
//!
//! ```
//! use lane_battle::core::GameRng;
//!
//! let mut master = GameRng::new(42);
//! let mut tick = master.fork();
//!
//! let mut replay = GameRng::new(42);
//! let mut replay_tick = replay.fork();
//!
//! assert_eq!(tick.gen_range_f32(0.0, 1.0), replay_tick.gen_range_f32(0.0, 1.0));
//! assert_eq!(master.state(), replay.state());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Match RNG for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Split off a child stream and bump the fork counter.
    ///
    /// The child's seed depends only on this stream's seed and the counter.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Stream keyed by a label such as `"deck:red"`.
    ///
    /// Hashing goes through `FxHasher`, which has no per-process keys, so two
    /// replicas derive the same stream for the same context.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Uniform integer in `range`.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a float uniformly in `[lo, hi)`. Returns `lo` when the range
    /// is empty.
    pub fn gen_range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.inner.gen::<f32>() * (hi - lo)
    }

    /// Symmetric jitter in `[-amount, amount)`.
    pub fn jitter(&mut self, amount: f32) -> f32 {
        self.gen_range_f32(-amount, amount)
    }

    /// True with `probability`, clamped to `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Fisher-Yates shuffle driven by this stream.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        rand::seq::SliceRandom::shuffle(slice, &mut self.inner);
    }

    /// Capture the stream position for the snapshot.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state, carried in every snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Stream seed
    pub seed: u64,
    /// Position inside the ChaCha8 keystream
    pub word_pos: u128,
    /// Number of forks taken so far
    pub fork_counter: u64,
}

impl GameRngState {
    /// State of a fresh RNG for the given seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        GameRng::new(seed).state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_fork_advances_master_once() {
        let mut rng = GameRng::new(7);
        let before = rng.state();
        let _tick = rng.fork();
        let after = rng.state();

        assert_eq!(after.fork_counter, before.fork_counter + 1);
        assert_eq!(after.word_pos, before.word_pos);
    }

    #[test]
    fn test_forks_differ() {
        let mut rng = GameRng::new(42);
        let mut a = rng.fork();
        let mut b = rng.fork();

        let seq_a: Vec<_> = (0..10).map(|_| a.gen_range(0..1000)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.gen_range(0..1000)).collect();

        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_context_streams() {
        let rng = GameRng::new(42);
        let mut blue = rng.for_context("deck:blue");
        let mut red = rng.for_context("deck:red");
        let mut blue_again = GameRng::new(42).for_context("deck:blue");

        let seq_blue: Vec<_> = (0..10).map(|_| blue.gen_range(0..1000)).collect();
        let seq_red: Vec<_> = (0..10).map(|_| red.gen_range(0..1000)).collect();
        let seq_again: Vec<_> = (0..10).map(|_| blue_again.gen_range(0..1000)).collect();

        assert_ne!(seq_blue, seq_red);
        assert_eq!(seq_blue, seq_again);
    }

    #[test]
    fn test_gen_range_f32_bounds() {
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let v = rng.gen_range_f32(0.7, 1.3);
            assert!((0.7..1.3).contains(&v));
        }
        assert_eq!(rng.gen_range_f32(5.0, 5.0), 5.0);
        assert_eq!(rng.gen_range_f32(5.0, 1.0), 5.0);
    }

    #[test]
    fn test_gen_bool_clamps() {
        let mut rng = GameRng::new(3);
        assert!(rng.gen_bool(2.0));
        assert!(!rng.gen_bool(-1.0));
    }

    #[test]
    fn test_state_roundtrip_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_range(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_restored_fork_matches() {
        let mut rng = GameRng::new(9);
        let _ = rng.fork();
        let state = rng.state();

        let mut a = rng.fork();
        let mut b = GameRng::from_state(&state).fork();
        assert_eq!(a.gen_range(0..1_000_000), b.gen_range(0..1_000_000));
    }
}
