//! Random-source abstraction and the production RNG wrapper.
//!
//! # Injection strategy
//!
//! Every component that draws random numbers (traffic bands, drop-off,
//! shift generation, GA operators) takes `&mut R where R: RandomSource`
//! instead of reaching for a thread-local generator.  That keeps the draw
//! order explicit (one source, threaded in slot order) and lets tests swap in
//! a scripted source.
//!
//! `SimRng` wraps a `SmallRng`.  Seed it with [`SimRng::new`] for a repeatable
//! run, or with [`SimRng::from_entropy`] for the default unseeded behaviour.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The minimal set of draws the optimiser needs.
pub trait RandomSource {
    /// Uniform integer in the closed range `[lo, hi]`.
    ///
    /// Implementations must return `lo` when `lo >= hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `[0, len)`.  `len` must be non-zero.
    fn below(&mut self, len: usize) -> usize;

    /// Two distinct uniform indices in `[0, len)`, sampled without
    /// replacement.  `None` if `len < 2`.
    fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let first = self.below(len);
        let mut second = self.below(len - 1);
        if second >= first {
            second += 1;
        }
        Some((first, second))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Process-level RNG for a whole optimisation run.
///
/// Used only in single-threaded contexts.  If you need an independent stream
/// (for example a replay of the winning assignment), derive one with
/// [`SimRng::child`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if lo >= hi {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    fn below(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "below(0) has no valid index");
        self.0.gen_range(0..len)
    }
}
