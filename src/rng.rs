// SPDX-License-Identifier: Apache-2.0
//
// Copyright 2026 wgsl-struct-fuzz contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Seedable deterministic randomness.
//!
//! `Rng` is the single source of non-decoded entropy used across the crate:
//! the [`crate::bytestream`] RNG-backed reader falls back to it once a
//! corpus buffer is exhausted, the numeric-literal synthesizers in
//! [`crate::grammar::terminals`] use it to mint literal values, and the
//! [`crate::mutator`] uses it to pick eligible positions and fill freshly
//! grown subtrees.
//!
//! The reference fuzzer this crate's contract is modeled on seeds a
//! `std::mt19937_64`. Bit-identical output against that reference isn't a
//! goal (see the crate's `spec.md`, "Non-goals"): any deterministic,
//! seedable 64-bit engine satisfies the same invariants. This crate reuses
//! `rand_chacha::ChaCha8Rng`, already part of the stack this crate's idiom
//! is drawn from, instead of pulling in a dedicated Mersenne Twister crate.

use rand::{Rng as _, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of leading bytes skipped when deriving a seed from a corpus buffer,
/// unless the buffer is too short to spare them.
const FINGERPRINT_LEADING_SKIP: usize = 5;
/// Minimum number of bytes the fingerprint window must contain.
const FINGERPRINT_MIN_BYTES: usize = 4;
/// Maximum number of bytes folded into the fingerprint hash.
const FINGERPRINT_MAX_BYTES: usize = 32;

/// A seedable, deterministic pseudo-random source.
///
/// All ranged operations follow the same convention as the reference
/// implementation: `uint32_in(lo, hi)` requires `lo < hi`, `uint32(bound)` /
/// `uint64(bound)` require `bound > 0`, and `weighted_bool` requires
/// `percent <= 100`. Violating these is a caller bug, not a recoverable
/// condition, so they're enforced with debug assertions, matching the
/// reference's `assert()` calls.
#[derive(Clone)]
pub struct Rng {
    engine: ChaCha8Rng,
}

impl Rng {
    /// Create a new `Rng` from an explicit 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            engine: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a new `Rng` seeded from a corpus buffer's content fingerprint.
    ///
    /// Used by [`crate::render`]: rendering is a pure function of the input
    /// buffer, and this is how that buffer also seeds the RNG the numeric
    /// literal synthesizer needs.
    pub fn from_fingerprint(data: &[u8]) -> Self {
        Self::new(fingerprint(data))
    }

    /// A uniformly distributed `u32` in `[lo, hi)`.
    pub fn uint32_in(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo < hi, "lo must be strictly less than hi");
        self.engine.random_range(lo..hi)
    }

    /// A uniformly distributed `u32` in `[0, bound)`.
    pub fn uint32(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "bound must be greater than 0");
        self.uint32_in(0, bound)
    }

    /// A uniformly distributed `u64` in `[0, bound)`.
    pub fn uint64(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "bound must be greater than 0");
        self.engine.random_range(0..bound)
    }

    /// A single pseudo-random byte.
    pub fn byte(&mut self) -> u8 {
        self.engine.random()
    }

    /// `n` pseudo-random bytes.
    pub fn bytes(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.engine.fill_bytes(&mut out);
        out
    }

    /// A fair coin flip.
    pub fn bool(&mut self) -> bool {
        self.engine.random()
    }

    /// A coin flip weighted so `true` comes up `percent` percent of the time.
    ///
    /// `weighted_bool(100)` always returns `true` and `weighted_bool(0)`
    /// always returns `false`, by definition (see `spec.md` Open Questions).
    pub fn weighted_bool(&mut self, percent: u32) -> bool {
        debug_assert!(percent <= 100, "percent must be within [0, 100]");
        self.uint32_in(0, 100) < percent
    }

    /// A randomly chosen element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> &'a T {
        assert!(!slice.is_empty(), "pick requires a non-empty slice");
        let idx = self.uint64(slice.len() as u64) as usize;
        &slice[idx]
    }
}

/// Derive a seed from a middle window of a corpus buffer.
///
/// Skips up to [`FINGERPRINT_LEADING_SKIP`] leading bytes (fewer for short
/// buffers, down to leaving at least [`FINGERPRINT_MIN_BYTES`] available),
/// then hashes up to [`FINGERPRINT_MAX_BYTES`] bytes from there. Short
/// buffers are hashed whole.
fn fingerprint(data: &[u8]) -> u64 {
    use std::hash::{Hash, Hasher};

    let spare = data.len().saturating_sub(FINGERPRINT_MIN_BYTES);
    let skip = FINGERPRINT_LEADING_SKIP.min(spare);
    let begin = skip.min(data.len());
    let end = (begin + FINGERPRINT_MAX_BYTES).min(data.len());

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    data.len().hash(&mut hasher);
    data[begin..end].hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_bool_endpoints_are_exact() {
        let mut rng = Rng::new(1);
        for _ in 0..64 {
            assert!(rng.weighted_bool(100));
            assert!(!rng.weighted_bool(0));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..32 {
            assert_eq!(a.uint32(1000), b.uint32(1000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        let seq_a: Vec<u32> = (0..16).map(|_| a.uint32(u32::MAX)).collect();
        let seq_b: Vec<u32> = (0..16).map(|_| b.uint32(u32::MAX)).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn fingerprint_is_pure() {
        let data = b"some corpus bytes used as a fingerprint source, long enough";
        assert_eq!(fingerprint(data), fingerprint(data));
    }

    #[test]
    fn fingerprint_handles_short_and_empty_buffers() {
        assert_eq!(fingerprint(&[]), fingerprint(&[]));
        assert_eq!(fingerprint(&[1, 2, 3]), fingerprint(&[1, 2, 3]));
        assert_ne!(fingerprint(&[1, 2, 3]), fingerprint(&[1, 2, 4]));
    }

    #[test]
    fn pick_returns_an_element_of_the_slice() {
        let mut rng = Rng::new(7);
        let items = [10, 20, 30, 40];
        for _ in 0..32 {
            assert!(items.contains(rng.pick(&items)));
        }
    }
}
