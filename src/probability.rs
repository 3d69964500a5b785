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

//! A discrete sampler over a fixed set of weighted items.
//!
//! Built once from a slice of weights and sampled many times. Used to pick
//! which [`crate::MutationKind`] a top-level [`crate::mutate`] call should
//! attempt, and reusable by a harness that wants to weight its own choice of
//! corpus entry, mutation count, etc.

use crate::rng::Rng;

/// A cumulative-weight table over `N` items, sampled in `O(log N)`.
///
/// Weights do not need to sum to any particular value; zero weights are
/// legal and simply make the corresponding item unreachable.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    cumulative: Vec<u64>,
}

impl ProbabilityTable {
    /// Build a table from non-negative integer weights.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty or every weight is zero (the table would
    /// have nothing to sample).
    pub fn new(weights: &[u32]) -> Self {
        assert!(!weights.is_empty(), "weights must not be empty");
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0u64;
        for &w in weights {
            running += w as u64;
            cumulative.push(running);
        }
        assert!(running > 0, "at least one weight must be non-zero");
        Self { cumulative }
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Whether the table holds no items (always false for a table built via
    /// [`Self::new`], since construction requires at least one).
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> u64 {
        *self.cumulative.last().unwrap_or(&0)
    }

    /// Draw an index in `[0, len())`, weighted by the table's weights.
    pub fn sample(&self, rng: &mut Rng) -> usize {
        let draw = rng.uint64(self.sum());
        // upper_bound: first cumulative entry strictly greater than draw.
        self.cumulative
            .iter()
            .position(|&c| draw < c)
            .unwrap_or(self.cumulative.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_always_sampled() {
        let table = ProbabilityTable::new(&[1]);
        let mut rng = Rng::new(1);
        for _ in 0..16 {
            assert_eq!(table.sample(&mut rng), 0);
        }
    }

    #[test]
    fn zero_weight_items_are_unreachable() {
        let table = ProbabilityTable::new(&[0, 5, 0]);
        let mut rng = Rng::new(7);
        for _ in 0..256 {
            assert_eq!(table.sample(&mut rng), 1);
        }
    }

    #[test]
    fn sample_stays_in_bounds() {
        let table = ProbabilityTable::new(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let mut rng = Rng::new(99);
        for _ in 0..1000 {
            let idx = table.sample(&mut rng);
            assert!(idx < table.len());
        }
    }

    #[test]
    fn sum_matches_weights() {
        let table = ProbabilityTable::new(&[10, 20, 30]);
        assert_eq!(table.sum(), 60);
        assert_eq!(table.len(), 3);
    }

    #[test]
    #[should_panic]
    fn rejects_all_zero_weights() {
        ProbabilityTable::new(&[0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn rejects_empty_weights() {
        ProbabilityTable::new(&[]);
    }
}
