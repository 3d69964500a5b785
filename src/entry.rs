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

//! The crate's two programmatic entry points (spec.md §6): [`mutate`] and
//! [`render`]. Everything else in the crate exists to support one of these
//! two total, side-effect-free functions.

use crate::context::Context;
use crate::bytestream::Input;
use crate::grammar::GrammarRule;
use crate::generator;
use crate::mutation_kind::MutationKind;
use crate::mutator;
use crate::probability::ProbabilityTable;
use crate::rng::Rng;
use crate::textsink::TextSink;

/// Apply one structural edit of `kind` to `data`, seeded by `seed`.
///
/// Total: always returns a buffer (never panics), and the returned buffer's
/// length never exceeds `max_size` (truncated from the tail when it would).
/// If `kind` has no eligible position in `data`'s decoding, the next kind in
/// [`MutationKind::ALL`]'s cyclic order is tried until one with an eligible
/// position is found — [`MutationKind::LibFuzzerMutate`] always has one, so
/// this always terminates (spec.md §4.5).
pub fn mutate(data: &[u8], max_size: usize, seed: u64, kind: MutationKind) -> Vec<u8> {
    let mut rng = Rng::new(seed);
    let mut out = mutator::apply(data, kind, &mut rng);
    out.truncate(max_size);
    out
}

/// Decode `data` into a WGSL source string starting at
/// [`GrammarRule::TranslationUnit`].
///
/// Total and pure: a given buffer always renders to the same string (the
/// RNG the numeric-literal synthesizer consults is itself derived from the
/// buffer's own fingerprint, never from wall-clock or process state), and
/// it never panics, including on the empty buffer (which renders to `""`).
pub fn render(data: &[u8]) -> String {
    let mut input = Input::new(data);
    let mut sink = TextSink::new();
    let mut ctx = Context::new();
    let mut rng = Rng::from_fingerprint(data);
    generator::generate(GrammarRule::TranslationUnit, 0, &mut input, &mut sink, &mut ctx, &mut rng);
    sink.into_string()
}

/// Sample a [`MutationKind`] from a [`ProbabilityTable`] and apply it,
/// returning both the kind actually used and the mutated buffer.
///
/// This is what a harness configured with `--prob=w0,w1,...,w9` (spec.md
/// §6) calls each iteration, rather than fixing one kind in advance.
pub fn mutate_sampled(
    data: &[u8],
    max_size: usize,
    seed: u64,
    table: &ProbabilityTable,
) -> (MutationKind, Vec<u8>) {
    let mut rng = Rng::new(seed);
    let kind = MutationKind::ALL[table.sample(&mut rng)];
    let out = mutator::apply(data, kind, &mut rng);
    let mut out = out;
    out.truncate(max_size);
    (kind, out)
}

/// Builder over [`mutate`]: configure a seed, a size cap, and either a
/// fixed [`MutationKind`] or a [`ProbabilityTable`] to sample one from,
/// then call [`MutationSession::run`].
#[derive(Debug, Clone)]
pub struct MutationSession {
    seed: u64,
    max_size: usize,
    kind: Option<MutationKind>,
    weights: [u32; 10],
}

impl Default for MutationSession {
    fn default() -> Self {
        Self {
            seed: 0,
            max_size: usize::MAX,
            kind: None,
            weights: [MutationKind::DEFAULT_WEIGHT; 10],
        }
    }
}

impl MutationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed used to pick eligible positions and fill freshly
    /// grown subtrees.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the mutated buffer's length, truncating from the tail.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Force a specific [`MutationKind`] instead of sampling one from the
    /// configured weights.
    pub fn with_kind(mut self, kind: MutationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Override the [`MutationKind::ALL`]-ordered weights used to sample a
    /// kind when [`Self::with_kind`] hasn't fixed one. Padded/truncated to
    /// ten entries the same way `--prob=` is (spec.md §6).
    pub fn with_weights(mut self, weights: &[u32]) -> Self {
        self.weights = crate::mutation_kind::normalize_weights(weights);
        self
    }

    /// Run the configured mutation, returning the kind actually applied
    /// alongside the mutated buffer.
    pub fn run(&self, data: &[u8]) -> (MutationKind, Vec<u8>) {
        match self.kind {
            Some(kind) => (kind, mutate(data, self.max_size, self.seed, kind)),
            None => {
                let table = ProbabilityTable::new(&self.weights);
                mutate_sampled(data, self.max_size, self.seed, &table)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_empty_buffer_is_empty_string() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn render_is_idempotent() {
        let data = vec![0x2a, 0x01, 0x00, 0x10, 5, 9];
        assert_eq!(render(&data), render(&data));
    }

    #[test]
    fn mutate_is_deterministic_given_seed() {
        let data = vec![1u8; 64];
        let a = mutate(&data, usize::MAX, 24, MutationKind::RandomTerminal);
        let b = mutate(&data, usize::MAX, 24, MutationKind::RandomTerminal);
        assert_eq!(a, b);
    }

    #[test]
    fn mutate_respects_max_size() {
        let data = vec![1u8; 256];
        let out = mutate(&data, 16, 1, MutationKind::LibFuzzerMutate);
        assert!(out.len() <= 16);
    }

    #[test]
    fn mutate_never_panics_on_empty_buffer() {
        for kind in MutationKind::ALL {
            let _ = mutate(&[], usize::MAX, 7, kind);
        }
    }

    #[test]
    fn session_builder_fixed_kind_matches_free_function() {
        let data = vec![3u8; 32];
        let session = MutationSession::new().with_seed(5).with_kind(MutationKind::RandomTerminal);
        let (kind, out) = session.run(&data);
        assert_eq!(kind, MutationKind::RandomTerminal);
        assert_eq!(out, mutate(&data, usize::MAX, 5, MutationKind::RandomTerminal));
    }

    #[test]
    fn session_builder_samples_from_weights() {
        let data = vec![3u8; 32];
        let mut weights = [0u32; 10];
        weights[MutationKind::RandomTerminal.index()] = 1;
        let session = MutationSession::new().with_seed(9).with_weights(&weights);
        let (kind, _) = session.run(&data);
        assert_eq!(kind, MutationKind::RandomTerminal);
    }

    #[test]
    fn chained_mutations_preserve_decodability() {
        let mut data = vec![5u8; 40];
        for (i, kind) in MutationKind::ALL.iter().cycle().take(5).enumerate() {
            data = mutate(&data, usize::MAX, i as u64, *kind);
            assert!(!render(&data).is_empty());
        }
    }
}
