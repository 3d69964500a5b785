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

//! Counts how many positions in a buffer's decoding are eligible for each
//! family of single-position edit [`crate::mutator`] can perform.
//!
//! This traverses the grammar in lockstep with [`crate::generator::generate`]
//! (same alternative/modifier/terminal reads, same depth cap), but never
//! touches [`crate::textsink::TextSink`] or [`crate::context::Context`]:
//! numeric-literal synthesis never consumes a byte from the stream, so it
//! cannot affect which positions exist or how many of them there are.

use crate::bytestream::ByteSource;
use crate::grammar::{self, Content, GrammarRule, Modifier, SubItem, MAX_DEPTH, MAX_REPEATS};
use crate::mutation_kind::MutationKind;
use crate::rng::Rng;

/// Per-family counts of mutation-eligible positions in one decode.
///
/// `optionals`/`repeats` are split by decoded value (spec.md §4.4), not
/// lumped into one coarse count per modifier kind: an `Optional` position
/// that already decoded present is not an eligible `AddOptional` site (the
/// edit would be a no-op), and likewise for the other three saturated
/// cases below.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    /// Rules with more than one alternative, visited once per decode
    /// position regardless of which alternative was chosen. Backs
    /// [`MutationKind::NextAlternative`], [`MutationKind::PrevAlternative`],
    /// and [`MutationKind::RandomAlternative`].
    pub alternatives: u64,
    /// `Optional`-modifier positions that decoded absent (`optionals[0]`).
    /// Backs [`MutationKind::AddOptional`].
    pub optionals_absent: u64,
    /// `Optional`-modifier positions that decoded present (`optionals[1]`).
    /// Backs [`MutationKind::RemoveOptional`].
    pub optionals_present: u64,
    /// `Many`-modifier positions that decoded a count of zero
    /// (`repeats[0]`).
    pub repeats_zero: u64,
    /// `Many`-modifier positions that decoded a count strictly between zero
    /// and [`MAX_REPEATS`] (`repeats[1]`).
    pub repeats_mid: u64,
    /// `Many`-modifier positions that decoded exactly [`MAX_REPEATS`]
    /// (`repeats[2]`).
    pub repeats_max: u64,
    /// Byte-argument terminal positions. Backs
    /// [`MutationKind::RandomTerminal`].
    pub terminals: u64,
}

impl Stats {
    /// The counter relevant to `kind`, or `None` for
    /// [`MutationKind::SubtreeTransfer`] and [`MutationKind::LibFuzzerMutate`],
    /// which are not reservoir-sampled against these counters.
    pub fn for_kind(&self, kind: MutationKind) -> Option<u64> {
        match kind {
            MutationKind::AddOptional => Some(self.optionals_absent),
            MutationKind::RemoveOptional => Some(self.optionals_present),
            MutationKind::IncRepeat => Some(self.repeats_zero + self.repeats_mid),
            MutationKind::DecRepeat => Some(self.repeats_mid + self.repeats_max),
            MutationKind::NextAlternative
            | MutationKind::PrevAlternative
            | MutationKind::RandomAlternative => Some(self.alternatives),
            MutationKind::RandomTerminal => Some(self.terminals),
            MutationKind::SubtreeTransfer | MutationKind::LibFuzzerMutate => None,
        }
    }
}

/// Count eligible positions across the full decoding of `input`, starting
/// at [`GrammarRule::TranslationUnit`].
pub fn count<S: ByteSource>(input: &mut S, rng: &mut Rng) -> Stats {
    let mut stats = Stats::default();
    count_rule(GrammarRule::TranslationUnit, 0, input, rng, &mut stats);
    stats
}

fn count_rule<S: ByteSource>(
    rule: GrammarRule,
    depth: u32,
    input: &mut S,
    rng: &mut Rng,
    stats: &mut Stats,
) {
    if depth >= MAX_DEPTH {
        return;
    }
    let alts = grammar::alternatives(rule);
    if alts.len() > 1 {
        stats.alternatives += 1;
    }
    let idx = input.range(alts.len() as u32, false, rng) as usize;
    count_items(&alts[idx], depth, input, rng, stats);
}

fn count_items<S: ByteSource>(
    items: &[SubItem],
    depth: u32,
    input: &mut S,
    rng: &mut Rng,
    stats: &mut Stats,
) {
    for item in items {
        match item.modifier {
            Modifier::None => count_content(&item.content, depth, input, rng, stats),
            Modifier::Optional => {
                let present = input.range(2, true, rng) == 1;
                if present {
                    stats.optionals_present += 1;
                    count_content(&item.content, depth, input, rng, stats);
                } else {
                    stats.optionals_absent += 1;
                }
            }
            Modifier::Many => {
                let n = input.range(MAX_REPEATS + 1, true, rng);
                if n == 0 {
                    stats.repeats_zero += 1;
                } else if n == MAX_REPEATS {
                    stats.repeats_max += 1;
                } else {
                    stats.repeats_mid += 1;
                }
                for _ in 0..n {
                    count_content(&item.content, depth, input, rng, stats);
                }
            }
        }
    }
}

fn count_content<S: ByteSource>(
    content: &Content,
    depth: u32,
    input: &mut S,
    rng: &mut Rng,
    stats: &mut Stats,
) {
    match content {
        Content::Literal(_) | Content::Numeric(_) => {}
        Content::Terminal(_) => {
            stats.terminals += 1;
            input.terminal_byte(rng);
        }
        Content::Ref(r) => count_rule(*r, depth + 1, input, rng, stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytestream::Input;

    #[test]
    fn empty_buffer_has_zero_counts() {
        let mut input = Input::new(&[]);
        let mut rng = Rng::new(0);
        let stats = count(&mut input, &mut rng);
        // TranslationUnit's only alternative is GlobalDirective* GlobalDecl*,
        // which on an empty buffer reads 0 repetitions for both Many
        // positions — no nested positions are ever visited, so every inner
        // counter stays at zero.
        assert_eq!(stats.repeats_zero, 2);
        assert_eq!(stats.repeats_mid, 0);
        assert_eq!(stats.repeats_max, 0);
        assert_eq!(stats.alternatives, 0);
        assert_eq!(stats.terminals, 0);
    }

    #[test]
    fn nonempty_buffer_finds_eligible_positions() {
        let data = vec![1u8; 64];
        let mut input = Input::new(&data);
        let mut rng = Rng::new(3);
        let stats = count(&mut input, &mut rng);
        assert!(stats.repeats_zero + stats.repeats_mid + stats.repeats_max >= 1);
    }

    #[test]
    fn for_kind_maps_to_correct_counter() {
        let stats = Stats {
            alternatives: 1,
            optionals_absent: 2,
            optionals_present: 5,
            repeats_zero: 3,
            repeats_mid: 6,
            repeats_max: 7,
            terminals: 4,
        };
        assert_eq!(stats.for_kind(MutationKind::AddOptional), Some(2));
        assert_eq!(stats.for_kind(MutationKind::RemoveOptional), Some(5));
        assert_eq!(stats.for_kind(MutationKind::IncRepeat), Some(3 + 6));
        assert_eq!(stats.for_kind(MutationKind::DecRepeat), Some(6 + 7));
        assert_eq!(stats.for_kind(MutationKind::RandomAlternative), Some(1));
        assert_eq!(stats.for_kind(MutationKind::RandomTerminal), Some(4));
        assert_eq!(stats.for_kind(MutationKind::SubtreeTransfer), None);
        assert_eq!(stats.for_kind(MutationKind::LibFuzzerMutate), None);
    }
}
