#![no_main]
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
//
// SPDX-License-Identifier: Apache-2.0

//! Chains up to five mutations over a non-empty seed corpus and checks that
//! every intermediate decoding stays non-empty (spec.md §8, invariant 7).
//! Uses `arbitrary` to carve a seed corpus plus a mutation-kind/seed
//! sequence out of one fuzzer input, the same structured-input style the
//! corpus's other generators use for their own fuzz targets.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wgsl_struct_fuzz::{mutate, render, MutationKind};

#[derive(Debug, Arbitrary)]
struct ChainInput {
    seed_corpus: Vec<u8>,
    steps: Vec<(u8, u64)>,
}

fn kind_from_byte(b: u8) -> MutationKind {
    MutationKind::ALL[b as usize % MutationKind::ALL.len()]
}

fuzz_target!(|input: ChainInput| {
    if input.seed_corpus.is_empty() {
        return;
    }

    let mut data = input.seed_corpus;
    for &(kind_byte, seed) in input.steps.iter().take(5) {
        data = mutate(&data, 1 << 16, seed, kind_from_byte(kind_byte));
        assert!(!render(&data).is_empty(), "intermediate render was empty mid-chain");
    }
});
