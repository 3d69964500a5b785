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

//! Applies one structural mutation to fuzzer-controlled corpus bytes, then
//! decodes the result. Exercises spec.md's size-bound and
//! always-decodable-afterward contracts for every `MutationKind`.
//!
//! # Input format
//!
//! - Bytes 0-7: little-endian seed
//! - Byte 8: mutation kind selector, modulo `MutationKind::ALL.len()`
//! - Bytes 9+: the corpus buffer to mutate

use libfuzzer_sys::fuzz_target;
use wgsl_struct_fuzz::{mutate, render, MutationKind};

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let seed = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let kind = MutationKind::ALL[data[8] as usize % MutationKind::ALL.len()];
    let corpus = &data[9..];

    let mutated = mutate(corpus, 1 << 20, seed, kind);
    assert!(mutated.len() <= 1 << 20, "mutate violated its max_size bound");

    // render must remain total no matter what the mutator produced.
    let _ = render(&mutated);
});
