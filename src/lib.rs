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

//! Grammar-driven structural generator and mutator for a WGSL fuzzing corpus.
//!
//! `wgsl-struct-fuzz` turns an opaque byte buffer into a syntactically
//! well-formed WGSL source string (`render`), and applies targeted,
//! grammar-aware edits to such a buffer (`mutate`) so that small byte-level
//! changes produce meaningful structural changes in the generated program:
//! flipping one alternative of a grammar rule, extending a repetition,
//! swapping a subtree between two positions, and so on.
//!
//! This crate is the structural core of a fuzzer, not the fuzzer itself: it
//! has no opinion about the compiler under test, the fuzzing engine driving
//! it, or how corpus entries are stored. A libFuzzer-style harness (see
//! `fuzz/`) typically calls [`mutate`] in its custom mutator callback and
//! [`render`] in its target function.
//!
//! # Examples
//!
//! ```no_run
//! use wgsl_struct_fuzz::{mutate, render, MutationKind};
//!
//! let corpus: Vec<u8> = vec![0x2a, 0x01, 0x00, 0x10];
//! let source = render(&corpus);
//! assert!(!source.is_empty());
//!
//! let mutated = mutate(&corpus, usize::MAX, 24, MutationKind::RandomTerminal);
//! assert_ne!(render(&mutated), source);
//! ```

mod bytestream;
mod cli;
mod context;
mod entry;
mod generator;
mod grammar;
mod mutation_kind;
mod mutator;
mod probability;
mod rng;
mod stats;
mod textsink;

pub use cli::Cli;
pub use entry::{mutate, mutate_sampled, render, MutationSession};
pub use mutation_kind::MutationKind;
pub use probability::ProbabilityTable;
pub use rng::Rng;
