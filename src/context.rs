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

//! Per-decode scratch state threaded alongside a single [`crate::generator`]
//! or [`crate::mutator`] traversal.
//!
//! A fresh [`Context`] is created for every top-level [`crate::render`] or
//! [`crate::mutate`] call and discarded at the end of it; nothing here
//! survives across calls.

use std::collections::BTreeMap;

use crate::rng::Rng;

/// Tracks the variables a numeric-literal synthesizer has "declared" so far
/// in the current decode, so that a later literal can plausibly reuse one
/// instead of always introducing a fresh name.
///
/// `vars` is a [`BTreeMap`] rather than a [`std::collections::HashMap`] so
/// that iterating it (to pick a random entry) is deterministic across two
/// `Context`s built from the same buffer — required for [`crate::render`]'s
/// idempotence guarantee, since `HashMap`'s default hasher is randomized
/// per-instance and would otherwise make repeated calls diverge.
#[derive(Debug, Default)]
pub struct Context {
    next_var_id: u32,
    vars: BTreeMap<String, String>,
    /// Raw bytes captured by a `SubtreeTransfer`
    /// ([`crate::mutation_kind::MutationKind`]) mutation's first phase, to
    /// be spliced in during its second phase.
    pub stored_subtree: Vec<u8>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly synthesized variable of type `ty` and return its
    /// name (`v0`, `v1`, ...).
    pub fn create_variable(&mut self, ty: &str) -> String {
        let name = format!("v{}", self.next_var_id);
        self.next_var_id += 1;
        self.vars.insert(name.clone(), ty.to_string());
        name
    }

    /// Whether a numeric-literal synthesizer should reuse an existing
    /// variable instead of emitting a fresh literal.
    ///
    /// Mirrors the reference's exact order of operations: an `Rng` draw is
    /// made, and therefore consumes entropy, *only* when `vars` is
    /// non-empty. A buffer decoded before any variable exists must never
    /// have this check perturb its byte/entropy consumption relative to one
    /// decoded after — matching that order exactly keeps two otherwise
    /// byte-identical replay runs aligned.
    pub fn should_reuse_variable(&self, rng: &mut Rng) -> bool {
        !self.vars.is_empty() && rng.uint32(2) == 0
    }

    /// Pick a previously declared variable's name at random, or `None` if
    /// none has been declared yet.
    pub fn random_variable(&self, rng: &mut Rng) -> Option<String> {
        if self.vars.is_empty() {
            return None;
        }
        let idx = rng.uint32(self.vars.len() as u32) as usize;
        self.vars.keys().nth(idx).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reuse_variable_is_false_until_one_exists() {
        let ctx = Context::new();
        let mut rng = Rng::new(1);
        assert!(!ctx.should_reuse_variable(&mut rng));
    }

    #[test]
    fn create_variable_assigns_sequential_names() {
        let mut ctx = Context::new();
        assert_eq!(ctx.create_variable("i32"), "v0");
        assert_eq!(ctx.create_variable("f32"), "v1");
    }

    #[test]
    fn random_variable_only_returns_declared_names() {
        let mut ctx = Context::new();
        ctx.create_variable("i32");
        ctx.create_variable("f32");
        let mut rng = Rng::new(3);
        for _ in 0..16 {
            let name = ctx.random_variable(&mut rng).unwrap();
            assert!(name == "v0" || name == "v1");
        }
    }

    #[test]
    fn two_fresh_contexts_iterate_identically() {
        let mut a = Context::new();
        let mut b = Context::new();
        for i in 0..5 {
            a.create_variable(&format!("t{i}"));
            b.create_variable(&format!("t{i}"));
        }
        let mut rng_a = Rng::new(42);
        let mut rng_b = Rng::new(42);
        for _ in 0..20 {
            assert_eq!(a.random_variable(&mut rng_a), b.random_variable(&mut rng_b));
        }
    }
}
