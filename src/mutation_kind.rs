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

//! The closed set of single-position structural edits [`crate::mutate`] can
//! apply to a corpus buffer.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// One kind of grammar-aware (or, for [`MutationKind::LibFuzzerMutate`],
/// grammar-agnostic) edit that [`crate::mutate`] can perform.
///
/// Ordering is stable and load-bearing: it is the order `--prob=w0,w1,...`
/// weights are assigned in, and [`MutationKind::ALL`] walks it to find the
/// next kind with an eligible position when the chosen kind has none.
/// Additional kinds may be appended in the future, but these ten and their
/// relative order must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    AddOptional,
    RemoveOptional,
    IncRepeat,
    DecRepeat,
    NextAlternative,
    PrevAlternative,
    RandomAlternative,
    RandomTerminal,
    SubtreeTransfer,
    LibFuzzerMutate,
}

impl MutationKind {
    /// All kinds, in enumeration order.
    pub const ALL: [MutationKind; 10] = [
        MutationKind::AddOptional,
        MutationKind::RemoveOptional,
        MutationKind::IncRepeat,
        MutationKind::DecRepeat,
        MutationKind::NextAlternative,
        MutationKind::PrevAlternative,
        MutationKind::RandomAlternative,
        MutationKind::RandomTerminal,
        MutationKind::SubtreeTransfer,
        MutationKind::LibFuzzerMutate,
    ];

    /// Default weight assigned to a kind absent from a `--prob=` list.
    pub const DEFAULT_WEIGHT: u32 = 10;

    /// Index of this kind within [`MutationKind::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).expect("MutationKind::ALL is exhaustive")
    }

    /// The kind that comes cyclically after this one in [`MutationKind::ALL`].
    pub fn next_cyclic(self) -> MutationKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::AddOptional => "add-optional",
            MutationKind::RemoveOptional => "remove-optional",
            MutationKind::IncRepeat => "inc-repeat",
            MutationKind::DecRepeat => "dec-repeat",
            MutationKind::NextAlternative => "next-alternative",
            MutationKind::PrevAlternative => "prev-alternative",
            MutationKind::RandomAlternative => "random-alternative",
            MutationKind::RandomTerminal => "random-terminal",
            MutationKind::SubtreeTransfer => "subtree-transfer",
            MutationKind::LibFuzzerMutate => "libfuzzer-mutate",
        };
        f.write_str(name)
    }
}

/// Name -> kind lookup backing [`FromStr`]: a compile-time perfect-hash
/// map instead of a runtime `Vec`/`match` scan.
static NAME_TO_KIND: phf::Map<&'static str, MutationKind> = phf_map! {
    "add-optional" => MutationKind::AddOptional,
    "remove-optional" => MutationKind::RemoveOptional,
    "inc-repeat" => MutationKind::IncRepeat,
    "dec-repeat" => MutationKind::DecRepeat,
    "next-alternative" => MutationKind::NextAlternative,
    "prev-alternative" => MutationKind::PrevAlternative,
    "random-alternative" => MutationKind::RandomAlternative,
    "random-terminal" => MutationKind::RandomTerminal,
    "subtree-transfer" => MutationKind::SubtreeTransfer,
    "libfuzzer-mutate" => MutationKind::LibFuzzerMutate,
};

impl FromStr for MutationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAME_TO_KIND.get(s).copied().ok_or_else(|| format!("unknown mutation kind: {s}"))
    }
}

/// Pad or truncate a list of `--prob=` weights to [`MutationKind::ALL`]'s
/// length, defaulting missing slots to [`MutationKind::DEFAULT_WEIGHT`].
pub fn normalize_weights(weights: &[u32]) -> [u32; 10] {
    let mut out = [MutationKind::DEFAULT_WEIGHT; 10];
    for (slot, &w) in out.iter_mut().zip(weights.iter()) {
        *slot = w;
    }
    out
}
