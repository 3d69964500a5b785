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

use std::path::PathBuf;

use clap::Parser;

use crate::mutation_kind::MutationKind;

/// Parse a `--prob=w0,w1,...,w9` weight list (spec.md §6): ten unsigned
/// integers, one per [`MutationKind`] in enumeration order. Fewer or more
/// than ten entries is not an error here — [`crate::mutation_kind::normalize_weights`]
/// pads missing slots with [`MutationKind::DEFAULT_WEIGHT`] and truncates
/// excess ones, the same way the reference harness does.
fn parse_prob(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|piece| piece.trim().parse::<u32>().map_err(|_| format!("invalid weight: {piece}")))
        .collect()
}

/// Command-line interface for `wgsl-struct-fuzz`.
///
/// Supports two modes, mirroring the corpus's generate-or-mutate shape:
/// - Render mode (`--render`): decode an existing corpus file into WGSL
///   source text.
/// - Mutate mode (default): apply one structural edit to a corpus file,
///   either single-file or (via `--dir`) a batch of independently-seeded
///   samples written to a directory.
#[derive(Parser, Debug)]
#[command(name = "wgsl-struct-fuzz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// path to the input corpus buffer
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// decode INPUT to WGSL source instead of mutating it
    #[arg(long, conflicts_with_all = ["output", "dir", "mutation", "prob"])]
    pub render: bool,

    /// path to write a single mutated buffer or rendered string
    #[arg(long, short = 'o', value_name = "FILE", conflicts_with = "dir")]
    pub output: Option<PathBuf>,

    /// directory to write a batch of independently-seeded mutated samples
    #[arg(long, short = 'd', value_name = "DIR", conflicts_with = "output")]
    pub dir: Option<PathBuf>,

    /// number of samples to generate in batch mode
    #[arg(long, short = 's', default_value_t = 100, requires = "dir")]
    pub samples: usize,

    /// force a specific mutation kind instead of sampling one via --prob
    #[arg(long, value_name = "KIND")]
    pub mutation: Option<MutationKind>,

    /// ten comma-separated weights w0,...,w9, one per MutationKind in
    /// enumeration order; missing slots default to 10, excess ones are
    /// dropped
    #[arg(long, value_name = "W0,W1,...", value_parser = parse_prob)]
    pub prob: Option<Vec<u32>>,

    /// seed for the RNG driving position selection and subtree fill
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// truncate the mutated buffer to at most this many bytes
    #[arg(long, default_value_t = usize::MAX)]
    pub max_size: usize,
}

impl Cli {
    /// Whether this invocation decodes rather than mutates.
    pub fn is_render_mode(&self) -> bool {
        self.render
    }

    /// Whether this invocation writes a batch of samples to a directory.
    pub fn is_batch_mode(&self) -> bool {
        self.dir.is_some()
    }

    /// The ten mutation-kind weights this invocation should sample from,
    /// padded/truncated per spec.md §6.
    pub fn weights(&self) -> [u32; 10] {
        crate::mutation_kind::normalize_weights(self.prob.as_deref().unwrap_or(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prob_splits_and_parses() {
        assert_eq!(parse_prob("1,2,3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn parse_prob_rejects_non_numeric() {
        assert!(parse_prob("1,x,3").is_err());
    }

    #[test]
    fn parse_prob_tolerates_surrounding_whitespace() {
        assert_eq!(parse_prob(" 1 , 2 ").unwrap(), vec![1, 2]);
    }

    fn base_cli() -> Cli {
        Cli {
            input: PathBuf::from("corpus.bin"),
            render: false,
            output: None,
            dir: None,
            samples: 100,
            mutation: None,
            prob: None,
            seed: 0,
            max_size: usize::MAX,
        }
    }

    #[test]
    fn mode_detection() {
        let mut cli = base_cli();
        assert!(!cli.is_render_mode());
        assert!(!cli.is_batch_mode());

        cli.render = true;
        assert!(cli.is_render_mode());

        cli.render = false;
        cli.dir = Some(PathBuf::from("out"));
        assert!(cli.is_batch_mode());
    }

    #[test]
    fn weights_default_when_absent() {
        let cli = base_cli();
        assert_eq!(cli.weights(), [MutationKind::DEFAULT_WEIGHT; 10]);
    }

    #[test]
    fn weights_pad_partial_list() {
        let mut cli = base_cli();
        cli.prob = Some(vec![1, 2, 3]);
        let w = cli.weights();
        assert_eq!(w[0], 1);
        assert_eq!(w[3], MutationKind::DEFAULT_WEIGHT);
    }
}
