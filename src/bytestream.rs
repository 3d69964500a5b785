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

//! Byte sources and sinks consumed by [`crate::generator`], [`crate::stats`],
//! and [`crate::mutator`].
//!
//! Two byte sources exist: [`Input`] reads from a caller-supplied buffer and
//! falls back to the ambient `Rng` once exhausted (spec.md §4.2), and
//! [`InputRng`] never reads a buffer at all — it is used to synthesize the
//! freshly required bytes of a grown repetition or newly chosen alternative
//! during a mutation. Two sinks exist: [`Output`] actually records bytes
//! (used while copying an input to a mutated output) and [`NullOutput`]
//! discards them (used by [`crate::stats::StatCounter`], which only cares
//! about *how many* eligible positions exist, not their bytes).

use crate::rng::Rng;

/// Where decoding reads its next byte from.
pub trait ByteSource {
    /// Read a byte and fold it into `[0, n)`.
    ///
    /// `is_modifier` distinguishes a modifier read (`Optional`/`Many`
    /// repetition count) from an alternative-selection read: an
    /// RNG-backed source always answers a modifier read with `0` (never
    /// grows a freshly synthesized subtree further), while an
    /// alternative-selection read is biased toward low indices via an
    /// easing curve (see [`InputRng::range`]).
    fn range(&mut self, n: u32, is_modifier: bool, rng: &mut Rng) -> u32;

    /// Read a byte for a byte-argument terminal ([`crate::grammar::TerminalKind`]).
    fn terminal_byte(&mut self, rng: &mut Rng) -> u8;
}

/// Reads from a real buffer, falling back to `rng` once exhausted.
pub struct Input<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl ByteSource for Input<'_> {
    fn range(&mut self, n: u32, _is_modifier: bool, _rng: &mut Rng) -> u32 {
        if n == 1 {
            return 0;
        }
        if self.cursor < self.data.len() {
            let b = self.data[self.cursor];
            self.cursor += 1;
            (b as u32).min(n - 1)
        } else {
            self.cursor += 1;
            0
        }
    }

    fn terminal_byte(&mut self, rng: &mut Rng) -> u8 {
        if self.cursor < self.data.len() {
            let b = self.data[self.cursor];
            self.cursor += 1;
            b
        } else {
            self.cursor += 1;
            rng.byte()
        }
    }
}

/// Never reads a buffer; every byte comes from `rng`.
///
/// Used to fill in the newly required bytes of a grown repetition or a
/// freshly chosen alternative during a mutation — there is no "original"
/// buffer content for these positions to read.
#[derive(Debug, Default)]
pub struct InputRng;

impl ByteSource for InputRng {
    fn range(&mut self, n: u32, is_modifier: bool, rng: &mut Rng) -> u32 {
        if is_modifier {
            return 0;
        }
        if n == 1 {
            return 0;
        }
        // Ease the draw toward low indices (pow(f, 2.2)) so synthesized
        // filler tends to pick a rule's first, usually simplest,
        // alternative rather than spreading uniformly across all of them.
        let x = rng.uint32(u32::MAX);
        let f = (x as f64 / u32::MAX as f64).powf(2.2);
        ((f * n as f64) as u32).min(n - 1)
    }

    fn terminal_byte(&mut self, rng: &mut Rng) -> u8 {
        rng.byte()
    }
}

/// Where decoding writes its bytes.
pub trait ByteSink {
    fn push(&mut self, byte: u8);
}

/// Accumulates bytes into a growable buffer.
#[derive(Debug, Default)]
pub struct Output {
    pub bytes: Vec<u8>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteSink for Output {
    fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }
}

/// Discards every byte written to it.
#[derive(Debug, Default)]
pub struct NullOutput;

impl ByteSink for NullOutput {
    fn push(&mut self, _byte: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_reads_in_order_then_zero_fills() {
        let data = [5u8, 200];
        let mut input = Input::new(&data);
        let mut rng = Rng::new(1);
        assert_eq!(input.range(10, false, &mut rng), 5);
        assert_eq!(input.range(10, false, &mut rng), 9); // clamped to n-1
        assert_eq!(input.range(10, false, &mut rng), 0); // exhausted, zero-fill
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn input_terminal_byte_falls_back_to_rng_when_exhausted() {
        let data = [9u8];
        let mut input = Input::new(&data);
        let mut rng = Rng::new(2);
        assert_eq!(input.terminal_byte(&mut rng), 9);
        // now exhausted; should draw from rng instead of returning 0.
        let mut rng2 = Rng::new(2);
        let expected = rng2.byte();
        assert_eq!(input.terminal_byte(&mut rng), expected);
    }

    #[test]
    fn range_of_one_is_always_zero() {
        let data = [255u8];
        let mut input = Input::new(&data);
        let mut rng = Rng::new(1);
        assert_eq!(input.range(1, false, &mut rng), 0);
    }

    #[test]
    fn input_rng_modifier_reads_are_always_zero() {
        let mut src = InputRng;
        let mut rng = Rng::new(5);
        for _ in 0..32 {
            assert_eq!(src.range(6, true, &mut rng), 0);
        }
    }

    #[test]
    fn input_rng_alternative_reads_stay_in_bounds() {
        let mut src = InputRng;
        let mut rng = Rng::new(6);
        for _ in 0..256 {
            let v = src.range(7, false, &mut rng);
            assert!(v < 7);
        }
    }

    #[test]
    fn null_output_discards_everything() {
        let mut out = NullOutput;
        out.push(1);
        out.push(2);
    }

    #[test]
    fn output_records_every_byte() {
        let mut out = Output::new();
        out.push(1);
        out.push(2);
        assert_eq!(out.bytes, vec![1, 2]);
    }
}
