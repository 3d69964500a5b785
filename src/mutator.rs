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

//! Single-position structural edits over a buffer's byte-stream
//! representation.
//!
//! Unlike [`crate::generator`], the mutator never touches
//! [`crate::textsink::TextSink`] or [`crate::context::Context`] — it works
//! purely on the byte stream that [`crate::generator::generate`] would have
//! decoded, re-serializing every unedited position as the canonical (already
//! range-clamped) index that produced it and writing a changed value at
//! exactly one chosen position.

use crate::bytestream::{ByteSink, ByteSource, Input, InputRng, Output};
use crate::grammar::{self, Content, GrammarRule, Modifier, SubItem, MAX_DEPTH, MAX_REPEATS};
use crate::mutation_kind::MutationKind;
use crate::rng::Rng;
use crate::stats;

/// Apply one `kind` edit to `data`, returning the mutated buffer.
///
/// If `kind` has no eligible position in `data`, the next kind in
/// [`MutationKind::ALL`]'s cyclic order is tried instead, repeating until a
/// kind with an eligible position is found. [`MutationKind::LibFuzzerMutate`]
/// always has one (even the empty buffer can be grown), so this loop always
/// terminates within [`MutationKind::ALL`]'s length.
pub fn apply(data: &[u8], kind: MutationKind, rng: &mut Rng) -> Vec<u8> {
    let mut candidate = kind;
    for _ in 0..MutationKind::ALL.len() {
        match candidate {
            MutationKind::LibFuzzerMutate => return lib_fuzzer_mutate(data, rng),
            MutationKind::SubtreeTransfer => return subtree_transfer(data, rng),
            other => {
                let mut probe = Input::new(data);
                let mut probe_rng = rng.clone();
                let stats = stats::count(&mut probe, &mut probe_rng);
                if let Some(n) = stats.for_kind(other) {
                    if n > 0 {
                        return grammar_mutate(data, other, n, rng);
                    }
                }
            }
        }
        candidate = candidate.next_cyclic();
    }
    data.to_vec()
}

struct Session {
    kind: MutationKind,
    target: u64,
    alt_seen: u64,
    opt_seen: u64,
    rep_seen: u64,
    term_seen: u64,
    applied: bool,
}

impl Session {
    fn is_alt_kind(&self) -> bool {
        matches!(
            self.kind,
            MutationKind::NextAlternative
                | MutationKind::PrevAlternative
                | MutationKind::RandomAlternative
        )
    }

    /// Whether an `Optional` position that decoded to `orig_present` is an
    /// eligible site for this session's kind (spec.md §4.4: `AddOptional`
    /// only counts `optionals[0]`, `RemoveOptional` only `optionals[1]`).
    fn is_opt_site(&self, orig_present: bool) -> bool {
        match self.kind {
            MutationKind::AddOptional => !orig_present,
            MutationKind::RemoveOptional => orig_present,
            _ => false,
        }
    }

    /// Whether a `Many` position that decoded to `orig_n` is an eligible
    /// site for this session's kind (spec.md §4.4: `IncRepeat` needs
    /// `repeats[0] + repeats[1]`, i.e. `orig_n < MAX_REPEATS`; `DecRepeat`
    /// needs `repeats[1] + repeats[2]`, i.e. `orig_n > 0`).
    fn is_rep_site(&self, orig_n: u32) -> bool {
        match self.kind {
            MutationKind::IncRepeat => orig_n < MAX_REPEATS,
            MutationKind::DecRepeat => orig_n > 0,
            _ => false,
        }
    }
}

fn grammar_mutate(data: &[u8], kind: MutationKind, eligible: u64, rng: &mut Rng) -> Vec<u8> {
    let target = rng.uint64(eligible);
    let mut session = Session {
        kind,
        target,
        alt_seen: 0,
        opt_seen: 0,
        rep_seen: 0,
        term_seen: 0,
        applied: false,
    };
    let mut input = Input::new(data);
    let mut output = Output::new();
    walk(GrammarRule::TranslationUnit, 0, &mut input, &mut output, rng, &mut session);
    output.bytes
}

fn walk<S: ByteSource>(
    rule: GrammarRule,
    depth: u32,
    input: &mut S,
    output: &mut Output,
    rng: &mut Rng,
    session: &mut Session,
) {
    if depth >= MAX_DEPTH {
        return;
    }
    let alts = grammar::alternatives(rule);
    let orig_idx = input.range(alts.len() as u32, false, rng);

    if alts.len() > 1 {
        let is_target = session.is_alt_kind() && !session.applied && session.alt_seen == session.target;
        session.alt_seen += 1;
        if is_target {
            session.applied = true;
            let len = alts.len() as u32;
            let new_idx = match session.kind {
                MutationKind::NextAlternative => (orig_idx + 1) % len,
                MutationKind::PrevAlternative => (orig_idx + len - 1) % len,
                MutationKind::RandomAlternative => rng.uint32(len),
                _ => unreachable!("is_alt_kind guarantees one of the three alt kinds"),
            };
            output.push(new_idx as u8);
            if new_idx == orig_idx {
                walk_items(&alts[orig_idx as usize], depth, input, output, rng, session);
            } else {
                skip_items(&alts[orig_idx as usize], depth, input, rng);
                fill_items(&alts[new_idx as usize], depth, output, rng);
            }
            return;
        }
        output.push(orig_idx as u8);
    }
    walk_items(&alts[orig_idx as usize], depth, input, output, rng, session);
}

fn walk_items<S: ByteSource>(
    items: &[SubItem],
    depth: u32,
    input: &mut S,
    output: &mut Output,
    rng: &mut Rng,
    session: &mut Session,
) {
    for item in items {
        match item.modifier {
            Modifier::None => walk_content(&item.content, depth, input, output, rng, session),
            Modifier::Optional => walk_optional(item, depth, input, output, rng, session),
            Modifier::Many => walk_many(item, depth, input, output, rng, session),
        }
    }
}

fn walk_optional<S: ByteSource>(
    item: &SubItem,
    depth: u32,
    input: &mut S,
    output: &mut Output,
    rng: &mut Rng,
    session: &mut Session,
) {
    let orig_present = input.range(2, true, rng) == 1;
    let eligible_here = session.is_opt_site(orig_present);
    let is_target = eligible_here && !session.applied && session.opt_seen == session.target;
    if eligible_here {
        session.opt_seen += 1;
    }
    if is_target {
        session.applied = true;
        // `is_opt_site` guarantees `orig_present` is exactly the opposite of
        // `new_present` here: `AddOptional` only ever targets an absent
        // site, `RemoveOptional` only a present one.
        let new_present = matches!(session.kind, MutationKind::AddOptional);
        output.push(new_present as u8);
        if new_present {
            fill_content(&item.content, depth, output, rng);
        } else {
            skip_content(&item.content, depth, input, rng);
        }
        return;
    }
    output.push(orig_present as u8);
    if orig_present {
        walk_content(&item.content, depth, input, output, rng, session);
    }
}

fn walk_many<S: ByteSource>(
    item: &SubItem,
    depth: u32,
    input: &mut S,
    output: &mut Output,
    rng: &mut Rng,
    session: &mut Session,
) {
    let orig_n = input.range(MAX_REPEATS + 1, true, rng);
    let eligible_here = session.is_rep_site(orig_n);
    let is_target = eligible_here && !session.applied && session.rep_seen == session.target;
    if eligible_here {
        session.rep_seen += 1;
    }
    if is_target {
        session.applied = true;
        let new_n = match session.kind {
            MutationKind::IncRepeat => (orig_n + 1).min(MAX_REPEATS),
            MutationKind::DecRepeat => orig_n.saturating_sub(1),
            _ => unreachable!("is_rep_site guarantees one of the two repeat kinds"),
        };
        output.push(new_n as u8);
        let common = orig_n.min(new_n);
        for _ in 0..common {
            walk_content(&item.content, depth, input, output, rng, session);
        }
        if new_n > orig_n {
            for _ in 0..(new_n - orig_n) {
                fill_content(&item.content, depth, output, rng);
            }
        } else {
            for _ in 0..(orig_n - new_n) {
                skip_content(&item.content, depth, input, rng);
            }
        }
        return;
    }
    output.push(orig_n as u8);
    for _ in 0..orig_n {
        walk_content(&item.content, depth, input, output, rng, session);
    }
}

fn walk_content<S: ByteSource>(
    content: &Content,
    depth: u32,
    input: &mut S,
    output: &mut Output,
    rng: &mut Rng,
    session: &mut Session,
) {
    match content {
        Content::Literal(_) | Content::Numeric(_) => {}
        Content::Terminal(_) => {
            let b = input.terminal_byte(rng);
            let is_target = session.kind == MutationKind::RandomTerminal
                && !session.applied
                && session.term_seen == session.target;
            session.term_seen += 1;
            if is_target {
                session.applied = true;
                output.push(rng.byte());
            } else {
                output.push(b);
            }
        }
        Content::Ref(r) => walk(*r, depth + 1, input, output, rng, session),
    }
}

/// Generate a brand-new subtree purely from `rng`, with no corresponding
/// original bytes. Used to fill a repetition that grew, an optional that
/// turned present, or a freshly chosen alternative.
fn fill(rule: GrammarRule, depth: u32, output: &mut Output, rng: &mut Rng) {
    if depth >= MAX_DEPTH {
        return;
    }
    let alts = grammar::alternatives(rule);
    let mut src = InputRng;
    let idx = src.range(alts.len() as u32, false, rng);
    if alts.len() > 1 {
        output.push(idx as u8);
    }
    fill_items(&alts[idx as usize], depth, output, rng);
}

fn fill_items(items: &[SubItem], depth: u32, output: &mut Output, rng: &mut Rng) {
    for item in items {
        let mut src = InputRng;
        match item.modifier {
            Modifier::None => fill_content(&item.content, depth, output, rng),
            Modifier::Optional => {
                let present = src.range(2, true, rng) == 1;
                output.push(present as u8);
                if present {
                    fill_content(&item.content, depth, output, rng);
                }
            }
            Modifier::Many => {
                let n = src.range(MAX_REPEATS + 1, true, rng);
                output.push(n as u8);
                for _ in 0..n {
                    fill_content(&item.content, depth, output, rng);
                }
            }
        }
    }
}

fn fill_content(content: &Content, depth: u32, output: &mut Output, rng: &mut Rng) {
    match content {
        Content::Literal(_) | Content::Numeric(_) => {}
        Content::Terminal(_) => output.push(rng.byte()),
        Content::Ref(r) => fill(*r, depth + 1, output, rng),
    }
}

/// Discard a subtree's original bytes from `input` without writing
/// anything, so that sibling positions following it keep reading from the
/// correct cursor position in the original buffer.
fn skip<S: ByteSource>(rule: GrammarRule, depth: u32, input: &mut S, rng: &mut Rng) {
    if depth >= MAX_DEPTH {
        return;
    }
    let alts = grammar::alternatives(rule);
    let idx = input.range(alts.len() as u32, false, rng);
    skip_items(&alts[idx as usize], depth, input, rng);
}

fn skip_items<S: ByteSource>(items: &[SubItem], depth: u32, input: &mut S, rng: &mut Rng) {
    for item in items {
        match item.modifier {
            Modifier::None => skip_content(&item.content, depth, input, rng),
            Modifier::Optional => {
                if input.range(2, true, rng) == 1 {
                    skip_content(&item.content, depth, input, rng);
                }
            }
            Modifier::Many => {
                let n = input.range(MAX_REPEATS + 1, true, rng);
                for _ in 0..n {
                    skip_content(&item.content, depth, input, rng);
                }
            }
        }
    }
}

fn skip_content<S: ByteSource>(content: &Content, depth: u32, input: &mut S, rng: &mut Rng) {
    match content {
        Content::Literal(_) | Content::Numeric(_) => {}
        Content::Terminal(_) => {
            input.terminal_byte(rng);
        }
        Content::Ref(r) => skip(*r, depth + 1, input, rng),
    }
}

/// One `Ref` occurrence discovered while decoding a buffer: its rule and
/// the byte span of `data` its subtree consumed.
struct RefSite {
    rule: GrammarRule,
    start: usize,
    end: usize,
}

fn collect_ref_sites(data: &[u8], rng: &mut Rng) -> Vec<RefSite> {
    let mut input = Input::new(data);
    let mut sites = Vec::new();
    collect_rule(GrammarRule::TranslationUnit, 0, &mut input, rng, &mut sites);
    sites
}

fn collect_rule(
    rule: GrammarRule,
    depth: u32,
    input: &mut Input<'_>,
    rng: &mut Rng,
    sites: &mut Vec<RefSite>,
) {
    if depth >= MAX_DEPTH {
        return;
    }
    let alts = grammar::alternatives(rule);
    let idx = input.range(alts.len() as u32, false, rng);
    collect_items(&alts[idx as usize], depth, input, rng, sites);
}

fn collect_items(
    items: &[SubItem],
    depth: u32,
    input: &mut Input<'_>,
    rng: &mut Rng,
    sites: &mut Vec<RefSite>,
) {
    for item in items {
        match item.modifier {
            Modifier::None => collect_content(&item.content, depth, input, rng, sites),
            Modifier::Optional => {
                if input.range(2, true, rng) == 1 {
                    collect_content(&item.content, depth, input, rng, sites);
                }
            }
            Modifier::Many => {
                let n = input.range(MAX_REPEATS + 1, true, rng);
                for _ in 0..n {
                    collect_content(&item.content, depth, input, rng, sites);
                }
            }
        }
    }
}

fn collect_content(
    content: &Content,
    depth: u32,
    input: &mut Input<'_>,
    rng: &mut Rng,
    sites: &mut Vec<RefSite>,
) {
    match content {
        Content::Literal(_) | Content::Numeric(_) => {}
        Content::Terminal(_) => {
            input.terminal_byte(rng);
        }
        Content::Ref(r) => {
            let start = input.position();
            collect_rule(*r, depth + 1, input, rng, sites);
            let end = input.position();
            sites.push(RefSite { rule: *r, start, end });
        }
    }
}

/// Capture one subtree's raw bytes and splice them in place of a
/// splice-compatible (see [`grammar::compatible`]) destination subtree
/// elsewhere in the buffer.
///
/// Falls back to [`MutationKind::RandomTerminal`] when no compatible
/// destination exists, per spec.
fn subtree_transfer(data: &[u8], rng: &mut Rng) -> Vec<u8> {
    let sites = collect_ref_sites(data, rng);
    if sites.is_empty() {
        return apply(data, MutationKind::RandomTerminal, rng);
    }
    let src_idx = rng.uint32(sites.len() as u32) as usize;
    let captured = data[sites[src_idx].start..sites[src_idx].end].to_vec();
    let src_rule = sites[src_idx].rule;

    let candidates: Vec<usize> = (0..sites.len())
        .filter(|&i| i != src_idx && grammar::compatible(src_rule, sites[i].rule))
        .collect();
    let Some(&dst_idx) = candidates.get(rng.uint32(candidates.len().max(1) as u32) as usize)
    else {
        return apply(data, MutationKind::RandomTerminal, rng);
    };
    let dst = &sites[dst_idx];

    let mut out = Vec::with_capacity(data.len() - (dst.end - dst.start) + captured.len());
    out.extend_from_slice(&data[..dst.start]);
    out.extend_from_slice(&captured);
    out.extend_from_slice(&data[dst.end..]);
    out
}

/// Raw byte-level libFuzzer-style mutation, used both as
/// [`MutationKind::LibFuzzerMutate`] and as the guaranteed-eligible
/// fallback at the end of [`apply`]'s cyclic search.
fn lib_fuzzer_mutate(data: &[u8], rng: &mut Rng) -> Vec<u8> {
    const MAX_SIZE: usize = 65536;
    let mut out = data.to_vec();
    if out.is_empty() {
        out.push(rng.byte());
        return out;
    }
    match rng.uint32(5) {
        0 => {
            let i = rng.uint32(out.len() as u32) as usize;
            let bit = rng.uint32(8) as u8;
            out[i] ^= 1 << bit;
        }
        1 => {
            let i = rng.uint32(out.len() as u32) as usize;
            out[i] ^= 0xFF;
        }
        2 => {
            let i = rng.uint32(out.len() as u32) as usize;
            out[i] = rng.byte();
        }
        3 => {
            if out.len() >= 2 {
                let i = rng.uint32((out.len() - 1) as u32) as usize;
                out.swap(i, i + 1);
            }
        }
        _ => {
            if out.len() < MAX_SIZE {
                let i = rng.uint32((out.len() + 1) as u32) as usize;
                out.insert(i, rng.byte());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_never_panics_on_empty_buffer() {
        let mut rng = Rng::new(1);
        for kind in MutationKind::ALL {
            let mut r = rng.clone();
            let _ = apply(&[], kind, &mut r);
        }
        let _ = rng.byte();
    }

    #[test]
    fn apply_is_deterministic_given_seed() {
        let data = vec![3u8, 5, 7, 11, 13, 17, 19, 23];
        for kind in MutationKind::ALL {
            let mut r1 = Rng::new(42);
            let mut r2 = Rng::new(42);
            assert_eq!(apply(&data, kind, &mut r1), apply(&data, kind, &mut r2));
        }
    }

    #[test]
    fn grammar_mutate_preserves_or_changes_length_sanely() {
        let data = vec![1u8; 128];
        let mut rng = Rng::new(9);
        let out = apply(&data, MutationKind::RandomTerminal, &mut rng);
        assert!(!out.is_empty());
    }

    #[test]
    fn lib_fuzzer_mutate_respects_size_cap() {
        let data = vec![0xAAu8; 65536];
        let mut rng = Rng::new(5);
        let out = lib_fuzzer_mutate(&data, &mut rng);
        assert!(out.len() <= 65536);
    }

    #[test]
    fn lib_fuzzer_mutate_grows_empty_buffer() {
        let mut rng = Rng::new(5);
        let out = lib_fuzzer_mutate(&[], &mut rng);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn subtree_transfer_changes_or_falls_back_without_panicking() {
        let data = vec![2u8; 256];
        let mut rng = Rng::new(11);
        let out = subtree_transfer(&data, &mut rng);
        assert!(!out.is_empty());
    }
}
