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

//! Minimal whitespace-insertion layer between grammar traversal and the
//! rendered WGSL string.

/// Accumulates rendered text, inserting a single space between two tokens
/// only when both the preceding and following characters are alphanumeric
/// — enough to keep `fn foo` from becoming `fnfoo` while leaving
/// punctuation-adjacent tokens (`foo(`, `)+`) unseparated.
#[derive(Debug, Default)]
pub struct TextSink {
    text: String,
}

impl TextSink {
    pub fn new() -> Self {
        Self { text: String::new() }
    }

    /// Append `s` verbatim, applying the alnum spacing rule at the
    /// boundary.
    pub fn raw(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let needs_space = matches!(
            (self.text.chars().last(), s.chars().next()),
            (Some(a), Some(b)) if a.is_alphanumeric() && b.is_alphanumeric()
        );
        if needs_space {
            self.text.push(' ');
        }
        self.text.push_str(s);
    }

    /// Append a synthesized `{prefix}{n}` identifier, e.g. `t3`, `f12`,
    /// `x200`.
    pub fn ident(&mut self, n: u8, prefix: &str) {
        self.raw(&format!("{prefix}{n}"));
    }

    /// Consume the sink, returning the accumulated text.
    pub fn into_string(self) -> String {
        self.text
    }
}
