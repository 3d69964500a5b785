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

//! Decodes arbitrary fuzzer bytes straight through `render`, exercising
//! spec.md's totality contract: this must never panic, for any input,
//! including the empty one.

use libfuzzer_sys::fuzz_target;
use wgsl_struct_fuzz::render;

fuzz_target!(|data: &[u8]| {
    let source = render(data);
    if !data.is_empty() {
        // A non-empty buffer always decodes to at least one legal
        // top-level token; see spec.md E2.
        let _ = source;
    }
});
