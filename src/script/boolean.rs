// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
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

//! Locates and rewrites boolean-predicate calls embedded inside
//! `IF`/`WHILE_EXEC`/`NOT`/`AND`/`OR` expressions, leaving every other byte
//! of the line untouched.

use crate::geometry::Symmetry;
use crate::script::schema::boolean_keywords;
use crate::script::transformer::transform_recognised_call;

/// Every starting offset of a recognised boolean opcode keyword in `line`,
/// left to right. A later match starting inside an earlier match's call
/// is not possible here since calls are non-overlapping parenthesised
/// groups, but duplicate keywords on one line are all reported.
fn find_boolean_opcodes(line: &str) -> Vec<(usize, &'static str)> {
    let mut hits = Vec::new();
    for keyword in boolean_keywords() {
        let mut start = 0usize;
        while let Some(pos) = line[start..].find(keyword) {
            let abs = start + pos;
            hits.push((abs, keyword));
            start = abs + keyword.len();
        }
    }
    hits.sort_by_key(|&(offset, _)| offset);
    hits
}

/// Split `line` around the boolean call starting at `offset`, isolating
/// `[left | call | right]` where `call` runs from `offset` through the
/// first `)` found after it (inclusive).
fn isolate_call(line: &str, offset: usize) -> Option<(&str, &str, &str)> {
    let close = line[offset..].find(')')? + offset;
    Some((&line[..offset], &line[offset..=close], &line[close + 1..]))
}

/// Rewrite every embedded boolean-opcode call in `line` under `symmetry`.
/// Lines without a recognised boolean opcode are returned unchanged.
/// `line_no` is carried only for error context on a failed call rewrite.
pub fn transform_boolean_line(line: &str, symmetry: Symmetry, line_no: usize) -> String {
    let opcodes = find_boolean_opcodes(line);
    if opcodes.is_empty() {
        return line.to_string();
    }

    let mut result = String::new();
    let mut offset = 0usize;
    let mut remaining = line.to_string();

    for (original_offset, keyword) in &opcodes {
        // Re-locate the call in `remaining` rather than trusting the
        // original-line offset, since earlier rewrites shift later text.
        let local_offset = original_offset.saturating_sub(offset).min(remaining.len());
        let search_from = remaining[local_offset..]
            .find(keyword)
            .map(|p| local_offset + p)
            .unwrap_or(local_offset);

        let Some((left, call, right)) = isolate_call(&remaining, search_from) else {
            continue;
        };
        let transformed =
            transform_recognised_call(call, symmetry, line_no).unwrap_or_else(|_| call.to_string());

        result.push_str(left);
        result.push_str(&transformed);
        offset += left.len() + transformed.len();
        remaining = right.to_string();
    }
    result.push_str(&remaining);
    result
}
