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

//! Cursor-based primitives for pulling typed fields out of one script
//! line. Every primitive returns the value alongside the cursor to resume
//! scanning from, or a sentinel cursor when nothing was found.

/// Cursor value meaning "nothing left on this line".
pub const EOL: isize = -1;
/// Cursor value meaning "an optional field was absent, not malformed".
pub const ABSENT: isize = -2;

/// The maximal run of `[A-Za-z0-9_]` starting at `from`, skipping leading
/// non-identifier characters first.
pub fn next_identifier(line: &str, from: usize) -> (String, isize) {
    let bytes = line.as_bytes();
    let mut i = from;
    while i < bytes.len() && !is_ident_byte(bytes[i]) {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    if start >= bytes.len() || start == i {
        return (String::new(), EOL);
    }
    (line[start..i].to_string(), i as isize)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// An optional leading `-`, then a maximal digit run.
pub fn next_integer(line: &str, from: usize) -> (Option<i64>, isize) {
    let bytes = line.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return (None, ABSENT);
    }
    let text = &line[start..i];
    match text.parse::<i64>() {
        Ok(v) => (Some(v), i as isize),
        Err(_) => (None, ABSENT),
    }
}

/// A maximal run of digits and at most one `.`.
pub fn next_float(line: &str, from: usize) -> (Option<f64>, isize) {
    let bytes = line.as_bytes();
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    let mut seen_dot = false;
    let digits_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || (bytes[i] == b'.' && !seen_dot)) {
        if bytes[i] == b'.' {
            seen_dot = true;
        }
        i += 1;
    }
    if i == digits_start {
        return (None, ABSENT);
    }
    let text = &line[start..i];
    match text.parse::<f64>() {
        Ok(v) => (Some(v), i as isize),
        Err(_) => (None, ABSENT),
    }
}

/// The substring between the first `(` at or after `from` and its
/// matching first `)`, split on top-level commas. Each element is
/// trimmed of surrounding whitespace.
pub fn parenthesised_tuple(line: &str, from: usize) -> Option<(Vec<String>, usize)> {
    let bytes = line.as_bytes();
    let open = bytes[from..].iter().position(|&b| b == b'(')? + from;
    let close = bytes[open..].iter().position(|&b| b == b')')? + open;
    let inner = &line[open + 1..close];
    let elements = inner
        .split(',')
        .map(|s| s.trim().to_string())
        .collect::<Vec<_>>();
    Some((elements, close + 1))
}

/// The raw (untyped) comma-separated elements between the first matching
/// parenthesis pair, used for variable lists like gang-info blocks.
pub fn variable_list(line: &str, from: usize) -> Option<(Vec<String>, usize)> {
    parenthesised_tuple(line, from)
}

/// True if the next alphanumeric character found while scanning forward
/// from `from` (skipping punctuation and whitespace) is a digit. Used to
/// distinguish a bare numeric operand from an upcoming keyword token.
pub fn peek_is_number(line: &str, from: usize) -> bool {
    for b in line.as_bytes()[from.min(line.len())..].iter() {
        if b.is_ascii_alphanumeric() {
            return b.is_ascii_digit();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_skips_leading_whitespace() {
        let (text, cursor) = next_identifier("   PLAYER_PED p1", 0);
        assert_eq!(text, "PLAYER_PED");
        assert_eq!(cursor, 13);
    }

    #[test]
    fn identifier_at_eol_returns_sentinel() {
        let (text, cursor) = next_identifier("   ", 0);
        assert_eq!(text, "");
        assert_eq!(cursor, EOL);
    }

    #[test]
    fn integer_handles_negative_values() {
        let (value, cursor) = next_integer(" -1", 0);
        assert_eq!(value, Some(-1));
        assert!(cursor > 0);
    }

    #[test]
    fn integer_absent_before_eol() {
        let (value, cursor) = next_integer("   ", 0);
        assert_eq!(value, None);
        assert_eq!(cursor, ABSENT);
    }

    #[test]
    fn float_parses_one_decimal_point() {
        let (value, _) = next_float(" 113.50", 0);
        assert_eq!(value, Some(113.50));
    }

    #[test]
    fn tuple_splits_on_commas_and_trims() {
        let (elems, cursor) = parenthesised_tuple("= (113.50, 124.70, 255.00) 25 1", 0).unwrap();
        assert_eq!(elems, vec!["113.50", "124.70", "255.00"]);
        assert_eq!(&"= (113.50, 124.70, 255.00) 25 1"[cursor..], " 25 1");
    }

    #[test]
    fn peek_is_number_sees_through_punctuation() {
        assert!(peek_is_number("   -> 25 END", 0));
        assert!(!peek_is_number("   -> END", 0));
    }
}
