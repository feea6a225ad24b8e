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

//! MIS script transformation: tokenizer, command schemas, the command
//! transformer, and the boolean-line splitter.

pub mod boolean;
pub mod schema;
pub mod tokenizer;
pub mod transformer;

use crate::error::{Result, XformError};
use crate::geometry::Symmetry;

/// Rewrite an entire script's text under `symmetry`, one logical line at
/// a time. The script frontend refuses `flipXY`; callers applying it to a
/// map may still use it freely.
pub fn transform_script(text: &str, symmetry: Symmetry) -> Result<String> {
    if symmetry == Symmetry::FlipXY {
        return Err(XformError::UnsupportedSymmetry);
    }
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&transformer::transform_line(line, i + 1, symmetry));
    }
    Ok(out)
}
