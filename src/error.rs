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

//! Error types shared by every transform stage.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XformError>;

/// Everything that can go wrong while transforming a map or a script.
#[derive(Error, Debug)]
pub enum XformError {
    /// File header magic did not match `"GBMP"`, or the header bytes were
    /// not readable as the expected ASCII tag.
    #[error("wrong map format: {0}")]
    WrongFormat(String),

    /// The map's `UMAP` chunk is absent; compressed maps (`CMAP`/`DMAP`)
    /// are not decoded by this crate.
    #[error("map has no uncompressed UMAP chunk: {0}")]
    UncompressedOnly(String),

    /// A transformed light or zone coordinate left its encoded range.
    #[error("coordinate overflow in {field}: {value} is out of range")]
    CoordinateOverflow { field: &'static str, value: i64 },

    /// A recognised opcode's operands did not match its schema.
    #[error("line {line}: failed to parse '{opcode}': {reason}")]
    SchemaParseFailure {
        line: usize,
        opcode: String,
        reason: String,
    },

    /// The script frontend was asked to apply flipXY, which the original
    /// tool refuses in favor of `rot180`.
    #[error("flipXY is not supported for scripts; use rot180 instead")]
    UnsupportedSymmetry,

    /// A chunk tag was requested that is not present in the container.
    #[error("chunk '{0}' not found in container")]
    ChunkNotFound(String),

    /// Wrapped I/O failure from opening, reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
