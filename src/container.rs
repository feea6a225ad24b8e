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

//! Chunk discovery inside a `GBMP` container.
//!
//! This module only locates byte ranges; it never interprets a chunk's
//! payload. That is the Map Rewriter's job.

use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{Result, XformError};

/// File-header magic every GMP map starts with.
const MAGIC: &[u8; 4] = b"GBMP";

/// Tags the container scanner recognises. Anything else still gets a
/// location entry; only this list gets named constants.
pub const KNOWN_TAGS: &[&str] = &[
    "UMAP", "CMAP", "DMAP", "ZONE", "MOBJ", "PSXM", "ANIM", "LGHT", "EDIT", "THSR", "RGEN",
];

/// A chunk's location inside the source buffer: payload offset and size,
/// both relative to the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    pub offset: usize,
    pub size: usize,
}

/// The result of a scan: every chunk tag found, in file order, mapped to
/// its payload location. The header itself (magic + version) is not a
/// chunk and is not part of this map.
#[derive(Debug, Clone, Default)]
pub struct ChunkIndex {
    pub version: u16,
    spans: HashMap<String, ChunkSpan>,
    /// Tags in the order they were encountered, including duplicates.
    pub order: Vec<String>,
}

impl ChunkIndex {
    pub fn get(&self, tag: &str) -> Option<ChunkSpan> {
        self.spans.get(tag).copied()
    }

    pub fn require(&self, tag: &str) -> Result<ChunkSpan> {
        self.get(tag)
            .ok_or_else(|| XformError::ChunkNotFound(tag.to_string()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.spans.contains_key(tag)
    }
}

/// Scan `data` for the `GBMP` header and every following chunk record.
///
/// A later chunk with a tag already seen overwrites the earlier span in
/// the lookup map, but both appear in `order`; callers that care about
/// duplicates (none currently do) can replay `order` against the raw
/// bytes.
pub fn scan(data: &[u8]) -> Result<ChunkIndex> {
    if data.len() < 6 {
        return Err(XformError::WrongFormat(format!(
            "file too short for a header: {} bytes",
            data.len()
        )));
    }
    if &data[0..4] != MAGIC {
        let shown = String::from_utf8_lossy(&data[0..4]).into_owned();
        return Err(XformError::WrongFormat(format!(
            "expected magic 'GBMP', found {shown:?}"
        )));
    }
    let version = u16::from_le_bytes([data[4], data[5]]);
    debug!("scanning GBMP container, version {version}");

    let mut index = ChunkIndex {
        version,
        ..Default::default()
    };
    let mut cursor = 6usize;
    while cursor + 8 <= data.len() {
        let tag_bytes = &data[cursor..cursor + 4];
        let tag = String::from_utf8(tag_bytes.to_vec())
            .map_err(|_| XformError::WrongFormat(format!("non-ASCII chunk tag at byte {cursor}")))?;
        let size = u32::from_le_bytes([
            data[cursor + 4],
            data[cursor + 5],
            data[cursor + 6],
            data[cursor + 7],
        ]) as usize;
        let payload_offset = cursor + 8;
        if payload_offset + size > data.len() {
            return Err(XformError::WrongFormat(format!(
                "chunk '{tag}' at byte {cursor} claims {size} bytes past EOF"
            )));
        }
        trace!("chunk {tag} at {payload_offset}, {size} bytes");
        index.spans.insert(
            tag.clone(),
            ChunkSpan {
                offset: payload_offset,
                size,
            },
        );
        index.order.push(tag);
        cursor = payload_offset + size;
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &str, payload: &[u8]) -> Vec<u8> {
        let mut out = tag.as_bytes().to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn sample_file() -> Vec<u8> {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&chunk("UMAP", &[0u8; 16]));
        data.extend_from_slice(&chunk("ZONE", &[1, 2, 3]));
        data
    }

    #[test]
    fn scans_known_chunks() {
        let data = sample_file();
        let index = scan(&data).unwrap();
        assert_eq!(index.version, 1);
        let umap = index.require("UMAP").unwrap();
        assert_eq!(umap.size, 16);
        assert_eq!(&data[umap.offset..umap.offset + umap.size], &[0u8; 16]);
        let zone = index.require("ZONE").unwrap();
        assert_eq!(&data[zone.offset..zone.offset + zone.size], &[1, 2, 3]);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = sample_file();
        data[0] = b'X';
        assert!(matches!(scan(&data), Err(XformError::WrongFormat(_))));
    }

    #[test]
    fn missing_chunk_is_chunk_not_found() {
        let data = sample_file();
        let index = scan(&data).unwrap();
        assert!(matches!(
            index.require("LGHT"),
            Err(XformError::ChunkNotFound(_))
        ));
        assert!(!index.contains("LGHT"));
    }

    #[test]
    fn truncated_chunk_size_is_wrong_format() {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(b"UMAP");
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]); // far short of the claimed size
        assert!(matches!(scan(&data), Err(XformError::WrongFormat(_))));
    }
}
