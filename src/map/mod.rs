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

//! Applies the Block Codec across a whole voxel grid, plus the lights and
//! zones auxiliary tables.

use log::{info, warn};

use crate::block::Block;
use crate::container::{self, ChunkIndex};
use crate::error::{Result, XformError};
use crate::geometry::Symmetry;

/// Voxel grid depth; the map always has exactly this many z-layers.
pub const LAYERS: usize = 8;
/// Destination-index width/height used by the voxel remap table. Distinct
/// from `geometry::MAP_MAX` (256), which bounds source byte coordinates.
pub const MAP_WIDTH: i32 = 255;
pub const MAP_HEIGHT: i32 = 255;

/// `LIGHT_MAX` used by the light pass's fixed-point coordinate transform.
pub const LIGHT_MAX: i64 = 32767;

const BLOCK_SIZE: usize = 12;
const LIGHT_ENTRY_SIZE: usize = 16;

/// A fully materialised copy of a `GBMP` map file, ready to transform.
pub struct GmpFile {
    pub bytes: Vec<u8>,
    pub chunks: ChunkIndex,
}

impl GmpFile {
    pub fn parse(bytes: Vec<u8>) -> Result<GmpFile> {
        let chunks = container::scan(&bytes)?;
        Ok(GmpFile { bytes, chunks })
    }

    /// Apply `symmetry` to this map's `UMAP`, optional `ZONE`, and optional
    /// `LGHT` regions, returning a new byte buffer. Every other chunk,
    /// including the header, is copied byte-for-byte.
    pub fn transform(&self, symmetry: Symmetry) -> Result<Vec<u8>> {
        let umap = self
            .chunks
            .get("UMAP")
            .ok_or_else(|| XformError::UncompressedOnly("no UMAP chunk present".to_string()))?;

        let mut out = self.bytes.clone();
        transform_voxels(&self.bytes[umap.offset..umap.offset + umap.size], symmetry)
            .write_into(&mut out[umap.offset..umap.offset + umap.size]);
        info!("transformed {} voxels under {symmetry:?}", LAYERS * 256 * 256);

        if let Some(zone) = self.chunks.get("ZONE") {
            transform_zones(&self.bytes[zone.offset..zone.offset + zone.size], symmetry)?
                .write_into(&mut out[zone.offset..zone.offset + zone.size]);
        } else {
            warn!("map has no ZONE chunk; skipping zone pass");
        }

        if let Some(light) = self.chunks.get("LGHT") {
            transform_lights(&self.bytes[light.offset..light.offset + light.size], symmetry)?
                .write_into(&mut out[light.offset..light.offset + light.size]);
        } else {
            warn!("map has no LGHT chunk; skipping light pass");
        }

        Ok(out)
    }
}

/// A transformed region ready to be copied back into the output buffer.
/// Kept the same size as the source region; the Map Rewriter never grows
/// or shrinks a chunk.
struct Rewritten(Vec<u8>);

impl Rewritten {
    fn write_into(&self, dest: &mut [u8]) {
        debug_assert_eq!(self.0.len(), dest.len());
        dest.copy_from_slice(&self.0);
    }
}

/// Map a source scanline index (z, y, x) to its destination (z, y, x)
/// under `symmetry`, per the voxel remap table.
fn destination_index(x: i32, y: i32, z: i32, symmetry: Symmetry) -> (i32, i32, i32) {
    use Symmetry::*;
    match symmetry {
        Identity => (x, y, z),
        FlipX => (MAP_WIDTH - x, y, z),
        FlipY => (x, MAP_HEIGHT - y, z),
        FlipXY => (MAP_WIDTH - x, MAP_HEIGHT - y, z),
        Rot90 => (y, MAP_HEIGHT - x, z),
        Rot180 => (MAP_WIDTH - x, MAP_HEIGHT - y, z),
        Rot270 => (MAP_HEIGHT - y, x, z),
    }
}

fn transform_voxels(payload: &[u8], symmetry: Symmetry) -> Rewritten {
    let mut out = vec![0u8; payload.len()];
    let side = 256usize;
    for z in 0..LAYERS {
        for y in 0..side {
            for x in 0..side {
                let src_off = (z * side * side + y * side + x) * BLOCK_SIZE;
                if src_off + BLOCK_SIZE > payload.len() {
                    continue;
                }
                let mut raw = [0u8; BLOCK_SIZE];
                raw.copy_from_slice(&payload[src_off..src_off + BLOCK_SIZE]);
                let block = Block::decode(&raw).transform(symmetry);

                let (dx, dy, dz) = destination_index(x as i32, y as i32, z as i32, symmetry);
                if dx < 0 || dy < 0 || dz < 0 || dx as usize >= side || dy as usize >= side {
                    continue;
                }
                let dst_off =
                    (dz as usize * side * side + dy as usize * side + dx as usize) * BLOCK_SIZE;
                if dst_off + BLOCK_SIZE <= out.len() {
                    out[dst_off..dst_off + BLOCK_SIZE].copy_from_slice(&block.encode());
                }
            }
        }
    }
    Rewritten(out)
}

/// Transform a single fixed-point light/zone coordinate component, `MAP_MAX`
/// Apply the §4.A coordinate transform in fixed-point light space, where
/// `LIGHT_MAX` stands in for the byte grid's `MAP_MAX − 1`.
fn transform_light_xy(x: u16, y: u16, symmetry: Symmetry) -> Result<(u16, u16)> {
    let (x, y) = (x as i64, y as i64);
    let (nx, ny) = match symmetry {
        Symmetry::Identity => (x, y),
        Symmetry::FlipX => (LIGHT_MAX - x, y),
        Symmetry::FlipY => (x, LIGHT_MAX - y),
        Symmetry::FlipXY => (LIGHT_MAX - x, LIGHT_MAX - y),
        Symmetry::Rot90 => (LIGHT_MAX - y, x),
        Symmetry::Rot180 => (LIGHT_MAX - x, LIGHT_MAX - y),
        Symmetry::Rot270 => (y, LIGHT_MAX - x),
    };
    for (field, value) in [("light x", nx), ("light y", ny)] {
        if value < 0 || value > u16::MAX as i64 {
            return Err(XformError::CoordinateOverflow { field, value });
        }
    }
    Ok((nx as u16, ny as u16))
}

fn transform_lights(payload: &[u8], symmetry: Symmetry) -> Result<Rewritten> {
    let mut out = payload.to_vec();
    let count = payload.len() / LIGHT_ENTRY_SIZE;
    for i in 0..count {
        let base = i * LIGHT_ENTRY_SIZE;
        let x = u16::from_le_bytes([payload[base + 4], payload[base + 5]]);
        let y = u16::from_le_bytes([payload[base + 6], payload[base + 7]]);

        let (new_x, new_y) = transform_light_xy(x, y, symmetry)?;

        out[base + 4..base + 6].copy_from_slice(&new_x.to_le_bytes());
        out[base + 6..base + 8].copy_from_slice(&new_y.to_le_bytes());
    }
    Ok(Rewritten(out))
}

/// Transform one axis-aligned zone box in place using the byte-grid offset
/// rule (width/height preserved, origin recomputed so the box still covers
/// the same footprint after the transform).
fn transform_zone_box(x: u8, y: u8, w: u8, h: u8, symmetry: Symmetry) -> Result<(u8, u8, u8, u8)> {
    let map_w = MAP_WIDTH as i64;
    let map_h = MAP_HEIGHT as i64;
    let (x, y, w, h) = (x as i64, y as i64, w as i64, h as i64);

    let (nx, ny, nw, nh) = match symmetry {
        Symmetry::Identity => (x, y, w, h),
        Symmetry::FlipX => (map_w - x - w + 1, y, w, h),
        Symmetry::FlipY => (x, map_h - y - h + 1, w, h),
        Symmetry::FlipXY => (map_w - x - w + 1, map_h - y - h + 1, w, h),
        Symmetry::Rot90 => (map_h - y - h + 1, x, h, w),
        Symmetry::Rot180 => (map_w - x - w + 1, map_h - y - h + 1, w, h),
        Symmetry::Rot270 => (y, map_w - x - w + 1, h, w),
    };

    for (field, value) in [("zone x", nx), ("zone y", ny), ("zone w", nw), ("zone h", nh)] {
        if value < 0 || value > u8::MAX as i64 {
            return Err(XformError::CoordinateOverflow { field, value });
        }
    }
    Ok((nx as u8, ny as u8, nw as u8, nh as u8))
}

fn transform_zones(payload: &[u8], symmetry: Symmetry) -> Result<Rewritten> {
    let mut out = payload.to_vec();
    let mut cursor = 0usize;
    while cursor + 6 <= payload.len() {
        let (x, y, w, h) = (
            payload[cursor + 1],
            payload[cursor + 2],
            payload[cursor + 3],
            payload[cursor + 4],
        );
        let name_len = payload[cursor + 5] as usize;
        let entry_len = 6 + name_len;
        if cursor + entry_len > payload.len() {
            break;
        }

        let (nx, ny, nw, nh) = transform_zone_box(x, y, w, h, symmetry)?;
        out[cursor + 1] = nx;
        out[cursor + 2] = ny;
        out[cursor + 3] = nw;
        out[cursor + 4] = nh;
        // name bytes (cursor+6..cursor+entry_len) are copied unchanged already.

        cursor += entry_len;
    }
    Ok(Rewritten(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_and_umap() -> Vec<u8> {
        let side = 256usize;
        let mut bytes = b"GBMP".to_vec();
        bytes.extend_from_slice(&1u16.to_le_bytes());
        let umap_payload = vec![0u8; LAYERS * side * side * BLOCK_SIZE];
        bytes.extend_from_slice(b"UMAP");
        bytes.extend_from_slice(&(umap_payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&umap_payload);
        bytes
    }

    #[test]
    fn missing_umap_is_uncompressed_only_error() {
        let mut bytes = b"GBMP".to_vec();
        bytes.extend_from_slice(&1u16.to_le_bytes());
        let file = GmpFile::parse(bytes).unwrap();
        assert!(matches!(
            file.transform(Symmetry::FlipX),
            Err(XformError::UncompressedOnly(_))
        ));
    }

    #[test]
    fn identity_transform_round_trips_all_zero_umap() {
        let bytes = header_and_umap();
        let file = GmpFile::parse(bytes.clone()).unwrap();
        let out = file.transform(Symmetry::Identity).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn flip_x_then_flip_x_round_trips_voxel_grid() {
        let mut bytes = header_and_umap();
        // Plant one non-empty block at (z=0, y=5, x=10): air type but a lid tile.
        let umap = container::scan(&bytes).unwrap().require("UMAP").unwrap();
        let side = 256usize;
        let off = umap.offset + (5 * side + 10) * BLOCK_SIZE;
        bytes[off + 8] = 7; // lid tile index low byte
        let file = GmpFile::parse(bytes.clone()).unwrap();
        let once = file.transform(Symmetry::FlipX).unwrap();
        let once_file = GmpFile::parse(once).unwrap();
        let twice = once_file.transform(Symmetry::FlipX).unwrap();
        assert_eq!(twice, bytes);
    }

    #[test]
    fn zone_box_flip_x_preserves_width_and_height() {
        let (nx, ny, nw, nh) = transform_zone_box(10, 20, 5, 6, Symmetry::FlipX).unwrap();
        assert_eq!((nw, nh), (5, 6));
        assert_eq!(nx, (MAP_WIDTH - 10 - 5 + 1) as u8);
        assert_eq!(ny, 20);
    }

    #[test]
    fn zone_rot90_swaps_width_and_height() {
        let (_, _, nw, nh) = transform_zone_box(10, 20, 5, 6, Symmetry::Rot90).unwrap();
        assert_eq!((nw, nh), (6, 5));
    }

    #[test]
    fn light_flip_y_negates_y_only() {
        let mut payload = vec![0u8; LIGHT_ENTRY_SIZE];
        payload[4..6].copy_from_slice(&100u16.to_le_bytes());
        payload[6..8].copy_from_slice(&200u16.to_le_bytes());
        let rewritten = transform_lights(&payload, Symmetry::FlipY).unwrap();
        let x = u16::from_le_bytes([rewritten.0[4], rewritten.0[5]]);
        let y = u16::from_le_bytes([rewritten.0[6], rewritten.0[7]]);
        assert_eq!(x, 100);
        assert_eq!(y, (LIGHT_MAX - 200) as u16);
    }
}
