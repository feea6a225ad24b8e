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

//! The 12-byte voxel block codec and its symmetry transform.
//!
//! A block is decoded into its structured fields (four side words, a lid
//! word, an arrow byte and a slope/type byte), transformed field-by-field,
//! and re-encoded. The decoder/encoder pair never drops a bit it doesn't
//! semantically own: tile indexes, wall/bullet/flat/light-filter bits all
//! round-trip untouched unless the transform specifically rewrites them.

pub mod slope;

use crate::geometry::{self, Face, Symmetry};
use slope::DiagonalChannel;

/// A tile sentinel meaning "no tile"; present faces have a non-zero index.
const TILE_ABSENT: u16 = 0;

/// Sentinel lid tile index used by diagonal slopes; must never be
/// flip-mutated.
const LID_SENTINEL: u16 = 1023;

/// One of the four block-type bits stored in the low two bits of the
/// slope byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Air,
    Road,
    Pavement,
    Field,
}

impl BlockType {
    fn from_bits(bits: u8) -> BlockType {
        match bits & 0b11 {
            0 => BlockType::Air,
            1 => BlockType::Road,
            2 => BlockType::Pavement,
            _ => BlockType::Field,
        }
    }

    fn to_bits(self) -> u8 {
        match self {
            BlockType::Air => 0,
            BlockType::Road => 1,
            BlockType::Pavement => 2,
            BlockType::Field => 3,
        }
    }
}

/// One 16-bit side face word: left, right, top or bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceWord {
    /// Tile index; 0 means the face is absent.
    pub tile_index: u16,
    pub wall: bool,
    pub bullet_wall: bool,
    pub flat: bool,
    pub flip: bool,
    /// Tile rotation encoded as a quarter-turn count (0..=3 => 0/90/180/270).
    pub rotation: u8,
}

impl FaceWord {
    fn decode(word: u16) -> FaceWord {
        FaceWord {
            tile_index: word & 0x03FF,
            wall: word & (1 << 10) != 0,
            bullet_wall: word & (1 << 11) != 0,
            flat: word & (1 << 12) != 0,
            flip: word & (1 << 13) != 0,
            rotation: ((word >> 14) & 0b11) as u8,
        }
    }

    fn encode(self) -> u16 {
        let mut word = self.tile_index & 0x03FF;
        if self.wall {
            word |= 1 << 10;
        }
        if self.bullet_wall {
            word |= 1 << 11;
        }
        if self.flat {
            word |= 1 << 12;
        }
        if self.flip {
            word |= 1 << 13;
        }
        word |= ((self.rotation & 0b11) as u16) << 14;
        word
    }

    fn is_present(&self) -> bool {
        self.tile_index != TILE_ABSENT
    }
}

/// The 16-bit lid (top face) word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LidWord {
    pub tile_index: u16,
    pub light_filter: u8,
    pub flat: bool,
    pub flip: bool,
    pub rotation: u8,
}

impl LidWord {
    fn decode(word: u16) -> LidWord {
        LidWord {
            tile_index: word & 0x03FF,
            light_filter: ((word >> 10) & 0b11) as u8,
            flat: word & (1 << 12) != 0,
            flip: word & (1 << 13) != 0,
            rotation: ((word >> 14) & 0b11) as u8,
        }
    }

    fn encode(self) -> u16 {
        let mut word = self.tile_index & 0x03FF;
        word |= ((self.light_filter & 0b11) as u16) << 10;
        if self.flat {
            word |= 1 << 12;
        }
        if self.flip {
            word |= 1 << 13;
        }
        word |= ((self.rotation & 0b11) as u16) << 14;
        word
    }

    fn is_sentinel(&self) -> bool {
        self.tile_index == LID_SENTINEL
    }
}

/// A single decoded voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub left: FaceWord,
    pub right: FaceWord,
    pub top: FaceWord,
    pub bottom: FaceWord,
    pub lid: LidWord,
    /// Raw arrow byte: high nibble red, low nibble green.
    pub arrow: u8,
    pub block_type: BlockType,
    /// 6-bit slope id, 0..=63. 1..=60 participate in transforms.
    pub slope_id: u8,
}

impl Block {
    /// Decode a 12-byte little-endian block record.
    pub fn decode(bytes: &[u8; 12]) -> Block {
        let word = |lo: usize| u16::from_le_bytes([bytes[lo], bytes[lo + 1]]);
        let slope_byte = bytes[11];
        Block {
            left: FaceWord::decode(word(0)),
            right: FaceWord::decode(word(2)),
            top: FaceWord::decode(word(4)),
            bottom: FaceWord::decode(word(6)),
            lid: LidWord::decode(word(8)),
            arrow: bytes[10],
            block_type: BlockType::from_bits(slope_byte),
            slope_id: slope_byte >> 2,
        }
    }

    /// Encode back to exactly 12 bytes.
    pub fn encode(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        let put = |out: &mut [u8; 12], lo: usize, word: u16| {
            let b = word.to_le_bytes();
            out[lo] = b[0];
            out[lo + 1] = b[1];
        };
        put(&mut out, 0, self.left.encode());
        put(&mut out, 2, self.right.encode());
        put(&mut out, 4, self.top.encode());
        put(&mut out, 6, self.bottom.encode());
        put(&mut out, 8, self.lid.encode());
        out[10] = self.arrow;
        out[11] = self.block_type.to_bits() | (self.slope_id << 2);
        out
    }

    /// A block is empty iff air-typed with no lid and no side tiles.
    pub fn is_empty(&self) -> bool {
        self.block_type == BlockType::Air
            && self.lid.tile_index == TILE_ABSENT
            && !self.left.is_present()
            && !self.right.is_present()
            && !self.top.is_present()
            && !self.bottom.is_present()
    }

    fn face_word(&self, face: Face) -> FaceWord {
        match face {
            Face::Left => self.left,
            Face::Right => self.right,
            Face::Top => self.top,
            Face::Bottom => self.bottom,
        }
    }

    fn set_face_word(&mut self, face: Face, word: FaceWord) {
        match face {
            Face::Left => self.left = word,
            Face::Right => self.right = word,
            Face::Top => self.top = word,
            Face::Bottom => self.bottom = word,
        }
    }

    /// Apply `symmetry` to this block, returning a new transformed block.
    /// Empty blocks pass through unchanged; corrupt or opaque slope ids
    /// leave the slope byte untouched rather than aborting.
    pub fn transform(&self, symmetry: Symmetry) -> Block {
        if self.is_empty() || symmetry == Symmetry::Identity {
            return *self;
        }

        let mut out = *self;

        // 1. Road/field arrow byte.
        if matches!(self.block_type, BlockType::Road | BlockType::Field) {
            out.arrow = geometry::transform_arrow_byte(self.arrow, symmetry);
        }

        // 2. Lid word, unless absent or the diagonal-slope sentinel.
        if out.lid.tile_index != TILE_ABSENT && !out.lid.is_sentinel() {
            out.lid = transform_lid(out.lid, symmetry);
        }

        // 3. Side words.
        if slope::is_single_channel_diagonal(self.slope_id)
            && matches!(symmetry, Symmetry::FlipX | Symmetry::Rot90 | Symmetry::Rot270)
        {
            relocate_diagonal_channel(&mut out, self.slope_id, symmetry);
        } else {
            transform_sides_generic(&mut out, symmetry);
        }

        // 4. Slope id.
        if let Some(new_id) = slope::transform_slope_id(self.slope_id, symmetry) {
            out.slope_id = new_id;
        }

        out
    }
}

fn transform_lid(mut lid: LidWord, symmetry: Symmetry) -> LidWord {
    let was_flipped = lid.flip;
    match symmetry {
        Symmetry::Identity => {}
        Symmetry::FlipX => {
            lid.flip = !lid.flip;
        }
        Symmetry::FlipY => {
            lid.flip = !lid.flip;
            lid.rotation = (lid.rotation + 2) % 4;
        }
        Symmetry::FlipXY => {
            lid.rotation = (lid.rotation + 2) % 4;
        }
        Symmetry::Rot90 => {
            let addend = if was_flipped { 3 } else { 1 };
            lid.rotation = (lid.rotation + addend) % 4;
        }
        Symmetry::Rot180 => {
            lid.rotation = (lid.rotation + 2) % 4;
        }
        Symmetry::Rot270 => {
            let addend = if was_flipped { 1 } else { 3 };
            lid.rotation = (lid.rotation + addend) % 4;
        }
    }
    lid
}

/// Generic four-channel side permutation: the word that occupied `face`
/// moves to `face.transform(symmetry)`. Flip bits toggle under a pure
/// flip (not flipXY, where the two toggles cancel; not rotations, which
/// never own the flip bit).
fn transform_sides_generic(block: &mut Block, symmetry: Symmetry) {
    let toggles_flip = matches!(symmetry, Symmetry::FlipX | Symmetry::FlipY);

    let mut source = [Face::Left, Face::Right, Face::Top, Face::Bottom]
        .map(|f| (f, block.face_word(f)));

    if toggles_flip {
        for (_, word) in source.iter_mut() {
            if word.is_present() {
                word.flip = !word.flip;
            }
        }
    }

    let mut next = *block;
    for (face, word) in source {
        next.set_face_word(face.transform(symmetry), word);
    }
    *block = next;
}

/// Diagonal slopes 45-52 occupy a single side channel. Under flipX and
/// under rot90/rot270, the source relocates that channel to its mirrored
/// counterpart (left<->right) rather than running it through the generic
/// permutation, except when the tile is already sitting in the slot the
/// transform would have produced (the per-id skip rules below).
fn relocate_diagonal_channel(block: &mut Block, slope_id: u8, symmetry: Symmetry) {
    let skip = match (slope_id, symmetry) {
        (46 | 50, Symmetry::Rot90) => true,
        (48 | 52, Symmetry::Rot270) => true,
        (47 | 51, Symmetry::Rot90) => true,
        (45 | 49, Symmetry::Rot270) => true,
        _ => false,
    };
    if skip {
        return;
    }

    match slope::diagonal_channel(slope_id) {
        Some(DiagonalChannel::Right) => {
            let right = block.right;
            block.left = right;
            block.right = FaceWord::default();
            block.top = FaceWord::default();
            block.bottom = FaceWord::default();
        }
        Some(DiagonalChannel::Left) => {
            let left = block.left;
            block.right = left;
            block.left = FaceWord::default();
            block.top = FaceWord::default();
            block.bottom = FaceWord::default();
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_bytes() -> [u8; 12] {
        [0u8; 12]
    }

    #[test]
    fn decode_encode_round_trips_empty_block() {
        let bytes = empty_bytes();
        let block = Block::decode(&bytes);
        assert!(block.is_empty());
        assert_eq!(block.encode(), bytes);
    }

    #[test]
    fn empty_block_passes_through_every_symmetry() {
        let block = Block::decode(&empty_bytes());
        for s in [
            Symmetry::FlipX,
            Symmetry::FlipY,
            Symmetry::FlipXY,
            Symmetry::Rot90,
            Symmetry::Rot180,
            Symmetry::Rot270,
        ] {
            assert_eq!(block.transform(s), block);
        }
    }

    fn sample_block() -> Block {
        let mut bytes = [0u8; 12];
        // Left face: tile 5, wall set.
        let left = FaceWord {
            tile_index: 5,
            wall: true,
            ..Default::default()
        }
        .encode();
        bytes[0..2].copy_from_slice(&left.to_le_bytes());
        // Lid: tile 42, rotation=1 (90deg).
        let lid = LidWord {
            tile_index: 42,
            rotation: 1,
            ..Default::default()
        }
        .encode();
        bytes[8..10].copy_from_slice(&lid.to_le_bytes());
        bytes[11] = (BlockType::Pavement.to_bits()) | (11 << 2); // eighth-slope id 11
        Block::decode(&bytes)
    }

    #[test]
    fn decode_encode_round_trips_populated_block() {
        let block = sample_block();
        let encoded = block.encode();
        assert_eq!(Block::decode(&encoded), block);
    }

    #[test]
    fn flip_x_relocates_left_face_to_right_slot() {
        let block = sample_block();
        let transformed = block.transform(Symmetry::FlipX);
        assert_eq!(transformed.right.tile_index, 5);
        assert_eq!(transformed.left.tile_index, 0);
        assert!(transformed.right.flip, "flip bit should toggle under flipX");
    }

    #[test]
    fn flip_xy_equals_rot180_bit_exactly() {
        let block = sample_block();
        assert_eq!(
            block.transform(Symmetry::FlipXY),
            block.transform(Symmetry::Rot180)
        );
    }

    #[test]
    fn flips_are_self_inverse() {
        let block = sample_block();
        for s in [Symmetry::FlipX, Symmetry::FlipY, Symmetry::FlipXY] {
            let twice = block.transform(s).transform(s);
            assert_eq!(twice, block, "{s:?} should be self-inverse");
        }
    }

    #[test]
    fn rot90_then_rot270_round_trips() {
        let block = sample_block();
        let back = block.transform(Symmetry::Rot90).transform(Symmetry::Rot270);
        assert_eq!(back, block);
    }

    #[test]
    fn lid_rotation_takes_complementary_addend_when_already_flipped() {
        let lid = LidWord {
            tile_index: 10,
            flip: true,
            rotation: 0,
            ..Default::default()
        };
        let rotated_90 = transform_lid(lid, Symmetry::Rot90);
        let rotated_270 = transform_lid(lid, Symmetry::Rot270);
        // With flip already set, rot90 uses the 270-addend and vice versa.
        assert_eq!(rotated_90.rotation, 3);
        assert_eq!(rotated_270.rotation, 1);
    }

    #[test]
    fn lid_sentinel_tile_is_never_mutated() {
        let mut bytes = [0u8; 12];
        let lid = LidWord {
            tile_index: 1023,
            rotation: 2,
            flip: true,
            ..Default::default()
        }
        .encode();
        bytes[8..10].copy_from_slice(&lid.to_le_bytes());
        bytes[11] = (BlockType::Air.to_bits()) | (49 << 2);
        let block = Block::decode(&bytes);
        let transformed = block.transform(Symmetry::FlipX);
        assert_eq!(transformed.lid, block.lid);
    }

    #[test]
    fn unknown_slope_id_leaves_block_unchanged_except_other_fields() {
        let mut bytes = [0u8; 12];
        bytes[11] = (BlockType::Field.to_bits()) | (62 << 2);
        let block = Block::decode(&bytes);
        let transformed = block.transform(Symmetry::Rot90);
        assert_eq!(transformed.slope_id, 62, "opaque slope ids are untouched");
    }
}
