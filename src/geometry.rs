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

//! Axis math shared by the block codec and the script transformer: the
//! seven symmetries of a square, applied to coordinates, rotation angles,
//! face labels and traffic-arrow nibbles.

/// Block-space coordinate bound. Voxel coordinates live in `[0, MAP_MAX)`.
pub const MAP_MAX: i32 = 256;

/// One of the seven symmetries this crate can apply uniformly across map
/// and script artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    FlipX,
    FlipY,
    FlipXY,
    Rot90,
    Rot180,
    Rot270,
}

impl Symmetry {
    /// Clockwise rotation amount in degrees, if this symmetry is a pure
    /// rotation (identity counts as a zero-degree rotation).
    pub fn rotation_degrees(self) -> Option<i32> {
        match self {
            Symmetry::Identity => Some(0),
            Symmetry::Rot90 => Some(90),
            Symmetry::Rot180 => Some(180),
            Symmetry::Rot270 => Some(270),
            _ => None,
        }
    }

    /// True for the two flips whose rotation-bit side effects on the lid
    /// word need the complementary-angle correction (see [`crate::block`]).
    pub fn is_rotation(self) -> bool {
        self.rotation_degrees().is_some()
    }

    pub fn is_flip(self) -> bool {
        matches!(
            self,
            Symmetry::FlipX | Symmetry::FlipY | Symmetry::FlipXY
        )
    }
}

/// The four side faces of a voxel, in the canonical index order used by
/// the face-direction transform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    /// Transform this face label under `symmetry`.
    ///
    /// This is both the field-level transform used for `DOOR_DATA`-style
    /// face operands, and the channel permutation applied to the four
    /// side words of a voxel: the word that was `Left` moves to the slot
    /// this function returns for `Face::Left`.
    pub fn transform(self, symmetry: Symmetry) -> Face {
        use Face::*;
        use Symmetry::*;
        match (symmetry, self) {
            (Identity, f) => f,

            (FlipX, Top) => Top,
            (FlipX, Bottom) => Bottom,
            (FlipX, Left) => Right,
            (FlipX, Right) => Left,

            (FlipY, Top) => Bottom,
            (FlipY, Bottom) => Top,
            (FlipY, Left) => Left,
            (FlipY, Right) => Right,

            (FlipXY, Top) => Bottom,
            (FlipXY, Bottom) => Top,
            (FlipXY, Left) => Right,
            (FlipXY, Right) => Left,

            (Rot90, Top) => Right,
            (Rot90, Bottom) => Left,
            (Rot90, Left) => Top,
            (Rot90, Right) => Bottom,

            (Rot180, Top) => Bottom,
            (Rot180, Bottom) => Top,
            (Rot180, Left) => Right,
            (Rot180, Right) => Left,

            (Rot270, Top) => Left,
            (Rot270, Bottom) => Right,
            (Rot270, Left) => Bottom,
            (Rot270, Right) => Top,
        }
    }

    /// Bit position of this face inside an arrow nibble:
    /// bit0=down(Bottom), bit1=up(Top), bit2=left(Left), bit3=right(Right).
    fn arrow_bit(self) -> u8 {
        match self {
            Face::Bottom => 0,
            Face::Top => 1,
            Face::Left => 2,
            Face::Right => 3,
        }
    }
}

/// Transform an integer (byte-grid) coordinate pair.
///
/// Flips apply the `MAP_MAX - v - 1` offset rule (delta=1 for
/// integer-typed operands); rotations carry no offset.
pub fn transform_coord_i32(x: i32, y: i32, symmetry: Symmetry) -> (i32, i32) {
    use Symmetry::*;
    match symmetry {
        Identity => (x, y),
        FlipX => (MAP_MAX - x - 1, y),
        FlipY => (x, MAP_MAX - y - 1),
        FlipXY => (MAP_MAX - x - 1, MAP_MAX - y - 1),
        Rot90 => (MAP_MAX - y, x),
        Rot180 => (MAP_MAX - x, MAP_MAX - y),
        Rot270 => (y, MAP_MAX - x),
    }
}

/// Transform a float (script, half-cell-centered) coordinate pair.
///
/// Flips apply no offset (delta=0 for float-typed operands); rotations
/// use the same formulas as the integer case.
pub fn transform_coord_f64(x: f64, y: f64, symmetry: Symmetry) -> (f64, f64) {
    use Symmetry::*;
    let map_max = MAP_MAX as f64;
    match symmetry {
        Identity => (x, y),
        FlipX => (map_max - x, y),
        FlipY => (x, map_max - y),
        FlipXY => (map_max - x, map_max - y),
        Rot90 => (map_max - y, x),
        Rot180 => (map_max - x, map_max - y),
        Rot270 => (y, map_max - x),
    }
}

/// Swap a width/height pair under rot90/rot270; unchanged otherwise.
pub fn transform_wh<T>(w: T, h: T, symmetry: Symmetry) -> (T, T) {
    match symmetry {
        Symmetry::Rot90 | Symmetry::Rot270 => (h, w),
        _ => (w, h),
    }
}

/// Transform a clockwise rotation-angle field, `0 <= theta < 360`.
pub fn transform_angle(theta: i32, symmetry: Symmetry) -> i32 {
    use Symmetry::*;
    let result = match symmetry {
        Identity => theta,
        FlipX => 360 - theta,
        FlipY => 180 - theta,
        FlipXY => theta - 180,
        Rot90 => theta - 90,
        Rot180 => theta - 180,
        Rot270 => theta - 270,
    };
    result.rem_euclid(360)
}

/// Transform one arrow nibble (4 bits: bit0=down, bit1=up, bit2=left,
/// bit3=right) by relocating each set bit to the slot its face maps to.
pub fn transform_arrow_nibble(nibble: u8, symmetry: Symmetry) -> u8 {
    let mut result = 0u8;
    for face in [Face::Top, Face::Bottom, Face::Left, Face::Right] {
        if nibble & (1 << face.arrow_bit()) != 0 {
            let new_face = face.transform(symmetry);
            result |= 1 << new_face.arrow_bit();
        }
    }
    result
}

/// Transform a full arrow byte (high nibble = red, low nibble = green).
pub fn transform_arrow_byte(byte: u8, symmetry: Symmetry) -> u8 {
    let red = transform_arrow_nibble((byte >> 4) & 0x0F, symmetry);
    let green = transform_arrow_nibble(byte & 0x0F, symmetry);
    (red << 4) | green
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_is_self_inverse() {
        for s in [Symmetry::FlipX, Symmetry::FlipY, Symmetry::FlipXY] {
            let (x, y) = transform_coord_i32(10, 20, s);
            let (x2, y2) = transform_coord_i32(x, y, s);
            assert_eq!((x2, y2), (10, 20), "{s:?} should be self-inverse");
        }
    }

    #[test]
    fn rot90_rot270_are_inverses() {
        let (x, y) = (12, 40);
        let (x1, y1) = transform_coord_i32(x, y, Symmetry::Rot90);
        let (x2, y2) = transform_coord_i32(x1, y1, Symmetry::Rot270);
        assert_eq!((x2, y2), (x, y));
    }

    #[test]
    fn flip_xy_equals_rot180() {
        // Only holds for delta=0 operands (floats); integer coordinates
        // carry a delta=1 offset on flips but not on rotations, so
        // FlipXY(0,0)=(255,255) while Rot180(0,0)=(256,256) there.
        for (x, y) in [(0.0, 0.0), (37.0, 200.0), (255.0, 1.0)] {
            assert_eq!(
                transform_coord_f64(x, y, Symmetry::FlipXY),
                transform_coord_f64(x, y, Symmetry::Rot180)
            );
        }
        assert_eq!(
            transform_angle(55, Symmetry::FlipXY),
            transform_angle(55, Symmetry::Rot180)
        );
    }

    #[test]
    fn scenario_rotate_270_coordinate_and_angle() {
        // From the concrete rotate-270 scenario: x'=y, y'=MAP_MAX-x.
        let (xp, yp) = transform_coord_f64(113.50, 124.70, Symmetry::Rot270);
        assert!((xp - 124.70).abs() < 1e-9);
        assert!((yp - (256.0 - 113.50)).abs() < 1e-9);
        assert_eq!(transform_angle(25, Symmetry::Rot270), 115);
    }

    #[test]
    fn angle_flip_x_reflects() {
        assert_eq!(transform_angle(25, Symmetry::FlipX), 335);
        assert_eq!(transform_angle(0, Symmetry::FlipX), 0);
    }

    #[test]
    fn angle_flip_y_reflects() {
        assert_eq!(transform_angle(25, Symmetry::FlipY), 155);
    }

    #[test]
    fn face_table_matches_rot180_is_flip_xy() {
        for f in [Face::Top, Face::Bottom, Face::Left, Face::Right] {
            assert_eq!(f.transform(Symmetry::Rot180), f.transform(Symmetry::FlipXY));
        }
    }

    #[test]
    fn rot90_then_rot270_face_is_identity() {
        for f in [Face::Top, Face::Bottom, Face::Left, Face::Right] {
            assert_eq!(f.transform(Symmetry::Rot90).transform(Symmetry::Rot270), f);
        }
    }

    #[test]
    fn arrow_nibble_flip_x_swaps_left_right() {
        // green nibble 0b1000 (bit3 = right) -> 0b0100 (bit2 = left).
        assert_eq!(transform_arrow_nibble(0b1000, Symmetry::FlipX), 0b0100);
        // up/down preserved.
        assert_eq!(transform_arrow_nibble(0b0010, Symmetry::FlipX), 0b0010);
    }

    #[test]
    fn arrow_nibble_flip_y_swaps_up_down() {
        assert_eq!(transform_arrow_nibble(0b0010, Symmetry::FlipY), 0b0001);
        assert_eq!(transform_arrow_nibble(0b0100, Symmetry::FlipY), 0b0100);
    }

    #[test]
    fn arrow_byte_transforms_both_nibbles() {
        let byte = 0b1000_0010; // red=right, green=up
        let flipped = transform_arrow_byte(byte, Symmetry::FlipXY);
        assert_eq!(flipped, 0b0100_0001);
    }

    #[test]
    fn wh_swaps_only_under_rotation() {
        assert_eq!(transform_wh(3, 7, Symmetry::Rot90), (7, 3));
        assert_eq!(transform_wh(3, 7, Symmetry::Rot270), (7, 3));
        assert_eq!(transform_wh(3, 7, Symmetry::FlipX), (3, 7));
        assert_eq!(transform_wh(3, 7, Symmetry::Rot180), (3, 7));
    }
}
