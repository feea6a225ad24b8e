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

//! Slope-id orbit tables.
//!
//! Slope ids 1-60 are partitioned into structural families (half, eighth,
//! full, and four diagonal families). Each id moves to another id in the
//! same family under a given symmetry. The eighth-slope family is the one
//! regular case: its id decodes to a direction and an offset, and the
//! direction transforms exactly like [`crate::geometry::Face`]. The other
//! families have irregular orbits and are hand-specified per symmetry,
//! matching the source game data rather than a formula.

use crate::geometry::{Face, Symmetry};

/// Transform a slope-id (1..=60) under `symmetry`. Ids outside this range
/// (0, or 61..=63) are opaque and return `None`; the caller leaves the
/// block's slope byte untouched in that case.
pub fn transform_slope_id(slope_id: u8, symmetry: Symmetry) -> Option<u8> {
    if symmetry == Symmetry::Identity {
        return (1..=60).contains(&slope_id).then_some(slope_id);
    }
    match slope_id {
        1..=8 => Some(half_slope(slope_id, symmetry)),
        9..=40 => Some(eighth_slope(slope_id, symmetry)),
        41..=44 => Some(lookup(slope_id, symmetry, &FULL_SLOPE)),
        45..=48 => Some(lookup(slope_id, symmetry, &DIAGONAL_45_48)),
        49..=52 => Some(lookup(slope_id, symmetry, &DIAGONAL_49_52)),
        53..=56 => Some(lookup(slope_id, symmetry, &DIAGONAL_53_56)),
        57..=60 => Some(lookup(slope_id, symmetry, &DIAGONAL_57_60)),
        _ => None,
    }
}

/// True for the diagonal families that occupy a single side-face channel
/// rather than all four.
pub fn is_single_channel_diagonal(slope_id: u8) -> bool {
    (45..=52).contains(&slope_id)
}

/// The side channel (left or right) a single-channel diagonal slope
/// occupies, used by the block codec's relocation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagonalChannel {
    Left,
    Right,
}

pub fn diagonal_channel(slope_id: u8) -> Option<DiagonalChannel> {
    match slope_id {
        45 | 47 | 49 | 51 => Some(DiagonalChannel::Left),
        46 | 48 | 50 | 52 => Some(DiagonalChannel::Right),
        _ => None,
    }
}

fn half_slope(slope_id: u8, symmetry: Symmetry) -> u8 {
    let table: &[(u8, u8, u8, u8, u8, u8)] = if slope_id % 2 == 1 {
        // lower orbit {1, 3, 5, 7}
        &[
            (1, 1, 3, 3, 7, 5),
            (3, 3, 1, 1, 5, 7),
            (5, 7, 5, 7, 1, 3),
            (7, 5, 7, 5, 3, 1),
        ]
    } else {
        // higher orbit {2, 4, 6, 8}
        &[
            (2, 2, 4, 4, 8, 6),
            (4, 4, 2, 2, 6, 8),
            (6, 8, 6, 8, 2, 4),
            (8, 6, 8, 6, 4, 2),
        ]
    };
    slope_from_hextuple(slope_id, symmetry, table)
}

/// Row layout: (id, flip_x, flip_y, flip_xy/rot180, rot90, rot270).
fn slope_from_hextuple(id: u8, symmetry: Symmetry, table: &[(u8, u8, u8, u8, u8, u8)]) -> u8 {
    let row = table.iter().find(|r| r.0 == id).expect("slope id in table");
    match symmetry {
        Symmetry::Identity => id,
        Symmetry::FlipX => row.1,
        Symmetry::FlipY => row.2,
        Symmetry::FlipXY | Symmetry::Rot180 => row.3,
        Symmetry::Rot90 => row.4,
        Symmetry::Rot270 => row.5,
    }
}

// Full 1/1 slopes {41, 42, 43, 44}: flipX keeps 41/42 fixed and swaps
// 43/44; flipY swaps 41/42 and keeps 43/44; flipXY/rot180 swap both pairs;
// rot90/rot270 cycle the whole orbit.
const FULL_SLOPE: [(u8, u8, u8, u8, u8, u8); 4] = [
    (41, 41, 42, 42, 44, 43),
    (42, 42, 41, 41, 43, 44),
    (43, 44, 43, 44, 41, 42),
    (44, 43, 44, 43, 42, 41),
];

// Diagonal family 45-48. flipXY is the principled flipY(flipX(.)), which
// happens to coincide with the rot180 orbit (the source's own flipXY
// branch for this family is an unresolved `# TODO: flip XY` placeholder
// identical to its flipY branch; this table corrects it).
const DIAGONAL_45_48: [(u8, u8, u8, u8, u8, u8); 4] = [
    (45, 46, 47, 48, 46, 47),
    (46, 45, 48, 47, 48, 45),
    (47, 48, 45, 46, 45, 48),
    (48, 47, 46, 45, 47, 46),
];

// Diagonal family 49-52 (same correction applied to flipXY as 45-48).
const DIAGONAL_49_52: [(u8, u8, u8, u8, u8, u8); 4] = [
    (49, 50, 51, 52, 50, 51),
    (50, 49, 52, 51, 52, 49),
    (51, 52, 49, 50, 49, 52),
    (52, 51, 50, 49, 51, 50),
];

// Diagonal family 53-56: the source's three flip branches already agree
// with rot180, so flipXY is used as-is.
const DIAGONAL_53_56: [(u8, u8, u8, u8, u8, u8); 4] = [
    (53, 54, 53, 54, 55, 56),
    (54, 53, 54, 53, 56, 55),
    (55, 55, 56, 56, 54, 53),
    (56, 56, 55, 55, 53, 54),
];

// Diagonal family 57-60 (same flipXY correction as 45-48/49-52).
const DIAGONAL_57_60: [(u8, u8, u8, u8, u8, u8); 4] = [
    (57, 58, 60, 59, 58, 60),
    (58, 57, 59, 60, 59, 57),
    (59, 60, 58, 57, 60, 58),
    (60, 59, 57, 58, 57, 59),
];

fn lookup(id: u8, symmetry: Symmetry, table: &[(u8, u8, u8, u8, u8, u8)]) -> u8 {
    slope_from_hextuple(id, symmetry, table)
}

/// Decode the eighth-slope direction out of a slope id in 9..=40.
fn eighth_direction(slope_id: u8) -> (Face, u8) {
    match slope_id {
        9..=16 => (Face::Top, slope_id - 9),
        17..=24 => (Face::Bottom, slope_id - 17),
        25..=32 => (Face::Left, slope_id - 25),
        33..=40 => (Face::Right, slope_id - 33),
        _ => unreachable!("slope_id {slope_id} outside eighth-slope range"),
    }
}

fn eighth_encode(face: Face, offset: u8) -> u8 {
    let base = match face {
        Face::Right => 33,
        Face::Top => 9,
        Face::Left => 25,
        Face::Bottom => 17,
    };
    base + offset
}

fn eighth_slope(slope_id: u8, symmetry: Symmetry) -> u8 {
    let (face, offset) = eighth_direction(slope_id);
    eighth_encode(face.transform(symmetry), offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_slope_flip_x_matches_source() {
        assert_eq!(transform_slope_id(1, Symmetry::FlipX), Some(1));
        assert_eq!(transform_slope_id(5, Symmetry::FlipX), Some(7));
        assert_eq!(transform_slope_id(6, Symmetry::FlipX), Some(8));
    }

    #[test]
    fn half_slope_is_self_inverse_under_flips() {
        for id in [1u8, 3, 5, 7, 2, 4, 6, 8] {
            for s in [Symmetry::FlipX, Symmetry::FlipY, Symmetry::FlipXY] {
                let once = transform_slope_id(id, s).unwrap();
                let twice = transform_slope_id(once, s).unwrap();
                assert_eq!(twice, id, "slope {id} under {s:?} should round-trip");
            }
        }
    }

    #[test]
    fn eighth_slope_scenario_rot90_up_offset_2() {
        // direction {up} offset 2 -> slope id 11; rot90 maps up -> right.
        assert_eq!(transform_slope_id(11, Symmetry::Rot90), Some(35));
    }

    #[test]
    fn eighth_slope_family_stays_in_family() {
        for id in 9..=40u8 {
            for s in [
                Symmetry::FlipX,
                Symmetry::FlipY,
                Symmetry::FlipXY,
                Symmetry::Rot90,
                Symmetry::Rot180,
                Symmetry::Rot270,
            ] {
                let out = transform_slope_id(id, s).unwrap();
                assert!((9..=40).contains(&out), "{id} under {s:?} -> {out}");
            }
        }
    }

    #[test]
    fn flip_xy_equals_rot180_for_every_family() {
        for id in 1..=60u8 {
            assert_eq!(
                transform_slope_id(id, Symmetry::FlipXY),
                transform_slope_id(id, Symmetry::Rot180),
                "slope {id}: flipXY must equal rot180"
            );
        }
    }

    #[test]
    fn rot90_rot270_are_inverse_for_every_family() {
        for id in 1..=60u8 {
            let once = transform_slope_id(id, Symmetry::Rot90).unwrap();
            let back = transform_slope_id(once, Symmetry::Rot270).unwrap();
            assert_eq!(back, id, "slope {id} rot90 then rot270 should round-trip");
        }
    }

    #[test]
    fn opaque_ids_pass_through_as_none() {
        assert_eq!(transform_slope_id(0, Symmetry::Rot90), None);
        assert_eq!(transform_slope_id(61, Symmetry::FlipX), None);
        assert_eq!(transform_slope_id(63, Symmetry::FlipXY), None);
    }

    #[test]
    fn diagonal_channel_sides() {
        assert_eq!(diagonal_channel(45), Some(DiagonalChannel::Left));
        assert_eq!(diagonal_channel(46), Some(DiagonalChannel::Right));
        assert_eq!(diagonal_channel(53), None);
    }
}
