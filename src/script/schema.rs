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

//! Per-opcode field sequences.
//!
//! A [`Schema`] names an opcode keyword, the ordered field kinds the
//! tokenizer should pull off the line, and the small set of post-transform
//! flags a handful of commands need (reverse-angle lid rotation, the
//! opposite-axis phone rule, the double-door offset). Command classes are
//! grouped the way the source groups them: declarations, execution
//! commands, and boolean predicates.

use crate::geometry::Face;

/// One field's type, in the order the tokenizer consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The opcode keyword itself; always first, never transformed.
    Opcode,
    /// A bare identifier field (variable name, enum token) copied as-is.
    Ident,
    /// A literal `=` token, reproduced as-is.
    Equals,
    /// An (x, y[, z]) tuple in float (script) space.
    CoordFloat,
    /// An (x, y[, z]) tuple in integer (byte-grid) space.
    CoordByte,
    /// A (w, h) pair, swapped under rot90/rot270.
    WidthHeight,
    /// A rotation angle in degrees, mod 360.
    Rotation,
    /// A rotation angle using the reverse-angle convention (CHANGE_BLOCK LID).
    ReverseRotation,
    /// One of {TOP, BOTTOM, LEFT, RIGHT}.
    FaceDirection,
    /// A signed (vx, vy) velocity pair, negated per the flip axis.
    Velocity,
    /// An RGB triple, untouched by geometry.
    Rgb,
    /// A bare number untouched by geometry (counts, ids, flags).
    Number,
    /// An optional trailing number; absence is not an error.
    OptionalNumber,
    /// An enum token untouched by geometry (e.g. `ANY_PLAYER_ONE_CAR`).
    Enum,
    /// An optional enum token.
    OptionalEnum,
    /// A float untouched by geometry.
    Float,
    /// Either a parenthesised tuple or a bare variable name.
    Variant,
    /// A `FLIP`/`NOT_FLIP`-style toggle, flipped under flipX/flipY.
    FlipToggle,
    /// Trailing literal `END` token, reproduced when present.
    TrailingEnd,
    /// A parenthesised gang-info block, copied through untouched.
    GangInfo,
    /// A thread-area block `(p, x, y, z, w, h, label)`.
    ThreadArea,
    /// A thread-block block `(p, x, y, z, label)`.
    ThreadBlock,
}

/// The command's broad class, used to choose which parser entry point
/// handles it and whether it can appear embedded inside a boolean
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandClass {
    Declaration,
    Execution,
    Boolean,
}

/// Post-transform behavior that doesn't fit the generic per-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchemaFlags {
    /// `CHANGE_BLOCK LID`: tile rotation uses the negated addend.
    pub reverse_angle: bool,
    /// Phone-kind objects use the opposite flip axis for their angle rule.
    pub swap_axis: bool,
    /// `DOOR_DATA ... DOUBLE`: apply the ±1 origin-offset tie-break.
    pub double_door: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub opcode: &'static str,
    pub class: CommandClass,
    pub fields: &'static [FieldKind],
    pub flags: SchemaFlags,
}

impl Schema {
    const fn new(opcode: &'static str, class: CommandClass, fields: &'static [FieldKind]) -> Schema {
        Schema {
            opcode,
            class,
            fields,
            flags: SchemaFlags {
                reverse_angle: false,
                swap_axis: false,
                double_door: false,
            },
        }
    }

    const fn with_flags(mut self, flags: SchemaFlags) -> Schema {
        self.flags = flags;
        self
    }
}

use FieldKind::*;

/// Declarations: `KEYWORD name = (...) ...`. Grouped in keyword-priority
/// order — more specific keywords (`PARKED_CAR_DATA`) are listed before
/// substrings they contain (`CAR_DATA` is not a real prefix hazard here,
/// but `CREATE_GANG_CAR` must be checked before `CREATE_CAR`).
pub const DECLARATION_SCHEMAS: &[Schema] = &[
    Schema::new(
        "PLAYER_PED",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Number],
    ),
    Schema::new(
        "CHAR_DATA",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Number, OptionalNumber],
    ),
    Schema::new(
        "CREATE_GANG_CAR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Enum, Number],
    ),
    Schema::new(
        "PARKED_CAR_DATA",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Enum, Number, OptionalNumber],
    ),
    Schema::new(
        "CREATE_CAR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Enum],
    ),
    Schema::new(
        "CREATE_CHAR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Enum],
    ),
    Schema::new(
        "CREATE_OBJ",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Number],
    ),
    Schema::new(
        "OBJ_DATA",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Number],
    ),
    Schema::new(
        "CRANE_DATA",
        CommandClass::Declaration,
        &[
            Opcode, Ident, Equals, CoordFloat, CoordFloat, Rotation, Float, Enum, Number,
        ],
    ),
    Schema::new(
        "DECLARE_CRANE_POWERUP",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat],
    ),
    Schema::new(
        "CREATE_SOUND",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Enum, Number],
    ),
    Schema::new("SOUND", CommandClass::Declaration, &[Opcode, Ident, Equals, CoordFloat, Enum]),
    Schema::new(
        "RADIO_STATION",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordByte, Number],
    ),
    Schema::new(
        "CONVEYOR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Velocity, Number, Number],
    ),
    Schema::new(
        "GENERATOR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Enum, Number],
    ),
    Schema::new(
        "DESTRUCTOR",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Number],
    ),
    Schema::new(
        "CREATE_LIGHT",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rgb, Number, Number],
    ),
    Schema::new(
        "LIGHT",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rgb, Number],
    ),
    Schema::new(
        "DOOR_DATA",
        CommandClass::Declaration,
        &[
            Opcode,
            Ident,
            Equals,
            Enum, // DOUBLE | SINGLE
            CoordByte,
            ThreadArea,
            FaceDirection,
            Number,
            Enum,
            Enum,
            Number,
            FlipToggle,
            Enum,
        ],
    )
    .with_flags(SchemaFlags {
        double_door: true,
        ..Default::default()
    }),
    Schema::new(
        "SET_GANG_INFO",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, GangInfo],
    ),
    Schema::new(
        "CRUSHER",
        CommandClass::Declaration,
        &[Opcode, Ident, Equals, CoordFloat, Rotation, Number],
    ),
    Schema::new(
        "THREAD_WAIT_FOR_CHAR_IN_AREA_ANY_MEANS",
        CommandClass::Declaration,
        &[Opcode, ThreadArea],
    ),
    Schema::new(
        "THREAD_WAIT_FOR_CHAR_IN_AREA",
        CommandClass::Declaration,
        &[Opcode, ThreadArea],
    ),
    Schema::new(
        "THREAD_WAIT_FOR_CHAR_IN_BLOCK",
        CommandClass::Declaration,
        &[Opcode, ThreadBlock],
    ),
];

/// Execution commands, grounded directly in `flip_exec_opcode`'s dispatch
/// order.
pub const EXECUTION_SCHEMAS: &[Schema] = &[
    Schema::new(
        "POINT_ARROW_AT",
        CommandClass::Execution,
        &[Opcode, Variant, CoordFloat],
    ),
    Schema::new(
        "EXPLODE_WALL",
        CommandClass::Execution,
        &[Opcode, CoordByte, FaceDirection],
    ),
    Schema::new(
        "EXPLODE_NO_RING",
        CommandClass::Execution,
        &[Opcode, CoordFloat],
    ),
    Schema::new("EXPLODE_LARGE", CommandClass::Execution, &[Opcode, CoordFloat]),
    Schema::new("EXPLODE_SMALL", CommandClass::Execution, &[Opcode, CoordFloat]),
    Schema::new("EXPLODE", CommandClass::Execution, &[Opcode, CoordFloat]),
    Schema::new(
        "SET_CHAR_OBJECTIVE",
        CommandClass::Execution,
        &[Opcode, Variant, Enum, Variant, Number, Number, Number, Number, Number],
    ),
    Schema::new(
        "ADD_PATROL_POINT",
        CommandClass::Execution,
        &[Opcode, Variant, CoordFloat],
    ),
    Schema::new("REMOVE_BLOCK", CommandClass::Execution, &[Opcode, CoordByte]),
    Schema::new(
        "ADD_NEW_BLOCK",
        CommandClass::Execution,
        &[Opcode, CoordByte, Number],
    ),
    Schema::new(
        "CHANGE_BLOCK SIDE",
        CommandClass::Execution,
        &[Opcode, CoordByte, FaceDirection, Number, FlipToggle],
    ),
    Schema::new(
        "CHANGE_BLOCK LID",
        CommandClass::Execution,
        &[Opcode, CoordByte, ReverseRotation, Number, FlipToggle],
    )
    .with_flags(SchemaFlags {
        reverse_angle: true,
        ..Default::default()
    }),
    Schema::new(
        "CHANGE_BLOCK TYPE",
        CommandClass::Execution,
        &[Opcode, CoordByte, Number],
    ),
    Schema::new("SWITCH_ROAD", CommandClass::Execution, &[Opcode, CoordByte, Number]),
    Schema::new(
        "LOWER_LEVEL",
        CommandClass::Execution,
        &[Opcode, CoordByte, CoordByte],
    ),
    Schema::new(
        "WARP_FROM_CAR_TO_POINT",
        CommandClass::Execution,
        &[Opcode, Variant, CoordFloat],
    ),
    Schema::new("PERFORM_SAVE_GAME", CommandClass::Execution, &[Opcode]),
    Schema::new(
        "SET_DIR_OF_TV_VANS",
        CommandClass::Execution,
        &[Opcode, Rotation],
    ),
];

/// Boolean predicates, grounded in `rotate_bool_opcode`.
pub const BOOLEAN_SCHEMAS: &[Schema] = &[
    Schema::new(
        "LOCATE_CHARACTER_ANY_MEANS_CAR",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "LOCATE_CHARACTER_ON_FOOT",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "LOCATE_CHARACTER",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "LOCATE_STOPPED_CHARACTER",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "LOCATE_STOPPED",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "CHECK_CAR_WRECKED_IN_AREA",
        CommandClass::Boolean,
        &[Opcode, CoordFloat, Number, Number],
    ),
    Schema::new(
        "IS_CHAR_FIRING_IN_AREA",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "IS_CAR_IN_BLOCK",
        CommandClass::Boolean,
        &[Opcode, Variant, CoordFloat, Number, Number],
    ),
    Schema::new(
        "IS_POINT_ONSCREEN",
        CommandClass::Boolean,
        &[Opcode, CoordFloat],
    ),
];

/// All opcode keywords that may appear boolean-embedded, for the splitter.
pub fn boolean_keywords() -> impl Iterator<Item = &'static str> {
    BOOLEAN_SCHEMAS.iter().map(|s| s.opcode)
}

/// Look up a schema by keyword across all three classes, checking the
/// more specific multi-word `CHANGE_BLOCK {SIDE,LID,TYPE}` keys before the
/// bare `CHANGE_BLOCK` prefix would otherwise be ambiguous.
pub fn find_schema(keyword: &str) -> Option<&'static Schema> {
    DECLARATION_SCHEMAS
        .iter()
        .chain(EXECUTION_SCHEMAS)
        .chain(BOOLEAN_SCHEMAS)
        .find(|s| s.opcode == keyword)
}

/// The face associated with a `DOOR_DATA` double-door tie-break: the
/// perpendicular-axis offset applied when the door's face changes.
pub fn double_door_offset(face: Face) -> (i32, i32) {
    match face {
        Face::Right => (0, -1),
        Face::Left => (0, 1),
        Face::Top => (-1, 0),
        Face::Bottom => (1, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_player_ped_schema() {
        let schema = find_schema("PLAYER_PED").unwrap();
        assert_eq!(schema.class, CommandClass::Declaration);
        assert_eq!(schema.fields[0], Opcode);
    }

    #[test]
    fn change_block_lid_carries_reverse_angle_flag() {
        let schema = find_schema("CHANGE_BLOCK LID").unwrap();
        assert!(schema.flags.reverse_angle);
    }

    #[test]
    fn door_data_carries_double_door_flag() {
        let schema = find_schema("DOOR_DATA").unwrap();
        assert!(schema.flags.double_door);
    }

    #[test]
    fn double_door_offsets_match_per_face_table() {
        assert_eq!(double_door_offset(Face::Bottom), (1, 0));
        assert_eq!(double_door_offset(Face::Right), (0, -1));
    }
}
