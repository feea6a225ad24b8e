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

//! Selects a schema by opcode keyword, parses the line's fields, applies
//! the geometric transform to each, and re-emits the command with fixed
//! formatting.

use log::warn;

use crate::error::{Result, XformError};
use crate::geometry::{self, Face, Symmetry};
use crate::script::schema::{self, CommandClass, FieldKind, Schema, SchemaFlags};
use crate::script::tokenizer;

/// One parsed field, tagged with its kind so the formatter can re-emit it
/// in the canonical style.
#[derive(Debug, Clone)]
enum Field {
    Text(String),
    CoordFloat(f64, f64, Option<f64>),
    CoordByte(i32, i32, Option<i32>),
    WidthHeight(f64, f64),
    Rotation(i32),
    FaceDirection(Face),
    Velocity(f64, f64),
    Rgb(u8, u8, u8),
    Number(i64),
    OptionalNumber(Option<i64>),
    Float(f64),
    FlipToggle(bool),
    Raw(String),
}

fn parse_face(text: &str) -> Option<Face> {
    match text {
        "TOP" => Some(Face::Top),
        "BOTTOM" => Some(Face::Bottom),
        "LEFT" => Some(Face::Left),
        "RIGHT" => Some(Face::Right),
        _ => None,
    }
}

fn face_name(face: Face) -> &'static str {
    match face {
        Face::Top => "TOP",
        Face::Bottom => "BOTTOM",
        Face::Left => "LEFT",
        Face::Right => "RIGHT",
    }
}

/// Parse one field of `kind` starting at `cursor`, returning the field and
/// the cursor to resume from. `line_no` is carried only for error context.
fn parse_field(
    line: &str,
    cursor: usize,
    kind: FieldKind,
    opcode: &str,
    line_no: usize,
) -> Result<(Field, usize)> {
    match kind {
        FieldKind::Opcode => {
            let mut c = cursor;
            let mut consumed = String::new();
            for (i, word) in opcode.split(' ').enumerate() {
                if i > 0 {
                    consumed.push(' ');
                }
                let (text, next) = tokenizer::next_identifier(line, c);
                if text != word {
                    return Err(schema_error(line_no, opcode, &format!("expected keyword '{word}'")));
                }
                consumed.push_str(&text);
                c = if next < 0 { line.len() } else { next as usize };
            }
            Ok((Field::Text(consumed), c))
        }
        FieldKind::Ident | FieldKind::Enum | FieldKind::Variant => {
            let (text, next) = tokenizer::next_identifier(line, cursor);
            if next == tokenizer::EOL {
                return Err(schema_error(line_no, opcode, "expected identifier"));
            }
            Ok((Field::Text(text), next as usize))
        }
        FieldKind::OptionalEnum => {
            let (text, next) = tokenizer::next_identifier(line, cursor);
            if next == tokenizer::EOL {
                Ok((Field::Text(String::new()), cursor))
            } else {
                Ok((Field::Text(text), next as usize))
            }
        }
        FieldKind::Equals => {
            let pos = line[cursor..]
                .find('=')
                .ok_or_else(|| schema_error(line_no, opcode, "expected '='"))?
                + cursor;
            Ok((Field::Text("=".to_string()), pos + 1))
        }
        FieldKind::CoordFloat => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected a float coordinate tuple"))?;
            let x: f64 = elems[0].parse().map_err(|_| schema_error(line_no, opcode, "bad x"))?;
            let y: f64 = elems[1].parse().map_err(|_| schema_error(line_no, opcode, "bad y"))?;
            let z = elems.get(2).and_then(|s| s.parse().ok());
            Ok((Field::CoordFloat(x, y, z), next))
        }
        FieldKind::CoordByte => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected a byte coordinate tuple"))?;
            let x: i32 = elems[0].parse().map_err(|_| schema_error(line_no, opcode, "bad x"))?;
            let y: i32 = elems[1].parse().map_err(|_| schema_error(line_no, opcode, "bad y"))?;
            let z = elems.get(2).and_then(|s| s.parse().ok());
            Ok((Field::CoordByte(x, y, z), next))
        }
        FieldKind::WidthHeight => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected a width/height tuple"))?;
            let w: f64 = elems[0].parse().map_err(|_| schema_error(line_no, opcode, "bad w"))?;
            let h: f64 = elems[1].parse().map_err(|_| schema_error(line_no, opcode, "bad h"))?;
            Ok((Field::WidthHeight(w, h), next))
        }
        FieldKind::Rotation | FieldKind::ReverseRotation => {
            let (value, next) = tokenizer::next_integer(line, cursor);
            let value = value.ok_or_else(|| schema_error(line_no, opcode, "expected a rotation angle"))?;
            Ok((Field::Rotation(value as i32), next as usize))
        }
        FieldKind::FaceDirection => {
            let (text, next) = tokenizer::next_identifier(line, cursor);
            let face =
                parse_face(&text).ok_or_else(|| schema_error(line_no, opcode, "expected a face direction"))?;
            Ok((Field::FaceDirection(face), next as usize))
        }
        FieldKind::Velocity => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected a velocity tuple"))?;
            let vx: f64 = elems[0].parse().map_err(|_| schema_error(line_no, opcode, "bad vx"))?;
            let vy: f64 = elems[1].parse().map_err(|_| schema_error(line_no, opcode, "bad vy"))?;
            Ok((Field::Velocity(vx, vy), next))
        }
        FieldKind::Rgb => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected an RGB triple"))?;
            let r: u8 = elems[0].parse().map_err(|_| schema_error(line_no, opcode, "bad r"))?;
            let g: u8 = elems[1].parse().map_err(|_| schema_error(line_no, opcode, "bad g"))?;
            let b: u8 = elems[2].parse().map_err(|_| schema_error(line_no, opcode, "bad b"))?;
            Ok((Field::Rgb(r, g, b), next))
        }
        FieldKind::Number => {
            let (value, next) = tokenizer::next_integer(line, cursor);
            let value = value.ok_or_else(|| schema_error(line_no, opcode, "expected a number"))?;
            Ok((Field::Number(value), next as usize))
        }
        FieldKind::OptionalNumber => {
            let (value, next) = tokenizer::next_integer(line, cursor);
            if next == tokenizer::ABSENT {
                Ok((Field::OptionalNumber(None), cursor))
            } else {
                Ok((Field::OptionalNumber(value), next as usize))
            }
        }
        FieldKind::Float => {
            let (value, next) = tokenizer::next_float(line, cursor);
            let value = value.ok_or_else(|| schema_error(line_no, opcode, "expected a float"))?;
            Ok((Field::Float(value), next as usize))
        }
        FieldKind::FlipToggle => {
            let (text, next) = tokenizer::next_identifier(line, cursor);
            let flipped = match text.as_str() {
                "FLIP" => true,
                "NOT_FLIP" => false,
                _ => return Err(schema_error(line_no, opcode, "expected FLIP or NOT_FLIP")),
            };
            Ok((Field::FlipToggle(flipped), next as usize))
        }
        FieldKind::TrailingEnd => {
            let (text, next) = tokenizer::next_identifier(line, cursor);
            if text == "END" {
                Ok((Field::Text("END".to_string()), next as usize))
            } else {
                Ok((Field::Text(String::new()), cursor))
            }
        }
        FieldKind::GangInfo | FieldKind::ThreadArea | FieldKind::ThreadBlock => {
            let (elems, next) = tokenizer::parenthesised_tuple(line, cursor)
                .ok_or_else(|| schema_error(line_no, opcode, "expected a parenthesised block"))?;
            Ok((Field::Raw(elems.join(", ")), next))
        }
    }
}

fn schema_error(line_no: usize, opcode: &str, reason: &str) -> XformError {
    XformError::SchemaParseFailure {
        line: line_no,
        opcode: opcode.to_string(),
        reason: reason.to_string(),
    }
}

/// Transform one already-parsed field in place, per its kind and the
/// command's post-transform flags.
fn transform_field(field: Field, kind: FieldKind, symmetry: Symmetry, flags: SchemaFlags) -> Field {
    match (field, kind) {
        (Field::CoordFloat(x, y, z), FieldKind::CoordFloat) => {
            let (nx, ny) = geometry::transform_coord_f64(x, y, symmetry);
            Field::CoordFloat(nx, ny, z)
        }
        (Field::CoordByte(x, y, z), FieldKind::CoordByte) => {
            let (nx, ny) = geometry::transform_coord_i32(x, y, symmetry);
            Field::CoordByte(nx, ny, z)
        }
        (Field::WidthHeight(w, h), FieldKind::WidthHeight) => {
            let (nw, nh) = geometry::transform_wh(w, h, symmetry);
            Field::WidthHeight(nw, nh)
        }
        (Field::Rotation(theta), FieldKind::Rotation) => {
            let effective = if flags.swap_axis { swap_flip_axis(symmetry) } else { symmetry };
            Field::Rotation(geometry::transform_angle(theta, effective))
        }
        (Field::Rotation(theta), FieldKind::ReverseRotation) => {
            Field::Rotation(reverse_angle(theta, symmetry))
        }
        (Field::FaceDirection(face), FieldKind::FaceDirection) => {
            Field::FaceDirection(face.transform(symmetry))
        }
        (Field::Velocity(vx, vy), FieldKind::Velocity) => {
            let (nvx, nvy) = match symmetry {
                Symmetry::FlipX => (-vx, vy),
                Symmetry::FlipY => (vx, -vy),
                Symmetry::FlipXY => (-vx, -vy),
                _ => (vx, vy),
            };
            Field::Velocity(nvx, nvy)
        }
        (Field::FlipToggle(flipped), FieldKind::FlipToggle) => {
            let toggled = if symmetry.is_flip() && symmetry != Symmetry::FlipXY {
                !flipped
            } else {
                flipped
            };
            Field::FlipToggle(toggled)
        }
        (other, _) => other,
    }
}

/// `CHANGE_BLOCK LID` uses the reverse-angle convention: the rotation
/// addend is negated relative to the standard angle transform.
fn reverse_angle(theta: i32, symmetry: Symmetry) -> i32 {
    let negated = (-theta).rem_euclid(360);
    geometry::transform_angle(negated, symmetry)
}

/// Phone-kind objects consult the opposite flip axis for their angle rule.
fn swap_flip_axis(symmetry: Symmetry) -> Symmetry {
    match symmetry {
        Symmetry::FlipX => Symmetry::FlipY,
        Symmetry::FlipY => Symmetry::FlipX,
        other => other,
    }
}

fn format_field(field: &Field) -> String {
    match field {
        Field::Text(t) => t.clone(),
        Field::CoordFloat(x, y, z) => match z {
            Some(z) => format!("({x:.2}, {y:.2}, {z:.2})"),
            None => format!("({x:.2}, {y:.2})"),
        },
        Field::CoordByte(x, y, z) => match z {
            Some(z) => format!("({x}, {y}, {z})"),
            None => format!("({x}, {y})"),
        },
        Field::WidthHeight(w, h) => format!("({w:.2}, {h:.2})"),
        Field::Rotation(theta) => theta.to_string(),
        Field::FaceDirection(face) => face_name(*face).to_string(),
        Field::Velocity(vx, vy) => format!("({vx:.2}, {vy:.2})"),
        Field::Rgb(r, g, b) => format!("({r}, {g}, {b})"),
        Field::Number(n) => n.to_string(),
        Field::OptionalNumber(Some(n)) => n.to_string(),
        Field::OptionalNumber(None) => String::new(),
        Field::Float(f) => format!("{f:.2}"),
        Field::FlipToggle(true) => "FLIP".to_string(),
        Field::FlipToggle(false) => "NOT_FLIP".to_string(),
        Field::Raw(s) => format!("({s})"),
    }
}

/// Parse every field of `schema` out of `line`, transform each, and
/// re-emit with single-space separation (the canonical re-emit format).
fn run_schema(line: &str, schema: &Schema, symmetry: Symmetry, line_no: usize) -> Result<String> {
    let mut cursor = 0usize;
    let mut rendered = Vec::with_capacity(schema.fields.len());
    let mut door_face: Option<Face> = None;
    let mut byte_origin: Option<(i32, i32, Option<i32>)> = None;
    let mut is_double = false;
    let mut seen_enum = false;

    for &kind in schema.fields {
        let (field, next) = parse_field(line, cursor, kind, schema.opcode, line_no)?;
        cursor = next;

        if kind == FieldKind::Enum && !seen_enum {
            seen_enum = true;
            if let Field::Text(t) = &field {
                is_double = t == "DOUBLE";
            }
        }

        if kind == FieldKind::FaceDirection {
            if let Field::FaceDirection(f) = field {
                door_face = Some(f.transform(symmetry));
            }
        }

        let transformed = transform_field(field, kind, symmetry, schema.flags);

        if schema.flags.double_door && is_double && kind == FieldKind::CoordByte && byte_origin.is_none() {
            if let Field::CoordByte(x, y, z) = transformed {
                byte_origin = Some((x, y, z));
                rendered.push(String::new()); // placeholder, patched below
                continue;
            }
        }

        rendered.push(format_field(&transformed));
    }

    if schema.flags.double_door {
        if let (Some(face), Some((x, y, z))) = (door_face, byte_origin) {
            let (dx, dy) = schema::double_door_offset(face);
            let text = match z {
                Some(z) => format!("({}, {}, {})", x + dx, y + dy, z),
                None => format!("({}, {})", x + dx, y + dy),
            };
            if let Some(slot) = rendered.iter_mut().find(|s| s.is_empty()) {
                *slot = text;
            }
        }
    }

    Ok(rendered.into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" "))
}

/// Tokens that identify the command's class before a full schema lookup:
/// `CHANGE_BLOCK` commands are keyed on their first two words.
fn detect_keyword(line: &str) -> Option<String> {
    let (first, next) = tokenizer::next_identifier(line, 0);
    if first.is_empty() {
        return None;
    }
    if first == "CHANGE_BLOCK" && next >= 0 {
        let (second, _) = tokenizer::next_identifier(line, next as usize);
        if !second.is_empty() {
            return Some(format!("CHANGE_BLOCK {second}"));
        }
    }
    Some(first)
}

/// Transform one top-level script line: classify, parse, transform,
/// re-emit. Unrecognised lines pass through verbatim (minus their
/// trailing comment, which is re-attached untouched). A recognised
/// opcode whose operands don't match its schema logs and falls back to
/// pass-through for that line.
pub fn transform_line(line: &str, line_no: usize, symmetry: Symmetry) -> String {
    let leading_ws_len = line.len() - line.trim_start().len();
    let leading_ws = &line[..leading_ws_len];
    let rest = &line[leading_ws_len..];

    let (body, comment) = split_comment(rest);
    let keyword = detect_keyword(body);
    let schema = keyword.as_deref().and_then(schema::find_schema);

    if schema.is_none() && !contains_boolean_opcode(body) {
        // No recognised opcode anywhere on the line: preserve it byte for
        // byte, comment included.
        return line.to_string();
    }

    let rewritten = match schema {
        Some(schema) if schema.class != CommandClass::Boolean => {
            match run_schema(body, schema, symmetry, line_no) {
                Ok(text) => text,
                Err(err) => {
                    warn!("{err}; passing through");
                    body.to_string()
                }
            }
        }
        _ => crate::script::boolean::transform_boolean_line(body, symmetry, line_no),
    };

    let mut out = String::with_capacity(line.len());
    out.push_str(leading_ws);
    out.push_str(&rewritten);
    if let Some(comment) = comment {
        out.push_str(" // ");
        out.push_str(comment.trim());
    }
    out
}

fn contains_boolean_opcode(body: &str) -> bool {
    schema::boolean_keywords().any(|kw| body.contains(kw))
}

fn split_comment(body: &str) -> (&str, Option<&str>) {
    match body.find("//") {
        Some(pos) => (&body[..pos].trim_end(), Some(&body[pos + 2..])),
        None => (body.trim_end(), None),
    }
}

/// Transform a single isolated boolean-predicate call (e.g.
/// `IS_CAR_IN_BLOCK(c1, 100.50, 200.50, 2.00, 1.00, 1.00)`), used by the
/// boolean-line splitter. `line_no` is carried only for error context.
pub fn transform_recognised_call(call: &str, symmetry: Symmetry, line_no: usize) -> Result<String> {
    let keyword = call
        .split(|c: char| c == '(' || c.is_whitespace())
        .find(|s| !s.is_empty())
        .unwrap_or("");
    let schema = schema::find_schema(keyword)
        .ok_or_else(|| schema_error(line_no, keyword, "no boolean schema for this keyword"))?;
    let (elems, _) = tokenizer::parenthesised_tuple(call, 0)
        .ok_or_else(|| schema_error(line_no, keyword, "expected a parenthesised argument list"))?;

    // Boolean calls are always `KEYWORD(args...)`, with no `=` and the
    // opcode field folded into the keyword prefix already consumed above.
    let fields_after_opcode = schema.fields.iter().skip(1).copied();
    let mut rendered = Vec::new();
    let mut arg_idx = 0usize;
    let raw_args = elems;

    for kind in fields_after_opcode {
        match kind {
            FieldKind::Variant | FieldKind::Ident => {
                rendered.push(raw_args.get(arg_idx).cloned().unwrap_or_default());
                arg_idx += 1;
            }
            FieldKind::CoordFloat => {
                let x: f64 = raw_args.get(arg_idx).and_then(|s| s.parse().ok()).unwrap_or(0.0);
                let y: f64 = raw_args.get(arg_idx + 1).and_then(|s| s.parse().ok()).unwrap_or(0.0);
                let z: Option<f64> = raw_args.get(arg_idx + 2).and_then(|s| s.parse().ok());
                let (nx, ny) = geometry::transform_coord_f64(x, y, symmetry);
                rendered.push(format!("{nx:.2}"));
                rendered.push(format!("{ny:.2}"));
                if let Some(z) = z {
                    rendered.push(format!("{z:.2}"));
                    arg_idx += 3;
                } else {
                    arg_idx += 2;
                }
            }
            FieldKind::Number => {
                rendered.push(raw_args.get(arg_idx).cloned().unwrap_or_default());
                arg_idx += 1;
            }
            _ => {
                rendered.push(raw_args.get(arg_idx).cloned().unwrap_or_default());
                arg_idx += 1;
            }
        }
    }

    Ok(format!("{keyword}({})", rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_rotate_270_player_ped() {
        let line = "PLAYER_PED p1 = (113.50, 124.70, 255.00) 25 1";
        let out = transform_line(line, 1, Symmetry::Rot270);
        assert_eq!(out, "PLAYER_PED p1 = (124.70, 142.50, 255.00) 115 1");
    }

    #[test]
    fn scenario_flip_y_conveyor() {
        let line = "CONVEYOR conv1 = (9.50, 77.50, 3.00) (1.00, 13.00) 0 1";
        let out = transform_line(line, 1, Symmetry::FlipY);
        assert_eq!(out, "CONVEYOR conv1 = (9.50, 178.50, 3.00) (1.00, 13.00) 0 -1");
    }

    #[test]
    fn pass_through_line_is_untouched() {
        let line = "    // just a comment, no opcode here";
        assert_eq!(transform_line(line, 1, Symmetry::Rot90), line);
    }

    #[test]
    fn door_data_flip_x_moves_origin_and_keeps_face() {
        let line = "DOOR_DATA door12 = DOUBLE (77, 200, 2) (76.00, 201.50, 2.00, 3.00, 2.00) BOTTOM 0 ANY_PLAYER_ONE_CAR CLOSE_WHEN_OPEN_RULE_FAILS 0 FLIP_RIGHT NOT_REVERSED";
        let out = transform_line(line, 1, Symmetry::FlipX);
        // Origin byte coords (77,200,2) flip to (178,200,2); BOTTOM stays
        // BOTTOM under flipX, so the double-door +1-on-x rule applies.
        assert!(out.contains("(179, 200, 2)"), "got: {out}");
        assert!(out.contains("BOTTOM"));
    }

    #[test]
    fn trailing_comment_is_reattached() {
        let line = "PLAYER_PED p1 = (1.00, 2.00, 3.00) 0 1 // spawn point";
        let out = transform_line(line, 1, Symmetry::Identity);
        assert!(out.ends_with("// spawn point"));
    }

    #[test]
    fn unrecognised_opcode_passes_through_verbatim() {
        let line = "TOTALLY_MADE_UP_OPCODE 1 2 3";
        assert_eq!(transform_line(line, 1, Symmetry::FlipX), line);
    }
}
