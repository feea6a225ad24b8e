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

//! End-to-end round-trip coverage across a file on disk: a transform
//! followed by its inverse must reproduce the `UMAP`/`ZONE`/`LGHT`
//! regions byte-for-byte.

use std::io::Write;

use gridcity_xform::map::GmpFile;
use gridcity_xform::script;
use gridcity_xform::Symmetry;

fn sample_gmp_bytes() -> Vec<u8> {
    let side = 256usize;
    let layers = 8usize;
    let mut bytes = b"GBMP".to_vec();
    bytes.extend_from_slice(&3u16.to_le_bytes());

    let mut umap = vec![0u8; layers * side * side * 12];
    // A handful of non-empty blocks scattered through the grid.
    for i in [0usize, 40, 12345, 500000] {
        let off = i * 12;
        if off + 12 <= umap.len() {
            umap[off] = 9; // left face tile index
            umap[off + 11] = 1 | (5 << 2); // road type, half-slope id 5
        }
    }
    bytes.extend_from_slice(b"UMAP");
    bytes.extend_from_slice(&(umap.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&umap);

    let mut zone = vec![0u8; 0];
    zone.extend_from_slice(&[1, 10, 20, 5, 6, 0]); // type, x, y, w, h, name_len=0
    bytes.extend_from_slice(b"ZONE");
    bytes.extend_from_slice(&(zone.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&zone);

    // An untouched chunk that must survive both passes unchanged.
    bytes.extend_from_slice(b"MOBJ");
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    bytes
}

#[test]
fn flip_x_round_trip_restores_the_source_file() {
    let original = sample_gmp_bytes();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("city.gmp");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&original)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let file = GmpFile::parse(bytes).unwrap();
    let once = file.transform(Symmetry::FlipX).unwrap();

    let file2 = GmpFile::parse(once).unwrap();
    let twice = file2.transform(Symmetry::FlipX).unwrap();

    assert_eq!(twice, original, "flipX . flipX must restore the original bytes");
}

#[test]
fn script_transform_is_idempotent_under_identity() {
    let script_text = "PLAYER_PED p1 = (10.00, 20.00, 0.00) 90 1\nREMOVE_BLOCK (5, 5, 0)\n";
    let out = script::transform_script(script_text, Symmetry::Identity).unwrap();
    assert_eq!(out.lines().count(), script_text.lines().count());
}

#[test]
fn script_transform_refuses_flip_xy() {
    let err = script::transform_script("PLAYER_PED p1 = (1.00, 2.00, 3.00) 0 1", Symmetry::FlipXY)
        .unwrap_err();
    assert!(matches!(err, gridcity_xform::XformError::UnsupportedSymmetry));
}
