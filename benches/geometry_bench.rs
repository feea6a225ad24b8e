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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridcity_xform::block::Block;
use gridcity_xform::geometry::{transform_coord_i32, Symmetry};

fn bench_coord_transform(c: &mut Criterion) {
    c.bench_function("transform_coord_i32 rot90", |b| {
        b.iter(|| transform_coord_i32(black_box(113), black_box(200), Symmetry::Rot90))
    });
}

fn bench_block_transform(c: &mut Criterion) {
    let mut bytes = [0u8; 12];
    bytes[0..2].copy_from_slice(&5u16.to_le_bytes());
    bytes[11] = 1 | (11 << 2);
    let block = Block::decode(&bytes);

    c.bench_function("block transform flip_x", |b| {
        b.iter(|| black_box(block).transform(Symmetry::FlipX))
    });
}

criterion_group!(benches, bench_coord_transform, bench_block_transform);
criterion_main!(benches);
