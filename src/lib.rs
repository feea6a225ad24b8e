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

//! gridcity-xform: geometric transforms for grid-city voxel maps and scripts
//!
//! This crate applies rotation (90/180/270 degrees) and axis reflection
//! (flip X / flip Y / flip XY) coherently across two artifacts of a 2D
//! top-down grid city game:
//!
//! - **GMP maps**: a chunked binary container holding an 8x256x256 voxel
//!   grid of blocks, plus auxiliary light and zone tables.
//! - **MIS scripts**: a line-oriented command language whose operands
//!   include coordinates, rotation angles, boxes, face directions and
//!   block references.
//!
//! # Architecture
//!
//! - [`geometry`]: coordinate, angle, face-direction and arrow-nibble math.
//! - [`block`]: the 12-byte voxel codec and its symmetry transform.
//! - [`container`]: chunk discovery inside a `GBMP` file.
//! - [`map`]: applies the block codec across a whole map, plus lights/zones.
//! - [`script`]: tokenizer, command schemas, transformer and the
//!   boolean-line splitter for MIS scripts.
//!
//! # Error Handling
//!
//! All fallible operations return [`error::Result<T>`], an alias for
//! `Result<T, XformError>`.

pub mod block;
pub mod container;
pub mod error;
pub mod geometry;
pub mod map;
pub mod script;

pub use error::{Result, XformError};
pub use geometry::Symmetry;
