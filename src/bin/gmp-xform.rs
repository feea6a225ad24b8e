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

//! Command-line front end for the map transformer.
//!
//! Exactly one of `--flip-x`/`--flip-y` (both together means flipXY) or a
//! positional rotation angle selects the symmetry; the source file is
//! never modified, a sibling `<name>_flip_{x,y,xy}.gmp` or
//! `<name>_rotated.gmp` is written instead.

use std::path::{Path, PathBuf};

use clap::Parser;
use gridcity_xform::map::GmpFile;
use gridcity_xform::Symmetry;

#[derive(Parser, Debug)]
#[command(name = "gmp-xform", about = "Rotate or mirror a GMP map file")]
struct Args {
    /// Path to the source `.gmp` file.
    gmp_path: PathBuf,

    /// Mirror across the X axis.
    #[arg(short = 'x', long = "flip_x")]
    flip_x: bool,

    /// Mirror across the Y axis.
    #[arg(short = 'y', long = "flip_y")]
    flip_y: bool,

    /// Rotate clockwise by this many degrees (0, 90, 180 or 270).
    rotation: Option<i32>,
}

fn select_symmetry(args: &Args) -> Result<Symmetry, String> {
    if args.flip_x || args.flip_y {
        return Ok(match (args.flip_x, args.flip_y) {
            (true, true) => Symmetry::FlipXY,
            (true, false) => Symmetry::FlipX,
            (false, true) => Symmetry::FlipY,
            (false, false) => unreachable!(),
        });
    }
    match args.rotation {
        Some(0) => Ok(Symmetry::Identity),
        Some(90) => Ok(Symmetry::Rot90),
        Some(180) => Ok(Symmetry::Rot180),
        Some(270) => Ok(Symmetry::Rot270),
        Some(other) => Err(format!("unsupported rotation angle: {other}")),
        None => Err("specify --flip_x/--flip_y or a rotation angle".to_string()),
    }
}

fn output_path(source: &Path, symmetry: Symmetry) -> PathBuf {
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("map");
    let dir = source.parent().unwrap_or_else(|| Path::new("."));
    let suffix = match symmetry {
        Symmetry::FlipX => "flip_x".to_string(),
        Symmetry::FlipY => "flip_y".to_string(),
        Symmetry::FlipXY => "flip_xy".to_string(),
        Symmetry::Identity => "rotated".to_string(),
        _ => "rotated".to_string(),
    };
    dir.join(format!("{stem}_{suffix}.gmp"))
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let symmetry = select_symmetry(&args)?;

    let bytes = std::fs::read(&args.gmp_path).map_err(|e| e.to_string())?;
    let file = GmpFile::parse(bytes).map_err(|e| e.to_string())?;
    let transformed = file.transform(symmetry).map_err(|e| e.to_string())?;

    let dest = output_path(&args.gmp_path, symmetry);
    std::fs::write(&dest, transformed).map_err(|e| e.to_string())?;
    log::info!("wrote {}", dest.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(err) = run() {
        eprintln!("gmp-xform: {err}");
        std::process::exit(1);
    }
}
