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

//! Command-line front end for the script transformer.
//!
//! Writes the rewritten script into a sibling `<name>_flip_{x,y}` or
//! `<name>_rotated_{angle}` folder, and mirrors an optional `<name>/`
//! mission-subscripts directory beside it. FlipXY is refused; rot180 is
//! the one the engine actually supports.

use std::path::{Path, PathBuf};

use clap::Parser;
use gridcity_xform::Symmetry;

#[derive(Parser, Debug)]
#[command(name = "mis-xform", about = "Rotate or mirror a MIS mission script")]
struct Args {
    /// Path to the source `.mis` file.
    mis_path: PathBuf,

    #[arg(short = 'x', long = "flip_x")]
    flip_x: bool,

    #[arg(short = 'y', long = "flip_y")]
    flip_y: bool,

    /// Rotate clockwise by this many degrees (0, 90, 180 or 270).
    rotation: Option<i32>,
}

fn select_symmetry(args: &Args) -> Result<Symmetry, String> {
    if args.flip_x && args.flip_y {
        return Err(
            "flipXY is not supported for scripts; use a 180 degree rotation instead".to_string(),
        );
    }
    if args.flip_x {
        return Ok(Symmetry::FlipX);
    }
    if args.flip_y {
        return Ok(Symmetry::FlipY);
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

fn output_dir(source: &Path, symmetry: Symmetry) -> PathBuf {
    let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("mission");
    let parent = source.parent().unwrap_or_else(|| Path::new("."));
    let suffix = match symmetry {
        Symmetry::FlipX => "flip_x".to_string(),
        Symmetry::FlipY => "flip_y".to_string(),
        Symmetry::Rot90 => "rotated_90".to_string(),
        Symmetry::Rot180 => "rotated_180".to_string(),
        Symmetry::Rot270 => "rotated_270".to_string(),
        _ => "rotated_0".to_string(),
    };
    parent.join(format!("{stem}_{suffix}"))
}

fn mirror_subscripts(source_dir: &Path, dest_dir: &Path, symmetry: Symmetry) -> Result<(), String> {
    if !source_dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dest_dir).map_err(|e| e.to_string())?;
    for entry in std::fs::read_dir(source_dir).map_err(|e| e.to_string())? {
        let entry = entry.map_err(|e| e.to_string())?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("mis") {
            let text = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
            let transformed =
                gridcity_xform::script::transform_script(&text, symmetry).map_err(|e| e.to_string())?;
            let dest = dest_dir.join(path.file_name().unwrap());
            std::fs::write(dest, transformed).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let symmetry = select_symmetry(&args)?;

    let text = std::fs::read_to_string(&args.mis_path).map_err(|e| e.to_string())?;
    let transformed = gridcity_xform::script::transform_script(&text, symmetry).map_err(|e| e.to_string())?;

    let dest_dir = output_dir(&args.mis_path, symmetry);
    std::fs::create_dir_all(&dest_dir).map_err(|e| e.to_string())?;
    let file_name = args.mis_path.file_name().unwrap();
    std::fs::write(dest_dir.join(file_name), transformed).map_err(|e| e.to_string())?;

    let stem = args.mis_path.file_stem().and_then(|s| s.to_str()).unwrap_or("mission");
    let subscripts_dir = args.mis_path.with_file_name(stem);
    mirror_subscripts(&subscripts_dir, &dest_dir.join(stem), symmetry)?;

    log::info!("wrote mission folder {}", dest_dir.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(err) = run() {
        eprintln!("mis-xform: {err}");
        std::process::exit(1);
    }
}
